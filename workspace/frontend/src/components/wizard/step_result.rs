use wizard::{AccuracyBand, ProjectedResult, ResultSummary};
use yew::prelude::*;

use super::influence_list::InfluenceList;
use super::result_chart::ResultChart;
use super::view::StepProps;

fn band_class(band: AccuracyBand) -> &'static str {
    match band {
        AccuracyBand::Good => "bg-success text-success-content",
        AccuracyBand::Fair => "bg-warning text-warning-content",
        AccuracyBand::Poor => "bg-orange-200 text-orange-900",
        AccuracyBand::Critical => "bg-error text-error-content",
    }
}

fn metric_cards(summary: &ResultSummary) -> Html {
    let wmape = summary.wmape_pct.map(|wmape| {
        let class = summary.accuracy().map(band_class).unwrap_or("bg-base-200");
        html! {
            <div class={classes!("stat", "rounded-box", class)}>
                <div class="stat-title">{"WMAPE"}</div>
                <div class="stat-value">{format!("{:.2}%", wmape)}</div>
                <div class="stat-desc">{summary.accuracy().map(|b| b.label()).unwrap_or_default()}</div>
            </div>
        }
    });

    let bias = summary.bias_pct.map(|bias| html! {
        <div class="stat rounded-box bg-info text-info-content">
            <div class="stat-title">{"Bias"}</div>
            <div class="stat-value">{format!("{:.2}%", bias)}</div>
        </div>
    });

    let model = summary.model_used.as_ref().map(|model| html! {
        <div class="stat rounded-box bg-base-200">
            <div class="stat-title">{"Modelo"}</div>
            <div class="stat-value text-xl">{model}</div>
            {match summary.auto_selected {
                Some(true) => html! { <div class="stat-desc">{"Seleção Automática"}</div> },
                Some(false) => html! { <div class="stat-desc">{"Seleção Manual"}</div> },
                None => html! {},
            }}
        </div>
    });

    let scope = if summary.all_products {
        Some(html! {
            <div class="stat rounded-box bg-base-200">
                <div class="stat-title">{"SKUs"}</div>
                <div class="stat-value text-xl">{"Todos"}</div>
            </div>
        })
    } else if let Some(sku) = &summary.sku {
        Some(html! {
            <div class="stat rounded-box bg-base-200">
                <div class="stat-title">{"SKU"}</div>
                <div class="stat-value text-xl">{sku}</div>
                <div class="stat-desc">{"SKU Individual"}</div>
            </div>
        })
    } else {
        summary.skus_count.map(|count| html! {
            <div class="stat rounded-box bg-base-200">
                <div class="stat-title">{"SKUs"}</div>
                <div class="stat-value text-xl">{count}</div>
                {if let Some(label) = summary.aggregation_label {
                    html! { <div class="stat-desc">{format!("Agregação: {}", label)}</div> }
                } else {
                    html! {}
                }}
            </div>
        })
    };

    html! {
        <div class="grid grid-cols-1 md:grid-cols-4 gap-4">
            {for [wmape, bias, model, scope].into_iter().flatten()}
        </div>
    }
}

fn filters_panel(projected: &ProjectedResult) -> Html {
    if projected.filters.is_empty() {
        return html! {};
    }

    html! {
        <div class="rounded-box border border-base-300 p-4">
            <h3 class="font-semibold mb-3">{"Filtros Aplicados"}</h3>
            <div class="grid grid-cols-1 md:grid-cols-4 gap-3">
                {for projected.filters.iter().map(|filter| html! {
                    <div class="rounded-lg bg-base-200 p-3">
                        <p class="text-xs text-gray-500">{filter.label}</p>
                        <p class="font-semibold">{&filter.value}</p>
                    </div>
                })}
            </div>
        </div>
    }
}

#[function_component(StepResult)]
pub fn step_result(props: &StepProps) -> Html {
    let projected = props.handle.read().projection().cloned().unwrap_or_default();
    let summary = &projected.summary;

    let on_back = {
        let handle = props.handle.clone();
        Callback::from(move |_| {
            handle.update(|wizard| wizard.retreat());
        })
    };

    let on_restart = {
        let handle = props.handle.clone();
        Callback::from(move |_| {
            handle.update(|wizard| wizard.reset());
        })
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body gap-6">
                <div class="flex justify-between items-center">
                    <h2 class="card-title text-2xl">{"Resultado"}</h2>
                    <div class="flex gap-3 items-center text-sm">
                        {if let Some(run_id) = &summary.run_id {
                            html! { <span class="text-gray-400">{format!("ID: {}", run_id)}</span> }
                        } else {
                            html! {}
                        }}
                        {if let Some(seconds) = summary.elapsed_seconds {
                            html! { <span class="badge badge-outline">{format!("Tempo de execução: {:.3}s", seconds)}</span> }
                        } else {
                            html! {}
                        }}
                    </div>
                </div>

                {metric_cards(summary)}
                {filters_panel(&projected)}

                <ResultChart series={projected.series.clone()} />
                <InfluenceList factors={projected.influences.clone()} />

                <div class="flex justify-between">
                    <button class="btn btn-ghost" onclick={on_back}>
                        <i class="fas fa-arrow-left"></i>
                        {" Voltar"}
                    </button>
                    <button class="btn btn-primary" onclick={on_restart}>
                        <i class="fas fa-redo"></i>
                        {" Nova Simulação"}
                    </button>
                </div>
            </div>
        </div>
    }
}
