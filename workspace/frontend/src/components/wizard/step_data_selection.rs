use wizard::GranularityLevel;
use yew::prelude::*;

use super::combination_selector::CombinationSelector;
use super::sku_selector::SkuSelector;
use super::view::StepProps;

fn level_icon(level: GranularityLevel) -> &'static str {
    match level {
        GranularityLevel::All => "fas fa-globe",
        GranularityLevel::Combination => "fas fa-layer-group",
        GranularityLevel::BySku => "fas fa-barcode",
    }
}

#[function_component(StepDataSelection)]
pub fn step_data_selection(props: &StepProps) -> Html {
    let (granularity, summary) = {
        let wizard = props.handle.read();
        (wizard.state().granularity(), wizard.state().selection_summary())
    };

    let selector = match granularity {
        GranularityLevel::All => html! {
            <div class="alert alert-info">
                <i class="fas fa-info-circle"></i>
                <span>{"A previsão será gerada para todas as linhas, processos e classificações."}</span>
            </div>
        },
        GranularityLevel::Combination => html! { <CombinationSelector handle={props.handle.clone()} /> },
        GranularityLevel::BySku => html! { <SkuSelector handle={props.handle.clone()} /> },
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body gap-6">
                <div>
                    <h2 class="card-title text-2xl">{"Agregação/Seleção de Dados"}</h2>
                    <p class="text-sm text-gray-500">{"Escolha o nível de detalhe da previsão"}</p>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                    {for GranularityLevel::ALL.iter().map(|level| {
                        let level = *level;
                        let selected = level == granularity;
                        let handle = props.handle.clone();
                        let onclick = Callback::from(move |_| {
                            handle.edit(|state| state.set_granularity(level));
                        });
                        html! {
                            <button
                                key={level.tag()}
                                class={classes!("btn", "h-auto", "py-4", "flex-col", if selected { "btn-primary" } else { "btn-outline" })}
                                {onclick}
                            >
                                <i class={classes!(level_icon(level), "text-xl")}></i>
                                <span>{level.label()}</span>
                                <span class="text-xs opacity-70 font-normal">{level.description()}</span>
                            </button>
                        }
                    })}
                </div>

                {selector}

                {if summary.is_empty() {
                    html! {}
                } else {
                    html! { <p class="text-sm text-gray-500">{summary}</p> }
                }}
            </div>
        </div>
    }
}
