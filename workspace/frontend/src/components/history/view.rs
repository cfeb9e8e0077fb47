use common::{HistoryFilter, HistoryPeriod, HistoryRecord, models_in};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api_client::history::get_history;
use crate::common::status::{EmptyState, render_remote};
use crate::hooks::use_remote;
use crate::settings;

#[derive(Properties, PartialEq)]
pub struct HistoryViewProps {
    /// Every run, with period, model and search filters; otherwise only the
    /// most recent few
    #[prop_or_default]
    pub show_all: bool,
}

fn render_record(record: &HistoryRecord) -> Html {
    html! {
        <div key={record.id_previsao.clone()} class="flex items-center justify-between rounded-lg bg-base-100 p-4 shadow-sm">
            <div>
                <p class="font-semibold">{record.details()}</p>
                <p class="text-xs text-gray-500">{record.processed_at_label()}</p>
            </div>
            <div class="flex gap-2 items-center">
                if let Some(model) = &record.ds_modelo {
                    <span class="badge badge-outline">{model}</span>
                }
                if let Some(count) = record.qtd_total_skus {
                    <span class="badge badge-ghost">{format!("{} SKUs", count)}</span>
                }
                <span class="text-xs text-gray-400">{&record.id_previsao}</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct FiltersCardProps {
    filter: HistoryFilter,
    models: Vec<String>,
    on_change: Callback<HistoryFilter>,
}

#[function_component(FiltersCard)]
fn filters_card(props: &FiltersCardProps) -> Html {
    let on_period = {
        let filter = props.filter.clone();
        props.on_change.reform(move |e: Event| {
            let key = e.target_unchecked_into::<HtmlSelectElement>().value();
            HistoryFilter {
                period: HistoryPeriod::from_key(&key).unwrap_or_default(),
                ..filter.clone()
            }
        })
    };
    let on_model = {
        let filter = props.filter.clone();
        props.on_change.reform(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            HistoryFilter {
                model: (!value.is_empty()).then_some(value),
                ..filter.clone()
            }
        })
    };
    let on_search = {
        let filter = props.filter.clone();
        props.on_change.reform(move |e: InputEvent| HistoryFilter {
            search: e.target_unchecked_into::<HtmlInputElement>().value(),
            ..filter.clone()
        })
    };
    let selected_model = props.filter.model.clone().unwrap_or_default();

    html! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body grid grid-cols-1 md:grid-cols-3 gap-3 p-4">
                <label class="form-control">
                    <span class="label-text">{"Período"}</span>
                    <select class="select select-bordered select-sm" onchange={on_period}>
                        {for HistoryPeriod::ALL.iter().map(|period| html! {
                            <option
                                key={period.key()}
                                value={period.key()}
                                selected={*period == props.filter.period}
                            >
                                {period.label()}
                            </option>
                        })}
                    </select>
                </label>
                <label class="form-control">
                    <span class="label-text">{"Modelo"}</span>
                    <select class="select select-bordered select-sm" onchange={on_model}>
                        <option value="" selected={selected_model.is_empty()}>{"Todos os modelos"}</option>
                        {for props.models.iter().map(|model| html! {
                            <option key={model.clone()} value={model.clone()} selected={*model == selected_model}>
                                {model}
                            </option>
                        })}
                    </select>
                </label>
                <label class="form-control">
                    <span class="label-text">{"Busca"}</span>
                    <input
                        type="search"
                        class="input input-bordered input-sm"
                        placeholder="Id ou detalhes da previsão"
                        value={props.filter.search.clone()}
                        oninput={on_search}
                    />
                </label>
            </div>
        </div>
    }
}

#[function_component(HistoryView)]
pub fn history_view(props: &HistoryViewProps) -> Html {
    let (remote, reload) = use_remote((), |_| get_history());
    let filter = use_state(HistoryFilter::default);
    let show_all = props.show_all;

    let on_filter = {
        let filter = filter.clone();
        Callback::from(move |next: HistoryFilter| filter.set(next))
    };

    let body = render_remote(&remote, &reload, |records: &Vec<HistoryRecord>| {
        let (shown, filters) = if show_all {
            let now = chrono::Local::now().naive_local();
            let card = html! {
                <FiltersCard filter={(*filter).clone()} models={models_in(records)} on_change={on_filter} />
            };
            (filter.apply(records, now), card)
        } else {
            let limit = settings::get_settings().history_limit;
            (records.iter().take(limit).cloned().collect(), Html::default())
        };

        html! {
            <>
                {filters}
                if shown.is_empty() {
                    <EmptyState message="Nenhuma previsão encontrada." />
                } else {
                    <div class="flex flex-col gap-2">
                        {for shown.iter().map(render_record)}
                    </div>
                }
            </>
        }
    });

    let title = if show_all { "Histórico de Previsões" } else { "Previsões Recentes" };

    html! {
        <div class="flex flex-col gap-4">
            <div class="flex justify-between items-center">
                <h2 class="text-lg font-semibold">{title}</h2>
                <button class="btn btn-sm btn-ghost" onclick={reload.reform(|_: MouseEvent| ())}>
                    <i class="fas fa-sync-alt"></i>
                </button>
            </div>
            {body}
        </div>
    }
}
