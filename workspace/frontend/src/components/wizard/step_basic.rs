use wizard::state::HORIZON_CHOICES;
use wizard::ForecastModel;
use yew::prelude::*;

use super::external_factors::ExternalFactors;
use super::view::StepProps;

fn model_hint(model: ForecastModel) -> &'static str {
    match model {
        ForecastModel::Auto => "Melhor fit por SKU",
        ForecastModel::Prophet => "Séries com sazonalidade",
        ForecastModel::XGBoost => "Gradient boosting",
        ForecastModel::Ml => "Ensemble de ML",
    }
}

#[function_component(StepBasic)]
pub fn step_basic(props: &StepProps) -> Html {
    let (horizon, model) = {
        let wizard = props.handle.read();
        (wizard.state().horizon_months(), wizard.state().model())
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body gap-6">
                <div>
                    <h2 class="card-title text-2xl">{"Configuração Básica"}</h2>
                    <p class="text-sm text-gray-500">{"Defina os parâmetros principais da previsão"}</p>
                </div>

                <div>
                    <label class="label"><span class="label-text font-semibold">{"Horizonte de Previsão"}</span></label>
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                        {for HORIZON_CHOICES.iter().map(|months| {
                            let months = *months;
                            let handle = props.handle.clone();
                            let onclick = Callback::from(move |_| {
                                handle.try_edit(|state| state.set_horizon(months));
                            });
                            html! {
                                <button
                                    key={months}
                                    class={classes!("btn", if months == horizon { "btn-primary" } else { "btn-outline" })}
                                    {onclick}
                                >
                                    {format!("{} meses", months)}
                                </button>
                            }
                        })}
                    </div>
                </div>

                <div>
                    <label class="label"><span class="label-text font-semibold">{"Modelo de Previsão"}</span></label>
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                        {for ForecastModel::ALL.iter().map(|option| {
                            let option = *option;
                            let selected = option == model;
                            let handle = props.handle.clone();
                            let onclick = Callback::from(move |_| {
                                handle.edit(|state| state.set_model(option));
                            });
                            html! {
                                <button
                                    key={option.tag()}
                                    class={classes!("btn", "h-auto", "py-3", "flex-col", "items-start", if selected { "btn-primary" } else { "btn-outline" })}
                                    {onclick}
                                >
                                    <span>{option.label()}</span>
                                    <span class="text-xs opacity-70 font-normal">{model_hint(option)}</span>
                                </button>
                            }
                        })}
                    </div>
                </div>

                <ExternalFactors handle={props.handle.clone()} />
            </div>
        </div>
    }
}
