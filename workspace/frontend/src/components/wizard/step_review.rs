use wizard::state::EXTERNAL_FACTORS;
use yew::prelude::*;

use super::view::StepProps;
use crate::api_client::prediction::predict;
use crate::common::status::Spinner;
use crate::common::toast::ToastContext;
use crate::settings;

#[derive(Properties, PartialEq)]
struct SummaryRowProps {
    label: AttrValue,
    value: AttrValue,
}

#[function_component(SummaryRow)]
fn summary_row(props: &SummaryRowProps) -> Html {
    html! {
        <tr>
            <th class="w-1/3 text-gray-500 font-medium">{props.label.clone()}</th>
            <td>{props.value.clone()}</td>
        </tr>
    }
}

#[function_component(StepReview)]
pub fn step_review(props: &StepProps) -> Html {
    let toast_ctx = use_context::<ToastContext>();

    let wizard = props.handle.read();
    let state = wizard.state();
    let submitting = wizard.is_submitting();
    let last_error = wizard.last_error().map(str::to_string);
    let payload = wizard.preview_payload();

    let factors: Vec<&str> = EXTERNAL_FACTORS
        .iter()
        .filter(|(key, _, _)| state.factor_enabled(key))
        .map(|(_, label, _)| *label)
        .collect();

    let rows = html! {
        <>
            <SummaryRow label="Horizonte" value={format!("{} meses", state.horizon_months())} />
            <SummaryRow label="Modelo" value={state.model().label()} />
            <SummaryRow label="Granularidade" value={state.granularity().label()} />
            <SummaryRow label="Seleção" value={state.selection_summary()} />
            <SummaryRow
                label="Fatores externos"
                value={if factors.is_empty() { "Nenhum".to_string() } else { factors.join(", ") }}
            />
        </>
    };
    drop(wizard);

    let on_submit = {
        let handle = props.handle.clone();
        Callback::from(move |_| {
            let submission = match handle.update(|wizard| wizard.begin_submission()) {
                Ok(submission) => submission,
                Err(e) => {
                    log::warn!("Forecast not submitted: {}", e);
                    if let Some(toast_ctx) = &toast_ctx {
                        toast_ctx.warning(e.to_string());
                    }
                    return;
                }
            };

            let handle = handle.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = predict(&submission.payload).await;
                if let Some(toast_ctx) = &toast_ctx {
                    match &outcome {
                        Ok(_) => toast_ctx.success("Previsão gerada com sucesso"),
                        Err(e) => toast_ctx.error(format!("Erro ao executar a previsão: {}", e)),
                    }
                }
                handle.update(|wizard| wizard.complete_submission(submission.ticket, outcome));
            });
        })
    };

    let on_back = {
        let handle = props.handle.clone();
        Callback::from(move |_| {
            handle.update(|wizard| wizard.retreat());
        })
    };

    let timeout_s = settings::get_settings().request_timeout_ms / 1000;

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body gap-6">
                <div>
                    <h2 class="card-title text-2xl">{"Revisão"}</h2>
                    <p class="text-sm text-gray-500">{"Confira a configuração antes de gerar a previsão"}</p>
                </div>

                <table class="table">
                    <tbody>{rows}</tbody>
                </table>

                {match &payload {
                    Ok(request) => html! {
                        <div class="collapse collapse-arrow bg-base-200">
                            <input type="checkbox" />
                            <div class="collapse-title text-sm font-medium">{"Payload da requisição"}</div>
                            <div class="collapse-content">
                                <pre class="text-xs overflow-x-auto">
                                    {serde_json::to_string_pretty(request).unwrap_or_default()}
                                </pre>
                            </div>
                        </div>
                    },
                    Err(e) => html! {
                        <div class="alert alert-warning">
                            <i class="fas fa-exclamation-triangle"></i>
                            <span>{e.to_string()}</span>
                        </div>
                    },
                }}

                {if let Some(error) = last_error {
                    html! {
                        <div class="alert alert-error">
                            <i class="fas fa-exclamation-circle"></i>
                            <span>{error}</span>
                        </div>
                    }
                } else {
                    html! {}
                }}

                {if submitting {
                    html! {
                        <Spinner message={Some(AttrValue::from(format!("Gerando previsão... (até {} s)", timeout_s)))} />
                    }
                } else {
                    html! {}
                }}

                <div class="flex justify-between">
                    <button class="btn btn-ghost" disabled={submitting} onclick={on_back}>
                        <i class="fas fa-arrow-left"></i>
                        {" Voltar"}
                    </button>
                    <button class="btn btn-primary" disabled={submitting || payload.is_err()} onclick={on_submit}>
                        <i class="fas fa-play"></i>
                        {" Gerar Previsão"}
                    </button>
                </div>
            </div>
        </div>
    }
}
