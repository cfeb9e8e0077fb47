//! Placeholders shown while remote data is loading, missing or failed.

use yew::prelude::*;

use crate::hooks::FetchState;

#[derive(Properties, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_default]
    pub message: Option<AttrValue>,
}

#[function_component(Spinner)]
pub fn spinner(props: &SpinnerProps) -> Html {
    html! {
        <div class="flex flex-col items-center justify-center gap-3 py-10">
            <span class="loading loading-spinner loading-lg text-primary"></span>
            if let Some(message) = &props.message {
                <p class="text-sm text-gray-500">{message.clone()}</p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FailurePanelProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

#[function_component(FailurePanel)]
pub fn failure_panel(props: &FailurePanelProps) -> Html {
    html! {
        <div class="alert alert-error">
            <i class="fas fa-exclamation-circle"></i>
            <span>{props.message.clone()}</span>
            if let Some(on_retry) = props.on_retry.clone() {
                <button class="btn btn-sm" onclick={on_retry.reform(|_: MouseEvent| ())}>
                    <i class="fas fa-redo"></i>
                    {" Tentar novamente"}
                </button>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
    pub message: AttrValue,
    #[prop_or(AttrValue::Static("fas fa-inbox"))]
    pub icon: AttrValue,
}

#[function_component(EmptyState)]
pub fn empty_state(props: &EmptyStateProps) -> Html {
    html! {
        <div class="flex flex-col items-center gap-2 py-10 text-gray-400">
            <i class={classes!(props.icon.to_string(), "text-3xl")}></i>
            <p>{props.message.clone()}</p>
        </div>
    }
}

/// Renders `state` with the spinner or failure panel, handing ready data to
/// `ready`.
pub fn render_remote<T>(
    state: &FetchState<T>,
    on_retry: &Callback<()>,
    ready: impl FnOnce(&T) -> Html,
) -> Html {
    match state {
        FetchState::Loading => html! { <Spinner /> },
        FetchState::Failed(message) => html! {
            <FailurePanel message={AttrValue::from(message.clone())} on_retry={Some(on_retry.clone())} />
        },
        FetchState::Ready(data) => ready(data),
    }
}
