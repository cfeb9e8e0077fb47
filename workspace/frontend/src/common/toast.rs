//! Transient notifications in the top-right corner.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::settings;

/// At most this many toasts are visible; older ones are dropped first.
const MAX_VISIBLE: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    fn classes(self) -> (&'static str, &'static str) {
        match self {
            ToastLevel::Info => ("alert-info", "fas fa-info-circle"),
            ToastLevel::Success => ("alert-success", "fas fa-check-circle"),
            ToastLevel::Warning => ("alert-warning", "fas fa-exclamation-triangle"),
            ToastLevel::Error => ("alert-error", "fas fa-exclamation-circle"),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
struct Toast {
    id: u32,
    level: ToastLevel,
    message: String,
}

enum ToastAction {
    Push(Toast),
    Dismiss(u32),
}

#[derive(Default, PartialEq)]
struct ToastQueue {
    toasts: Vec<Toast>,
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Push(toast) => {
                toasts.push(toast);
                let overflow = toasts.len().saturating_sub(MAX_VISIBLE);
                toasts.drain(..overflow);
            }
            ToastAction::Dismiss(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(ToastQueue { toasts })
    }
}

/// Handle for raising toasts from any component under [`ToastProvider`].
#[derive(Clone, PartialEq)]
pub struct ToastContext {
    notify: Callback<(ToastLevel, String)>,
}

impl ToastContext {
    pub fn notify(&self, level: ToastLevel, message: impl Into<String>) {
        self.notify.emit((level, message.into()));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(ToastLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(ToastLevel::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(ToastLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(ToastLevel::Error, message);
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let queue = use_reducer(ToastQueue::default);
    let next_id = use_mut_ref(|| 0u32);

    let context = {
        let dispatcher = queue.dispatcher();
        let notify = use_callback((), move |(level, message): (ToastLevel, String), _| {
            log::debug!("Toast ({:?}): {}", level, message);
            let id = {
                let mut next_id = next_id.borrow_mut();
                *next_id = next_id.wrapping_add(1);
                *next_id
            };
            dispatcher.dispatch(ToastAction::Push(Toast { id, level, message }));

            let dispatcher = dispatcher.clone();
            Timeout::new(settings::get_settings().toast_duration_ms, move || {
                dispatcher.dispatch(ToastAction::Dismiss(id));
            })
            .forget();
        });
        ToastContext { notify }
    };

    html! {
        <ContextProvider<ToastContext> context={context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for queue.toasts.iter().map(|toast| {
                    let (alert, icon) = toast.level.classes();
                    let dismiss = {
                        let dispatcher = queue.dispatcher();
                        let id = toast.id;
                        Callback::from(move |_: MouseEvent| dispatcher.dispatch(ToastAction::Dismiss(id)))
                    };
                    html! {
                        <div key={toast.id} class={classes!("alert", alert, "shadow-lg")}>
                            <i class={icon}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-xs btn-ghost btn-circle" onclick={dismiss}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}
