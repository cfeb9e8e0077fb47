use std::future::Future;

use yew::prelude::*;

use crate::common::toast::ToastContext;

/// State of a remote resource.
#[derive(Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(String),
}

/// Loads a resource on mount and again whenever `key` changes.
///
/// Returns the current state and a callback that reloads with the current key.
/// Responses for a key that is no longer current are dropped. Failures are
/// also reported as an error toast.
#[hook]
pub fn use_remote<K, T, F, Fut>(key: K, load: F) -> (UseStateHandle<FetchState<T>>, Callback<()>)
where
    K: Clone + PartialEq + 'static,
    T: 'static,
    F: Fn(K) -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    let state = use_state(|| FetchState::Loading);
    let toasts = use_context::<ToastContext>();
    let load = use_memo((), move |_| load);
    let generation = use_mut_ref(|| 0u32);

    let reload = {
        let state = state.clone();
        let key = key.clone();
        use_callback(key, move |_: (), key| {
            let state = state.clone();
            let toasts = toasts.clone();
            let generation = generation.clone();
            let future = (*load)(key.clone());

            *generation.borrow_mut() += 1;
            let issued = *generation.borrow();
            state.set(FetchState::Loading);

            wasm_bindgen_futures::spawn_local(async move {
                let outcome = future.await;
                if *generation.borrow() != issued {
                    log::debug!("Dropping stale response");
                    return;
                }
                match outcome {
                    Ok(data) => state.set(FetchState::Ready(data)),
                    Err(err) => {
                        if let Some(toasts) = &toasts {
                            toasts.error(err.clone());
                        }
                        state.set(FetchState::Failed(err));
                    }
                }
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with(key, move |_| {
            reload.emit(());
            || ()
        });
    }

    (state, reload)
}
