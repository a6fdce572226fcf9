use std::fmt::Display;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

use crate::hooks::FetchState;
use crate::ui::toast::ToastContext;

/// Runs `fetch_fn` on mount and whenever the returned callback is emitted.
/// Errors land in the state and, when a toast provider is present, in a toast.
#[hook]
pub fn use_fetch_with_refetch<T, E, F, Fut>(fetch_fn: F) -> (UseStateHandle<FetchState<T>>, Callback<()>)
where
    T: 'static,
    E: Display + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let fetch_state = use_state(|| FetchState::Loading);
    let toast_ctx = use_context::<ToastContext>();
    let fetch_fn = use_state(|| Rc::new(fetch_fn));

    let refetch = {
        let fetch_state = fetch_state.clone();
        let fetch_fn = fetch_fn.clone();

        use_callback(toast_ctx, move |_, toast_ctx| {
            let fetch_state = fetch_state.clone();
            let toast_ctx = toast_ctx.clone();
            let fetch_fn = fetch_fn.clone();

            fetch_state.set(FetchState::Loading);

            wasm_bindgen_futures::spawn_local(async move {
                let fut = (*fetch_fn)();
                match fut.await {
                    Ok(data) => fetch_state.set(FetchState::Success(data)),
                    Err(err) => {
                        let message = err.to_string();
                        fetch_state.set(FetchState::Error(message.clone()));
                        if let Some(toast_ctx) = toast_ctx {
                            toast_ctx.show_error(message);
                        }
                    }
                }
            });
        })
    };

    // Fetch on mount
    {
        let refetch = refetch.clone();
        use_effect_with((), move |_| {
            refetch.emit(());
            || ()
        });
    }

    (fetch_state, refetch)
}
