use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

/// Inline failure notice with an optional retry button. Requests are never
/// retried on their own, so this button is the only way to try again.
#[function_component(ErrorDisplay)]
pub fn error_display(props: &ErrorDisplayProps) -> Html {
    log::debug!("Showing error panel: {}", props.message);

    let retry = props.on_retry.clone().map(|on_retry| {
        Callback::from(move |_: MouseEvent| {
            log::debug!("Retry requested");
            on_retry.emit(());
        })
    });

    html! {
        <div class="alert alert-error my-4">
            <i class="fas fa-exclamation-circle"></i>
            <span>{&props.message}</span>
            if let Some(retry) = retry {
                <button class="btn btn-sm" onclick={retry}>
                    <i class="fas fa-redo"></i>{" Try Again"}
                </button>
            }
        </div>
    }
}
