use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub text: Option<AttrValue>,
    /// Smaller spinner for use inside cards.
    #[prop_or_default]
    pub compact: bool,
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    let (wrapper, size) = if props.compact {
        ("flex justify-center items-center py-4 gap-2", "loading-sm")
    } else {
        ("flex flex-col justify-center items-center py-12 gap-4", "loading-lg")
    };

    html! {
        <div class={wrapper}>
            <span class={classes!("loading", "loading-spinner", size)}></span>
            if let Some(text) = &props.text {
                <p class="text-sm text-gray-500">{text}</p>
            }
        </div>
    }
}
