use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_submit: Callback<String>,
}

#[function_component(Composer)]
pub fn composer(props: &Props) -> Html {
    let input_ref = use_node_ref();

    let on_click = {
        let input_ref = input_ref.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = input_ref.cast::<HtmlTextAreaElement>() {
                on_submit.emit(input.value());
                input.set_value("");
            }
        })
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <textarea
                    ref={input_ref}
                    id="post-content"
                    class="textarea textarea-bordered w-full"
                    placeholder="Share your workout..."
                    rows="3"
                ></textarea>
                <div class="card-actions justify-end">
                    <button class="btn btn-primary btn-sm" onclick={on_click}>{"Post"}</button>
                </div>
            </div>
        </div>
    }
}
