use common::SportCategory;
use yew::prelude::*;

use crate::plans::PlanDraft;

#[derive(Properties, PartialEq)]
pub struct PlanModalProps {
    /// `None` keeps the dialog closed.
    pub draft: Option<PlanDraft>,
    pub categories: Vec<SportCategory>,
    #[prop_or_default]
    pub busy: bool,
    pub on_close: Callback<()>,
    pub on_submit: Callback<PlanDraft>,
}

#[function_component(PlanModal)]
pub fn plan_modal(props: &PlanModalProps) -> Html {
    let form_ref = use_node_ref();

    let on_submit = {
        let form_ref = form_ref.clone();
        let on_submit = props.on_submit.clone();
        let id = props.draft.as_ref().and_then(|d| d.id);

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(form) = form_ref.cast::<web_sys::HtmlFormElement>() else {
                return;
            };
            let form_data = match web_sys::FormData::new_with_form(&form) {
                Ok(data) => data,
                Err(e) => {
                    log::error!("Could not read plan form: {:?}", e);
                    return;
                }
            };
            let field = |name: &str| form_data.get(name).as_string().unwrap_or_default();
            on_submit.emit(PlanDraft {
                id,
                activity: field("activity"),
                start: field("start_time"),
                end: field("end_time"),
            });
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    let draft = props.draft.clone().unwrap_or_default();
    let (title, button_text) = if draft.is_edit() {
        ("Edit Plan", "Update Plan")
    } else {
        ("Add Plan", "Add Plan")
    };

    html! {
        <dialog class={classes!("modal", props.draft.is_some().then_some("modal-open"))} id="plan-modal">
            <div class="modal-box">
                <h3 class="font-bold text-lg">{title}</h3>
                <form ref={form_ref} onsubmit={on_submit} class="py-4 space-y-4" id="plan-form">
                    <div class="form-control">
                        <label class="label"><span class="label-text">{"Activity"}</span></label>
                        <select name="activity" class="select select-bordered w-full">
                            <option value="" selected={draft.activity.is_empty()}>{"Choose an activity"}</option>
                            { for props.categories.iter().map(|c| html! {
                                <option value={c.name.clone()} selected={c.name == draft.activity}>{&c.name}</option>
                            }) }
                        </select>
                    </div>
                    <div class="form-control">
                        <label class="label"><span class="label-text">{"Start"}</span></label>
                        <input name="start_time" type="datetime-local" class="input input-bordered w-full" value={draft.start.clone()} />
                    </div>
                    <div class="form-control">
                        <label class="label"><span class="label-text">{"End"}</span></label>
                        <input name="end_time" type="datetime-local" class="input input-bordered w-full" value={draft.end.clone()} />
                    </div>
                    <div class="modal-action">
                        <button type="button" class="btn" onclick={on_close.clone()} disabled={props.busy}>
                            {"Close"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={props.busy}>
                            if props.busy {
                                <span class="loading loading-spinner"></span>
                            }
                            {button_text}
                        </button>
                    </div>
                </form>
            </div>
            <form class="modal-backdrop" method="dialog">
                <button onclick={on_close}>{"close"}</button>
            </form>
        </dialog>
    }
}
