use common::Plan;
use yew::prelude::*;

use crate::plans::time_range;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub plan: Plan,
    pub on_edit: Callback<Plan>,
    pub on_cancel: Callback<i32>,
}

#[function_component(PlanCard)]
pub fn plan_card(props: &Props) -> Html {
    let on_edit = {
        let plan = props.plan.clone();
        let on_edit = props.on_edit.clone();
        Callback::from(move |_| on_edit.emit(plan.clone()))
    };

    let on_cancel = {
        let id = props.plan.id;
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| {
            log::debug!("Cancel clicked for plan {}", id);
            on_cancel.emit(id)
        })
    };

    html! {
        <div class="card bg-base-100 shadow plan-card">
            <div class="card-body">
                <p class="text-sm text-gray-500">{time_range(&props.plan)}</p>
                <h3 class="card-title">{&props.plan.activity}</h3>
                <div class="card-actions justify-end">
                    <button class="btn btn-sm edit-btn" onclick={on_edit}>{"Edit"}</button>
                    <button class="btn btn-sm btn-error cancel-btn" onclick={on_cancel}>{"Cancel"}</button>
                </div>
            </div>
        </div>
    }
}
