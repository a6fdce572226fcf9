use yew::prelude::*;

use crate::components::plans::PlanTab;
use crate::components::record::RecordTab;
use crate::components::social::SocialTab;
use crate::components::workout::WorkoutTab;
use crate::settings;
use crate::tabs::{Tab, TabAction, TabRouter};

/// Single-page shell. Every tab section stays mounted; only the `active`
/// class moves, so charts keep their containers across switches.
#[function_component(MainShell)]
pub fn main_shell() -> Html {
    let router = use_reducer(|| TabRouter::new(Tab::Record));
    let plan_collection = settings::get_settings().plan_collection;

    let nav_item = |tab: Tab| {
        let router = router.clone();
        let onclick = {
            let router = router.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                router.dispatch(TabAction::Activate(tab));
            })
        };
        html! {
            <li key={tab.section_id()}>
                <a class={classes!("nav-item", router.class_for(tab))} onclick={onclick}>{tab.label()}</a>
            </li>
        }
    };

    let section = |tab: Tab, content: Html| {
        html! {
            <section
                id={format!("tab-{}", tab.section_id())}
                class={classes!("tab-panel", router.class_for(tab))}
                hidden={!router.is_active(tab)}
            >
                {content}
            </section>
        }
    };

    html! {
        <>
            <ul class="menu menu-horizontal bg-base-100 rounded-box shadow mb-6">
                { for Tab::ALL.into_iter().map(nav_item) }
            </ul>
            {section(Tab::Record, html! { <RecordTab refresh={router.refresh_token} /> })}
            {section(Tab::Workout, html! { <WorkoutTab /> })}
            {section(Tab::Plan, html! { <PlanTab collection={plan_collection} /> })}
            {section(Tab::Social, html! { <SocialTab refresh={router.posts_token} /> })}
        </>
    }
}
