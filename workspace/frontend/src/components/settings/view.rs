use common::Range;
use web_sys::{FormData, HtmlFormElement};
use yew::prelude::*;

use crate::settings::{self, AppSettings, PlanCollection, SocialMode};
use crate::ui::ToastContext;

/// Builds settings from the submitted form on top of `current`.
fn read_form(form: &HtmlFormElement, current: &AppSettings) -> Option<AppSettings> {
    let data = FormData::new_with_form(form).ok()?;
    let field = |name: &str| data.get(name).as_string().unwrap_or_default();

    let mut next = current.clone();
    next.api_base_url = field("api_base_url").trim().trim_end_matches('/').to_string();
    if !field("login_url").trim().is_empty() {
        next.login_url = field("login_url").trim().to_string();
    }
    next.social_mode = field("social_mode").parse().unwrap_or(current.social_mode);
    next.plan_collection = field("plan_collection").parse().unwrap_or(current.plan_collection);
    next.default_range = field("default_range").parse().unwrap_or(current.default_range);
    next.show_user_picker = data.get("show_user_picker").as_string().is_some();
    next.toast_duration_ms = field("toast_duration_ms").parse().unwrap_or(current.toast_duration_ms);
    Some(next)
}

fn option(value: &str, label: &str, selected: bool) -> Html {
    html! { <option value={value.to_string()} selected={selected}>{label.to_string()}</option> }
}

#[function_component(Settings)]
pub fn settings_view() -> Html {
    let current = use_state(settings::get_settings);
    let form_ref = use_node_ref();
    let toast_ctx = use_context::<ToastContext>();

    let on_submit = {
        let current = current.clone();
        let form_ref = form_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let Some(next) = read_form(&form, &current) else {
                log::error!("Could not read settings form");
                return;
            };
            if let Err(e) = next.save_to_storage() {
                log::error!("Failed to save settings: {:?}", e);
                if let Some(toast_ctx) = &toast_ctx {
                    toast_ctx.show_error("Failed to save settings".to_string());
                }
                return;
            }
            log::info!("Settings saved, reloading");
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().reload() {
                    log::error!("Reload failed: {:?}", e);
                }
            }
        })
    };

    let s = &*current;
    html! {
        <div class="card bg-base-100 shadow max-w-2xl">
            <div class="card-body">
                <h2 class="card-title">{"Application Settings"}</h2>
                <form ref={form_ref} onsubmit={on_submit} class="space-y-4 mt-4">
                    <div class="form-control w-full">
                        <label class="label"><span class="label-text">{"API Base URL"}</span></label>
                        <input name="api_base_url" type="text" placeholder="Empty = same origin" class="input input-bordered w-full" value={s.api_base_url.clone()} />
                    </div>
                    <div class="form-control w-full">
                        <label class="label"><span class="label-text">{"Login page"}</span></label>
                        <input name="login_url" type="text" class="input input-bordered w-full" value={s.login_url.clone()} />
                    </div>
                    <div class="form-control w-full">
                        <label class="label"><span class="label-text">{"Social feed"}</span></label>
                        <select name="social_mode" class="select select-bordered w-full">
                            {option(SocialMode::Rest.as_str(), "Server", s.social_mode == SocialMode::Rest)}
                            {option(SocialMode::Local.as_str(), "Local demo", s.social_mode == SocialMode::Local)}
                        </select>
                    </div>
                    <div class="form-control w-full">
                        <label class="label"><span class="label-text">{"Plans"}</span></label>
                        <select name="plan_collection" class="select select-bordered w-full">
                            {option(PlanCollection::Daily.as_str(), "Day by day", s.plan_collection == PlanCollection::Daily)}
                            {option(PlanCollection::Mine.as_str(), "All my plans", s.plan_collection == PlanCollection::Mine)}
                        </select>
                    </div>
                    <div class="form-control w-full">
                        <label class="label"><span class="label-text">{"Default range"}</span></label>
                        <select name="default_range" class="select select-bordered w-full">
                            { for Range::ALL.iter().map(|r| option(r.as_str(), r.label(), *r == s.default_range)) }
                        </select>
                    </div>
                    <div class="form-control w-full">
                        <label class="label"><span class="label-text">{"Toast duration (ms)"}</span></label>
                        <input name="toast_duration_ms" type="number" min="500" class="input input-bordered w-full" value={s.toast_duration_ms.to_string()} />
                    </div>
                    <label class="label cursor-pointer justify-start gap-4">
                        <input name="show_user_picker" type="checkbox" class="checkbox" checked={s.show_user_picker} />
                        <span class="label-text">{"Show user picker on the record tab"}</span>
                    </label>
                    <div class="card-actions justify-end">
                        <button type="submit" class="btn btn-primary">{"Save & Reload"}</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
