use chrono::Local;
use common::{format_total_time, Plan, Range};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

use super::plan_card::PlanCard;
use super::plan_modal::PlanModal;
use crate::api_client::plan::get_sport_categories;
use crate::api_client::record::{get_aero_anaerobic, RecordQuery};
use crate::charts::{ChartHandle, PlotlyRenderer};
use crate::dashboard::SPLIT_LABELS;
use crate::hooks::FetchState;
use crate::navigation::BrowserNavigator;
use crate::plans::{day_label, minutes_by_activity, total_minutes, HttpPlanStore, PlanDraft, PlanManager};
use crate::settings::{self, PlanCollection};
use crate::ui::{use_fetch_with_refetch, FetchRender, ToastContext};

const ACTIVITY_CHART_ID: &str = "activityChart";
const AEROBIC_CHART_ID: &str = "aerobicPieChart";

type Manager = PlanManager<HttpPlanStore, BrowserNavigator>;

#[derive(Default)]
struct PlanCharts {
    activity: Option<ChartHandle>,
    aerobic: Option<ChartHandle>,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub collection: PlanCollection,
}

#[function_component(PlanTab)]
pub fn plan_tab(props: &Props) -> Html {
    let today = Local::now().date_naive();
    let manager: Rc<Manager> = use_memo(props.collection, move |collection| {
        PlanManager::new(
            HttpPlanStore::new(*collection),
            BrowserNavigator,
            settings::get_settings().login_url,
            today,
        )
    });
    let day = use_state(|| today);
    let draft = use_state(|| None::<PlanDraft>);
    let busy = use_state(|| false);
    let charts: Rc<RefCell<PlanCharts>> = use_mut_ref(PlanCharts::default);
    let toast_ctx = use_context::<ToastContext>();

    let (plans, refetch) = {
        let manager = manager.clone();
        use_fetch_with_refetch(move || {
            let manager = manager.clone();
            async move { manager.list().await }
        })
    };
    let (categories, _) = use_fetch_with_refetch(get_sport_categories);

    {
        let charts = charts.clone();
        use_effect_with((), move |_| {
            let renderer = Rc::new(PlotlyRenderer);
            {
                let mut handles = charts.borrow_mut();
                handles.activity = ChartHandle::create_doughnut_chart(ACTIVITY_CHART_ID, &[], renderer.clone());
                handles.aerobic = ChartHandle::create_doughnut_chart(AEROBIC_CHART_ID, &SPLIT_LABELS, renderer);
            }

            wasm_bindgen_futures::spawn_local(async move {
                match get_aero_anaerobic(RecordQuery::new(Range::Week, None)).await {
                    Ok(split) => {
                        if let Some(chart) = &charts.borrow().aerobic {
                            chart.update_series(vec![vec![split.aerobic, split.anaerobic]]);
                        }
                    }
                    Err(e) => log::warn!("Weekly aerobic split unavailable: {}", e),
                }
            });
            || ()
        });
    }

    {
        let charts = charts.clone();
        use_effect_with((*plans).clone(), move |plans| {
            if let (Some(list), Some(chart)) = (plans.data(), &charts.borrow().activity) {
                let (labels, minutes) = minutes_by_activity(list);
                chart.update(labels, vec![minutes]);
            }
            || ()
        });
    }

    let shift_day = {
        let manager = manager.clone();
        let day = day.clone();
        let refetch = refetch.clone();
        move |offset: i64| {
            let manager = manager.clone();
            let day = day.clone();
            let refetch = refetch.clone();
            Callback::from(move |_: MouseEvent| {
                day.set(manager.shift_day(offset));
                refetch.emit(());
            })
        }
    };

    let on_add = {
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| draft.set(Some(PlanDraft::default())))
    };

    let on_edit = {
        let draft = draft.clone();
        Callback::from(move |plan: Plan| draft.set(Some(PlanDraft::from_plan(&plan))))
    };

    let on_close = {
        let draft = draft.clone();
        Callback::from(move |_| draft.set(None))
    };

    let on_submit = {
        let manager = manager.clone();
        let plans = plans.clone();
        let draft = draft.clone();
        let busy = busy.clone();
        let toast_ctx = toast_ctx.clone();
        Callback::from(move |submitted: PlanDraft| {
            let manager = manager.clone();
            let plans = plans.clone();
            let draft = draft.clone();
            let busy = busy.clone();
            let toast_ctx = toast_ctx.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = manager.submit_draft(&submitted).await;
                busy.set(false);
                match result {
                    Ok(saved) => {
                        plans.set(FetchState::from_result(saved.plans));
                        draft.set(None);
                        if let Some(toast_ctx) = toast_ctx {
                            toast_ctx.show_success("Plan saved".to_string());
                        }
                    }
                    Err(e) => {
                        log::warn!("Plan submission failed: {}", e);
                        manager.report_failure(&e);
                    }
                }
            });
        })
    };

    let on_cancel = {
        let manager = manager.clone();
        let plans = plans.clone();
        Callback::from(move |plan_id: i32| {
            let manager = manager.clone();
            let plans = plans.clone();
            wasm_bindgen_futures::spawn_local(async move {
                plans.set(FetchState::from_result(manager.cancel(plan_id).await));
            });
        })
    };

    let render_plans = {
        let on_edit = on_edit.clone();
        let on_cancel = on_cancel.clone();
        Callback::from(move |list: Vec<Plan>| {
            if list.is_empty() {
                return html! { <p class="text-gray-500">{"No plans yet."}</p> };
            }
            html! {
                <div class="grid grid-cols-1 gap-4" id="plan-list">
                    { for list.into_iter().map(|plan| {
                        let key = plan.id.to_string();
                        html! {
                            <PlanCard key={key} plan={plan} on_edit={on_edit.clone()} on_cancel={on_cancel.clone()} />
                        }
                    }) }
                </div>
            }
        })
    };

    let total = plans.data().map(|list| total_minutes(list)).unwrap_or(0);
    let daily = props.collection == PlanCollection::Daily;

    html! {
        <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
            <div class="lg:col-span-2 space-y-4">
                <div class="flex items-center justify-between">
                    if daily {
                        <div class="join">
                            <button id="prev-day" class="btn btn-sm join-item" onclick={shift_day(-1)}>{"<"}</button>
                            <span id="date-label" class="btn btn-sm join-item no-animation">{day_label(*day, today)}</span>
                            <button id="next-day" class="btn btn-sm join-item" onclick={shift_day(1)}>{">"}</button>
                        </div>
                    }
                    <span class="text-sm">{format!("Total: {}", format_total_time(total))}</span>
                    <button class="btn btn-primary btn-sm add-plan-btn" onclick={on_add}>
                        <i class="fas fa-plus"></i>{" Add Plan"}
                    </button>
                </div>
                <FetchRender<Vec<Plan>>
                    state={(*plans).clone()}
                    render={render_plans}
                    on_retry={Some(refetch.clone())}
                    loading_text={Some(AttrValue::from("Loading plans..."))}
                />
            </div>
            <div class="space-y-4">
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">{"Minutes per Activity"}</h2>
                        <div id={ACTIVITY_CHART_ID} style="height: 260px;"></div>
                    </div>
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">{"This Week"}</h2>
                        <div id={AEROBIC_CHART_ID} style="height: 260px;"></div>
                    </div>
                </div>
            </div>
            <PlanModal
                draft={(*draft).clone()}
                categories={categories.data().cloned().unwrap_or_default()}
                busy={*busy}
                on_close={on_close}
                on_submit={on_submit}
            />
        </div>
    }
}
