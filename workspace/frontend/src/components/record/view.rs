use common::{LeaderboardEntry, MetricsSnapshot, Range, UserSummary};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::leaderboard::Leaderboard;
use super::stats::MetricCards;
use crate::api_client::record::get_users;
use crate::charts::PlotlyRenderer;
use crate::dashboard::{
    DashboardContext, DashboardController, HttpRecordSource, PanelError, LINE_CHART_ID, PIE_CHART_ID,
    RADAR_CHART_ID,
};
use crate::navigation::BrowserNavigator;
use crate::settings;
use crate::ui::ToastContext;

type Controller = DashboardController<HttpRecordSource, BrowserNavigator>;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Changes whenever the tab is (re)entered.
    pub refresh: u32,
}

fn chart_card(title: &str, id: &str) -> Html {
    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{title.to_string()}</h2>
                <div id={id.to_string()} class="chart-container" style="height: 300px;"></div>
            </div>
        </div>
    }
}

#[function_component(RecordTab)]
pub fn record_tab(props: &Props) -> Html {
    let app_settings = settings::get_settings();
    let range = use_state(|| app_settings.default_range);
    let users = use_state(Vec::<UserSummary>::new);
    let user_id = use_state(|| None::<i32>);
    let metrics = use_state(|| None::<MetricsSnapshot>);
    let leaderboard = use_state(Vec::<LeaderboardEntry>::new);
    let controller: Rc<RefCell<Option<Rc<Controller>>>> = use_mut_ref(|| None);
    let toast_ctx = use_context::<ToastContext>();

    // Charts bind to their containers once, after the first render.
    {
        let controller = controller.clone();
        let metrics = metrics.setter();
        let leaderboard = leaderboard.setter();
        let toast_ctx = toast_ctx.clone();
        use_effect_with((), move |_| {
            log::debug!("Creating dashboard charts");
            let on_panel_error = Callback::from(move |e: PanelError| {
                if let Some(toast_ctx) = &toast_ctx {
                    toast_ctx.show_warning(format!("Could not load {}: {}", e.panel.title(), e.error));
                }
            });
            let context = DashboardContext::new(
                Rc::new(PlotlyRenderer),
                Callback::from(move |m| metrics.set(Some(m))),
                Callback::from(move |rows| leaderboard.set(rows)),
                on_panel_error,
            );
            let login_url = settings::get_settings().login_url;
            *controller.borrow_mut() = Some(Rc::new(DashboardController::new(
                HttpRecordSource,
                BrowserNavigator,
                context,
                login_url,
            )));
            || ()
        });
    }

    // Users for the picker; the first one is selected like the original page did.
    {
        let users = users.clone();
        let user_id = user_id.clone();
        let show_picker = app_settings.show_user_picker;
        use_effect_with((), move |_| {
            if show_picker {
                wasm_bindgen_futures::spawn_local(async move {
                    match get_users().await {
                        Ok(list) => {
                            user_id.set(list.first().map(|u| u.id));
                            users.set(list);
                        }
                        Err(e) => log::warn!("User picker unavailable: {}", e),
                    }
                });
            }
            || ()
        });
    }

    {
        let controller = controller.clone();
        use_effect_with((props.refresh, *range, *user_id), move |(token, range, user_id)| {
            let current = controller.borrow().clone();
            match current {
                Some(controller) => {
                    log::trace!("Record refresh token {}", token);
                    let (range, user_id) = (*range, *user_id);
                    wasm_bindgen_futures::spawn_local(async move {
                        controller.refresh(range, user_id).await;
                    });
                }
                None => log::warn!("Dashboard not ready, skipping refresh"),
            }
            || ()
        });
    }

    let on_range_change = {
        let range = range.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<Range>() {
                Ok(value) => range.set(value),
                Err(e) => log::warn!("Ignoring range selection: {}", e),
            }
        })
    };

    let on_user_change = {
        let user_id = user_id.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            user_id.set(select.value().parse::<i32>().ok());
        })
    };

    html! {
        <>
            <div class="flex flex-wrap gap-4 mb-6">
                <select id="record-range-select" class="select select-bordered select-sm" onchange={on_range_change}>
                    { for Range::ALL.iter().map(|r| html! {
                        <option value={r.as_str()} selected={*r == *range}>{r.label()}</option>
                    }) }
                </select>
                if app_settings.show_user_picker {
                    <select id="user-select" class="select select-bordered select-sm" onchange={on_user_change}>
                        { for users.iter().map(|u| html! {
                            <option value={u.id.to_string()} selected={Some(u.id) == *user_id}>{&u.username}</option>
                        }) }
                    </select>
                }
            </div>
            <MetricCards metrics={(*metrics).clone()} />
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mt-6">
                {chart_card("You vs Average", LINE_CHART_ID)}
                {chart_card("Aerobic vs Anaerobic", PIE_CHART_ID)}
                {chart_card("Category Difficulty", RADAR_CHART_ID)}
                <Leaderboard rows={(*leaderboard).clone()} />
            </div>
        </>
    }
}
