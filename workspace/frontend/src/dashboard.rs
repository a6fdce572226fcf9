//! Record tab refresh cycle.
//!
//! One refresh issues five independent fetches. They are polled together and
//! each completion writes only to its own panel, so a slow or failing call
//! never holds back or corrupts the others.

use async_trait::async_trait;
use common::{
    AeroAnaerobicSplit, CategoryComparison, LeaderboardEntry, MetricsSnapshot, Range, TrendSeries,
};
use std::cell::Cell;
use std::rc::Rc;
use yew::Callback;

use crate::api_client::record::{self, RecordQuery};
use crate::api_client::ApiError;
use crate::charts::{ChartHandle, ChartRenderer};
use crate::navigation::Navigator;

pub const LINE_CHART_ID: &str = "line-chart";
pub const PIE_CHART_ID: &str = "pie-chart";
pub const RADAR_CHART_ID: &str = "radar-chart";

pub const SPLIT_LABELS: [&str; 2] = ["Aerobic (≥6.0 METs)", "Anaerobic (<6.0 METs)"];

/// Rows shown while the leaderboard is collapsed.
pub const LEADERBOARD_COLLAPSED_ROWS: usize = 3;

const LOGIN_ALERT: &str = "Please login first";

#[async_trait(?Send)]
pub trait RecordSource {
    async fn metrics(&self, query: RecordQuery) -> Result<MetricsSnapshot, ApiError>;
    async fn trend(&self, query: RecordQuery) -> Result<TrendSeries, ApiError>;
    async fn aero_anaerobic(&self, query: RecordQuery) -> Result<AeroAnaerobicSplit, ApiError>;
    async fn category_comparison(&self, query: RecordQuery) -> Result<CategoryComparison, ApiError>;
    async fn leaderboard(&self, range: Range) -> Result<Vec<LeaderboardEntry>, ApiError>;
}

/// The `/api/record/*` endpoints.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpRecordSource;

#[async_trait(?Send)]
impl RecordSource for HttpRecordSource {
    async fn metrics(&self, query: RecordQuery) -> Result<MetricsSnapshot, ApiError> {
        record::get_metrics(query).await
    }

    async fn trend(&self, query: RecordQuery) -> Result<TrendSeries, ApiError> {
        record::get_trend(query).await
    }

    async fn aero_anaerobic(&self, query: RecordQuery) -> Result<AeroAnaerobicSplit, ApiError> {
        record::get_aero_anaerobic(query).await
    }

    async fn category_comparison(&self, query: RecordQuery) -> Result<CategoryComparison, ApiError> {
        record::get_category_comparison(query).await
    }

    async fn leaderboard(&self, range: Range) -> Result<Vec<LeaderboardEntry>, ApiError> {
        record::get_leaderboard(range).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Metrics,
    Trend,
    Split,
    Comparison,
    Leaderboard,
}

impl Panel {
    pub fn title(&self) -> &'static str {
        match self {
            Panel::Metrics => "metrics",
            Panel::Trend => "trend",
            Panel::Split => "aerobic/anaerobic split",
            Panel::Comparison => "category comparison",
            Panel::Leaderboard => "leaderboard",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelError {
    pub panel: Panel,
    pub error: ApiError,
}

/// Everything a refresh writes to. Charts are created once here and only
/// updated afterwards; a missing container leaves its handle `None`.
pub struct DashboardContext {
    pub trend_chart: Option<ChartHandle>,
    pub split_chart: Option<ChartHandle>,
    pub comparison_chart: Option<ChartHandle>,
    pub on_metrics: Callback<MetricsSnapshot>,
    pub on_leaderboard: Callback<Vec<LeaderboardEntry>>,
    pub on_panel_error: Callback<PanelError>,
}

impl DashboardContext {
    pub fn new(
        renderer: Rc<dyn ChartRenderer>,
        on_metrics: Callback<MetricsSnapshot>,
        on_leaderboard: Callback<Vec<LeaderboardEntry>>,
        on_panel_error: Callback<PanelError>,
    ) -> Self {
        Self {
            trend_chart: ChartHandle::create_line_chart(LINE_CHART_ID, renderer.clone()),
            split_chart: ChartHandle::create_doughnut_chart(PIE_CHART_ID, &SPLIT_LABELS, renderer.clone()),
            comparison_chart: ChartHandle::create_radar_chart(RADAR_CHART_ID, renderer),
            on_metrics,
            on_leaderboard,
            on_panel_error,
        }
    }
}

pub struct DashboardController<S, N> {
    source: S,
    navigator: N,
    context: DashboardContext,
    login_url: String,
    generation: Cell<u64>,
    redirected: Cell<bool>,
}

impl<S: RecordSource, N: Navigator> DashboardController<S, N> {
    pub fn new(source: S, navigator: N, context: DashboardContext, login_url: impl Into<String>) -> Self {
        Self {
            source,
            navigator,
            context,
            login_url: login_url.into(),
            generation: Cell::new(0),
            redirected: Cell::new(false),
        }
    }

    pub fn context(&self) -> &DashboardContext {
        &self.context
    }

    /// Fetches every panel of the record tab for `range` and `user_id`.
    pub async fn refresh(&self, range: Range, user_id: Option<i32>) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let query = RecordQuery::new(range, user_id);
        log::debug!("Dashboard refresh #{} for {:?}", generation, query);

        futures::join!(
            self.load_metrics(generation, query),
            self.load_trend(generation, query),
            self.load_split(generation, query),
            self.load_comparison(generation, query),
            self.load_leaderboard(generation, range),
        );

        log::trace!("Dashboard refresh #{} settled", generation);
    }

    fn is_current(&self, generation: u64, panel: Panel) -> bool {
        let current = generation == self.generation.get();
        if !current {
            log::debug!("Dropping stale {} response from refresh #{}", panel.title(), generation);
        }
        current
    }

    fn report(&self, panel: Panel, error: ApiError) {
        log::warn!("Dashboard {} unavailable: {}", panel.title(), error);
        self.context.on_panel_error.emit(PanelError { panel, error });
    }

    async fn load_metrics(&self, generation: u64, query: RecordQuery) {
        match self.source.metrics(query).await {
            Err(ApiError::Unauthorized) => self.handle_unauthorized(),
            Err(error) => {
                if self.is_current(generation, Panel::Metrics) {
                    self.report(Panel::Metrics, error);
                }
            }
            Ok(metrics) => {
                if self.is_current(generation, Panel::Metrics) {
                    self.context.on_metrics.emit(metrics);
                }
            }
        }
    }

    /// Alerts and leaves the page. Overlapping refreshes share one redirect.
    fn handle_unauthorized(&self) {
        if self.redirected.replace(true) {
            log::debug!("Redirect to login already issued");
            return;
        }
        log::warn!("Metrics request unauthorized, sending user to {}", self.login_url);
        self.navigator.alert(LOGIN_ALERT);
        self.navigator.redirect(&self.login_url);
    }

    async fn load_trend(&self, generation: u64, query: RecordQuery) {
        let result = self.source.trend(query).await;
        if !self.is_current(generation, Panel::Trend) {
            return;
        }
        match result {
            Ok(trend) if !trend.is_aligned() => self.report(
                Panel::Trend,
                ApiError::Parse("trend series lengths differ".to_string()),
            ),
            Ok(trend) => {
                if let Some(chart) = &self.context.trend_chart {
                    chart.update(trend.labels, vec![trend.you, trend.average]);
                }
            }
            Err(error) => self.report(Panel::Trend, error),
        }
    }

    async fn load_split(&self, generation: u64, query: RecordQuery) {
        let result = self.source.aero_anaerobic(query).await;
        if !self.is_current(generation, Panel::Split) {
            return;
        }
        match result {
            Ok(split) => {
                if let Some(chart) = &self.context.split_chart {
                    chart.update_series(vec![vec![split.aerobic, split.anaerobic]]);
                }
            }
            Err(error) => self.report(Panel::Split, error),
        }
    }

    async fn load_comparison(&self, generation: u64, query: RecordQuery) {
        let result = self.source.category_comparison(query).await;
        if !self.is_current(generation, Panel::Comparison) {
            return;
        }
        match result {
            Ok(comparison) if !comparison.is_aligned() => self.report(
                Panel::Comparison,
                ApiError::Parse("category comparison lengths differ".to_string()),
            ),
            Ok(comparison) => {
                let comparison = comparison.clamped();
                if let Some(chart) = &self.context.comparison_chart {
                    chart.update(comparison.categories, vec![comparison.you, comparison.average]);
                }
            }
            Err(error) => self.report(Panel::Comparison, error),
        }
    }

    async fn load_leaderboard(&self, generation: u64, range: Range) {
        let result = self.source.leaderboard(range).await;
        if !self.is_current(generation, Panel::Leaderboard) {
            return;
        }
        match result {
            Ok(rows) => self.context.on_leaderboard.emit(rows),
            Err(error) => self.report(Panel::Leaderboard, error),
        }
    }
}

/// Rows to render: the top few while collapsed, everything otherwise.
pub fn visible_leaderboard(rows: &[LeaderboardEntry], collapsed: bool) -> &[LeaderboardEntry] {
    if collapsed {
        &rows[..rows.len().min(LEADERBOARD_COLLAPSED_ROWS)]
    } else {
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::testing::RecordingRenderer;
    use crate::navigation::testing::RecordingNavigator;
    use futures::channel::oneshot;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    enum Reply<T> {
        Ready(Result<T, ApiError>),
        Later(oneshot::Receiver<Result<T, ApiError>>),
    }

    async fn resolve<T: Default>(queue: &RefCell<VecDeque<Reply<T>>>) -> Result<T, ApiError> {
        let next = queue.borrow_mut().pop_front();
        match next {
            None => Ok(T::default()),
            Some(Reply::Ready(result)) => result,
            Some(Reply::Later(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("dropped".to_string()))),
        }
    }

    #[derive(Default)]
    struct FakeSource {
        metrics: RefCell<VecDeque<Reply<MetricsSnapshot>>>,
        trend: RefCell<VecDeque<Reply<TrendSeries>>>,
        split: RefCell<VecDeque<Reply<AeroAnaerobicSplit>>>,
        comparison: RefCell<VecDeque<Reply<CategoryComparison>>>,
        leaderboard: RefCell<VecDeque<Reply<Vec<LeaderboardEntry>>>>,
        queries: RefCell<Vec<(&'static str, RecordQuery)>>,
    }

    #[async_trait(?Send)]
    impl RecordSource for FakeSource {
        async fn metrics(&self, query: RecordQuery) -> Result<MetricsSnapshot, ApiError> {
            self.queries.borrow_mut().push(("metrics", query));
            resolve(&self.metrics).await
        }

        async fn trend(&self, query: RecordQuery) -> Result<TrendSeries, ApiError> {
            self.queries.borrow_mut().push(("trend", query));
            resolve(&self.trend).await
        }

        async fn aero_anaerobic(&self, query: RecordQuery) -> Result<AeroAnaerobicSplit, ApiError> {
            self.queries.borrow_mut().push(("aeroAnaerobic", query));
            resolve(&self.split).await
        }

        async fn category_comparison(&self, query: RecordQuery) -> Result<CategoryComparison, ApiError> {
            self.queries.borrow_mut().push(("categoryComparison", query));
            resolve(&self.comparison).await
        }

        async fn leaderboard(&self, range: Range) -> Result<Vec<LeaderboardEntry>, ApiError> {
            self.queries.borrow_mut().push(("leaderboard", RecordQuery::new(range, None)));
            resolve(&self.leaderboard).await
        }
    }

    #[derive(Default)]
    struct Sinks {
        metrics: Rc<RefCell<Vec<MetricsSnapshot>>>,
        leaderboard: Rc<RefCell<Vec<Vec<LeaderboardEntry>>>>,
        errors: Rc<RefCell<Vec<PanelError>>>,
    }

    fn context(renderer: Rc<RecordingRenderer>, sinks: &Sinks) -> DashboardContext {
        let metrics = sinks.metrics.clone();
        let leaderboard = sinks.leaderboard.clone();
        let errors = sinks.errors.clone();
        DashboardContext::new(
            renderer,
            Callback::from(move |m| metrics.borrow_mut().push(m)),
            Callback::from(move |rows| leaderboard.borrow_mut().push(rows)),
            Callback::from(move |e| errors.borrow_mut().push(e)),
        )
    }

    fn all_charts() -> Rc<RecordingRenderer> {
        RecordingRenderer::with_elements(&[LINE_CHART_ID, PIE_CHART_ID, RADAR_CHART_ID])
    }

    fn trend(labels: &[&str], you: &[f64], average: &[f64]) -> TrendSeries {
        TrendSeries {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            you: you.to_vec(),
            average: average.to_vec(),
        }
    }

    fn entry(rank: u32, name: &str) -> LeaderboardEntry {
        LeaderboardEntry {
            rank,
            username: name.to_string(),
            total_calories: 100.0 * rank as f64,
            total_hours: rank as f64,
        }
    }

    #[tokio::test]
    async fn test_week_trend_feeds_line_chart() {
        let source = FakeSource::default();
        source.trend.borrow_mut().push_back(Reply::Ready(Ok(trend(
            &["Mon", "Tue"],
            &[1.0, 2.0],
            &[1.5, 1.5],
        ))));
        let sinks = Sinks::default();
        let renderer = all_charts();
        let controller = DashboardController::new(
            source,
            RecordingNavigator::default(),
            context(renderer.clone(), &sinks),
            "/",
        );

        controller.refresh(Range::Week, Some(7)).await;

        let data = controller.context().trend_chart.as_ref().unwrap().data();
        assert_eq!(data.labels, vec!["Mon", "Tue"]);
        assert_eq!(data.datasets[0].values, vec![1.0, 2.0]);
        assert_eq!(data.datasets[1].values, vec![1.5, 1.5]);
        assert_eq!(renderer.mounts(), 3);

        let queries = controller.source.queries.borrow();
        assert_eq!(queries.len(), 5);
        let trend_query = queries.iter().find(|(name, _)| *name == "trend").unwrap().1;
        assert_eq!(trend_query.path("trend"), "/api/record/trend?range=week&user_id=7");
        let board_query = queries.iter().find(|(name, _)| *name == "leaderboard").unwrap().1;
        assert_eq!(board_query.user_id, None);
    }

    #[tokio::test]
    async fn test_failed_panel_does_not_touch_others() {
        let source = FakeSource::default();
        source
            .split
            .borrow_mut()
            .push_back(Reply::Ready(Err(ApiError::Network("offline".to_string()))));
        source.metrics.borrow_mut().push_back(Reply::Ready(Ok(MetricsSnapshot {
            current_streak: 4,
            total_calories: 950.0,
            total_hours: 6.5,
            percentile: 80.0,
        })));
        source
            .leaderboard
            .borrow_mut()
            .push_back(Reply::Ready(Ok(vec![entry(1, "alice"), entry(2, "bob")])));
        let sinks = Sinks::default();
        let controller = DashboardController::new(
            source,
            RecordingNavigator::default(),
            context(all_charts(), &sinks),
            "/",
        );

        controller.refresh(Range::Month, Some(1)).await;

        assert_eq!(sinks.metrics.borrow()[0].current_streak, 4);
        assert_eq!(sinks.leaderboard.borrow()[0].len(), 2);
        let errors = sinks.errors.borrow();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].panel, Panel::Split);
        let split = controller.context().split_chart.as_ref().unwrap().data();
        assert_eq!(split.datasets[0].values, vec![0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_slow_panel_does_not_block_others() {
        let (trend_tx, trend_rx) = oneshot::channel();
        let source = FakeSource::default();
        source.trend.borrow_mut().push_back(Reply::Later(trend_rx));
        let sinks = Sinks::default();
        let controller = DashboardController::new(
            source,
            RecordingNavigator::default(),
            context(all_charts(), &sinks),
            "/",
        );

        let observer = async {
            tokio::task::yield_now().await;
            assert_eq!(sinks.metrics.borrow().len(), 1);
            assert_eq!(sinks.leaderboard.borrow().len(), 1);
            let chart = controller.context().trend_chart.as_ref().unwrap();
            assert!(chart.data().labels.is_empty());
            trend_tx
                .send(Ok(trend(&["05-01"], &[0.5], &[0.25])))
                .unwrap();
        };
        futures::join!(controller.refresh(Range::Week, None), observer);

        let chart = controller.context().trend_chart.as_ref().unwrap();
        assert_eq!(chart.data().labels, vec!["05-01"]);
    }

    #[tokio::test]
    async fn test_unauthorized_metrics_redirects_once() {
        let (metrics_tx, metrics_rx) = oneshot::channel();
        let source = FakeSource::default();
        source.metrics.borrow_mut().push_back(Reply::Later(metrics_rx));
        source
            .metrics
            .borrow_mut()
            .push_back(Reply::Ready(Err(ApiError::Unauthorized)));
        source
            .trend
            .borrow_mut()
            .push_back(Reply::Ready(Err(ApiError::Unauthorized)));
        let navigator = Rc::new(RecordingNavigator::default());
        let sinks = Sinks::default();
        let controller = DashboardController::new(
            source,
            navigator.clone(),
            context(all_charts(), &sinks),
            "/login",
        );

        let second = async {
            controller.refresh(Range::Week, Some(2)).await;
            metrics_tx.send(Err(ApiError::Unauthorized)).unwrap();
        };
        futures::join!(controller.refresh(Range::Week, Some(2)), second);

        assert_eq!(*navigator.redirects.borrow(), vec!["/login".to_string()]);
        assert_eq!(*navigator.alerts.borrow(), vec![LOGIN_ALERT.to_string()]);
        assert!(sinks.metrics.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_stale_response_dropped() {
        let (old_tx, old_rx) = oneshot::channel();
        let source = FakeSource::default();
        source.trend.borrow_mut().push_back(Reply::Later(old_rx));
        source
            .trend
            .borrow_mut()
            .push_back(Reply::Ready(Ok(trend(&["Tue"], &[2.0], &[1.0]))));
        let sinks = Sinks::default();
        let controller = DashboardController::new(
            source,
            RecordingNavigator::default(),
            context(all_charts(), &sinks),
            "/",
        );

        let newer = async {
            controller.refresh(Range::Month, Some(3)).await;
            old_tx.send(Ok(trend(&["Mon"], &[9.0], &[9.0]))).unwrap();
        };
        futures::join!(controller.refresh(Range::Week, Some(3)), newer);

        let chart = controller.context().trend_chart.as_ref().unwrap();
        assert_eq!(chart.data().labels, vec!["Tue"]);
        assert_eq!(sinks.metrics.borrow().len(), 2);
        assert!(sinks.errors.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_misaligned_trend_rejected() {
        let source = FakeSource::default();
        source
            .trend
            .borrow_mut()
            .push_back(Reply::Ready(Ok(trend(&["Mon", "Tue"], &[1.0], &[1.0, 1.0]))));
        let sinks = Sinks::default();
        let renderer = all_charts();
        let controller = DashboardController::new(
            source,
            RecordingNavigator::default(),
            context(renderer.clone(), &sinks),
            "/",
        );

        controller.refresh(Range::Week, None).await;

        let errors = sinks.errors.borrow();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].panel, Panel::Trend);
        assert!(matches!(errors[0].error, ApiError::Parse(_)));
        assert!(controller.context().trend_chart.as_ref().unwrap().data().labels.is_empty());
    }

    #[tokio::test]
    async fn test_missing_containers_skip_charts() {
        let source = FakeSource::default();
        source
            .trend
            .borrow_mut()
            .push_back(Reply::Ready(Ok(trend(&["Mon"], &[1.0], &[1.0]))));
        let sinks = Sinks::default();
        let renderer = RecordingRenderer::with_elements(&[PIE_CHART_ID]);
        let controller = DashboardController::new(
            source,
            RecordingNavigator::default(),
            context(renderer.clone(), &sinks),
            "/",
        );

        controller.refresh(Range::Week, None).await;

        assert!(controller.context().trend_chart.is_none());
        assert!(controller.context().comparison_chart.is_none());
        assert_eq!(renderer.mounts(), 1);
        assert_eq!(sinks.metrics.borrow().len(), 1);
    }

    #[test]
    fn test_visible_leaderboard() {
        let rows: Vec<_> = (1..=5).map(|r| entry(r, "user")).collect();
        assert_eq!(visible_leaderboard(&rows, true).len(), 3);
        assert_eq!(visible_leaderboard(&rows, false).len(), 5);
        assert_eq!(visible_leaderboard(&rows[..2], true).len(), 2);
    }
}
