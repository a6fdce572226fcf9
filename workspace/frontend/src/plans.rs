//! Scheduled activities: list, create, edit and cancel.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use common::{format_wire, validate_plan, Plan, PlanRequest, SuccessResponse, ValidationError};
use std::cell::Cell;
use thiserror::Error;

use crate::api_client::{self, ApiError};
use crate::navigation::Navigator;
use crate::settings::PlanCollection;

const LOGIN_ALERT: &str = "Please login first.";
const SAVE_FAILED: &str = "Failed to add plan";
const NETWORK_ERROR: &str = "Network error.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered but did not report success.
    #[error("{}", .0.as_deref().unwrap_or(SAVE_FAILED))]
    Rejected(Option<String>),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PlanError {
    /// Text shown to the user after a failed submission.
    pub fn user_message(&self) -> String {
        match self {
            PlanError::Validation(e) => e.to_string(),
            PlanError::Rejected(message) => message.clone().unwrap_or_else(|| SAVE_FAILED.to_string()),
            PlanError::Api(ApiError::Unauthorized) => LOGIN_ALERT.to_string(),
            PlanError::Api(ApiError::Http { message, .. }) => {
                message.clone().unwrap_or_else(|| SAVE_FAILED.to_string())
            }
            PlanError::Api(ApiError::Parse(_)) => SAVE_FAILED.to_string(),
            PlanError::Api(ApiError::Network(_) | ApiError::Serialize(_)) => NETWORK_ERROR.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, PlanError::Api(ApiError::Unauthorized))
    }
}

#[async_trait(?Send)]
pub trait PlanStore {
    async fn list(&self, date: NaiveDate) -> Result<Vec<Plan>, ApiError>;
    async fn save(&self, request: &PlanRequest) -> Result<SuccessResponse, ApiError>;
    async fn delete(&self, plan_id: i32) -> Result<(), ApiError>;
}

/// Plan endpoints of one collection.
#[derive(Debug, Clone, Copy)]
pub struct HttpPlanStore {
    collection: PlanCollection,
}

impl HttpPlanStore {
    pub fn new(collection: PlanCollection) -> Self {
        Self { collection }
    }
}

#[async_trait(?Send)]
impl PlanStore for HttpPlanStore {
    async fn list(&self, date: NaiveDate) -> Result<Vec<Plan>, ApiError> {
        api_client::plan::get_plans(self.collection, date).await
    }

    async fn save(&self, request: &PlanRequest) -> Result<SuccessResponse, ApiError> {
        api_client::plan::save_plan(self.collection, request).await
    }

    async fn delete(&self, plan_id: i32) -> Result<(), ApiError> {
        api_client::plan::delete_plan(plan_id).await
    }
}

/// A save the server accepted. `plans` is the reload that followed it and may
/// fail on its own without undoing the save.
#[derive(Debug)]
pub struct SavedPlans {
    pub plans: Result<Vec<Plan>, ApiError>,
}

/// Raw form values. `id` is set when the form edits an existing plan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanDraft {
    pub id: Option<i32>,
    pub activity: String,
    pub start: String,
    pub end: String,
}

impl PlanDraft {
    pub fn from_plan(plan: &Plan) -> Self {
        Self {
            id: Some(plan.id),
            activity: plan.activity.clone(),
            start: format_wire(&plan.start_time),
            end: format_wire(&plan.end_time),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }
}

pub struct PlanManager<S, N> {
    store: S,
    navigator: N,
    login_url: String,
    day: Cell<NaiveDate>,
}

impl<S: PlanStore, N: Navigator> PlanManager<S, N> {
    pub fn new(store: S, navigator: N, login_url: impl Into<String>, day: NaiveDate) -> Self {
        Self {
            store,
            navigator,
            login_url: login_url.into(),
            day: Cell::new(day),
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day.get()
    }

    pub fn set_day(&self, day: NaiveDate) {
        self.day.set(day);
    }

    pub fn shift_day(&self, days: i64) -> NaiveDate {
        let day = self.day.get() + Duration::days(days);
        self.day.set(day);
        day
    }

    /// Plans of the current day (or all of them, depending on the store).
    pub async fn list(&self) -> Result<Vec<Plan>, ApiError> {
        self.store.list(self.day.get()).await
    }

    /// Validates, saves and returns the refreshed list.
    pub async fn create(&self, activity: &str, start: &str, end: &str) -> Result<SavedPlans, PlanError> {
        self.submit(None, activity, start, end).await
    }

    pub async fn edit(&self, plan_id: i32, activity: &str, start: &str, end: &str) -> Result<SavedPlans, PlanError> {
        self.submit(Some(plan_id), activity, start, end).await
    }

    pub async fn submit_draft(&self, draft: &PlanDraft) -> Result<SavedPlans, PlanError> {
        self.submit(draft.id, &draft.activity, &draft.start, &draft.end).await
    }

    async fn submit(
        &self,
        plan_id: Option<i32>,
        activity: &str,
        start: &str,
        end: &str,
    ) -> Result<SavedPlans, PlanError> {
        let plan = validate_plan(activity, start, end).map_err(|e| {
            log::debug!("Plan form rejected: {}", e);
            e
        })?;
        let request = PlanRequest {
            id: plan_id,
            activity: plan.activity,
            start_time: plan.start_time,
            end_time: plan.end_time,
        };

        let response = self.store.save(&request).await?;
        if !response.success {
            return Err(PlanError::Rejected(response.error));
        }

        let plans = self.list().await;
        if let Err(e) = &plans {
            log::warn!("Plan saved but reload failed: {}", e);
        }
        Ok(SavedPlans { plans })
    }

    /// Deletes `plan_id` and always reloads; a failed delete shows up as an unchanged list.
    pub async fn cancel(&self, plan_id: i32) -> Result<Vec<Plan>, ApiError> {
        if let Err(e) = self.store.delete(plan_id).await {
            log::warn!("Cancel of plan {} failed: {}", plan_id, e);
        }
        self.list().await
    }

    /// Alerts the failure and, on a 401, leaves for the login page.
    pub fn report_failure(&self, error: &PlanError) {
        self.navigator.alert(&error.user_message());
        if error.is_unauthorized() {
            self.navigator.redirect(&self.login_url);
        }
    }
}

/// "Today", otherwise `MM.DD`.
pub fn day_label(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        "Today".to_string()
    } else {
        day.format("%m.%d").to_string()
    }
}

/// `HH:MM - HH:MM`
pub fn time_range(plan: &Plan) -> String {
    format!("{} - {}", plan.start_time.format("%H:%M"), plan.end_time.format("%H:%M"))
}

pub fn total_minutes(plans: &[Plan]) -> i64 {
    plans.iter().map(Plan::duration_minutes).sum()
}

/// Minutes per activity, in order of first appearance.
pub fn minutes_by_activity(plans: &[Plan]) -> (Vec<String>, Vec<f64>) {
    let mut labels: Vec<String> = Vec::new();
    let mut minutes: Vec<f64> = Vec::new();
    for plan in plans {
        let value = plan.duration_minutes() as f64;
        match labels.iter().position(|l| *l == plan.activity) {
            Some(i) => minutes[i] += value,
            None => {
                labels.push(plan.activity.clone());
                minutes.push(value);
            }
        }
    }
    (labels, minutes)
}
