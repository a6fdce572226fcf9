use chrono::NaiveDate;
use common::{Plan, PlanRequest, SportCategory, SuccessResponse};

use super::ApiError;
use crate::api_client;
use crate::settings::PlanCollection;

impl PlanCollection {
    /// Endpoint for listing plans; the daily collection is filtered server-side.
    pub fn list_path(&self, date: NaiveDate) -> String {
        match self {
            PlanCollection::Daily => format!("/api/plans?date={}", date.format("%Y-%m-%d")),
            PlanCollection::Mine => "/api/my_plan".to_string(),
        }
    }

    pub fn save_path(&self) -> &'static str {
        match self {
            PlanCollection::Daily => "/api/plans",
            PlanCollection::Mine => "/api/my_plan",
        }
    }
}

pub fn delete_path(plan_id: i32) -> String {
    format!("/api/plans/{}", plan_id)
}

pub async fn get_plans(collection: PlanCollection, date: NaiveDate) -> Result<Vec<Plan>, ApiError> {
    log::trace!("Fetching plans ({:?}) for {}", collection, date);
    let result = api_client::get::<Vec<Plan>>(&collection.list_path(date)).await;
    match &result {
        Ok(plans) => log::info!("Fetched {} plans", plans.len()),
        Err(e) => log::error!("Failed to fetch plans: {}", e),
    }
    result
}

/// Creates a plan, or edits one when `request.id` is set.
pub async fn save_plan(
    collection: PlanCollection,
    request: &PlanRequest,
) -> Result<SuccessResponse, ApiError> {
    log::debug!("Saving plan {:?}: {}", request.id, request.activity);
    let result = api_client::post::<SuccessResponse, _>(collection.save_path(), request, &[]).await;
    match &result {
        Ok(response) => log::info!("Plan save answered success={}", response.success),
        Err(e) => log::error!("Failed to save plan: {}", e),
    }
    result
}

pub async fn delete_plan(plan_id: i32) -> Result<(), ApiError> {
    log::debug!("Deleting plan {}", plan_id);
    let result = api_client::delete(&delete_path(plan_id)).await;
    match &result {
        Ok(()) => log::info!("Deleted plan ID: {}", plan_id),
        Err(e) => log::error!("Failed to delete plan {}: {}", plan_id, e),
    }
    result
}

pub async fn get_sport_categories() -> Result<Vec<SportCategory>, ApiError> {
    log::trace!("Fetching sport categories");
    let result = api_client::get::<Vec<SportCategory>>("/api/sport_categories").await;
    if let Err(ref e) = result {
        log::error!("Failed to fetch sport categories: {}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_paths() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 3).unwrap();
        assert_eq!(PlanCollection::Daily.list_path(date), "/api/plans?date=2025-05-03");
        assert_eq!(PlanCollection::Mine.list_path(date), "/api/my_plan");
        assert_eq!(PlanCollection::Mine.save_path(), "/api/my_plan");
        assert_eq!(delete_path(12), "/api/plans/12");
    }
}
