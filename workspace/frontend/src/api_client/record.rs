use common::{
    AeroAnaerobicSplit, CategoryComparison, LeaderboardEntry, MetricsSnapshot, Range, TrendSeries,
    UserSummary,
};

use super::ApiError;
use crate::api_client;

/// Parameters shared by the per-user record endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordQuery {
    pub range: Range,
    pub user_id: Option<i32>,
}

impl RecordQuery {
    pub fn new(range: Range, user_id: Option<i32>) -> Self {
        Self { range, user_id }
    }

    pub fn query_string(&self) -> String {
        match self.user_id {
            Some(id) => format!("?range={}&user_id={}", self.range, id),
            None => format!("?range={}", self.range),
        }
    }

    pub fn path(&self, endpoint: &str) -> String {
        format!("/api/record/{}{}", endpoint, self.query_string())
    }
}

pub async fn get_metrics(query: RecordQuery) -> Result<MetricsSnapshot, ApiError> {
    log::trace!("Fetching metrics for {:?}", query);
    let result = api_client::get::<MetricsSnapshot>(&query.path("metrics")).await;
    if let Err(ref e) = result {
        log::error!("Failed to fetch metrics: {}", e);
    }
    result
}

pub async fn get_trend(query: RecordQuery) -> Result<TrendSeries, ApiError> {
    log::trace!("Fetching trend for {:?}", query);
    let result = api_client::get::<TrendSeries>(&query.path("trend")).await;
    match &result {
        Ok(trend) => log::info!("Fetched trend with {} points", trend.labels.len()),
        Err(e) => log::error!("Failed to fetch trend: {}", e),
    }
    result
}

pub async fn get_aero_anaerobic(query: RecordQuery) -> Result<AeroAnaerobicSplit, ApiError> {
    log::trace!("Fetching aerobic/anaerobic split for {:?}", query);
    let result = api_client::get::<AeroAnaerobicSplit>(&query.path("aeroAnaerobic")).await;
    if let Err(ref e) = result {
        log::error!("Failed to fetch aerobic/anaerobic split: {}", e);
    }
    result
}

pub async fn get_category_comparison(query: RecordQuery) -> Result<CategoryComparison, ApiError> {
    log::trace!("Fetching category comparison for {:?}", query);
    let result = api_client::get::<CategoryComparison>(&query.path("categoryComparison")).await;
    match &result {
        Ok(c) => log::info!("Fetched comparison over {} categories", c.categories.len()),
        Err(e) => log::error!("Failed to fetch category comparison: {}", e),
    }
    result
}

/// The leaderboard is global, so only the range is sent.
pub async fn get_leaderboard(range: Range) -> Result<Vec<LeaderboardEntry>, ApiError> {
    log::trace!("Fetching leaderboard for range {}", range);
    let url = RecordQuery::new(range, None).path("leaderboard");
    let result = api_client::get::<Vec<LeaderboardEntry>>(&url).await;
    match &result {
        Ok(rows) => log::info!("Fetched {} leaderboard rows", rows.len()),
        Err(e) => log::error!("Failed to fetch leaderboard: {}", e),
    }
    result
}

pub async fn get_users() -> Result<Vec<UserSummary>, ApiError> {
    log::trace!("Fetching users");
    let result = api_client::get::<Vec<UserSummary>>("/api/users").await;
    match &result {
        Ok(users) => log::info!("Fetched {} users", users.len()),
        Err(e) => log::error!("Failed to fetch users: {}", e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_with_user() {
        let query = RecordQuery::new(Range::Week, Some(7));
        assert_eq!(query.path("trend"), "/api/record/trend?range=week&user_id=7");
        assert_eq!(
            query.path("aeroAnaerobic"),
            "/api/record/aeroAnaerobic?range=week&user_id=7"
        );
    }

    #[test]
    fn test_paths_without_user() {
        let query = RecordQuery::new(Range::Month, None);
        assert_eq!(query.path("metrics"), "/api/record/metrics?range=month");
    }
}
