//! Transport-layer types shared by the FiTrack front end.
//! These structs mirror the JSON payloads of the record, plan and social
//! endpoints so the client can deserialize responses without re-declaring
//! shapes in every component.

mod datetime;
mod plan;
mod social;
mod validation;

pub use datetime::{format_wire, parse_wire, wire_format};
pub use plan::{format_total_time, Plan, PlanRequest, SportCategory, SuccessResponse};
pub use social::{
    BookmarkResponse, Comment, CreateCommentRequest, CreatePostRequest, CsrfTokenResponse,
    LikeResponse, Post,
};
pub use validation::{
    normalize_datetime_input, validate_comment_text, validate_plan, validate_post_content,
    ValidatedPlan, ValidationError,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of the difficulty scale used by the category radar.
pub const MAX_DIFFICULTY: f64 = 5.0;

/// METs threshold separating aerobic from anaerobic activity.
pub const AEROBIC_METS_THRESHOLD: f64 = 6.0;

// ===================== Range =====================

/// Time window used to filter record queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Range {
    #[default]
    Week,
    Month,
}

impl Range {
    pub const ALL: [Range; 2] = [Range::Week, Range::Month];

    pub fn as_str(&self) -> &'static str {
        match self {
            Range::Week => "week",
            Range::Month => "month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Range::Week => "Last 7 days",
            Range::Month => "Last 30 days",
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Range {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Range::Week),
            "month" => Ok(Range::Month),
            other => Err(format!("unknown range '{}'", other)),
        }
    }
}

// ===================== Record =====================

/// Headline numbers shown on the record tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MetricsSnapshot {
    pub current_streak: u32,
    pub total_calories: f64,
    pub total_hours: f64,
    pub percentile: f64,
}

/// Daily hours of the selected user against the population average.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub you: Vec<f64>,
    pub average: Vec<f64>,
}

impl TrendSeries {
    pub fn is_aligned(&self) -> bool {
        self.labels.len() == self.you.len() && self.labels.len() == self.average.len()
    }
}

/// Hours split by METs: aerobic is at or above [`AEROBIC_METS_THRESHOLD`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct AeroAnaerobicSplit {
    pub aerobic: f64,
    pub anaerobic: f64,
}

impl AeroAnaerobicSplit {
    pub fn total(&self) -> f64 {
        self.aerobic + self.anaerobic
    }
}

/// Average difficulty per sport category, user against everyone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CategoryComparison {
    pub categories: Vec<String>,
    pub you: Vec<f64>,
    pub average: Vec<f64>,
}

impl CategoryComparison {
    pub fn is_aligned(&self) -> bool {
        self.categories.len() == self.you.len() && self.categories.len() == self.average.len()
    }

    /// Scores forced into `0..=MAX_DIFFICULTY`.
    pub fn clamped(mut self) -> Self {
        let clamp = |v: &mut f64| *v = v.clamp(0.0, MAX_DIFFICULTY);
        self.you.iter_mut().for_each(clamp);
        self.average.iter_mut().for_each(clamp);
        self
    }
}

/// One row of the calories leaderboard. Rows arrive sorted by rank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: String,
    pub total_calories: f64,
    pub total_hours: f64,
}

/// Entry of the user picker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_parse_and_display() {
        assert_eq!("week".parse::<Range>(), Ok(Range::Week));
        assert_eq!(" Month ".parse::<Range>(), Ok(Range::Month));
        assert!("year".parse::<Range>().is_err());
        assert_eq!(Range::Month.to_string(), "month");
        assert_eq!(Range::default(), Range::Week);
    }

    #[test]
    fn test_metrics_wire_shape() {
        let json = r#"{"current_streak":3,"total_calories":812.5,"total_hours":4.2,"percentile":75}"#;
        let metrics: MetricsSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.current_streak, 3);
        assert_eq!(metrics.total_calories, 812.5);
        assert_eq!(metrics.percentile, 75.0);
    }

    #[test]
    fn test_trend_alignment() {
        let json = r#"{"labels":["Mon","Tue"],"you":[1,2],"average":[1.5,1.5]}"#;
        let trend: TrendSeries = serde_json::from_str(json).unwrap();
        assert!(trend.is_aligned());
        assert_eq!(trend.you, vec![1.0, 2.0]);

        let broken = TrendSeries {
            labels: vec!["Mon".into()],
            you: vec![1.0, 2.0],
            average: vec![1.0],
        };
        assert!(!broken.is_aligned());
    }

    #[test]
    fn test_category_comparison_clamped() {
        let comparison = CategoryComparison {
            categories: vec!["Running".into(), "Yoga".into()],
            you: vec![6.2, -1.0],
            average: vec![2.5, 5.0],
        };
        let clamped = comparison.clamped();
        assert_eq!(clamped.you, vec![5.0, 0.0]);
        assert_eq!(clamped.average, vec![2.5, 5.0]);
        assert!(clamped.is_aligned());
    }

    #[test]
    fn test_leaderboard_rows() {
        let json = r#"[
            {"rank":1,"username":"alice","total_calories":1200.0,"total_hours":5.5},
            {"rank":2,"username":"bob","total_calories":900.0,"total_hours":4.0}
        ]"#;
        let rows: Vec<LeaderboardEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].username, "alice");
        assert_eq!(rows[1].rank, 2);
    }

    #[test]
    fn test_split_total() {
        let split = AeroAnaerobicSplit { aerobic: 1.25, anaerobic: 0.75 };
        assert_eq!(split.total(), 2.0);
    }
}
