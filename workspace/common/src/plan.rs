use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::datetime::wire_format;

/// Scheduled activity owned by the plan manager. `end_time > start_time`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub id: i32,
    pub activity: String,
    #[serde(with = "wire_format")]
    pub start_time: NaiveDateTime,
    #[serde(with = "wire_format")]
    pub end_time: NaiveDateTime,
}

impl Plan {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Body of a plan submission. A present `id` turns the submission into an edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub activity: String,
    #[serde(with = "wire_format")]
    pub start_time: NaiveDateTime,
    #[serde(with = "wire_format")]
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SportCategory {
    pub name: String,
}

/// `{"success": true}` or `{"success": false, "error": "..."}`; either key may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Renders a minute total as `"{h}h {m}min"`.
pub fn format_total_time(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{}h {}min", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_from_backend_json() {
        let json = r#"{"id":4,"activity":"Running","start_time":"2025-05-01T07:00","end_time":"2025-05-01T07:45"}"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.id, 4);
        assert_eq!(plan.duration_minutes(), 45);
    }

    #[test]
    fn test_plan_request_omits_missing_id() {
        let plan: Plan = serde_json::from_str(
            r#"{"id":1,"activity":"Yoga","start_time":"2025-05-01T18:00","end_time":"2025-05-01T19:00"}"#,
        )
        .unwrap();
        let request = PlanRequest {
            id: None,
            activity: plan.activity.clone(),
            start_time: plan.start_time,
            end_time: plan.end_time,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["start_time"], "2025-05-01T18:00");

        let edit = PlanRequest { id: Some(1), ..request };
        assert_eq!(serde_json::to_value(&edit).unwrap()["id"], 1);
    }

    #[test]
    fn test_success_response_tolerates_missing_keys() {
        let ok: SuccessResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(ok.success);
        let failed: SuccessResponse = serde_json::from_str(r#"{"error":"Unauthorized"}"#).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn test_format_total_time() {
        assert_eq!(format_total_time(0), "0h 0min");
        assert_eq!(format_total_time(135), "2h 15min");
        assert_eq!(format_total_time(-5), "0h 0min");
    }
}
