//! Client-side input checks. Everything here runs before a request is built,
//! so a failure means nothing was sent.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::datetime::parse_wire;

/// Length of `YYYY-MM-DDTHH:MM`.
const WIRE_DATETIME_LEN: usize = 16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("End time must be after start time.")]
    EndNotAfterStart,

    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("Post content cannot be empty.")]
    EmptyContent,

    #[error("Comment cannot be empty.")]
    EmptyComment,
}

/// Plan fields that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPlan {
    pub activity: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

/// Trims a `datetime-local` value down to minute precision.
pub fn normalize_datetime_input(raw: &str) -> String {
    raw.trim().chars().take(WIRE_DATETIME_LEN).collect()
}

pub fn validate_plan(activity: &str, start: &str, end: &str) -> Result<ValidatedPlan, ValidationError> {
    let activity = activity.trim();
    let start = normalize_datetime_input(start);
    let end = normalize_datetime_input(end);

    if activity.is_empty() || start.is_empty() || end.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    let start_time = parse_wire(&start).ok_or_else(|| ValidationError::InvalidDateTime(start.clone()))?;
    let end_time = parse_wire(&end).ok_or_else(|| ValidationError::InvalidDateTime(end.clone()))?;

    if end_time <= start_time {
        return Err(ValidationError::EndNotAfterStart);
    }

    Ok(ValidatedPlan {
        activity: activity.to_string(),
        start_time,
        end_time,
    })
}

pub fn validate_post_content(content: &str) -> Result<String, ValidationError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    Ok(content.to_string())
}

pub fn validate_comment_text(text: &str) -> Result<String, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyComment);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_plan() {
        let plan = validate_plan(" Running ", "2025-05-01T07:00", "2025-05-01T07:30").unwrap();
        assert_eq!(plan.activity, "Running");
        assert_eq!((plan.end_time - plan.start_time).num_minutes(), 30);
    }

    #[test]
    fn test_seconds_are_truncated() {
        let plan = validate_plan("Yoga", "2025-05-01T07:00:59", "2025-05-01T07:01:10").unwrap();
        assert_eq!((plan.end_time - plan.start_time).num_minutes(), 1);
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            validate_plan("", "2025-05-01T07:00", "2025-05-01T08:00"),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            validate_plan("Swim", "  ", "2025-05-01T08:00"),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            validate_plan("Swim", "2025-05-01T07:00", ""),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_end_not_after_start() {
        assert_eq!(
            validate_plan("Swim", "2025-05-01T08:00", "2025-05-01T08:00"),
            Err(ValidationError::EndNotAfterStart)
        );
        assert_eq!(
            validate_plan("Swim", "2025-05-01T09:00", "2025-05-01T08:00"),
            Err(ValidationError::EndNotAfterStart)
        );
        assert_eq!(
            ValidationError::EndNotAfterStart.to_string(),
            "End time must be after start time."
        );
    }

    #[test]
    fn test_unparseable_time() {
        assert!(matches!(
            validate_plan("Swim", "tomorrow", "2025-05-01T08:00"),
            Err(ValidationError::InvalidDateTime(_))
        ));
    }

    #[test]
    fn test_post_and_comment_text() {
        assert_eq!(validate_post_content("  hi "), Ok("hi".to_string()));
        assert_eq!(validate_post_content("   "), Err(ValidationError::EmptyContent));
        assert_eq!(validate_comment_text("\n"), Err(ValidationError::EmptyComment));
    }
}
