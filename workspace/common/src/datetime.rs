use chrono::NaiveDateTime;

/// Minute-precision format used by the plan endpoints and `datetime-local` inputs.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M";

const ACCEPTED_FORMATS: [&str; 4] = [
    WIRE_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

pub fn format_wire(value: &NaiveDateTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

/// Parses any of the datetime shapes the backend has been seen to emit.
pub fn parse_wire(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            // Fractional seconds, e.g. "2025-05-01T08:00:00.000"
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
        })
}

/// `#[serde(with = "wire_format")]` adapter for plan timestamps.
pub mod wire_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_wire(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_wire(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid datetime '{}'", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_accepted_shapes() {
        assert_eq!(parse_wire("2025-05-01T08:30"), Some(at(8, 30)));
        assert_eq!(parse_wire("2025-05-01T08:30:00"), Some(at(8, 30)));
        assert_eq!(parse_wire("2025-05-01 08:30"), Some(at(8, 30)));
        assert_eq!(parse_wire("2025-05-01T08:30:00.000"), Some(at(8, 30)));
        assert_eq!(parse_wire("not a date"), None);
        assert_eq!(parse_wire(""), None);
    }

    #[test]
    fn test_format_drops_seconds() {
        let value = NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(17, 5, 42)
            .unwrap();
        assert_eq!(format_wire(&value), "2025-05-01T17:05");
    }
}
