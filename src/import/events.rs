//! Event and arm import
//!
//! Classic (non-longitudinal) projects answer event and arm requests with an
//! error object instead of an array, so callers treat a parse failure here as
//! "no longitudinal structure" rather than as a fatal error.

use super::ImportError;
use crate::models::{Arm, Event};

/// Parse a `content=event` payload.
pub fn parse_events(body: &[u8]) -> Result<Vec<Event>, ImportError> {
    Ok(serde_json::from_slice(body)?)
}

/// Parse a `content=arm` payload.
pub fn parse_arms(body: &[u8]) -> Result<Vec<Arm>, ImportError> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        let body = br#"[
            {"event_name": "Baseline", "arm_num": "1", "day_offset": "0",
             "offset_min": "0", "offset_max": "0", "unique_event_name": "baseline_arm_1"},
            {"event_name": "Week 1", "arm_num": "1", "day_offset": "7",
             "offset_min": "1", "offset_max": "1", "unique_event_name": "week_1_arm_1"}
        ]"#;
        let events = parse_events(body).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].unique_event_name, "week_1_arm_1");
        assert_eq!(events[1].day_offset, 7.0);
    }

    #[test]
    fn test_classic_project_error_object() {
        let body = br#"{"error":"You cannot export events for classic projects"}"#;
        assert!(parse_events(body).is_err());
    }

    #[test]
    fn test_empty_body() {
        assert!(parse_events(b"").is_err());
        assert!(parse_arms(b"").is_err());
    }

    #[test]
    fn test_parse_arms() {
        let body = br#"[{"arm_num": "1", "name": "Drug A"}, {"arm_num": 2, "name": "Drug B"}]"#;
        let arms = parse_arms(body).unwrap();
        assert_eq!(arms.len(), 2);
        assert_eq!(arms[0].arm_num, 1);
        assert_eq!(arms[0].name, "Drug A");
        assert_eq!(arms[1].arm_num, 2);
        assert_eq!(arms[1].name, "Drug B");
    }
}
