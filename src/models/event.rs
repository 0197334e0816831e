//! Longitudinal structure: events and arms

use serde::{Deserialize, Deserializer, Serialize};

/// One event of a longitudinal project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub event_name: String,
    #[serde(deserialize_with = "de_i64")]
    pub arm_num: i64,
    #[serde(default, deserialize_with = "de_f64")]
    pub day_offset: f64,
    #[serde(default, deserialize_with = "de_f64")]
    pub offset_min: f64,
    #[serde(default, deserialize_with = "de_f64")]
    pub offset_max: f64,
    pub unique_event_name: String,
}

/// One arm of a longitudinal project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arm {
    #[serde(deserialize_with = "de_i64")]
    pub arm_num: i64,
    #[serde(default)]
    pub name: String,
}

// REDCap versions disagree on whether numbers are sent as JSON numbers or strings.
fn de_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("expected an integer, got {}", n))),
        serde_json::Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected an integer, got {:?}", s))),
        other => Err(D::Error::custom(format!("expected an integer, got {}", other))),
    }
}

fn de_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("expected a number, got {}", n))),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(0.0),
        serde_json::Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected a number, got {:?}", s))),
        serde_json::Value::Null => Ok(0.0),
        other => Err(D::Error::custom(format!("expected a number, got {}", other))),
    }
}
