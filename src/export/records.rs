//! Record export
//!
//! Builds the parameters of a `content=record` request and joins the flat
//! exported rows back onto the typed field definitions of the project's forms.

use crate::error::RedcapError;
use crate::models::{Form, Record};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

pub const DEFAULT_RAW_OR_LABEL: &str = "raw";
pub const DEFAULT_EVENT_NAME: &str = "label";
pub const DEFAULT_FORMAT: &str = "json";

/// Options of a record export request
///
/// Empty filter lists mean "unfiltered"; unset string options take their
/// defaults (`rawOrLabel=raw`, `eventName=label`, `format=json`) when the
/// request is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportParameters {
    #[serde(default)]
    pub records: Vec<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub forms: Vec<String>,
    #[serde(default)]
    pub events: Vec<String>,
    pub raw_or_label: Option<String>,
    pub event_name: Option<String>,
    pub format: Option<String>,
    #[serde(default)]
    pub export_survey_fields: bool,
    #[serde(default)]
    pub export_data_access_groups: bool,
    #[serde(default)]
    pub export_checkbox_label: bool,
}

impl ExportParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records<I, S>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.records = records.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_forms<I, S>(mut self, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forms = forms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_raw_or_label(mut self, raw_or_label: impl Into<String>) -> Self {
        self.raw_or_label = Some(raw_or_label.into());
        self
    }

    pub fn with_event_name(mut self, event_name: impl Into<String>) -> Self {
        self.event_name = Some(event_name.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_survey_fields(mut self, enabled: bool) -> Self {
        self.export_survey_fields = enabled;
        self
    }

    pub fn with_data_access_groups(mut self, enabled: bool) -> Self {
        self.export_data_access_groups = enabled;
        self
    }

    pub fn with_checkbox_label(mut self, enabled: bool) -> Self {
        self.export_checkbox_label = enabled;
        self
    }

    /// Fill unset or empty string options with their defaults
    pub fn with_defaults(mut self) -> Self {
        fn default_if_unset(option: &mut Option<String>, default: &str) {
            if option.as_deref().is_none_or(str::is_empty) {
                *option = Some(default.to_string());
            }
        }

        default_if_unset(&mut self.raw_or_label, DEFAULT_RAW_OR_LABEL);
        default_if_unset(&mut self.event_name, DEFAULT_EVENT_NAME);
        default_if_unset(&mut self.format, DEFAULT_FORMAT);
        self
    }

    /// Optional request parameters, defaults applied and list filters joined
    /// with `,`.
    pub fn form_params(&self) -> Vec<(&'static str, String)> {
        let params = self.clone().with_defaults();
        vec![
            ("records", params.records.join(",")),
            ("fields", params.fields.join(",")),
            ("forms", params.forms.join(",")),
            ("events", params.events.join(",")),
            ("rawOrLabel", params.raw_or_label.unwrap_or_default()),
            ("eventName", params.event_name.unwrap_or_default()),
            ("format", params.format.unwrap_or_default()),
            (
                "exportSurveyFields",
                params.export_survey_fields.to_string(),
            ),
            (
                "exportDataAccessGroups",
                params.export_data_access_groups.to_string(),
            ),
            (
                "exportCheckboxLabel",
                params.export_checkbox_label.to_string(),
            ),
        ]
    }
}

/// Join a JSON record export onto the fields of `forms`.
///
/// Forms are scanned in name order and fields in form order, so each record
/// lists its fields deterministically. A field is included only when the
/// exported row carries a value for it. Names in the row that match no
/// field are kept on [`Record::unmatched`].
pub fn materialize_records(body: &[u8], forms: &[&Form]) -> Result<Vec<Record>, RedcapError> {
    let rows: Vec<Map<String, Value>> = serde_json::from_slice(body)
        .map_err(|e| RedcapError::RecordPayload(e.to_string()))?;

    let mut forms = forms.to_vec();
    forms.sort_by(|a, b| a.name.cmp(&b.name));

    rows.iter()
        .enumerate()
        .map(|(index, row)| materialize_row(index, row, &forms))
        .collect()
}

fn materialize_row(
    index: usize,
    row: &Map<String, Value>,
    forms: &[&Form],
) -> Result<Record, RedcapError> {
    let mut record = Record::default();
    let mut matched: HashSet<&str> = HashSet::new();

    for form in forms {
        for field in form.fields() {
            if let Some(value) = row.get(&field.name) {
                record.fields.push(field.with_value(render_value(index, &field.name, value)?));
                matched.insert(field.name.as_str());
            }
        }
    }

    record.unmatched = row
        .keys()
        .filter(|name| !matched.contains(name.as_str()))
        .cloned()
        .collect();

    if !record.unmatched.is_empty() {
        debug!(
            "Record {}: {} exported name(s) matched no field: {}",
            index,
            record.unmatched.len(),
            record.unmatched.join(", ")
        );
    }

    Ok(record)
}

fn render_value(index: usize, name: &str, value: &Value) -> Result<String, RedcapError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(RedcapError::RecordPayload(format!(
            "record {}: value of '{}' is not a scalar",
            index, name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Field, FieldType};

    fn testing_form() -> Form {
        let mut form = Form::new("testing", "study_id", false);
        form.add_field(Field::new("study_id", "testing", FieldType::Text));
        form.add_field(Field::new("foo_score", "testing", FieldType::Text));
        form.add_field(Field::new("bar_score", "testing", FieldType::Text));
        form
    }

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> &'a str {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let params = ExportParameters::new().form_params();
        assert_eq!(param(&params, "rawOrLabel"), "raw");
        assert_eq!(param(&params, "eventName"), "label");
        assert_eq!(param(&params, "format"), "json");
        assert_eq!(param(&params, "records"), "");
        assert_eq!(param(&params, "exportSurveyFields"), "false");
        assert_eq!(param(&params, "exportDataAccessGroups"), "false");
        assert_eq!(param(&params, "exportCheckboxLabel"), "false");
    }

    #[test]
    fn test_empty_string_option_defaulted() {
        let params = ExportParameters::new().with_format("").form_params();
        assert_eq!(param(&params, "format"), "json");
    }

    #[test]
    fn test_filters_joined() {
        let params = ExportParameters::new()
            .with_records(["1", "2", "3"])
            .with_fields(["study_id", "foo_score"])
            .with_forms(["testing"])
            .with_events(["baseline_arm_1", "week_1_arm_1"])
            .with_raw_or_label("label")
            .with_format("csv")
            .with_checkbox_label(true)
            .form_params();
        assert_eq!(param(&params, "records"), "1,2,3");
        assert_eq!(param(&params, "fields"), "study_id,foo_score");
        assert_eq!(param(&params, "forms"), "testing");
        assert_eq!(param(&params, "events"), "baseline_arm_1,week_1_arm_1");
        assert_eq!(param(&params, "rawOrLabel"), "label");
        assert_eq!(param(&params, "format"), "csv");
        assert_eq!(param(&params, "exportCheckboxLabel"), "true");
    }

    #[test]
    fn test_materialize_present_fields_only() {
        let form = testing_form();
        let records =
            materialize_records(br#"[{"study_id":"X","foo_score":"10"}]"#, &[&form]).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.len(), 2);
        assert_eq!(record.fields[0].name, "study_id");
        assert_eq!(record.value("study_id"), Some("X"));
        assert_eq!(record.fields[1].name, "foo_score");
        assert_eq!(record.value("foo_score"), Some("10"));
        assert!(record.get("bar_score").is_none());
        assert!(record.unmatched().is_empty());
    }

    #[test]
    fn test_unmatched_names_kept() {
        let form = testing_form();
        let records = materialize_records(
            br#"[{"study_id":"1","testing_complete":"2","redcap_event_name":"baseline_arm_1"}]"#,
            &[&form],
        )
        .unwrap();
        assert_eq!(records[0].len(), 1);
        assert_eq!(
            records[0].unmatched(),
            &[
                "redcap_event_name".to_string(),
                "testing_complete".to_string(),
            ]
        );
    }

    #[test]
    fn test_scalar_values_rendered() {
        let form = testing_form();
        let body = br#"[{"study_id":7,"foo_score":null,"bar_score":true}]"#;
        let records = materialize_records(body, &[&form]).unwrap();
        assert_eq!(records[0].value("study_id"), Some("7"));
        assert_eq!(records[0].value("foo_score"), Some(""));
        assert_eq!(records[0].value("bar_score"), Some("true"));
    }

    #[test]
    fn test_nested_value_rejected() {
        let form = testing_form();
        let result = materialize_records(br#"[{"study_id":["a"]}]"#, &[&form]);
        assert!(matches!(result, Err(RedcapError::RecordPayload(_))));
    }

    #[test]
    fn test_non_array_payload_rejected() {
        let form = testing_form();
        let result = materialize_records(br#"{"error":"You do not have permissions"}"#, &[&form]);
        assert!(matches!(result, Err(RedcapError::RecordPayload(_))));
    }
}
