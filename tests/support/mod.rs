//! Shared test support: an in-memory transport and metadata fixtures.

#![allow(dead_code)]

use redcap_sdk::transport::{ApiResponse, Transport, TransportError};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

pub const URL: &str = "https://redcap.example.org/api/";
pub const TOKEN: &str = "0123456789ABCDEF0123456789ABCDEF";

/// Transport answering by the request's `content` parameter and recording
/// every request it receives.
#[derive(Default)]
pub struct FakeTransport {
    responses: HashMap<String, Result<ApiResponse, String>>,
    requests: Mutex<Vec<Vec<(String, String)>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, content: &str, response: ApiResponse) -> Self {
        self.responses.insert(content.to_string(), Ok(response));
        self
    }

    pub fn respond_json(self, content: &str, body: Value) -> Self {
        self.respond(content, ApiResponse::ok(body.to_string()))
    }

    pub fn fail(mut self, content: &str, message: &str) -> Self {
        self.responses.insert(content.to_string(), Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<Vec<(String, String)>> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made for `content`
    pub fn count(&self, content: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| param(r, "content") == Some(content))
            .count()
    }

    /// The last request made for `content`
    pub fn last(&self, content: &str) -> Option<Vec<(String, String)>> {
        self.requests()
            .into_iter()
            .filter(|r| param(r, "content") == Some(content))
            .last()
    }
}

impl Transport for FakeTransport {
    fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<ApiResponse, TransportError> {
        assert_eq!(url, URL);
        let request: Vec<(String, String)> = form
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let content = param(&request, "content").unwrap_or_default().to_string();
        self.requests.lock().unwrap().push(request);

        match self.responses.get(&content) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(TransportError::NetworkError(message.clone())),
            None => Ok(ApiResponse::new(404, "")),
        }
    }
}

pub fn param<'a>(request: &'a [(String, String)], key: &str) -> Option<&'a str> {
    request
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// A raw metadata record with every attribute the API sends
pub fn raw_field(name: &str, form: &str, field_type: &str, choices: &str) -> Value {
    json!({
        "field_name": name,
        "form_name": form,
        "section_header": "",
        "field_type": field_type,
        "field_label": name.replace('_', " "),
        "select_choices_or_calculations": choices,
        "field_note": "",
        "text_validation_type_or_show_slider_number": "",
        "text_validation_min": "",
        "text_validation_max": "",
        "identifier": "",
        "branching_logic": "",
        "required_field": "",
        "custom_alignment": "",
        "question_number": "",
        "matrix_group_name": "",
        "matrix_ranking": "",
    })
}

/// Three forms: `demographics` (holding the unique key `study_id`),
/// `testing` and `imaging`.
pub fn study_metadata() -> Value {
    json!([
        raw_field("study_id", "demographics", "text", ""),
        raw_field("first_name", "demographics", "text", ""),
        raw_field("foo_score", "testing", "text", ""),
        raw_field("last_name", "demographics", "text", ""),
        raw_field("sex", "demographics", "radio", "0, Female | 1, Male"),
        raw_field("bar_score", "testing", "text", ""),
        raw_field("matcheck1", "demographics", "checkbox", "1, A|2, B|3, C"),
        raw_field("bmi", "demographics", "calc", "[weight]/([height]^2)"),
        raw_field("image_path", "imaging", "file", ""),
    ])
}

pub fn study_events() -> Value {
    json!([
        event("Baseline", "1", "0", "baseline_arm_1"),
        event("Week 1", "1", "7", "week_1_arm_1"),
        event("Baseline", "2", "0", "baseline_arm_2"),
    ])
}

fn event(name: &str, arm: &str, day_offset: &str, unique_name: &str) -> Value {
    json!({
        "event_name": name,
        "arm_num": arm,
        "day_offset": day_offset,
        "offset_min": "0",
        "offset_max": "1",
        "unique_event_name": unique_name,
    })
}

/// Classic project: metadata only, events answered with an error object
pub fn classic_transport() -> FakeTransport {
    let body = r#"{"error":"You cannot export events for classic projects"}"#;
    FakeTransport::new()
        .respond_json("metadata", study_metadata())
        .respond("event", ApiResponse::new(400, body))
}

pub fn longitudinal_transport() -> FakeTransport {
    FakeTransport::new()
        .respond_json("metadata", study_metadata())
        .respond_json("event", study_events())
        .respond_json(
            "arm",
            json!([{"arm_num": "1", "name": "Drug A"}, {"arm_num": "2", "name": "Placebo"}]),
        )
}
