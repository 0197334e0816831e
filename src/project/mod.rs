//! REDCap project
//!
//! The [`Project`] is the aggregate root: it fetches the project's metadata,
//! groups fields into forms, detects the longitudinal event structure, and
//! offers DDL synthesis and record export on top of that model.
//!
//! Initialization is a strict sequence (metadata, field labels, forms,
//! events, arms) because every stage depends on the field list or unique key
//! produced by the one before it.

pub mod cache;

pub use cache::Fetch;

use crate::config::ProjectConfig;
use crate::error::{RedcapError, Result};
use crate::export::records::{ExportParameters, materialize_records};
use crate::export::sql::{SqlDialect, SqlExporter};
use crate::import::{parse_arms, parse_events, parse_metadata};
use crate::models::{Arm, Event, Field, Form, Record};
use crate::transport::{ApiResponse, HttpTransport, Transport};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use tracing::{debug, info, warn};

/// A REDCap project reached through one API URL and token
///
/// # Example
///
/// ```rust,no_run
/// use redcap_sdk::Project;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let project = Project::new("https://redcap.example.org/api/", "<redcap-token>", true)?;
/// print!("{}", project.to_sql("postgres"));
/// # Ok(())
/// # }
/// ```
pub struct Project<T: Transport = HttpTransport> {
    url: String,
    token: String,
    transport: T,
    metadata: Fetch<Vec<Field>>,
    unique_key: Option<Field>,
    field_labels: Vec<String>,
    forms: HashMap<String, Form>,
    events: Fetch<Vec<Event>>,
    arms: Fetch<Vec<Arm>>,
}

impl Project<HttpTransport> {
    /// Open a project over HTTP with the default timeout.
    ///
    /// With `initialize`, metadata, forms and events are fetched right away;
    /// otherwise everything is fetched on first use.
    pub fn new(url: impl Into<String>, token: impl Into<String>, initialize: bool) -> Result<Self> {
        Self::from_config(&ProjectConfig::new(url, token).with_initialize(initialize))
    }

    pub fn from_config(config: &ProjectConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout_secs)
            .map_err(|e| RedcapError::ConfigError(e.to_string()))?;

        let mut project = Self::with_transport(config.url.clone(), config.token.clone(), transport);
        if config.initialize {
            project.initialize()?;
        }
        Ok(project)
    }
}

impl<T: Transport> Project<T> {
    /// Create a project on top of a custom transport. Nothing is fetched.
    pub fn with_transport(url: impl Into<String>, token: impl Into<String>, transport: T) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            transport,
            metadata: Fetch::NotFetched,
            unique_key: None,
            field_labels: Vec::new(),
            forms: HashMap::new(),
            events: Fetch::NotFetched,
            arms: Fetch::NotFetched,
        }
    }

    /// Run the initialization pipeline.
    pub fn initialize(&mut self) -> Result<()> {
        self.get_metadata()?;
        self.get_field_labels()?;
        self.get_forms()?;
        self.get_events()?;
        if self.is_longitudinal() {
            self.get_arms()?;
        }
        Ok(())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request(
        &self,
        content: &'static str,
        params: Vec<(&'static str, String)>,
    ) -> Result<ApiResponse> {
        let mut form: Vec<(&str, String)> = Vec::with_capacity(params.len() + 2);
        form.push(("token", self.token.clone()));
        form.push(("content", content.to_string()));
        form.extend(params);

        debug!("Requesting '{}' from {}", content, self.url);
        self.transport
            .post_form(&self.url, &form)
            .map_err(|source| RedcapError::Transport { content, source })
    }

    /// Request where anything but a 2xx response is an error
    fn request_required(
        &self,
        content: &'static str,
        params: Vec<(&'static str, String)>,
    ) -> Result<Vec<u8>> {
        let response = self.request(content, params)?;
        if !response.is_success() {
            return Err(RedcapError::Status {
                content,
                status: response.status,
                body: response.text(),
            });
        }
        Ok(response.body)
    }

    /// Request whose failed status or unparseable body means "not present"
    fn request_optional<U, E: fmt::Display>(
        &self,
        content: &'static str,
        parse: impl FnOnce(&[u8]) -> std::result::Result<Vec<U>, E>,
    ) -> Result<Vec<U>> {
        let response = self.request(content, vec![("format", "json".to_string())])?;
        if !response.is_success() {
            debug!(
                "'{}' request returned HTTP {}, treating as absent",
                content, response.status
            );
            return Ok(Vec::new());
        }
        match parse(&response.body) {
            Ok(items) => Ok(items),
            Err(e) => {
                debug!(
                    "'{}' payload not usable ({}), treating as absent",
                    content, e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Fetch the project's fields, or return the cached list.
    ///
    /// The first field becomes the project's unique key. A failed fetch is
    /// recorded and retried on the next call; a successful one is kept for
    /// the lifetime of the project.
    pub fn get_metadata(&mut self) -> Result<&[Field]> {
        if !self.metadata.is_fetched() {
            match self.fetch_metadata() {
                Ok(fields) => {
                    self.unique_key = fields.first().cloned();
                    self.metadata = Fetch::Fetched(fields);
                }
                Err(e) => {
                    self.metadata = Fetch::Failed(e.to_string());
                    return Err(e);
                }
            }
        }
        Ok(self.metadata.get().map(Vec::as_slice).unwrap_or_default())
    }

    fn fetch_metadata(&self) -> Result<Vec<Field>> {
        let body = self.request_required("metadata", vec![("format", "json".to_string())])?;
        let fields = parse_metadata(&body)?;
        if fields.is_empty() {
            return Err(RedcapError::EmptyMetadata);
        }
        info!("Loaded {} fields from REDCap metadata", fields.len());
        Ok(fields)
    }

    pub fn metadata_state(&self) -> &Fetch<Vec<Field>> {
        &self.metadata
    }

    /// The record-identifier field (first field of the metadata)
    pub fn unique_key(&self) -> Option<&Field> {
        self.unique_key.as_ref()
    }

    /// Labels of every field, in metadata order
    pub fn get_field_labels(&mut self) -> Result<&[String]> {
        let labels: Vec<String> = self.get_metadata()?.iter().map(|f| f.label.clone()).collect();
        self.field_labels = labels;
        Ok(&self.field_labels)
    }

    pub fn field_labels(&self) -> &[String] {
        &self.field_labels
    }

    /// Rebuild the form mapping from the metadata.
    ///
    /// Each form keeps its fields in first-appearance order. The mapping
    /// itself is unordered; use [`sorted_forms`](Self::sorted_forms) when
    /// order matters.
    pub fn get_forms(&mut self) -> Result<&HashMap<String, Form>> {
        let fields = self.get_metadata()?.to_vec();
        let unique_key = self
            .unique_key
            .as_ref()
            .map(|f| f.name.clone())
            .unwrap_or_default();
        let longitudinal = self.is_longitudinal();

        let mut forms: HashMap<String, Form> = HashMap::new();
        for field in fields {
            let form_name = field.form_name.clone();
            let form = forms
                .entry(form_name.clone())
                .or_insert_with(|| Form::new(form_name, &unique_key, longitudinal));
            let name = field.name.clone();
            if !form.add_field(field) {
                warn!("Field '{}' appears twice in form '{}'", name, form.name);
            }
        }

        info!(
            "Grouped {} fields into {} forms",
            self.field_count(),
            forms.len()
        );
        self.forms = forms;
        Ok(&self.forms)
    }

    fn field_count(&self) -> usize {
        self.metadata.get().map_or(0, Vec::len)
    }

    pub fn forms(&self) -> &HashMap<String, Form> {
        &self.forms
    }

    pub fn form(&self, name: &str) -> Option<&Form> {
        self.forms.get(name)
    }

    /// Forms ordered by name
    pub fn sorted_forms(&self) -> Vec<&Form> {
        let mut forms: Vec<&Form> = self.forms.values().collect();
        forms.sort_by(|a, b| a.name.cmp(&b.name));
        forms
    }

    /// Fetch the project's events, or return the cached list.
    ///
    /// An error status, empty body or unparseable payload means the project
    /// is not longitudinal and yields an empty list. Only a transport failure
    /// is an error.
    pub fn get_events(&mut self) -> Result<&[Event]> {
        if !self.events.is_fetched() {
            match self.request_optional("event", parse_events) {
                Ok(events) => {
                    if events.is_empty() {
                        info!("Project is not longitudinal");
                    } else {
                        info!("Loaded {} events", events.len());
                    }
                    self.events = Fetch::Fetched(events);
                    self.sync_longitudinal();
                }
                Err(e) => {
                    self.events = Fetch::Failed(e.to_string());
                    return Err(e);
                }
            }
        }
        Ok(self.events.get().map(Vec::as_slice).unwrap_or_default())
    }

    pub fn events_state(&self) -> &Fetch<Vec<Event>> {
        &self.events
    }

    /// Whether fetched events exist. `false` until events have been fetched.
    pub fn is_longitudinal(&self) -> bool {
        self.events.get().is_some_and(|events| !events.is_empty())
    }

    fn sync_longitudinal(&mut self) {
        let longitudinal = self.is_longitudinal();
        for form in self.forms.values_mut() {
            form.set_longitudinal(longitudinal);
        }
    }

    /// Fetch the project's arms, or return the cached list.
    ///
    /// Treated like events: absent arms are an empty list, not an error.
    pub fn get_arms(&mut self) -> Result<&[Arm]> {
        if !self.arms.is_fetched() {
            match self.request_optional("arm", parse_arms) {
                Ok(arms) => {
                    debug!("Loaded {} arms", arms.len());
                    self.arms = Fetch::Fetched(arms);
                }
                Err(e) => {
                    self.arms = Fetch::Failed(e.to_string());
                    return Err(e);
                }
            }
        }
        Ok(self.arms.get().map(Vec::as_slice).unwrap_or_default())
    }

    pub fn arm_names(&self) -> Vec<String> {
        self.arms
            .get()
            .map(|arms| arms.iter().map(|a| a.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Arm numbers from the fetched arms, falling back to the distinct arm
    /// numbers referenced by events.
    pub fn arm_numbers(&self) -> Vec<i64> {
        if let Some(arms) = self.arms.get()
            && !arms.is_empty()
        {
            return arms.iter().map(|a| a.arm_num).collect();
        }

        self.events
            .get()
            .map(|events| {
                events
                    .iter()
                    .map(|e| e.arm_num)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// DDL for every form, in form-name order.
    ///
    /// An unsupported dialect is logged and yields an empty string.
    pub fn to_sql(&self, dialect: &str) -> String {
        match dialect.parse::<SqlDialect>() {
            Ok(dialect) => SqlExporter::export_forms(self.forms.values(), dialect),
            Err(e) => {
                warn!("{}", e);
                String::new()
            }
        }
    }

    /// Request record data and return the raw payload.
    pub fn export_records(&self, params: &ExportParameters) -> Result<Vec<u8>> {
        self.request_required("record", params.form_params())
    }

    /// Export every record as JSON and join each row onto the form fields.
    pub fn get_records(&mut self) -> Result<Vec<Record>> {
        if self.forms.is_empty() {
            self.get_forms()?;
        }

        let body = self.export_records(&ExportParameters::new().with_format("json"))?;
        let forms: Vec<&Form> = self.forms.values().collect();
        let records = materialize_records(&body, &forms)?;
        info!("Materialized {} records", records.len());
        Ok(records)
    }
}

impl<T: Transport> fmt::Debug for Project<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("fields", &self.field_count())
            .field("forms", &self.forms.len())
            .field("longitudinal", &self.is_longitudinal())
            .finish()
    }
}
