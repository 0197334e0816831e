//! Form model for the SDK

use super::field::Field;
use crate::export::sql::SqlExporter;
use serde::Serialize;
use std::fmt;

/// Column carrying the event name in longitudinal projects
pub const EVENT_NAME_COLUMN: &str = "redcap_event_name";

/// Completion-status column every form carries
pub const FORM_STATUS_COLUMN: &str = "form_status";

/// A named data-entry instrument and its fields in metadata order.
///
/// Instead of pointing back at its project, a form stores the two
/// project-wide facts it needs: the unique-key field name and whether the
/// project is longitudinal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Form {
    pub name: String,
    fields: Vec<Field>,
    unique_key: String,
    longitudinal: bool,
}

impl Form {
    pub fn new(name: impl Into<String>, unique_key: impl Into<String>, longitudinal: bool) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            unique_key: unique_key.into(),
            longitudinal,
        }
    }

    /// Fields in first-appearance order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn unique_key(&self) -> &str {
        &self.unique_key
    }

    pub fn is_longitudinal(&self) -> bool {
        self.longitudinal
    }

    pub(crate) fn set_longitudinal(&mut self, longitudinal: bool) {
        self.longitudinal = longitudinal;
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Append a field, keeping names unique within the form.
    ///
    /// Returns `false` (and leaves the form unchanged) if a field with the same
    /// name is already present.
    pub fn add_field(&mut self, field: Field) -> bool {
        if self.contains_field(&field.name) {
            return false;
        }
        self.fields.push(field);
        true
    }

    /// Storage column names in table order.
    ///
    /// The unique key comes first and appears exactly once, followed by the
    /// event-name column for longitudinal projects, then each field (checkbox
    /// fields fanned out to one column per choice), then `form_status`.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = Vec::with_capacity(self.fields.len() + 3);
        columns.push(self.unique_key.clone());
        if self.longitudinal {
            columns.push(EVENT_NAME_COLUMN.to_string());
        }

        for field in &self.fields {
            if field.is_fanned_out() {
                columns.extend(field.storage_columns());
            } else if field.name == self.unique_key {
                continue;
            } else {
                columns.push(field.name.clone());
            }
        }

        columns.push(FORM_STATUS_COLUMN.to_string());
        columns
    }

    /// Generate a `CREATE TABLE` statement for this form.
    ///
    /// Only the `postgres` dialect is supported; any other dialect logs a
    /// warning and yields an empty string.
    pub fn to_sql(&self, dialect: &str) -> String {
        SqlExporter::form_to_sql(self, dialect)
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REDCap Form: {}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Choice, FieldType};

    fn testing_form(longitudinal: bool) -> Form {
        let mut form = Form::new("testing", "study_id", longitudinal);
        form.add_field(Field::new("study_id", "testing", FieldType::Text));
        form.add_field(Field::new("foo_score", "testing", FieldType::Text));
        form.add_field(Field::new("bar_score", "testing", FieldType::Text));
        form
    }

    #[test]
    fn test_add_field_rejects_duplicates() {
        let mut form = testing_form(false);
        assert!(!form.add_field(Field::new("foo_score", "testing", FieldType::Notes)));
        assert_eq!(form.fields().len(), 3);
        assert_eq!(form.field("foo_score").unwrap().field_type, FieldType::Text);
    }

    #[test]
    fn test_columns_unique_key_once() {
        let form = testing_form(false);
        assert_eq!(
            form.columns(),
            vec!["study_id", "foo_score", "bar_score", "form_status"]
        );
    }

    #[test]
    fn test_columns_unique_key_from_other_form() {
        let mut form = Form::new("imaging", "study_id", false);
        form.add_field(Field::new("image_path", "imaging", FieldType::File));
        assert_eq!(
            form.columns(),
            vec!["study_id", "image_path", "form_status"]
        );
    }

    #[test]
    fn test_columns_longitudinal() {
        let form = testing_form(true);
        assert_eq!(form.columns()[1], EVENT_NAME_COLUMN);
        assert_eq!(form.columns().len(), 5);
    }

    #[test]
    fn test_columns_checkbox_fanout() {
        let mut form = Form::new("meds_form", "study_id", false);
        form.add_field(Field::new("study_id", "meds_form", FieldType::Text));
        let choices = vec![
            Choice::new(1, "A"),
            Choice::new(2, "B"),
            Choice::new(3, "C"),
        ];
        let meds = Field::new("meds", "meds_form", FieldType::Checkbox).with_choices(choices);
        form.add_field(meds);
        assert_eq!(
            form.columns(),
            vec![
                "study_id",
                "meds___1",
                "meds___2",
                "meds___3",
                "form_status",
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(testing_form(false).to_string(), "REDCap Form: testing");
    }
}
