//! Field model for the SDK
//!
//! A `Field` is one attribute of a REDCap data-entry form, as described by a
//! single record of the project's metadata (data dictionary).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field type tag from the REDCap data dictionary vocabulary.
///
/// Unknown tags are kept verbatim in [`FieldType::Other`] so that metadata
/// from newer REDCap versions still loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Notes,
    Dropdown,
    Radio,
    Checkbox,
    Calc,
    File,
    YesNo,
    TrueFalse,
    Slider,
    Descriptive,
    Sql,
    Other(String),
}

impl FieldType {
    /// The tag as it appears in the `field_type` metadata attribute
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Notes => "notes",
            FieldType::Dropdown => "dropdown",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Calc => "calc",
            FieldType::File => "file",
            FieldType::YesNo => "yesno",
            FieldType::TrueFalse => "truefalse",
            FieldType::Slider => "slider",
            FieldType::Descriptive => "descriptive",
            FieldType::Sql => "sql",
            FieldType::Other(tag) => tag,
        }
    }

    /// Whether the `select_choices_or_calculations` attribute holds an
    /// enumerated choice list for this type.
    pub fn has_choices(&self) -> bool {
        matches!(
            self,
            FieldType::Checkbox | FieldType::Dropdown | FieldType::Radio
        )
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        match tag {
            "text" => FieldType::Text,
            "notes" => FieldType::Notes,
            "dropdown" => FieldType::Dropdown,
            "radio" => FieldType::Radio,
            "checkbox" => FieldType::Checkbox,
            "calc" => FieldType::Calc,
            "file" => FieldType::File,
            "yesno" => FieldType::YesNo,
            "truefalse" => FieldType::TrueFalse,
            "slider" => FieldType::Slider,
            "descriptive" => FieldType::Descriptive,
            "sql" => FieldType::Sql,
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        FieldType::from(tag.as_str())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable option of a checkbox, dropdown or radio field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Coded value stored by REDCap
    pub id: i64,
    /// Display label
    pub label: String,
}

impl Choice {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Text validation settings of a field.
///
/// REDCap stores these as free text (`"0"`, `"100"`, `"2020-01-01"`, ...), so
/// they are kept as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    /// `text_validation_type_or_show_slider_number`
    pub kind: String,
    pub min: String,
    pub max: String,
}

/// Field model representing one metadata attribute of a form
///
/// `name` is unique across the whole project and is the join key used to
/// re-attach exported record values to their definitions.
///
/// # Example
///
/// ```rust
/// use redcap_sdk::models::{Field, FieldType};
///
/// let field = Field::new("study_id", "demographics", FieldType::Text);
/// assert_eq!(field.name, "study_id");
/// assert!(field.choices.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub form_name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Branching logic expression, kept opaque
    #[serde(default)]
    pub branching_logic: String,
    #[serde(default)]
    pub validation: Validation,
    /// Ordered choices for checkbox, dropdown and radio fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// Calculation expression for `calc` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<String>,
    #[serde(default)]
    pub field_note: String,
    #[serde(default)]
    pub custom_alignment: String,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub matrix_group_name: String,
    #[serde(default)]
    pub matrix_ranking: String,
    #[serde(default)]
    pub question_number: String,
    #[serde(default)]
    pub section_header: String,
    /// Exported value, only set on fields materialized into a [`Record`](super::Record)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Field {
    /// Create a field with the given name, owning form and type; every other
    /// attribute starts empty.
    pub fn new(
        name: impl Into<String>,
        form_name: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            form_name: form_name.into(),
            field_type,
            required: false,
            branching_logic: String::new(),
            validation: Validation::default(),
            choices: Vec::new(),
            calculation: None,
            field_note: String::new(),
            custom_alignment: String::new(),
            identifier: String::new(),
            matrix_group_name: String::new(),
            matrix_ranking: String::new(),
            question_number: String::new(),
            section_header: String::new(),
            value: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }

    /// Checkbox fields with at least one choice are stored by REDCap as one
    /// column per choice.
    pub fn is_fanned_out(&self) -> bool {
        self.field_type == FieldType::Checkbox && !self.choices.is_empty()
    }

    /// Storage column names for this field: `<name>___<id>` per choice for a
    /// fanned-out checkbox, otherwise just the field name.
    pub fn storage_columns(&self) -> Vec<String> {
        if self.is_fanned_out() {
            self.choices
                .iter()
                .map(|choice| format!("{}___{}", self.name, choice.id))
                .collect()
        } else {
            vec![self.name.clone()]
        }
    }

    /// A copy of this definition carrying an exported value
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        let mut field = self.clone();
        field.value = Some(value.into());
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_round_trip_tags() {
        assert_eq!(FieldType::from("checkbox"), FieldType::Checkbox);
        assert_eq!(FieldType::from("calc").as_str(), "calc");
        assert_eq!(
            FieldType::from("bioportal"),
            FieldType::Other("bioportal".to_string())
        );
        let other = FieldType::Other("bioportal".to_string());
        assert_eq!(other.as_str(), "bioportal");
    }

    #[test]
    fn test_choice_bearing_types() {
        assert!(FieldType::Checkbox.has_choices());
        assert!(FieldType::Dropdown.has_choices());
        assert!(FieldType::Radio.has_choices());
        assert!(!FieldType::Calc.has_choices());
        assert!(!FieldType::Text.has_choices());
    }

    #[test]
    fn test_checkbox_storage_columns() {
        let field = Field::new("meds", "medications", FieldType::Checkbox).with_choices(vec![
            Choice::new(1, "A"),
            Choice::new(2, "B"),
            Choice::new(3, "C"),
        ]);
        assert!(field.is_fanned_out());
        assert_eq!(
            field.storage_columns(),
            vec!["meds___1", "meds___2", "meds___3"]
        );
    }

    #[test]
    fn test_checkbox_without_choices_is_single_column() {
        let field = Field::new("meds", "medications", FieldType::Checkbox);
        assert!(!field.is_fanned_out());
        assert_eq!(field.storage_columns(), vec!["meds"]);
    }

    #[test]
    fn test_with_value_keeps_definition() {
        let field = Field::new("foo_score", "testing", FieldType::Text).with_label("Foo");
        let valued = field.with_value("10");
        assert_eq!(valued.value.as_deref(), Some("10"));
        assert_eq!(valued.label, "Foo");
        assert!(field.value.is_none());
    }

    #[test]
    fn test_field_type_serializes_as_tag() {
        let json = serde_json::to_string(&FieldType::Radio).unwrap();
        assert_eq!(json, "\"radio\"");
        let parsed: FieldType = serde_json::from_str("\"yesno\"").unwrap();
        assert_eq!(parsed, FieldType::YesNo);
    }
}
