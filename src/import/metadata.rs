//! Metadata import
//!
//! Parses the JSON array returned by a `content=metadata` request. Every
//! record must carry the full set of data dictionary attributes as strings;
//! anything else is rejected rather than guessed at.

use super::ImportError;
use crate::models::{Choice, Field, FieldType, Validation};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A single raw metadata record, as delivered by the API
pub type RawField = Map<String, Value>;

/// Parse a metadata payload into fields, preserving their order.
///
/// Fails on the first malformed record and on duplicate field names.
pub fn parse_metadata(body: &[u8]) -> Result<Vec<Field>, ImportError> {
    let records: Vec<Value> = serde_json::from_slice(body)?;

    let mut seen = HashSet::with_capacity(records.len());
    let mut fields = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let raw = record
            .as_object()
            .ok_or(ImportError::NotAnObject { index })?;
        let field = parse_field(index, raw)?;
        if !seen.insert(field.name.clone()) {
            return Err(ImportError::DuplicateField(field.name));
        }
        fields.push(field);
    }

    Ok(fields)
}

/// Parse one raw metadata record.
///
/// `index` is the record's position in the payload and is only used to
/// identify the record in errors.
pub fn parse_field(index: usize, raw: &RawField) -> Result<Field, ImportError> {
    let attr = |attribute: &str| -> Result<String, ImportError> {
        raw.get(attribute)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ImportError::MissingAttribute {
                index,
                attribute: attribute.to_string(),
            })
    };

    let name = attr("field_name")?;
    let field_type = FieldType::from(attr("field_type")?);

    let mut choices = Vec::new();
    let mut calculation = None;
    if field_type.has_choices() {
        choices = parse_choices(&name, &attr("select_choices_or_calculations")?)?;
    } else if field_type == FieldType::Calc {
        calculation = Some(attr("select_choices_or_calculations")?);
    }

    Ok(Field {
        label: attr("field_label")?,
        form_name: attr("form_name")?,
        required: attr("required_field")? == "Y",
        branching_logic: attr("branching_logic")?,
        validation: Validation {
            kind: attr("text_validation_type_or_show_slider_number")?,
            min: attr("text_validation_min")?,
            max: attr("text_validation_max")?,
        },
        field_note: attr("field_note")?,
        custom_alignment: attr("custom_alignment")?,
        identifier: attr("identifier")?,
        matrix_group_name: attr("matrix_group_name")?,
        matrix_ranking: attr("matrix_ranking")?,
        question_number: attr("question_number")?,
        section_header: attr("section_header")?,
        name,
        field_type,
        choices,
        calculation,
        value: None,
    })
}

/// Parse a `"1, Yes | 2, No"` choice list.
///
/// Segments are separated by `|`; each non-empty segment is split on its
/// first `,` into an integer id and a label. Order is preserved.
///
/// # Example
///
/// ```rust
/// use redcap_sdk::import::parse_choices;
///
/// let choices = parse_choices("sex", "0, Female | 1, Male").unwrap();
/// assert_eq!(choices.len(), 2);
/// assert_eq!(choices[1].id, 1);
/// assert_eq!(choices[1].label, "Male");
/// ```
pub fn parse_choices(field: &str, raw: &str) -> Result<Vec<Choice>, ImportError> {
    let invalid = |segment: &str, reason: String| ImportError::InvalidChoice {
        field: field.to_string(),
        segment: segment.to_string(),
        reason,
    };

    let mut choices = Vec::new();
    for segment in raw.split('|').map(str::trim).filter(|s| !s.is_empty()) {
        let (id, label) = segment
            .split_once(',')
            .ok_or_else(|| invalid(segment, "missing ',' between id and label".to_string()))?;
        let id = id
            .trim()
            .parse::<i64>()
            .map_err(|e| invalid(segment, format!("id is not an integer ({})", e)))?;
        choices.push(Choice::new(id, label.trim()));
    }

    Ok(choices)
}
