//! Output formatting for CLI

use crate::cli::CliError;
use crate::models::{Event, Field, Form, Record};

/// One line per field: name, form, type, required flag and choice summary
pub fn format_metadata(fields: &[Field]) -> String {
    let name_width = column_width(fields.iter().map(|f| f.name.as_str()), "FIELD");
    let form_width = column_width(fields.iter().map(|f| f.form_name.as_str()), "FORM");

    let mut output = format!(
        "{:<name_width$}  {:<form_width$}  {:<11}  {:<8}  CHOICES\n",
        "FIELD", "FORM", "TYPE", "REQUIRED"
    );
    for field in fields {
        let choices = if let Some(calculation) = &field.calculation {
            format!("= {}", calculation)
        } else {
            field
                .choices
                .iter()
                .map(|c| format!("{}={}", c.id, c.label))
                .collect::<Vec<_>>()
                .join(", ")
        };
        output.push_str(&format!(
            "{:<name_width$}  {:<form_width$}  {:<11}  {:<8}  {}\n",
            field.name,
            field.form_name,
            field.field_type.as_str(),
            if field.required { "yes" } else { "" },
            choices
        ));
    }
    output
}

/// Form names with their field and column counts
pub fn format_forms(forms: &[&Form]) -> String {
    let mut output = format!("{} form(s):\n", forms.len());
    for form in forms {
        output.push_str(&format!(
            "  - {} ({} fields, {} columns)\n",
            form.name,
            form.fields().len(),
            form.columns().len()
        ));
    }
    output
}

pub fn format_events(events: &[Event]) -> String {
    if events.is_empty() {
        return "Project is not longitudinal\n".to_string();
    }

    let mut output = format!("{} event(s):\n", events.len());
    for event in events {
        output.push_str(&format!(
            "  - {} (arm {}, day {}, window -{}/+{})\n",
            event.unique_event_name,
            event.arm_num,
            event.day_offset,
            event.offset_min,
            event.offset_max
        ));
    }
    output
}

pub fn format_records(records: &[Record], pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    };
    json.map_err(|e| CliError::OutputError(e.to_string()))
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values.map(str::len).chain(std::iter::once(header.len())).max().unwrap_or(0)
}
