//! SQL exporter for generating CREATE TABLE statements from forms.
//!
//! No attempt is made to infer column types: REDCap metadata does not reliably
//! expose storage types, so every column is `text`.

use crate::export::{ExportError, ExportResult};
use crate::models::Form;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Supported SQL dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    Postgres,
}

impl SqlDialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlDialect::Postgres => "postgres",
        }
    }

    /// Column type used for every column
    fn text_type(&self) -> &'static str {
        match self {
            SqlDialect::Postgres => "text",
        }
    }
}

impl FromStr for SqlDialect {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgres" => Ok(SqlDialect::Postgres),
            other => Err(ExportError::UnsupportedDialect(other.to_string())),
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exporter for SQL CREATE TABLE format.
pub struct SqlExporter;

impl SqlExporter {
    /// Export a form to a CREATE TABLE statement.
    ///
    /// # Example
    ///
    /// ```rust
    /// use redcap_sdk::export::sql::{SqlDialect, SqlExporter};
    /// use redcap_sdk::models::{Field, FieldType, Form};
    ///
    /// let mut form = Form::new("imaging", "study_id", false);
    /// form.add_field(Field::new("image_path", "imaging", FieldType::File));
    ///
    /// let sql = SqlExporter::export_form(&form, SqlDialect::Postgres);
    /// assert!(sql.starts_with("\nCREATE TABLE imaging\n(\n\tstudy_id text,\n"));
    /// assert!(sql.ends_with("\timage_path text,\n\tform_status text\n);"));
    /// ```
    pub fn export_form(form: &Form, dialect: SqlDialect) -> String {
        let column_type = dialect.text_type();
        let columns: Vec<String> = form
            .columns()
            .iter()
            .map(|column| format!("\t{} {}", column, column_type))
            .collect();

        format!(
            "\nCREATE TABLE {}\n(\n{}\n);",
            form.name,
            columns.join(",\n")
        )
    }

    /// String form of [`export_form`](Self::export_form) taking a dialect name.
    ///
    /// An unsupported dialect is logged and produces an empty string, never a
    /// partial statement.
    pub fn form_to_sql(form: &Form, dialect: &str) -> String {
        match dialect.parse::<SqlDialect>() {
            Ok(dialect) => Self::export_form(form, dialect),
            Err(e) => {
                warn!("{}", e);
                String::new()
            }
        }
    }

    /// Concatenate the statements of several forms, visiting them in
    /// name order so output is reproducible.
    pub fn export_forms<'a>(
        forms: impl IntoIterator<Item = &'a Form>,
        dialect: SqlDialect,
    ) -> String {
        let mut forms: Vec<&Form> = forms.into_iter().collect();
        forms.sort_by(|a, b| a.name.cmp(&b.name));

        forms
            .into_iter()
            .map(|form| Self::export_form(form, dialect))
            .collect()
    }

    /// Export forms to SQL (SDK interface).
    ///
    /// Unlike [`form_to_sql`](Self::form_to_sql), an unsupported dialect is
    /// reported as an error.
    pub fn export(&self, forms: &[&Form], dialect: &str) -> Result<ExportResult, ExportError> {
        let dialect: SqlDialect = dialect.parse()?;
        Ok(ExportResult {
            content: Self::export_forms(forms.iter().copied(), dialect),
            format: "sql".to_string(),
        })
    }
}
