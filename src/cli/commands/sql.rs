//! Sql command implementation

use crate::cli::error::CliError;
use crate::export::{ExportError, SqlDialect};
use crate::project::Project;
use crate::transport::Transport;

/// Handle the sql command
///
/// With `form`, only that form's statement is produced.
pub fn handle_sql<T: Transport>(
    project: &mut Project<T>,
    dialect: &str,
    form: Option<&str>,
) -> Result<String, CliError> {
    let dialect: SqlDialect = dialect.parse().map_err(|e: ExportError| {
        CliError::InvalidArgument(e.to_string())
    })?;

    if project.forms().is_empty() {
        project.get_forms()?;
    }
    // Events decide whether tables get an event-name column.
    project.get_events()?;

    let sql = match form {
        Some(name) => project
            .form(name)
            .map(|f| f.to_sql(dialect.as_str()))
            .ok_or_else(|| CliError::FormNotFound(name.to_string()))?,
        None => project.to_sql(dialect.as_str()),
    };

    Ok(sql.trim_start_matches('\n').to_string())
}
