//! Records command implementation

use crate::cli::error::CliError;
use crate::cli::output::format_records;
use crate::project::Project;
use crate::transport::Transport;

/// Export all records and render them as JSON
pub fn handle_records<T: Transport>(
    project: &mut Project<T>,
    pretty: bool,
) -> Result<String, CliError> {
    let records = project.get_records()?;
    format_records(&records, pretty)
}
