//! Metadata, forms and events commands

use crate::cli::error::CliError;
use crate::cli::output::{format_events, format_forms, format_metadata};
use crate::project::Project;
use crate::transport::Transport;

pub fn handle_metadata<T: Transport>(project: &mut Project<T>) -> Result<String, CliError> {
    let fields = project.get_metadata()?;
    Ok(format_metadata(fields))
}

pub fn handle_forms<T: Transport>(project: &mut Project<T>) -> Result<String, CliError> {
    if project.forms().is_empty() {
        project.get_forms()?;
    }
    Ok(format_forms(&project.sorted_forms()))
}

pub fn handle_events<T: Transport>(project: &mut Project<T>) -> Result<String, CliError> {
    let events = project.get_events()?;
    Ok(format_events(events))
}
