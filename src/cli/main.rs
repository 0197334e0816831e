//! REDCap command-line client.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use redcap_sdk::Project;
use redcap_sdk::cli::{commands, logging, resolve_config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "redcap",
    version,
    about = "Command-line client for the REDCap metadata API"
)]
struct Cli {
    /// REDCap API URL
    #[arg(long, env = "REDCAP_API_URL", global = true)]
    url: Option<String>,

    /// REDCap API token
    #[arg(long, env = "REDCAP_API_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "REDCAP_TIMEOUT_SECS", global = true)]
    timeout: Option<u64>,

    /// TOML file with url, token and timeout_secs
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print CREATE TABLE statements for the project's forms
    Sql {
        #[arg(long, default_value = "postgres")]
        dialect: String,
        /// Only this form
        #[arg(long)]
        form: Option<String>,
    },
    /// List every field of the data dictionary
    Metadata,
    /// List forms with their field counts
    Forms,
    /// List longitudinal events
    Events,
    /// Export all records as JSON joined onto their fields
    Records {
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }

    let config = resolve_config(cli.config.as_deref(), cli.url, cli.token, cli.timeout)?
        .with_initialize(false);
    let mut project = Project::from_config(&config).context("Failed to open REDCap project")?;

    let output = match cli.command {
        Command::Sql { dialect, form } => {
            commands::handle_sql(&mut project, &dialect, form.as_deref())?
        }
        Command::Metadata => commands::handle_metadata(&mut project)?,
        Command::Forms => commands::handle_forms(&mut project)?,
        Command::Events => commands::handle_events(&mut project)?,
        Command::Records { pretty } => commands::handle_records(&mut project, pretty)?,
    };

    println!("{}", output.trim_end());
    Ok(())
}
