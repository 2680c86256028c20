//! `notepub preview` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use notepub_config::{CliSettings, Config};

use crate::document;
use crate::error::CliError;

/// Arguments for the preview command.
#[derive(Args)]
pub(crate) struct PreviewArgs {
    /// Target database ID (overrides config).
    #[arg(long)]
    database_id: Option<String>,

    /// Emit compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,

    /// Path to configuration file (default: auto-discover notepub.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl PreviewArgs {
    /// Print the request body that `publish` would send.
    ///
    /// # Errors
    ///
    /// Returns an error if config loading or serialization fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            database_id: self.database_id,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let request = document::analysis_page(&config.notion.database_id);
        let json = if self.compact {
            serde_json::to_string(&request)?
        } else {
            serde_json::to_string_pretty(&request)?
        };

        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}
