//! `bw scales` command implementation.

use std::path::PathBuf;

use bw_build::Builder;
use bw_config::Config;
use clap::Args;

use crate::error::CliError;
use crate::output::{Output, Tone};

/// Arguments for the scales command.
#[derive(Args)]
pub(crate) struct ScalesArgs {
    /// Annotated document to inspect.
    document: PathBuf,

    /// Path to configuration file (default: auto-discover bw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ScalesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let suggestions = Builder::new(&config)?.suggest_scales(&self.document)?;

        if suggestions.is_empty() {
            output.line(Tone::Info, "No figures with a vector source");
            return Ok(());
        }

        for suggestion in suggestions {
            let current = if suggestion.current.is_empty() {
                "no scale"
            } else {
                suggestion.current.as_str()
            };
            let line = format!(
                "{}: {} (currently {current})",
                suggestion.image, suggestion.suggested
            );
            let tone = if suggestion.is_current() {
                Tone::Info
            } else {
                Tone::Warning
            };
            output.line(tone, &line);
        }
        Ok(())
    }
}
