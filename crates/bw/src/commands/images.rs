//! `bw images` command implementation.

use std::path::PathBuf;

use bw_build::{Builder, ImageOptions};
use bw_config::{CliSettings, Config};
use clap::Args;

use crate::error::CliError;
use crate::output::{Output, Tone};

/// Arguments for the images command.
#[derive(Args)]
pub(crate) struct ImagesArgs {
    /// Path to configuration file (default: auto-discover bw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// LaTeX tree receiving PDFs and rewritten includes (overrides config).
    #[arg(long)]
    pub(crate) latex_dir: Option<PathBuf>,

    /// Image converter program (overrides config).
    #[arg(long, env = "BW_CONVERTER")]
    converter: Option<String>,

    /// Redo every artifact, even when its output is current.
    #[arg(short, long)]
    force: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ImagesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            latex_dir: self.latex_dir,
            converter: self.converter,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config = ?config.config_path, "Loaded configuration");

        output.line(Tone::Info, &format!(
            "Converter: {} ({:?})",
            config.images_resolved.converter, config.images_resolved.flavor
        ));

        let builder = Builder::new(&config)?;
        let report = builder.convert_images(&ImageOptions { force: self.force })?;

        for failure in &report.run.failed {
            output.line(Tone::Error, &format!("{}: {}", failure.output.display(), failure.error));
        }
        for failure in &report.failures {
            output.line(Tone::Error, &format!("{}: {}", failure.path.display(), failure.error));
        }

        output.line(Tone::Success, &format!(
            "Scanned {} document(s): converted {}, copied {}, {} up to date, rewrote {} LaTeX file(s)",
            report.documents,
            report.run.converted,
            report.run.copied,
            report.run.up_to_date,
            report.latex_rewritten
        ));

        if report.is_clean() {
            Ok(())
        } else {
            Err(CliError::Incomplete(format!(
                "{} image(s) and {} file(s) could not be produced",
                report.run.failed.len(),
                report.failures.len()
            )))
        }
    }
}
