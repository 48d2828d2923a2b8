//! `bw build` command implementation.

use std::path::PathBuf;

use bw_build::{BuildOptions, BuildReport, Builder};
use bw_config::{CliSettings, Config};
use clap::Args;

use crate::error::CliError;
use crate::output::{Output, Tone};

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Only rebuild documents newer than their output.
    #[arg(short, long)]
    incremental: bool,

    /// Path to configuration file (default: auto-discover bw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Annotated input directory (overrides config).
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Markdown output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Origin source tree (overrides config).
    #[arg(long, env = "BW_SOURCE_ROOT")]
    source_root: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            input_dir: self.input_dir,
            markdown_dir: self.output_dir,
            source_root: self.source_root,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config = ?config.config_path, "Loaded configuration");

        output.line(Tone::Info, &format!(
            "Input: {}",
            config.book_resolved.input_dir.display()
        ));
        output.line(Tone::Info, &format!(
            "Output: {}",
            config.book_resolved.markdown_dir.display()
        ));

        let builder = Builder::new(&config)?;
        let report = builder.build(&BuildOptions {
            incremental: self.incremental,
        })?;

        print_report(&output, &report);
        let failed = report.failed_files().count();
        if failed > 0 {
            return Err(CliError::Incomplete(format!("{failed} file(s) could not be built")));
        }
        Ok(())
    }
}

fn print_report(output: &Output, report: &BuildReport) {
    for (path, err) in report.failed_files() {
        output.line(Tone::Error, &format!("{}: {err}", path.display()));
    }

    if !report.failures.is_empty() {
        output.line(Tone::Warning, &format!(
            "{} directive(s) could not be resolved:",
            report.failures.len()
        ));
        for failure in &report.failures {
            let document = failure
                .document
                .as_ref()
                .map_or_else(|| "?".to_owned(), |p| p.display().to_string());
            output.line(Tone::Detail, &format!(
                "{document}:{} {}: {}",
                failure.line, failure.directive, failure.message
            ));
        }
    }

    output.line(Tone::Success, &format!(
        "Resolved {} document(s), copied {} file(s), {} up to date",
        report.resolved(),
        report.copied(),
        report.up_to_date()
    ));
}
