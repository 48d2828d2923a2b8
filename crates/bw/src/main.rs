//! bookweave CLI.
//!
//! Provides commands for:
//! - `build`: Resolve directives from the annotated tree into the Markdown tree
//! - `images`: Convert figures for both output trees and patch LaTeX includes
//! - `scales`: Suggest figure scales from SVG widths

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ImagesArgs, ScalesArgs};
use output::{Output, Tone};

/// bookweave - code-aware book preprocessor.
#[derive(Parser)]
#[command(name = "bw", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve directives into the Markdown tree.
    Build(BuildArgs),
    /// Convert figures and rewrite LaTeX includes.
    Images(ImagesArgs),
    /// Print suggested scales for the figures of a document.
    Scales(ScalesArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Build(args) => args.verbose,
            Self::Images(args) => args.verbose,
            Self::Scales(_) => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Images(args) => args.execute(),
        Commands::Scales(args) => args.execute(),
    };

    if let Err(err) = result {
        output.line(Tone::Error, &format!("Error: {err}"));
        std::process::exit(1);
    }
}
