//! CLI error types.

use bw_build::BuildError;
use bw_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Build(#[from] BuildError),

    /// Some files or artifacts could not be produced.
    #[error("{0}")]
    Incomplete(String),
}
