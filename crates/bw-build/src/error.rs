//! Build error types.

use std::io;
use std::path::PathBuf;

/// Failure while building the output trees.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The configured input tree does not exist.
    #[error("input directory not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// An ignore pattern from the configuration is not a valid glob.
    #[error("invalid ignore pattern `{pattern}`: {source}")]
    Pattern {
        /// Pattern as configured.
        pattern: String,
        /// Underlying glob error.
        source: glob::PatternError,
    },

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Path that was written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
