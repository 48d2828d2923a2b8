//! Resolution error types.

use std::io;
use std::path::PathBuf;

use bw_extract::ExtractError;

/// Why a single directive could not be resolved.
///
/// The message is what ends up inside the inline placeholder, so it always
/// names the resource that was attempted.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The origin file does not exist.
    #[error("Source code not found: {}", path.display())]
    SourceNotFound {
        /// Path that was tried.
        path: PathBuf,
    },

    /// The origin file exists but could not be read.
    #[error("Source code unreadable: {}: {source}", path.display())]
    SourceUnreadable {
        /// Path that was tried.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The origin file was read but the requested fragment is not in it.
    #[error("{source} in {}", path.display())]
    Extract {
        /// Path that was searched.
        path: PathBuf,
        /// Extraction failure.
        #[source]
        source: ExtractError,
    },
}
