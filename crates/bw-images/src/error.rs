//! Conversion error types.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Why one artifact could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The converter program could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The converter ran but reported failure.
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        /// Program that was invoked.
        program: String,
        /// Exit status.
        status: ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The converter reported success but did not write the output.
    #[error("`{program}` did not produce {}", output.display())]
    MissingOutput {
        /// Program that was invoked.
        program: String,
        /// Expected output file.
        output: PathBuf,
    },

    /// Reading, copying or creating a directory failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
