//! Tree builder for bookweave.
//!
//! Mirrors the annotated input tree into the web-book Markdown tree,
//! resolving directives in every document and copying all other files
//! through. A second pass produces the image artifacts of both output trees
//! and patches image includes in the typeset LaTeX.
//!
//! # Example
//!
//! ```no_run
//! use bw_build::{BuildOptions, Builder};
//! use bw_config::Config;
//!
//! let config = Config::load(None, None)?;
//! let report = Builder::new(&config)?.build(&BuildOptions { incremental: true })?;
//! println!("{} resolved, {} up to date", report.resolved(), report.up_to_date());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod error;
mod report;
mod walk;

pub use builder::{BuildOptions, Builder, ImageOptions, resolver_config};
pub use error::BuildError;
pub use report::{
    BuildReport, FileFailure, FileOutcome, FileReport, ImageReport, ScaleSuggestion,
};
