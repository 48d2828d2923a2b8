//! Per-run reports.

use std::path::PathBuf;

use bw_directives::DirectiveFailure;
use bw_images::RunReport;

use crate::BuildError;

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Directives were resolved and the document written.
    Resolved,
    /// Copied through unchanged.
    Copied,
    /// Skipped in incremental mode because the output is newer.
    UpToDate,
    /// Reading or writing failed; no output was produced.
    Failed(BuildError),
}

/// Outcome for one input file.
#[derive(Debug)]
pub struct FileReport {
    /// Path relative to the input root.
    pub relative: PathBuf,
    pub outcome: FileOutcome,
}

/// Result of [`Builder::build`](crate::Builder::build).
#[derive(Debug, Default)]
pub struct BuildReport {
    /// One entry per input file, in walk order.
    pub files: Vec<FileReport>,
    /// Directives that resolved to a placeholder.
    pub failures: Vec<DirectiveFailure>,
}

impl BuildReport {
    /// Number of documents resolved.
    #[must_use]
    pub fn resolved(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Resolved))
    }

    /// Number of files copied through.
    #[must_use]
    pub fn copied(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Copied))
    }

    /// Number of files skipped as up to date.
    #[must_use]
    pub fn up_to_date(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::UpToDate))
    }

    /// Files that could not be produced.
    pub fn failed_files(&self) -> impl Iterator<Item = (&PathBuf, &BuildError)> {
        self.files.iter().filter_map(|f| match &f.outcome {
            FileOutcome::Failed(err) => Some((&f.relative, err)),
            _ => None,
        })
    }

    /// `true` when every file was produced and every directive resolved.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.failed_files().next().is_none()
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| predicate(&f.outcome)).count()
    }
}

/// A file that could not be processed during image conversion.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: BuildError,
}

/// Result of [`Builder::convert_images`](crate::Builder::convert_images).
#[derive(Debug, Default)]
pub struct ImageReport {
    /// Documents scanned for image directives.
    pub documents: usize,
    /// Artifact outcomes.
    pub run: RunReport,
    /// LaTeX files whose includes were rewritten.
    pub latex_rewritten: usize,
    /// Documents or LaTeX files that could not be read or written.
    pub failures: Vec<FileFailure>,
}

impl ImageReport {
    /// `true` when every artifact was produced and every file processed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.run.failed.is_empty() && self.failures.is_empty()
    }
}

/// Scale suggested for one image of a document.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleSuggestion {
    /// Image path as written in the directive.
    pub image: String,
    /// Scale currently given in the directive, as written.
    pub current: String,
    /// `current` as a number, `None` when it is not one (`0.5\textwidth`,
    /// or empty).
    pub current_value: Option<f64>,
    /// Scale computed from the vector source's width.
    pub suggested: f64,
}

impl ScaleSuggestion {
    /// Whether the directive already carries the suggested scale.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current_value
            .is_some_and(|value| (value - self.suggested).abs() <= f64::EPSILON)
    }
}
