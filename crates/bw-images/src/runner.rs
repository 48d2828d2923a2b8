//! Artifact execution.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use rayon::prelude::*;

use crate::converter::ImageConverter;
use crate::error::ConvertError;
use crate::plan::Artifact;

/// What happened to one artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactOutcome {
    /// Produced by the converter.
    Converted,
    /// Copied from the raster.
    Copied,
    /// Output already current; nothing done.
    UpToDate,
}

/// An artifact that could not be produced.
#[derive(Debug)]
pub struct ArtifactFailure {
    /// File that was to be written.
    pub output: PathBuf,
    /// Why it was not.
    pub error: ConvertError,
}

/// Summary of an [`ArtifactRunner::run`] batch.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Artifacts produced by the converter.
    pub converted: usize,
    /// Artifacts copied from rasters.
    pub copied: usize,
    /// Artifacts whose output was already current.
    pub up_to_date: usize,
    /// Artifacts that failed. Their outputs are absent or stale.
    pub failed: Vec<ArtifactFailure>,
}

impl RunReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: Self) {
        self.converted += other.converted;
        self.copied += other.copied;
        self.up_to_date += other.up_to_date;
        self.failed.extend(other.failed);
    }
}

/// Produces planned artifacts, skipping those already current.
///
/// A conversion runs when its output is missing or older than the vector
/// source; a copy runs only when its output is missing. With
/// [`force`](Self::force) everything is redone. Failures are logged and
/// collected; the batch always runs to the end.
pub struct ArtifactRunner<'a> {
    converter: &'a dyn ImageConverter,
    force: bool,
}

impl<'a> ArtifactRunner<'a> {
    /// Create a runner using `converter` for vector sources.
    #[must_use]
    pub fn new(converter: &'a dyn ImageConverter) -> Self {
        Self {
            converter,
            force: false,
        }
    }

    /// Redo artifacts even when their output is current.
    #[must_use]
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Produce every artifact. Artifacts writing the same output run once.
    pub fn run(&self, artifacts: &[Artifact]) -> RunReport {
        let mut seen = HashSet::new();
        let unique: Vec<&Artifact> = artifacts
            .iter()
            .filter(|a| seen.insert(a.output().to_path_buf()))
            .collect();

        let outcomes: Vec<(&Artifact, Result<ArtifactOutcome, ConvertError>)> = unique
            .par_iter()
            .map(|artifact| (*artifact, self.run_one(artifact)))
            .collect();

        let mut report = RunReport::default();
        for (artifact, outcome) in outcomes {
            match outcome {
                Ok(ArtifactOutcome::Converted) => report.converted += 1,
                Ok(ArtifactOutcome::Copied) => report.copied += 1,
                Ok(ArtifactOutcome::UpToDate) => report.up_to_date += 1,
                Err(error) => {
                    tracing::warn!(
                        source = %artifact.source().display(),
                        output = %artifact.output().display(),
                        error = %error,
                        "Failed to produce image"
                    );
                    report.failed.push(ArtifactFailure {
                        output: artifact.output().to_path_buf(),
                        error,
                    });
                }
            }
        }
        report
    }

    fn run_one(&self, artifact: &Artifact) -> Result<ArtifactOutcome, ConvertError> {
        let output = artifact.output();
        match artifact {
            Artifact::Convert { source, format, .. } => {
                if !self.force && !is_stale(source, output)? {
                    return Ok(ArtifactOutcome::UpToDate);
                }
                ensure_parent(output)?;
                self.converter.convert(source, output, *format)?;
                tracing::info!(output = %output.display(), "Converted image");
                Ok(ArtifactOutcome::Converted)
            }
            Artifact::Copy { source, .. } => {
                if !self.force && output.exists() {
                    return Ok(ArtifactOutcome::UpToDate);
                }
                ensure_parent(output)?;
                fs::copy(source, output).map_err(|e| ConvertError::Io {
                    path: source.clone(),
                    source: e,
                })?;
                tracing::info!(output = %output.display(), "Copied image");
                Ok(ArtifactOutcome::Copied)
            }
        }
    }
}

/// Whether `output` is missing or older than `source`.
fn is_stale(source: &Path, output: &Path) -> Result<bool, ConvertError> {
    let Some(output_time) = modified(output) else {
        return Ok(true);
    };
    let source_time = fs::metadata(source)
        .and_then(|m| m.modified())
        .map_err(|e| ConvertError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
    Ok(output_time < source_time)
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn ensure_parent(output: &Path) -> Result<(), ConvertError> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ConvertError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}
