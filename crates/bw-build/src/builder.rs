//! Mirrored build of the output trees.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use bw_config::{Config, ConverterFlavor};
use bw_directives::{DocumentContext, LocatedImage, Resolver, ResolverConfig};
use bw_images::{
    ArtifactRunner, ImageConverter, InkscapeConverter, InkscapeFlavor, Layout, plan_artifacts,
    rewrite_latex_includes, suggest_scale,
};
use rayon::prelude::*;

use crate::report::{FileFailure, FileOutcome, FileReport, ImageReport, ScaleSuggestion};
use crate::walk::{Entry, EntryKind, Walker};
use crate::{BuildError, BuildReport};

/// Options for [`Builder::build`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildOptions {
    /// Skip files whose output is at least as new as the input.
    pub incremental: bool,
}

/// Options for [`Builder::convert_images`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageOptions {
    /// Redo artifacts even when their output is current.
    pub force: bool,
}

/// Derive the resolver settings from the loaded configuration.
#[must_use]
pub fn resolver_config(config: &Config) -> ResolverConfig {
    let sources = &config.sources_resolved;
    ResolverConfig::new()
        .with_source_root(sources.root.clone())
        .with_remote_url(sources.remote_url.clone())
        .with_apidocs_root(config.apidocs.root.clone())
        .with_language(sources.language.clone())
        .with_strip_comments(sources.strip_comments)
        .with_vendored_prefix(config.images_resolved.vendored_prefix.clone())
}

fn converter_for(config: &Config) -> InkscapeConverter {
    let flavor = match config.images_resolved.flavor {
        ConverterFlavor::Legacy => InkscapeFlavor::Legacy,
        ConverterFlavor::Modern => InkscapeFlavor::Modern,
    };
    InkscapeConverter::new(config.images_resolved.converter.clone()).with_flavor(flavor)
}

/// Builds the Markdown tree from the annotated input tree and produces image
/// artifacts for both output trees.
pub struct Builder {
    input_dir: PathBuf,
    markdown_dir: PathBuf,
    latex_dir: PathBuf,
    screen_dpi: u32,
    walker: Walker,
    resolver: Resolver,
    converter: Box<dyn ImageConverter>,
}

impl Builder {
    /// Create a builder from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Pattern`] if an ignore pattern is not a valid glob.
    pub fn new(config: &Config) -> Result<Self, BuildError> {
        let book = &config.book_resolved;
        let walker = Walker::new(book.input_dir.clone(), &book.document_extension, &book.ignore)?;

        Ok(Self {
            input_dir: book.input_dir.clone(),
            markdown_dir: book.markdown_dir.clone(),
            latex_dir: book.latex_dir.clone(),
            screen_dpi: config.images_resolved.screen_dpi,
            walker,
            resolver: Resolver::new(resolver_config(config)),
            converter: Box::new(converter_for(config)),
        })
    }

    /// Use `converter` instead of the configured Inkscape.
    #[must_use]
    pub fn with_converter(mut self, converter: impl ImageConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// Resolver shared by every document.
    #[must_use]
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Resolve every document of the input tree into the Markdown tree and
    /// copy all other files next to them.
    ///
    /// Per-file errors and unresolved directives are collected in the report;
    /// the remaining files are still built.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingInput`] if the input tree does not exist.
    pub fn build(&self, options: &BuildOptions) -> Result<BuildReport, BuildError> {
        self.require_input()?;
        let entries = self.walker.walk();
        tracing::info!(files = entries.len(), input = %self.input_dir.display(), "Building");

        let results: Vec<(FileReport, Vec<_>)> = entries
            .par_iter()
            .map(|entry| {
                let (outcome, failures) = match self.build_entry(entry, options) {
                    Ok(built) => built,
                    Err(err) => {
                        tracing::warn!(path = %entry.path.display(), error = %err, "Failed to build file");
                        (FileOutcome::Failed(err), Vec::new())
                    }
                };
                let report = FileReport {
                    relative: entry.relative.clone(),
                    outcome,
                };
                (report, failures)
            })
            .collect();

        let mut report = BuildReport::default();
        for (file, failures) in results {
            report.files.push(file);
            report.failures.extend(failures);
        }
        Ok(report)
    }

    fn build_entry(
        &self,
        entry: &Entry,
        options: &BuildOptions,
    ) -> Result<(FileOutcome, Vec<bw_directives::DirectiveFailure>), BuildError> {
        let output = self.markdown_dir.join(&entry.relative);
        if options.incremental && is_up_to_date(&entry.path, &output) {
            tracing::debug!(path = %entry.relative.display(), "Up to date");
            return Ok((FileOutcome::UpToDate, Vec::new()));
        }

        match entry.kind {
            EntryKind::Asset => {
                ensure_parent(&output)?;
                fs::copy(&entry.path, &output).map_err(|source| BuildError::Write {
                    path: output.clone(),
                    source,
                })?;
                Ok((FileOutcome::Copied, Vec::new()))
            }
            EntryKind::Document => {
                let text = read(&entry.path)?;
                let resolved = self
                    .resolver
                    .resolve(&text, &DocumentContext::for_document(&entry.path));
                write(&output, &resolved.text)?;
                Ok((FileOutcome::Resolved, resolved.failures))
            }
        }
    }

    /// Produce the PDF and PNG artifacts of every image directive and
    /// rewrite the matching `\includegraphics` in the LaTeX tree.
    ///
    /// The LaTeX file of a document is looked up at the mirrored path with a
    /// `.tex` extension; documents without one are skipped silently.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingInput`] if the input tree does not exist.
    pub fn convert_images(&self, options: &ImageOptions) -> Result<ImageReport, BuildError> {
        self.require_input()?;
        let documents = self.walker.documents();
        let mut report = ImageReport {
            documents: documents.len(),
            ..ImageReport::default()
        };

        let located: Vec<(&Entry, Result<Vec<LocatedImage>, BuildError>)> = documents
            .par_iter()
            .map(|entry| (entry, self.images_of(&entry.path)))
            .collect();

        let layout = Layout::new(&self.markdown_dir, &self.latex_dir).with_screen_dpi(self.screen_dpi);
        let mut with_images = Vec::new();
        let mut artifacts = Vec::new();
        for (entry, images) in located {
            match images {
                Ok(images) if images.is_empty() => {}
                Ok(images) => {
                    for image in &images {
                        artifacts.extend(plan_artifacts(image, &layout, entry.relative_dir()));
                    }
                    with_images.push((entry, images));
                }
                Err(error) => report.failures.push(FileFailure {
                    path: entry.path.clone(),
                    error,
                }),
            }
        }

        tracing::info!(artifacts = artifacts.len(), "Converting images");
        report.run = ArtifactRunner::new(self.converter.as_ref())
            .force(options.force)
            .run(&artifacts);

        for (entry, images) in with_images {
            let tex = self.latex_dir.join(&entry.relative).with_extension("tex");
            match rewrite_tex(&tex, &images) {
                Ok(true) => report.latex_rewritten += 1,
                Ok(false) => {}
                Err(error) => {
                    tracing::warn!(path = %tex.display(), error = %error, "Failed to rewrite LaTeX");
                    report.failures.push(FileFailure { path: tex, error });
                }
            }
        }

        Ok(report)
    }

    /// Suggest a scale for every image of `document` that has a vector
    /// source.
    ///
    /// A scale that is not a number is reported with a warning and a
    /// `current_value` of `None`; the suggestion is still made.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Read`] if the document or a vector source cannot
    /// be read.
    pub fn suggest_scales(&self, document: &Path) -> Result<Vec<ScaleSuggestion>, BuildError> {
        self.images_of(document)?
            .into_iter()
            .filter_map(|image| image.vector.clone().map(|svg| (image, svg)))
            .map(|(image, svg)| -> Result<ScaleSuggestion, BuildError> {
                let content = read(&svg)?;
                let current = image.directive.scale;
                let current_value = current.parse::<f64>().ok();
                if current_value.is_none() {
                    tracing::warn!(
                        image = %image.directive.path,
                        scale = %current,
                        "Image scale is not a number"
                    );
                }
                Ok(ScaleSuggestion {
                    image: image.directive.path,
                    current,
                    current_value,
                    suggested: suggest_scale(&content),
                })
            })
            .collect()
    }

    fn images_of(&self, document: &Path) -> Result<Vec<LocatedImage>, BuildError> {
        let text = read(document)?;
        Ok(self
            .resolver
            .locate_images(&text, &DocumentContext::for_document(document)))
    }

    fn require_input(&self) -> Result<(), BuildError> {
        if self.input_dir.is_dir() {
            Ok(())
        } else {
            Err(BuildError::MissingInput(self.input_dir.clone()))
        }
    }
}

/// Rewrite the includes of `tex` if it exists. Returns whether it changed.
fn rewrite_tex(tex: &Path, images: &[LocatedImage]) -> Result<bool, BuildError> {
    if !tex.exists() {
        return Ok(false);
    }
    let latex = read(tex)?;
    let rewritten = rewrite_latex_includes(&latex, images);
    if rewritten == latex {
        return Ok(false);
    }
    write(tex, &rewritten)?;
    Ok(true)
}

/// `true` when `output` exists and the input is not newer than it.
fn is_up_to_date(input: &Path, output: &Path) -> bool {
    match (modified(input), modified(output)) {
        (Some(input), Some(output)) => input <= output,
        _ => false,
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn read(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, content: &str) -> Result<(), BuildError> {
    ensure_parent(path)?;
    fs::write(path, content).map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent(path: &Path) -> Result<(), BuildError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| BuildError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
