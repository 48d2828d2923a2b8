//! Directive resolution.

use std::path::PathBuf;

use bw_extract::{dedent, extract_marked, extract_structural, strip_comments};

use crate::config::ResolverConfig;
use crate::context::DocumentContext;
use crate::directive::Directive;
use crate::error::ResolveError;
use crate::image::{EmbedTarget, ImageDirective, LocatedImage};
use crate::output::{DirectiveFailure, ResolvedDocument, placeholder};
use crate::replacements::Replacements;
use crate::scan::{scan, scan_images};
use crate::snippet::{SourceFragment, render_reference};

/// Rewrites the directives of a document.
///
/// A resolver holds only immutable configuration and can be shared between
/// threads resolving different documents.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use bw_directives::{DocumentContext, Resolver, ResolverConfig};
///
/// let config = ResolverConfig::new()
///     .with_source_root("/src")
///     .with_remote_url("https://host/src/")
///     .with_file_exists(|_| true)
///     .with_read_file(|_| Ok("a\n  // go\n  run();\n  // go\n".to_owned()));
/// let resolver = Resolver::new(config);
///
/// let ctx = DocumentContext::for_document(Path::new("book/intro.md"));
/// let resolved = resolver.resolve("Code:\n{@snipm x/A.java}{go}", &ctx);
/// assert_eq!(
///     resolved.text,
///     "Code:\n``` java\nrun();\n```\n[⚓](https://host/src/x/A.java#L2)\n"
/// );
/// assert!(resolved.failures.is_empty());
/// ```
#[derive(Debug)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Create a resolver with the given configuration.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The configuration this resolver was built with.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve every directive in `text`.
    ///
    /// Directives are resolved independently; a failed one is replaced by a
    /// placeholder and recorded in [`ResolvedDocument::failures`] while the
    /// rest of the document still resolves. Text without directives comes
    /// back unchanged.
    #[must_use]
    pub fn resolve(&self, text: &str, ctx: &DocumentContext<'_>) -> ResolvedDocument {
        let found = scan(text);
        if found.is_empty() {
            return ResolvedDocument {
                text: text.to_owned(),
                ..ResolvedDocument::default()
            };
        }

        let mut replacements = Replacements::with_capacity(found.len());
        let mut failures = Vec::new();
        let mut images = Vec::new();

        for located in found {
            let rendered = match self.resolve_directive(&located.directive, ctx, &mut images) {
                Ok(rendered) => rendered,
                Err(err) => {
                    let message = err.to_string();
                    tracing::warn!(
                        document = ?ctx.source_path,
                        line = located.line,
                        error = %message,
                        "Directive could not be resolved"
                    );
                    failures.push(DirectiveFailure {
                        document: ctx.source_path.map(PathBuf::from),
                        line: located.line,
                        directive: text[located.span.clone()].to_owned(),
                        message: message.clone(),
                    });
                    placeholder(&message)
                }
            };
            replacements.add(located.span, rendered);
        }

        tracing::debug!(
            document = ?ctx.source_path,
            directives = replacements.len(),
            failures = failures.len(),
            "Resolved document"
        );

        ResolvedDocument {
            text: replacements.apply(text),
            failures,
            images,
        }
    }

    /// Locate the files of every image directive in `text`.
    #[must_use]
    pub fn locate_images(&self, text: &str, ctx: &DocumentContext<'_>) -> Vec<LocatedImage> {
        scan_images(text)
            .iter()
            .map(|image| self.locate_image(image, ctx))
            .collect()
    }

    fn locate_image(&self, image: &ImageDirective, ctx: &DocumentContext<'_>) -> LocatedImage {
        image.locate(
            &self.config.source_root,
            ctx.document_dir,
            &self.config.vendored_prefix,
            &|path| self.config.file_exists(path),
        )
    }

    fn resolve_directive(
        &self,
        directive: &Directive,
        ctx: &DocumentContext<'_>,
        images: &mut Vec<LocatedImage>,
    ) -> Result<String, ResolveError> {
        let config = &self.config;
        match directive {
            Directive::MarkedSnippet { path, marker } => {
                let (origin, source) = self.read_origin(path)?;
                let fragment = extract_marked(&source, marker)
                    .map_err(|source| ResolveError::Extract { path: origin, source })?;
                let text = if config.strip_comments {
                    strip_comments(&fragment.text)
                } else {
                    fragment.text
                };
                Ok(SourceFragment {
                    origin: path.clone(),
                    text,
                    start_line: fragment.start_line,
                }
                .render(&config.language, &config.remote_url))
            }
            Directive::StructuralSnippet { path, anchor } => {
                let (origin, source) = self.read_origin(path)?;
                let fragment = extract_structural(&source, anchor)
                    .map_err(|source| ResolveError::Extract { path: origin, source })?;
                Ok(SourceFragment {
                    origin: path.clone(),
                    text: dedent(&fragment.text),
                    start_line: fragment.start_line,
                }
                .render(&config.language, &config.remote_url))
            }
            Directive::ReferenceSnippet { path, label } => {
                let origin = config.source_root.join(path);
                if !config.file_exists(&origin) {
                    return Err(ResolveError::SourceNotFound { path: origin });
                }
                Ok(render_reference(path, label, &config.remote_url))
            }
            Directive::CrossReference(xref) => Ok(xref.render(&config.apidocs_root)),
            Directive::Image(image) => {
                let located = self.locate_image(image, ctx);
                let rendered = located.render(EmbedTarget::Markdown);
                images.push(located);
                Ok(rendered)
            }
        }
    }

    fn read_origin(&self, relative: &str) -> Result<(PathBuf, String), ResolveError> {
        let path = self.config.source_root.join(relative);
        if !self.config.file_exists(&path) {
            return Err(ResolveError::SourceNotFound { path });
        }
        match self.config.read_file(&path) {
            Ok(source) => Ok((path, source)),
            Err(source) => Err(ResolveError::SourceUnreadable { path, source }),
        }
    }
}
