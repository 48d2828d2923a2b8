//! Directive scanning and resolution for bookweave documents.
//!
//! Documents are plain Markdown sprinkled with inline directives:
//!
//! | Directive | Rewritten to |
//! |-----------|--------------|
//! | `{@snipm PATH}{MARKER}` | code between two `// MARKER` comments |
//! | `{@snips PATH}{ANCHOR}` | brace-delimited construct starting at `ANCHOR` |
//! | `{@snipi PATH}{LABEL}` | link to the whole origin file |
//! | `{@link jdc:a.b.C LABEL}` | link into the API documentation |
//! | `{@img PATH}{CAPTION}{SCALE}` | image embed (Markdown here, LaTeX in the typeset tree) |
//!
//! The [`Resolver`] scans the original text once per kind, resolves every
//! directive, and splices the results back by byte range. A directive that
//! cannot be resolved becomes an inline placeholder and a
//! [`DirectiveFailure`]; it never aborts the document.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use bw_directives::{DocumentContext, Resolver, ResolverConfig};
//!
//! let resolver = Resolver::new(
//!     ResolverConfig::new().with_apidocs_root("https://docs.example/api/"),
//! );
//! let ctx = DocumentContext::for_document(Path::new("intro.md"));
//! let resolved = resolver.resolve("See {@link jdc:ca.uqac.Pump}.", &ctx);
//!
//! assert_eq!(
//!     resolved.text,
//!     "See [`ca.uqac.Pump`](https://docs.example/api/ca/uqac/Pump.html)."
//! );
//! ```

mod config;
mod context;
mod directive;
mod error;
mod image;
mod output;
mod replacements;
mod resolver;
mod scan;
mod snippet;
mod util;
mod xref;

pub use config::{FileExistsFn, ReadFileFn, ResolverConfig};
pub use context::DocumentContext;
pub use directive::{Directive, DirectiveKind, LocatedDirective};
pub use error::ResolveError;
pub use image::{EmbedTarget, ImageDirective, LocatedImage};
pub use output::{DirectiveFailure, ResolvedDocument, placeholder};
pub use replacements::Replacements;
pub use resolver::Resolver;
pub use scan::{scan, scan_images};
pub use snippet::{ANCHOR_GLYPH, SourceFragment, render_reference};
pub use util::{basename, escape_html, join_url};
pub use xref::{CrossReference, XrefKind};
