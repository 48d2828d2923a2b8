//! Per-document resolution context.

use std::path::Path;

/// Where the document being resolved lives.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use bw_directives::DocumentContext;
///
/// let ctx = DocumentContext {
///     source_path: Some(Path::new("pre-markdown/ch1/intro.md")),
///     document_dir: Path::new("pre-markdown/ch1"),
/// };
/// assert_eq!(ctx.document_dir.join("pump.png"), Path::new("pre-markdown/ch1/pump.png"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DocumentContext<'a> {
    /// Path of the document, used in failure reports.
    pub source_path: Option<&'a Path>,
    /// Directory containing the document in the input tree. Non-vendored
    /// images are relative to it.
    pub document_dir: &'a Path,
}

impl<'a> DocumentContext<'a> {
    /// Context for a document at `path`.
    #[must_use]
    pub fn for_document(path: &'a Path) -> Self {
        Self {
            source_path: Some(path),
            document_dir: path.parent().unwrap_or(Path::new("")),
        }
    }
}
