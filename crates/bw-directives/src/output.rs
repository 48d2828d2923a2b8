//! Resolution results.

use std::path::PathBuf;

use crate::image::LocatedImage;
use crate::util::escape_html;

/// A directive that could not be resolved.
///
/// The directive itself is replaced by a placeholder; the failure is
/// reported alongside the resolved text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectiveFailure {
    /// Document the directive appears in, when known.
    pub document: Option<PathBuf>,
    /// 1-based line of the directive in the document.
    pub line: usize,
    /// Directive text as written.
    pub directive: String,
    /// Diagnostic, also shown in the placeholder.
    pub message: String,
}

/// A document after all its directives were resolved.
#[derive(Debug, Default)]
pub struct ResolvedDocument {
    /// Rewritten text.
    pub text: String,
    /// Directives that rendered as placeholders.
    pub failures: Vec<DirectiveFailure>,
    /// Image directives with their files located, in document order.
    pub images: Vec<LocatedImage>,
}

impl ResolvedDocument {
    /// Whether every directive resolved.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Inline placeholder for a failed directive.
#[must_use]
pub fn placeholder(message: &str) -> String {
    format!("<pre><code>{}</code></pre>", escape_html(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_escapes_message() {
        assert_eq!(
            placeholder("Source code not found: a/<B>.java"),
            "<pre><code>Source code not found: a/&lt;B&gt;.java</code></pre>"
        );
    }
}
