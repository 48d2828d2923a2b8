//! Single-pass span replacement.
//!
//! Resolved directives are collected by byte range and spliced into the
//! original text in one pass.

use std::ops::Range;

/// Collects span replacements for single-pass application.
///
/// Every replacement targets a byte range of the *original* text, so two
/// identical directive spans are replaced independently and text introduced
/// by one replacement is never matched again.
///
/// # Example
///
/// ```
/// use bw_directives::Replacements;
///
/// let text = "see {@x} and {@x}";
/// let mut replacements = Replacements::new();
/// replacements.add(4..8, "one");
/// replacements.add(13..17, "two");
///
/// assert_eq!(replacements.apply(text), "see one and two");
/// ```
#[derive(Debug, Default)]
pub struct Replacements {
    items: Vec<(Range<usize>, String)>,
}

impl Replacements {
    /// Create a new empty replacements collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new replacements collector with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Register a replacement of the bytes in `span` with `to`.
    pub fn add(&mut self, span: Range<usize>, to: impl Into<String>) {
        self.items.push((span, to.into()));
    }

    /// Apply all registered replacements to `text`.
    ///
    /// Replacements are applied in span order regardless of registration
    /// order. A span that overlaps an earlier one, or that falls outside
    /// `text` or off a character boundary, is skipped.
    ///
    /// Note: This consumes the replacements to prevent accidental reuse.
    #[must_use]
    pub fn apply(mut self, text: &str) -> String {
        if self.items.is_empty() {
            return text.to_owned();
        }

        self.items.sort_by_key(|(span, _)| (span.start, span.end));

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for (span, to) in self.items {
            if span.start < cursor
                || span.end < span.start
                || !text.is_char_boundary(span.start)
                || !text.is_char_boundary(span.end)
                || span.end > text.len()
            {
                tracing::debug!(?span, "Skipping overlapping or invalid replacement");
                continue;
            }
            out.push_str(&text[cursor..span.start]);
            out.push_str(&to);
            cursor = span.end;
        }
        out.push_str(&text[cursor..]);
        out
    }

    /// Check if there are any replacements registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of registered replacements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
