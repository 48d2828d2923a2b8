//! Extraction error types.

/// Why a fragment could not be extracted from an existing origin file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// No line contains the opening marker comment.
    #[error("marker `{0}` not found")]
    MarkerNotFound(String),

    /// The opening marker has no matching closing marker.
    #[error("marker `{0}` is never closed")]
    UnclosedMarker(String),

    /// The marker could not be compiled into a pattern.
    #[error("invalid marker pattern: {0}")]
    Pattern(String),

    /// No line contains the anchor text.
    #[error("anchor `{0}` not found")]
    AnchorNotFound(String),

    /// The file ended before the block opened at the anchor was closed.
    #[error("block at anchor `{anchor}` (line {line}) is never closed")]
    UnterminatedBlock {
        /// Anchor text that started the block.
        anchor: String,
        /// 1-based line of the anchor.
        line: usize,
    },
}
