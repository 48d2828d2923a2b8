//! Directive model.
//!
//! A document contains zero or more directives. Each kind carries its own
//! typed parameters; the scanner produces [`LocatedDirective`]s that also
//! remember where in the document the directive was written.

use std::ops::Range;

use crate::image::ImageDirective;
use crate::xref::CrossReference;

/// One inline directive, as written in a document.
#[derive(Clone, Debug, PartialEq)]
pub enum Directive {
    /// `{@snipm PATH}{MARKER}`: code between two marker comments.
    MarkedSnippet {
        /// Origin file, relative to the source root.
        path: String,
        /// Marker text, matched literally.
        marker: String,
    },
    /// `{@snips PATH}{ANCHOR}`: the brace-delimited construct starting at an anchor.
    StructuralSnippet {
        /// Origin file, relative to the source root.
        path: String,
        /// Literal substring of the first line of the construct.
        anchor: String,
    },
    /// `{@snipi PATH}{LABEL}`: a provenance link to a whole origin file.
    ReferenceSnippet {
        /// Origin file, relative to the source root.
        path: String,
        /// Link text; empty means the anchor glyph.
        label: String,
    },
    /// `{@link KIND:DOTTED.PATH[#FRAGMENT][ LABEL]}`: an API documentation link.
    CrossReference(CrossReference),
    /// `{@img PATH}{CAPTION}{SCALE}`: an image embed.
    Image(ImageDirective),
}

impl Directive {
    /// Kind of this directive.
    #[must_use]
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Self::MarkedSnippet { .. } => DirectiveKind::MarkedSnippet,
            Self::StructuralSnippet { .. } => DirectiveKind::StructuralSnippet,
            Self::ReferenceSnippet { .. } => DirectiveKind::ReferenceSnippet,
            Self::CrossReference(_) => DirectiveKind::CrossReference,
            Self::Image(_) => DirectiveKind::Image,
        }
    }
}

/// Directive kinds, in the order the scanner claims document spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirectiveKind {
    MarkedSnippet,
    StructuralSnippet,
    ReferenceSnippet,
    CrossReference,
    Image,
}

impl DirectiveKind {
    /// All kinds in pass order.
    pub const PASS_ORDER: [Self; 5] = [
        Self::MarkedSnippet,
        Self::StructuralSnippet,
        Self::ReferenceSnippet,
        Self::CrossReference,
        Self::Image,
    ];

    /// Directive keyword as written after `{@`.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::MarkedSnippet => "snipm",
            Self::StructuralSnippet => "snips",
            Self::ReferenceSnippet => "snipi",
            Self::CrossReference => "link",
            Self::Image => "img",
        }
    }
}

/// A directive found in a document.
#[derive(Clone, Debug, PartialEq)]
pub struct LocatedDirective {
    /// Parsed directive.
    pub directive: Directive,
    /// Byte range of the full directive text in the document.
    pub span: Range<usize>,
    /// 1-based line where the directive starts.
    pub line: usize,
}
