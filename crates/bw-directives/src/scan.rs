//! Directive scanning.
//!
//! Each kind is matched against the original document text in pass order.
//! A match that overlaps a span already claimed by an earlier pass is
//! dropped, so a directive nested inside another is never resolved twice.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::directive::{Directive, DirectiveKind, LocatedDirective};
use crate::image::ImageDirective;
use crate::util::line_at;
use crate::xref::CrossReference;

static SNIPM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{@snipm\s+(.*?)\}\{(.*?)\}").unwrap());

static SNIPS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{@snips\s+(.*?)\}\{(.*?)\}").unwrap());

static SNIPI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{@snipi\s+(.*?)\}\{(.*?)\}").unwrap());

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{@link\s*(\w+):([^\s}]+)(?:\s+([^}]*?))?\s*\}").unwrap()
});

static IMG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{@img\s+(.*?)\}\{(.*?)\}\{(.*?)\}").unwrap());

/// Find every directive in `text`, sorted by position.
///
/// Malformed directives (for example a link without a `kind:` prefix) do
/// not match and stay in the text unchanged. Image scales are not checked
/// here; they are kept as written.
///
/// # Example
///
/// ```
/// use bw_directives::{Directive, scan};
///
/// let found = scan("Intro\n{@snipm a/B.java}{pump}\n");
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].line, 2);
/// assert!(matches!(found[0].directive, Directive::MarkedSnippet { .. }));
/// ```
#[must_use]
pub fn scan(text: &str) -> Vec<LocatedDirective> {
    let mut found: Vec<LocatedDirective> = Vec::new();
    for kind in DirectiveKind::PASS_ORDER {
        for (span, directive) in scan_kind(text, kind) {
            if found.iter().any(|d| overlaps(&d.span, &span)) {
                tracing::debug!(
                    kind = kind.keyword(),
                    line = line_at(text, span.start),
                    "Dropping directive nested in an earlier one"
                );
                continue;
            }
            found.push(LocatedDirective {
                directive,
                line: line_at(text, span.start),
                span,
            });
        }
    }
    found.sort_by_key(|d| d.span.start);
    found
}

/// Find only the image directives in `text`, in document order.
#[must_use]
pub fn scan_images(text: &str) -> Vec<ImageDirective> {
    scan(text)
        .into_iter()
        .filter_map(|d| match d.directive {
            Directive::Image(image) => Some(image),
            _ => None,
        })
        .collect()
}

fn scan_kind(text: &str, kind: DirectiveKind) -> Vec<(Range<usize>, Directive)> {
    let re: &Regex = match kind {
        DirectiveKind::MarkedSnippet => &*SNIPM_RE,
        DirectiveKind::StructuralSnippet => &*SNIPS_RE,
        DirectiveKind::ReferenceSnippet => &*SNIPI_RE,
        DirectiveKind::CrossReference => &*LINK_RE,
        DirectiveKind::Image => &*IMG_RE,
    };
    re.captures_iter(text)
        .filter_map(|caps| {
            let span = caps.get(0)?.range();
            Some((span, build(kind, &caps)))
        })
        .collect()
}

fn build(kind: DirectiveKind, caps: &Captures<'_>) -> Directive {
    match kind {
        DirectiveKind::MarkedSnippet => Directive::MarkedSnippet {
            path: caps[1].trim().to_owned(),
            marker: caps[2].to_owned(),
        },
        DirectiveKind::StructuralSnippet => Directive::StructuralSnippet {
            path: caps[1].trim().to_owned(),
            anchor: caps[2].to_owned(),
        },
        DirectiveKind::ReferenceSnippet => Directive::ReferenceSnippet {
            path: caps[1].trim().to_owned(),
            label: caps[2].to_owned(),
        },
        DirectiveKind::CrossReference => Directive::CrossReference(CrossReference::parse(
            &caps[1],
            &caps[2],
            caps.get(3).map(|m| m.as_str()),
        )),
        DirectiveKind::Image => Directive::Image(ImageDirective {
            path: caps[1].trim().to_owned(),
            caption: caps[2].to_owned(),
            scale: caps[3].trim().to_owned(),
        }),
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}
