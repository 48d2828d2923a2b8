//! API documentation cross-references.
//!
//! `{@link jdc:ca.uqac.Pump}` links to the generated page of a type; the
//! prefix before the colon selects how the dotted path maps onto the
//! documentation tree.

use std::fmt;

use crate::util::join_url;

/// What a cross-reference points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XrefKind {
    /// `jdp`: a package summary page.
    Package,
    /// `jdc`: a class page.
    Class,
    /// `jdi`: an interface page.
    Interface,
    /// `jdm`: a member anchor on a type page.
    Method,
    /// Any other prefix. Resolves to `#`.
    Other(String),
}

impl XrefKind {
    /// Map a directive prefix onto a kind.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "jdp" => Self::Package,
            "jdc" => Self::Class,
            "jdi" => Self::Interface,
            "jdm" => Self::Method,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Prefix as written in a directive.
    #[must_use]
    pub fn prefix(&self) -> &str {
        match self {
            Self::Package => "jdp",
            Self::Class => "jdc",
            Self::Interface => "jdi",
            Self::Method => "jdm",
            Self::Other(prefix) => prefix,
        }
    }
}

impl fmt::Display for XrefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A parsed `{@link ...}` target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossReference {
    /// Kind selected by the prefix.
    pub kind: XrefKind,
    /// Dotted path without the fragment, e.g. `ca.uqac.Pump.start`.
    pub path: String,
    /// Text after `#`, if any.
    pub fragment: Option<String>,
    /// Explicit link text, if any.
    pub label: Option<String>,
}

impl CrossReference {
    /// Parse the pieces of a link directive.
    ///
    /// `reference` is the dotted path with an optional `#fragment`; an empty
    /// or whitespace-only `label` counts as absent.
    ///
    /// # Example
    ///
    /// ```
    /// use bw_directives::{CrossReference, XrefKind};
    ///
    /// let xref = CrossReference::parse("jdm", "ca.x.Y.z#L10", None);
    /// assert_eq!(xref.kind, XrefKind::Method);
    /// assert_eq!(xref.path, "ca.x.Y.z");
    /// assert_eq!(xref.fragment.as_deref(), Some("L10"));
    /// ```
    #[must_use]
    pub fn parse(prefix: &str, reference: &str, label: Option<&str>) -> Self {
        let (path, fragment) = match reference.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment.to_owned())),
            None => (reference, None),
        };
        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_owned);
        Self {
            kind: XrefKind::from_prefix(prefix),
            path: path.to_owned(),
            fragment,
            label,
        }
    }

    /// Build the documentation URL under `root`.
    ///
    /// - packages: `{root}a/b/package-summary.html`
    /// - classes and interfaces: `{root}a/b/C.html`
    /// - methods: the page is the last segment starting with an upper-case
    ///   letter (or the last segment when there is none); the anchor is the
    ///   fragment, or else the segments after the type
    /// - anything else: `#`
    #[must_use]
    pub fn url(&self, root: &str) -> String {
        match self.kind {
            XrefKind::Package => {
                join_url(root, &format!("{}/package-summary.html", slashed(&self.path)))
            }
            XrefKind::Class | XrefKind::Interface => {
                join_url(root, &format!("{}.html", slashed(&self.path)))
            }
            XrefKind::Method => join_url(root, &self.member_page()),
            XrefKind::Other(_) => "#".to_owned(),
        }
    }

    /// Link text: the label, or the reference as written.
    #[must_use]
    pub fn display_label(&self) -> String {
        match (&self.label, &self.fragment) {
            (Some(label), _) => label.clone(),
            (None, Some(fragment)) => format!("{}#{fragment}", self.path),
            (None, None) => self.path.clone(),
        }
    }

    /// Markdown link with code-formatted text.
    #[must_use]
    pub fn render(&self, root: &str) -> String {
        format!("[`{}`]({})", self.display_label(), self.url(root))
    }

    fn member_page(&self) -> String {
        let segments: Vec<&str> = self.path.split('.').collect();
        let type_idx = segments
            .iter()
            .rposition(|s| s.chars().next().is_some_and(char::is_uppercase))
            .unwrap_or(segments.len() - 1);

        let package = segments[..type_idx].join("/");
        let member = segments[type_idx + 1..].join(".");
        let mut page = if package.is_empty() {
            format!("{}.html", segments[type_idx])
        } else {
            format!("{package}/{}.html", segments[type_idx])
        };

        let anchor = self.fragment.as_deref().unwrap_or(&member);
        if !anchor.is_empty() {
            page.push('#');
            page.push_str(anchor);
        }
        page
    }
}

fn slashed(dotted: &str) -> String {
    dotted.replace('.', "/")
}
