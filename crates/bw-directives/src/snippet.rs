//! Code snippet rendering.

use crate::util::join_url;

/// Anchor glyph used as provenance link text.
pub const ANCHOR_GLYPH: &str = "⚓";

/// Code extracted from an origin file, ready to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFragment {
    /// Origin path relative to the source root, as written in the directive.
    pub origin: String,
    /// Normalized code, every line terminated by `\n`.
    pub text: String,
    /// 0-based line of the first line of the block in the origin file.
    pub start_line: usize,
}

impl SourceFragment {
    /// Deep link to the first line of the fragment in the hosted source.
    #[must_use]
    pub fn provenance_url(&self, remote_url: &str) -> String {
        format!("{}#L{}", join_url(remote_url, &self.origin), self.start_line + 1)
    }

    /// Fenced code block followed by a provenance link.
    ///
    /// # Example
    ///
    /// ```
    /// use bw_directives::SourceFragment;
    ///
    /// let fragment = SourceFragment {
    ///     origin: "a/B.java".to_owned(),
    ///     text: "foo();\n".to_owned(),
    ///     start_line: 3,
    /// };
    /// assert_eq!(
    ///     fragment.render("java", "https://host/src/"),
    ///     "``` java\nfoo();\n```\n[⚓](https://host/src/a/B.java#L4)\n"
    /// );
    /// ```
    #[must_use]
    pub fn render(&self, language: &str, remote_url: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + 64);
        out.push_str("``` ");
        out.push_str(language);
        out.push('\n');
        out.push_str(&self.text);
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("```\n");
        out.push_str(&format!(
            "[{ANCHOR_GLYPH}]({})\n",
            self.provenance_url(remote_url)
        ));
        out
    }
}

/// Provenance link to a whole origin file.
#[must_use]
pub fn render_reference(origin: &str, label: &str, remote_url: &str) -> String {
    let label = label.trim();
    let text = if label.is_empty() { ANCHOR_GLYPH } else { label };
    format!("[{text}]({})\n", join_url(remote_url, origin))
}
