//! `\includegraphics` rewriting in typeset LaTeX.
//!
//! The Markdown-to-LaTeX step emits a bare `\includegraphics{path}` per
//! image. Each is replaced by the image's LaTeX embed: a `\scalebox` with the
//! directive's scale as written, pointing at the converted PDF when the
//! image has a vector source.

use bw_directives::{EmbedTarget, LocatedImage};
use regex::{Captures, Regex};

/// Rewrite the includes of `images` in `latex`.
///
/// An include matches when its file name is the image's embed path (or the
/// PDF it was already switched to), optionally below some directory; that
/// directory prefix is kept. Includes already wrapped in a `\scalebox` are rewrapped
/// rather than nested, so rewriting twice gives the same text.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use bw_directives::ImageDirective;
/// use bw_images::rewrite_latex_includes;
///
/// let image = ImageDirective { path: "pump.png".to_owned(), caption: String::new(), scale: "0.45".to_owned() }
///     .locate(Path::new("src"), Path::new("pre"), "doc-files", &|_| true);
/// let latex = "\\begin{figure}\\includegraphics{ch1/pump.png}\\end{figure}";
///
/// assert_eq!(
///     rewrite_latex_includes(latex, &[image]),
///     "\\begin{figure}\\scalebox{0.45}{\\includegraphics{ch1/pump.pdf}}\\end{figure}"
/// );
/// ```
#[must_use]
pub fn rewrite_latex_includes(latex: &str, images: &[LocatedImage]) -> String {
    let mut out = latex.to_owned();
    for image in images {
        let Some(pattern) = include_pattern(image) else {
            continue;
        };
        out = pattern
            .replace_all(&out, |caps: &Captures<'_>| {
                let prefix = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .map_or("", |m| m.as_str());
                image.render_at(EmbedTarget::Latex, prefix)
            })
            .into_owned();
    }
    out
}

fn include_pattern(image: &LocatedImage) -> Option<Regex> {
    let mut names = vec![regex::escape(&image.embed)];
    let converted = image.latex_embed();
    if converted != image.embed {
        names.push(regex::escape(&converted));
    }
    let names = names.join("|");
    let pattern = format!(
        r"\\scalebox\{{[^}}]*\}}\{{\\includegraphics\{{((?:[^}}]*/)?)(?:{names})\}}\}}|\\includegraphics\{{((?:[^}}]*/)?)(?:{names})\}}"
    );
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(image = %image.embed, error = %e, "Skipping image with unusable path");
            None
        }
    }
}
