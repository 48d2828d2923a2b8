//! Image directives.
//!
//! `{@img PATH}{CAPTION}{SCALE}` embeds a raster image in the web-book and a
//! scaled figure in the LaTeX tree. When a same-named `.svg` sits next to the
//! raster, the raster and the print PDF are both generated from it.

use std::path::{Path, PathBuf};

use crate::util::basename;

/// A parsed `{@img ...}` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageDirective {
    /// Image path as written.
    pub path: String,
    /// Caption used as the Markdown alt text.
    pub caption: String,
    /// `\scalebox` factor exactly as written. Usually a number, but any
    /// LaTeX the author chose (`0.5\textwidth`, or nothing) is kept.
    pub scale: String,
}

/// Output flavour of an image embed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmbedTarget {
    /// `![caption](path)`
    #[default]
    Markdown,
    /// `\scalebox{scale}{\includegraphics{path}}`
    Latex,
}

/// An image directive with its files resolved on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocatedImage {
    /// The directive this was located from.
    pub directive: ImageDirective,
    /// Where the raster is read from. It may not exist when a vector source
    /// is present.
    pub raster: PathBuf,
    /// Same-named `.svg` next to the raster, if one exists.
    pub vector: Option<PathBuf>,
    /// Path written into the output, relative to the output document.
    pub embed: String,
    /// Whether the image comes from the origin source tree.
    pub vendored: bool,
}

impl ImageDirective {
    /// Whether the path points into the origin source tree.
    #[must_use]
    pub fn is_vendored(&self, vendored_prefix: &str) -> bool {
        !vendored_prefix.is_empty() && self.path.starts_with(vendored_prefix)
    }

    /// Decide where the image lives and whether it has a vector source.
    ///
    /// Vendored images are read from `source_root` and embedded by basename,
    /// since they are copied next to the output document. Everything else is
    /// relative to the document's own directory and embedded unchanged.
    #[must_use]
    pub fn locate(
        &self,
        source_root: &Path,
        document_dir: &Path,
        vendored_prefix: &str,
        file_exists: &dyn Fn(&Path) -> bool,
    ) -> LocatedImage {
        let vendored = self.is_vendored(vendored_prefix);
        let (raster, embed) = if vendored {
            (source_root.join(&self.path), basename(&self.path).to_owned())
        } else {
            (document_dir.join(&self.path), self.path.clone())
        };
        let vector = Some(raster.with_extension("svg")).filter(|svg| file_exists(svg));

        LocatedImage {
            directive: self.clone(),
            raster,
            vector,
            embed,
            vendored,
        }
    }
}

impl LocatedImage {
    /// Path embedded in LaTeX: the PDF conversion when a vector source
    /// exists, otherwise the raster copy.
    #[must_use]
    pub fn latex_embed(&self) -> String {
        if self.vector.is_some() {
            with_extension(&self.embed, "pdf")
        } else {
            self.embed.clone()
        }
    }

    /// Render the embed for `target`.
    ///
    /// The Markdown tree embeds the image where it sits; LaTeX includes get
    /// their prefix from the typeset file, see [`render_at`](Self::render_at).
    ///
    /// # Example
    ///
    /// ```
    /// use std::path::Path;
    /// use bw_directives::{EmbedTarget, ImageDirective};
    ///
    /// let image = ImageDirective {
    ///     path: "pump.png".to_owned(),
    ///     caption: "A pump".to_owned(),
    ///     scale: "0.6".to_owned(),
    /// };
    /// let located = image.locate(Path::new("src"), Path::new("docs"), "doc-files", &|_| false);
    /// assert_eq!(located.render(EmbedTarget::Markdown), "![A pump](pump.png)");
    /// assert_eq!(
    ///     located.render(EmbedTarget::Latex),
    ///     "\\scalebox{0.6}{\\includegraphics{pump.png}}"
    /// );
    /// ```
    #[must_use]
    pub fn render(&self, target: EmbedTarget) -> String {
        self.render_at(target, "")
    }

    /// Render the embed for `target` with `dir_prefix` placed in front of
    /// the embedded path.
    #[must_use]
    pub fn render_at(&self, target: EmbedTarget, dir_prefix: &str) -> String {
        match target {
            EmbedTarget::Markdown => format!(
                "![{}]({dir_prefix}{})",
                self.directive.caption, self.embed
            ),
            EmbedTarget::Latex => format!(
                "\\scalebox{{{}}}{{\\includegraphics{{{dir_prefix}{}}}}}",
                self.directive.scale,
                self.latex_embed()
            ),
        }
    }
}

/// Replace the extension of a `/`-separated path.
fn with_extension(path: &str, extension: &str) -> String {
    let name_start = path.rfind('/').map_or(0, |idx| idx + 1);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => format!("{}.{extension}", &path[..name_start + dot]),
        _ => format!("{path}.{extension}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn image(path: &str) -> ImageDirective {
        ImageDirective {
            path: path.to_owned(),
            caption: "Caption".to_owned(),
            scale: "0.45".to_owned(),
        }
    }

    #[test]
    fn test_raster_without_vector_is_passthrough() {
        let located = image("img/pump.png").locate(
            Path::new("/src"),
            Path::new("/book/pre/ch1"),
            "doc-files",
            &|_| false,
        );
        assert_eq!(located.raster, PathBuf::from("/book/pre/ch1/img/pump.png"));
        assert_eq!(located.vector, None);
        assert_eq!(located.render(EmbedTarget::Markdown), "![Caption](img/pump.png)");
        assert_eq!(
            located.render(EmbedTarget::Latex),
            "\\scalebox{0.45}{\\includegraphics{img/pump.png}}"
        );
    }

    #[test]
    fn test_vector_switches_latex_to_pdf() {
        let located = image("img/pump.png").locate(
            Path::new("/src"),
            Path::new("/book/pre/ch1"),
            "doc-files",
            &|p| p == Path::new("/book/pre/ch1/img/pump.svg"),
        );
        assert_eq!(located.vector, Some(PathBuf::from("/book/pre/ch1/img/pump.svg")));
        assert_eq!(located.render(EmbedTarget::Markdown), "![Caption](img/pump.png)");
        assert_eq!(
            located.render(EmbedTarget::Latex),
            "\\scalebox{0.45}{\\includegraphics{img/pump.pdf}}"
        );
    }

    #[test]
    fn test_vendored_image_embeds_basename() {
        let located = image("doc-files/ca/uqac/Pump.png").locate(
            Path::new("/src"),
            Path::new("/book/pre"),
            "doc-files",
            &|_| false,
        );
        assert!(located.vendored);
        assert_eq!(located.raster, PathBuf::from("/src/doc-files/ca/uqac/Pump.png"));
        assert_eq!(located.embed, "Pump.png");
    }

    #[test]
    fn test_scale_is_rendered_as_written() {
        let mut directive = image("pump.png");
        directive.scale = "0.5\\textwidth".to_owned();
        let located = directive.locate(Path::new("/src"), Path::new("/pre"), "doc-files", &|_| false);
        assert_eq!(
            located.render(EmbedTarget::Latex),
            "\\scalebox{0.5\\textwidth}{\\includegraphics{pump.png}}"
        );

        directive.scale = String::new();
        let located = directive.locate(Path::new("/src"), Path::new("/pre"), "doc-files", &|_| false);
        assert_eq!(
            located.render(EmbedTarget::Latex),
            "\\scalebox{}{\\includegraphics{pump.png}}"
        );
        assert_eq!(located.render(EmbedTarget::Markdown), "![Caption](pump.png)");
    }

    #[test]
    fn test_render_at_prefix() {
        let located = image("pump.png").locate(Path::new("/src"), Path::new("/pre"), "doc-files", &|_| true);
        assert_eq!(
            located.render_at(EmbedTarget::Latex, "ch1/"),
            "\\scalebox{0.45}{\\includegraphics{ch1/pump.pdf}}"
        );
        assert_eq!(located.render_at(EmbedTarget::Markdown, "ch1/"), "![Caption](ch1/pump.png)");
    }

    #[test]
    fn test_empty_prefix_never_vendors() {
        assert!(!image("doc-files/a.png").is_vendored(""));
    }

    #[test]
    fn test_with_extension() {
        assert_eq!(with_extension("a/b.png", "pdf"), "a/b.pdf");
        assert_eq!(with_extension("a.b/c", "pdf"), "a.b/c.pdf");
        assert_eq!(with_extension("x.tar.png", "pdf"), "x.tar.pdf");
        assert_eq!(with_extension(".hidden", "pdf"), ".hidden.pdf");
    }
}
