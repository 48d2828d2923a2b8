//! Artifact planning.
//!
//! Each image directive turns into the files the two output trees need:
//! with a vector source, a print PDF for LaTeX and a screen PNG for the
//! web-book; without one, the raster copied into both trees.

use std::path::{Path, PathBuf};

use bw_directives::LocatedImage;

use crate::consts::DEFAULT_SCREEN_DPI;

/// Output trees the artifacts are written to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Root of the web-book Markdown tree.
    pub markdown_dir: PathBuf,
    /// Root of the LaTeX tree.
    pub latex_dir: PathBuf,
    /// DPI of PNG exports.
    pub screen_dpi: u32,
}

impl Layout {
    /// Create a layout with the default screen DPI.
    #[must_use]
    pub fn new(markdown_dir: impl Into<PathBuf>, latex_dir: impl Into<PathBuf>) -> Self {
        Self {
            markdown_dir: markdown_dir.into(),
            latex_dir: latex_dir.into(),
            screen_dpi: DEFAULT_SCREEN_DPI,
        }
    }

    /// Set the PNG export DPI.
    #[must_use]
    pub fn with_screen_dpi(mut self, dpi: u32) -> Self {
        self.screen_dpi = dpi;
        self
    }
}

/// Export format requested from a converter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Vector PDF for print.
    Pdf,
    /// Bitmap PNG at the given DPI.
    Png {
        /// Export resolution.
        dpi: u32,
    },
}

/// One file to produce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Artifact {
    /// Convert a vector source through the external converter.
    Convert {
        /// The `.svg` file.
        source: PathBuf,
        /// File to write.
        output: PathBuf,
        /// Requested format.
        format: ExportFormat,
    },
    /// Copy a raster as is.
    Copy {
        /// The raster file.
        source: PathBuf,
        /// File to write.
        output: PathBuf,
    },
}

impl Artifact {
    /// File this artifact writes.
    #[must_use]
    pub fn output(&self) -> &Path {
        match self {
            Self::Convert { output, .. } | Self::Copy { output, .. } => output,
        }
    }

    /// File this artifact reads.
    #[must_use]
    pub fn source(&self) -> &Path {
        match self {
            Self::Convert { source, .. } | Self::Copy { source, .. } => source,
        }
    }
}

/// Plan the artifacts of one located image.
///
/// `document_dir` is the document's directory relative to the input root;
/// outputs land at the same relative place in each output tree, under the
/// image's embed path.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
/// use bw_directives::ImageDirective;
/// use bw_images::{Artifact, ExportFormat, Layout, plan_artifacts};
///
/// let image = ImageDirective { path: "p.png".to_owned(), caption: String::new(), scale: "0.6".to_owned() }
///     .locate(Path::new("src"), Path::new("pre/ch1"), "doc-files", &|p| p.ends_with("p.svg"));
/// let layout = Layout::new("markdown", "latex/chapters");
///
/// let plan = plan_artifacts(&image, &layout, Path::new("ch1"));
/// assert_eq!(plan[0], Artifact::Convert {
///     source: PathBuf::from("pre/ch1/p.svg"),
///     output: PathBuf::from("latex/chapters/ch1/p.pdf"),
///     format: ExportFormat::Pdf,
/// });
/// ```
#[must_use]
pub fn plan_artifacts(image: &LocatedImage, layout: &Layout, document_dir: &Path) -> Vec<Artifact> {
    let latex_out = layout.latex_dir.join(document_dir).join(&image.embed);
    let markdown_out = layout.markdown_dir.join(document_dir).join(&image.embed);

    match &image.vector {
        Some(svg) => vec![
            Artifact::Convert {
                source: svg.clone(),
                output: latex_out.with_extension("pdf"),
                format: ExportFormat::Pdf,
            },
            Artifact::Convert {
                source: svg.clone(),
                output: markdown_out.with_extension("png"),
                format: ExportFormat::Png {
                    dpi: layout.screen_dpi,
                },
            },
        ],
        None => vec![
            Artifact::Copy {
                source: image.raster.clone(),
                output: latex_out,
            },
            Artifact::Copy {
                source: image.raster.clone(),
                output: markdown_out,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bw_directives::ImageDirective;
    use pretty_assertions::assert_eq;

    fn located(path: &str, has_vector: bool) -> LocatedImage {
        ImageDirective {
            path: path.to_owned(),
            caption: "c".to_owned(),
            scale: "0.3".to_owned(),
        }
        .locate(
            Path::new("/src"),
            Path::new("/book/pre/ch2"),
            "doc-files",
            &|_| has_vector,
        )
    }

    #[test]
    fn test_raster_is_copied_to_both_trees() {
        let layout = Layout::new("/book/md", "/book/tex");
        let plan = plan_artifacts(&located("img/a.png", false), &layout, Path::new("ch2"));
        assert_eq!(
            plan,
            vec![
                Artifact::Copy {
                    source: PathBuf::from("/book/pre/ch2/img/a.png"),
                    output: PathBuf::from("/book/tex/ch2/img/a.png"),
                },
                Artifact::Copy {
                    source: PathBuf::from("/book/pre/ch2/img/a.png"),
                    output: PathBuf::from("/book/md/ch2/img/a.png"),
                },
            ]
        );
    }

    #[test]
    fn test_vector_is_converted_for_both_trees() {
        let layout = Layout::new("/book/md", "/book/tex").with_screen_dpi(90);
        let plan = plan_artifacts(&located("a.png", true), &layout, Path::new("ch2"));
        assert_eq!(
            plan,
            vec![
                Artifact::Convert {
                    source: PathBuf::from("/book/pre/ch2/a.svg"),
                    output: PathBuf::from("/book/tex/ch2/a.pdf"),
                    format: ExportFormat::Pdf,
                },
                Artifact::Convert {
                    source: PathBuf::from("/book/pre/ch2/a.svg"),
                    output: PathBuf::from("/book/md/ch2/a.png"),
                    format: ExportFormat::Png { dpi: 90 },
                },
            ]
        );
    }

    #[test]
    fn test_vendored_image_lands_next_to_document() {
        let layout = Layout::new("/book/md", "/book/tex");
        let plan = plan_artifacts(&located("doc-files/ca/P.png", false), &layout, Path::new("ch2"));
        assert_eq!(plan[0].source(), Path::new("/src/doc-files/ca/P.png"));
        assert_eq!(plan[0].output(), Path::new("/book/tex/ch2/P.png"));
        assert_eq!(plan[1].output(), Path::new("/book/md/ch2/P.png"));
    }
}
