//! Image artifacts for bookweave.
//!
//! Image directives name a raster, but the two output trees want different
//! files. When an `.svg` sits next to the raster it is the real source:
//! the LaTeX tree gets a PDF conversion and the web-book a PNG export.
//! Otherwise the raster is copied into both trees.
//!
//! - [`plan_artifacts`] lists the files one image needs
//! - [`ArtifactRunner`] produces them, skipping outputs that are current
//! - [`ImageConverter`] is the seam to the external tool;
//!   [`InkscapeConverter`] drives the Inkscape CLI
//! - [`rewrite_latex_includes`] scales and retargets `\includegraphics`
//! - [`suggest_scale`] proposes a scale from an SVG's declared width
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use bw_directives::ImageDirective;
//! use bw_images::{ArtifactRunner, InkscapeConverter, Layout, plan_artifacts};
//!
//! let image = ImageDirective { path: "pump.png".to_owned(), caption: String::new(), scale: "0.6".to_owned() }
//!     .locate(Path::new("src"), Path::new("pre/ch1"), "doc-files", &|p| p.exists());
//! let plan = plan_artifacts(&image, &Layout::new("markdown", "latex/chapters"), Path::new("ch1"));
//!
//! let converter = InkscapeConverter::default();
//! let report = ArtifactRunner::new(&converter).run(&plan);
//! println!("{} converted, {} failed", report.converted, report.failed.len());
//! ```

mod consts;
mod converter;
mod error;
mod latex;
mod plan;
mod runner;
mod scale;

pub use consts::{DEFAULT_INKSCAPE, DEFAULT_SCALE, DEFAULT_SCREEN_DPI, MAX_FIGURE_WIDTH_MM, SCALE_STEPS};
pub use converter::{ImageConverter, InkscapeConverter, InkscapeFlavor};
pub use error::ConvertError;
pub use latex::rewrite_latex_includes;
pub use plan::{Artifact, ExportFormat, Layout, plan_artifacts};
pub use runner::{ArtifactFailure, ArtifactOutcome, ArtifactRunner, RunReport};
pub use scale::{snap_scale, suggest_scale, svg_width_mm};
