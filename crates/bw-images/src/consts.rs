//! Constants for image conversion and figure scaling.

/// Bitmap DPI used when exporting PNGs for the web-book.
pub const DEFAULT_SCREEN_DPI: u32 = 64;

/// Widest figure (in millimetres) that fits the printed text block.
pub const MAX_FIGURE_WIDTH_MM: f64 = 112.0;

/// Scale applied to figures that fit at their natural width.
pub const DEFAULT_SCALE: f64 = 0.6;

/// Allowed figure scales, largest first. Suggestions snap down to one of
/// these so figures across the book share a handful of sizes.
pub const SCALE_STEPS: [f64; 5] = [0.6, 0.45, 0.3, 0.2, 0.1];

/// Default converter program.
pub const DEFAULT_INKSCAPE: &str = "inkscape";
