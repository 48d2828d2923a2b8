//! Figure scale suggestions from SVG widths.

use std::sync::LazyLock;

use regex::Regex;

use crate::consts::{DEFAULT_SCALE, MAX_FIGURE_WIDTH_MM, SCALE_STEPS};

static WIDTH_MM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"width="([\d.]*)mm""#).unwrap());

/// Width in millimetres declared by the first `width="Nmm"` attribute.
#[must_use]
pub fn svg_width_mm(svg: &str) -> Option<f64> {
    WIDTH_MM
        .captures(svg)
        .and_then(|caps| caps[1].parse::<f64>().ok())
}

/// Suggest a `\scalebox` factor for an SVG figure.
///
/// Figures narrow enough to fit at [`DEFAULT_SCALE`] get it; wider ones are
/// shrunk to [`MAX_FIGURE_WIDTH_MM`]. The result is snapped down onto
/// [`SCALE_STEPS`]. An SVG without a millimetre width gets the default.
///
/// # Example
///
/// ```
/// use bw_images::suggest_scale;
///
/// assert_eq!(suggest_scale(r#"<svg width="100mm">"#), 0.6);
/// assert_eq!(suggest_scale(r#"<svg width="300mm">"#), 0.3);
/// ```
#[must_use]
pub fn suggest_scale(svg: &str) -> f64 {
    let width = svg_width_mm(svg).unwrap_or(0.0);
    let scale = if width * DEFAULT_SCALE > MAX_FIGURE_WIDTH_MM {
        MAX_FIGURE_WIDTH_MM / width
    } else {
        DEFAULT_SCALE
    };
    snap_scale(scale)
}

/// Largest allowed step not larger than `scale`; the smallest step when
/// every step is larger.
#[must_use]
pub fn snap_scale(scale: f64) -> f64 {
    SCALE_STEPS
        .iter()
        .copied()
        .find(|&step| step <= scale)
        .unwrap_or(SCALE_STEPS[SCALE_STEPS.len() - 1])
}
