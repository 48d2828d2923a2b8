//! Indentation normalization for extracted blocks.
//!
//! Captured regions carry the indentation of wherever they sat in the origin
//! file. These helpers shift them left so the shallowest line starts at
//! column 0 while keeping relative indentation intact.

/// Number of spaces a tab expands to before indentation is measured.
pub const TAB_WIDTH: usize = 4;

fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Smallest leading-space count among non-blank lines (0 when all are blank).
fn common_indent<'a>(lines: impl IntoIterator<Item = &'a str>) -> usize {
    lines
        .into_iter()
        .filter(|line| !is_blank(line))
        .map(leading_spaces)
        .min()
        .unwrap_or(0)
}

fn strip_indent(line: &str, width: usize) -> &str {
    if is_blank(line) {
        return "";
    }
    // Non-blank lines have at least `width` leading spaces.
    &line[width.min(line.len())..]
}

/// Normalize the indentation of a block whose first and last lines are delimiters.
///
/// Tabs become [`TAB_WIDTH`] spaces everywhere. The minimum indentation over the
/// interior non-blank lines is then removed from every interior line; blank
/// interior lines become empty. The first and last lines are passed through
/// unchanged. Lines are split on `\n` and joined back the same way, so the
/// output has exactly as many lines as the input.
///
/// # Example
///
/// ```
/// use bw_extract::normalize_indent;
///
/// let block = "// open\n        a();\n            b();\n    // close";
/// assert_eq!(
///     normalize_indent(block),
///     "// open\na();\n    b();\n    // close"
/// );
/// ```
#[must_use]
pub fn normalize_indent(block: &str) -> String {
    let expanded = expand_tabs(block);
    let lines: Vec<&str> = expanded.split('\n').collect();
    if lines.len() < 3 {
        return expanded;
    }

    let last = lines.len() - 1;
    let interior = &lines[1..last];
    let width = common_indent(interior.iter().copied());

    let mut out = String::with_capacity(expanded.len());
    out.push_str(lines[0]);
    for line in interior {
        out.push('\n');
        out.push_str(strip_indent(line, width));
    }
    out.push('\n');
    out.push_str(lines[last]);
    out
}

/// Keep only the interior lines of a block, each terminated by `\n`.
///
/// The first and last `\n`-separated segments are dropped. A block with fewer
/// than three segments has no interior and yields an empty string.
#[must_use]
pub fn interior_lines(block: &str) -> String {
    let lines: Vec<&str> = block.split('\n').collect();
    if lines.len() < 3 {
        return String::new();
    }
    lines[1..lines.len() - 1]
        .iter()
        .fold(String::with_capacity(block.len()), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
}

/// Remove the common indentation from every line of a block.
///
/// Unlike [`normalize_indent`] no line is treated as a delimiter. Each output
/// line is terminated by `\n`.
#[must_use]
pub fn dedent(block: &str) -> String {
    let expanded = expand_tabs(block);
    let width = common_indent(expanded.lines());
    expanded
        .lines()
        .fold(String::with_capacity(expanded.len()), |mut out, line| {
            out.push_str(strip_indent(line, width));
            out.push('\n');
            out
        })
}
