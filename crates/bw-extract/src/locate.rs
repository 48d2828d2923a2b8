//! Line lookup by pattern.

use regex::Regex;

/// Return the 0-based index of the first line matching `pattern`.
///
/// The text is split on `\n` and the pattern is tested against each physical
/// line on its own, so it can never match across a line boundary. Returns
/// `None` when no line matches.
///
/// # Example
///
/// ```
/// use regex::Regex;
/// use bw_extract::locate_line;
///
/// let pattern = Regex::new(r"//\s*start").unwrap();
/// assert_eq!(locate_line(&pattern, "a\nb\n  // start\n"), Some(2));
/// assert_eq!(locate_line(&pattern, "nothing here"), None);
/// ```
#[must_use]
pub fn locate_line(pattern: &Regex, text: &str) -> Option<usize> {
    text.split('\n').position(|line| pattern.is_match(line))
}
