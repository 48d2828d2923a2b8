//! Extraction between paired marker comments.
//!
//! A region is delimited by two comment lines carrying the same marker text:
//!
//! ```text
//!     // snippet:pump
//!     Pump pump = new Pump();
//!     pump.start();
//!     // snippet:pump
//! ```

use regex::Regex;

use crate::{ExtractError, Fragment, indent, locate_line};

/// Build the pattern that recognizes a marker comment (`//`, optional
/// whitespace, then the marker taken literally).
pub fn marker_pattern(marker: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"//\s*{}", regex::escape(marker)))
}

/// Extract the text strictly between the first two `// <marker>` comments.
///
/// The marker is matched literally, so markers containing regex
/// metacharacters such as `.` or `*` are safe. The captured region is
/// normalized with [`normalize_indent`](crate::normalize_indent) and only its
/// interior lines are kept, which drops the remainder of the opening marker
/// line and the indentation preceding the closing marker.
///
/// The returned [`Fragment::start_line`] is the 0-based line of the opening
/// marker.
///
/// # Errors
///
/// - [`ExtractError::MarkerNotFound`] if the marker is empty or no line carries it
/// - [`ExtractError::UnclosedMarker`] if the marker appears only once
/// - [`ExtractError::Pattern`] if the marker is too large to compile
pub fn extract_marked(text: &str, marker: &str) -> Result<Fragment, ExtractError> {
    if marker.is_empty() {
        return Err(ExtractError::MarkerNotFound(String::new()));
    }
    let opening = marker_pattern(marker).map_err(pattern_error)?;
    let start_line = locate_line(&opening, text)
        .ok_or_else(|| ExtractError::MarkerNotFound(marker.to_owned()))?;

    let escaped = regex::escape(marker);
    let region = Regex::new(&format!(r"(?s)//\s*{escaped}(.*?)//\s*{escaped}"))
        .map_err(pattern_error)?;
    let captured = region
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ExtractError::UnclosedMarker(marker.to_owned()))?;

    let normalized = indent::normalize_indent(captured.as_str());
    Ok(Fragment {
        text: indent::interior_lines(&normalized),
        start_line,
    })
}

fn pattern_error(err: regex::Error) -> ExtractError {
    ExtractError::Pattern(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extracts_between_markers() {
        let source = "a\nb\nc\n// begin-x\nfoo();\n// begin-x\n";
        let fragment = extract_marked(source, "begin-x").unwrap();
        assert_eq!(fragment.text, "foo();\n");
        assert_eq!(fragment.start_line, 3);
    }

    #[test]
    fn test_normalizes_indentation() {
        let source = "class A {\n  void f() {\n    // here\n    Pump p = new Pump();\n    if (x) {\n      p.go();\n    }\n    // here\n  }\n}\n";
        let fragment = extract_marked(source, "here").unwrap();
        assert_eq!(
            fragment.text,
            "Pump p = new Pump();\nif (x) {\n  p.go();\n}\n"
        );
        assert_eq!(fragment.start_line, 2);
    }

    #[test]
    fn test_marker_is_literal() {
        let source = "// aXbbb\nwrong();\n// aXbbb\n// a.b*\nright();\n// a.b*\n";
        let fragment = extract_marked(source, "a.b*").unwrap();
        assert_eq!(fragment.text, "right();\n");
        assert_eq!(fragment.start_line, 3);
    }

    #[test]
    fn test_marker_with_slash() {
        let source = "//end/loop\nx();\n//end/loop\n";
        let fragment = extract_marked(source, "end/loop").unwrap();
        assert_eq!(fragment.text, "x();\n");
        assert_eq!(fragment.start_line, 0);
    }

    #[test]
    fn test_marker_not_found() {
        let err = extract_marked("int x;\n", "missing").unwrap_err();
        assert_eq!(err, ExtractError::MarkerNotFound("missing".to_owned()));
    }

    #[test]
    fn test_empty_marker_rejected() {
        let err = extract_marked("// \nx();\n// \n", "").unwrap_err();
        assert_eq!(err, ExtractError::MarkerNotFound(String::new()));
    }

    #[test]
    fn test_unclosed_marker() {
        let err = extract_marked("// once\nx();\n", "once").unwrap_err();
        assert_eq!(err, ExtractError::UnclosedMarker("once".to_owned()));
    }

    #[test]
    fn test_only_first_pair_is_used() {
        let source = "// m\nfirst();\n// m\n// m\nsecond();\n// m\n";
        let fragment = extract_marked(source, "m").unwrap();
        assert_eq!(fragment.text, "first();\n");
    }

    #[test]
    fn test_comments_are_kept() {
        let source = "// m\n// explain\nx();\n// m\n";
        let fragment = extract_marked(source, "m").unwrap();
        assert_eq!(fragment.text, "// explain\nx();\n");
    }
}
