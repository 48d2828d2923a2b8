//! Comment removal for code excerpts.

use std::sync::LazyLock;

use regex::Regex;

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Remove C-style comments from a code block.
///
/// `/* ... */` comments are removed first (non-greedy, across lines). Each
/// remaining line is then cut at the first `//` and right-trimmed. Lines that
/// end up empty, including lines that were blank to begin with, are dropped.
/// Every kept line is terminated by `\n`.
///
/// Comment markers inside string literals are not recognized as such.
///
/// # Example
///
/// ```
/// use bw_extract::strip_comments;
///
/// let code = "/* Create */\nint x = 1; // one\n\n// done\nx++;\n";
/// assert_eq!(strip_comments(code), "int x = 1;\nx++;\n");
/// ```
#[must_use]
pub fn strip_comments(code: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(code, "");
    let mut out = String::with_capacity(without_blocks.len());
    for line in without_blocks.split('\n') {
        let code_part = line.find("//").map_or(line, |idx| &line[..idx]);
        let trimmed = code_part.trim_end();
        if !trimmed.is_empty() {
            out.push_str(trimmed);
            out.push('\n');
        }
    }
    out
}
