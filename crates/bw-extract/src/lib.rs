//! Source fragment extraction for bookweave.
//!
//! Pulls code excerpts out of unrelated source files without parsing them.
//! Two delimiting strategies are supported:
//!
//! - [`extract_marked`]: everything between a pair of identical marker comments
//!   (`// begin-example` ... `// begin-example`)
//! - [`extract_structural`]: one brace-delimited construct starting at the line
//!   that contains an anchor substring
//!
//! Both return a [`Fragment`] carrying the 0-based line of the first extracted
//! physical line in the untouched file, which callers turn into `#L{n+1}` deep
//! links.
//!
//! The text helpers used along the way are exported too:
//! - [`normalize_indent`], [`interior_lines`], [`dedent`]: indentation handling
//! - [`strip_comments`]: drops `/* */` and `//` comments
//! - [`locate_line`]: first line matching a single-line pattern
//!
//! # Example
//!
//! ```
//! use bw_extract::extract_marked;
//!
//! let source = "class A {\n    // snippet\n    run();\n    // snippet\n}\n";
//! let fragment = extract_marked(source, "snippet").unwrap();
//! assert_eq!(fragment.text, "run();\n");
//! assert_eq!(fragment.start_line, 1);
//! ```

mod comments;
mod error;
mod indent;
mod locate;
mod marker;
mod structural;

pub use comments::strip_comments;
pub use error::ExtractError;
pub use indent::{TAB_WIDTH, dedent, interior_lines, normalize_indent};
pub use locate::locate_line;
pub use marker::{extract_marked, marker_pattern};
pub use structural::extract_structural;

/// A block of text extracted from an origin file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Extracted text, each line terminated by `\n`.
    pub text: String,
    /// 0-based index of the first extracted line in the origin file.
    pub start_line: usize,
}
