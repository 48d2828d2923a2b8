//! Extraction of one brace-delimited construct.
//!
//! Starting at the line that contains an anchor, lines are collected until the
//! brace nesting opened after the anchor returns to zero. There is no parsing:
//! braces inside string literals, character literals and comments are counted
//! like any other. This is a deliberate approximation that holds for the
//! example sources it is used on.

use crate::{ExtractError, Fragment};

/// Scanner position within the origin file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    /// Looking for the first line containing the anchor.
    BeforeAnchor,
    /// Inside the block, tracking brace depth.
    Scanning { nesting: usize },
    /// The brace that closes the block has been seen.
    Done,
}

impl ScanState {
    /// Feed a segment of a line through the brace counter.
    ///
    /// A `}` seen at depth 1 closes the block without decrementing; any other
    /// `}` decrements, never below zero.
    fn scan(self, segment: &str) -> Self {
        let Self::Scanning { mut nesting } = self else {
            return self;
        };
        for ch in segment.chars() {
            match ch {
                '{' => nesting += 1,
                '}' if nesting == 1 => return Self::Done,
                '}' => nesting = nesting.saturating_sub(1),
                _ => {}
            }
        }
        Self::Scanning { nesting }
    }
}

/// Extract the construct that starts on the first line containing `anchor`.
///
/// The anchor is a literal substring, not a pattern. The anchor line is
/// included, and brace counting starts where the anchor starts on that line,
/// so both `void run() {` and a `{` on the following line open the block.
/// Collection stops after the line holding the brace that takes the depth
/// from 1 back to 0. Every collected line is right-trimmed and terminated by
/// `\n`; indentation is left as found.
///
/// The returned [`Fragment::start_line`] is the 0-based line of the anchor.
///
/// # Errors
///
/// - [`ExtractError::AnchorNotFound`] if the anchor is empty or absent
/// - [`ExtractError::UnterminatedBlock`] if the text ends inside the block
///
/// # Example
///
/// ```
/// use bw_extract::extract_structural;
///
/// let source = "class A {\n  void run() {\n    go();\n  }\n  void stop() {}\n}\n";
/// let fragment = extract_structural(source, "void run()").unwrap();
/// assert_eq!(fragment.text, "  void run() {\n    go();\n  }\n");
/// assert_eq!(fragment.start_line, 1);
/// ```
pub fn extract_structural(text: &str, anchor: &str) -> Result<Fragment, ExtractError> {
    if anchor.is_empty() {
        return Err(ExtractError::AnchorNotFound(String::new()));
    }

    let mut state = ScanState::BeforeAnchor;
    let mut block = String::new();
    let mut start_line = 0;

    for (idx, line) in text.split('\n').enumerate() {
        let segment = match state {
            ScanState::BeforeAnchor => {
                let Some(offset) = line.find(anchor) else {
                    continue;
                };
                start_line = idx;
                state = ScanState::Scanning { nesting: 0 };
                &line[offset..]
            }
            ScanState::Scanning { .. } => line,
            ScanState::Done => break,
        };

        block.push_str(line.trim_end());
        block.push('\n');
        state = state.scan(segment);
    }

    match state {
        ScanState::Done => Ok(Fragment {
            text: block,
            start_line,
        }),
        ScanState::BeforeAnchor => Err(ExtractError::AnchorNotFound(anchor.to_owned())),
        ScanState::Scanning { .. } => Err(ExtractError::UnterminatedBlock {
            anchor: anchor.to_owned(),
            line: start_line + 1,
        }),
    }
}
