//! Line scanner shared by the classifier and the extractor
//!
//! A [`ParseCursor`] walks one file a line at a time and hands back only the
//! live SQL on each line: whole-line `--` comments are dropped, trailing `--`
//! comments are cut off, and `/* ... */` blocks are skipped even when they span
//! lines. Text following a block closer on the same line is live again.

/// Single-line comment marker
pub const LINE_COMMENT: &str = "--";

/// Block comment opener
pub const BLOCK_OPEN: &str = "/*";

/// Block comment closer
pub const BLOCK_CLOSE: &str = "*/";

/// Statement terminator
pub const TERMINATOR: char = ';';

/// Whether the line holds nothing but a `--` comment
pub fn is_line_comment(line: &str) -> bool {
    line.trim_start().starts_with(LINE_COMMENT)
}

/// Collapse runs of spaces into a single space.
pub fn collapse_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut previous_space = false;
    for c in line.chars() {
        if c == ' ' {
            if previous_space {
                continue;
            }
            previous_space = true;
        } else {
            previous_space = false;
        }
        out.push(c);
    }
    out
}

/// Count statement terminators in `text`.
///
/// Lines starting with `--` or `/*` do not contribute.
pub fn count_terminators(text: &str) -> usize {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.starts_with(LINE_COMMENT) && !l.starts_with(BLOCK_OPEN))
        .map(|l| l.matches(TERMINATOR).count())
        .sum()
}

/// Whether the cursor is inside a block comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Live,
    InBlockComment,
}

/// Per-file scan state
#[derive(Debug, Clone, Default)]
pub struct ParseCursor {
    state: ScanState,
    line_number: usize,
    terminators: usize,
}

impl ParseCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a scan of `text`, counting its statement terminators up front.
    pub fn for_text(text: &str) -> Self {
        Self {
            terminators: count_terminators(text),
            ..Self::default()
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// 1-based number of the line most recently passed to [`advance`](Self::advance)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Statement terminators counted by [`for_text`](Self::for_text)
    pub fn terminators(&self) -> usize {
        self.terminators
    }

    /// Consume one raw line and return its live text, trimmed and with space
    /// runs collapsed. Returns `None` when nothing on the line is live.
    pub fn advance(&mut self, line: &str) -> Option<String> {
        self.line_number += 1;
        let line = collapse_spaces(line);
        let mut rest = line.trim();

        if self.state == ScanState::Live && rest.starts_with(LINE_COMMENT) {
            return None;
        }

        let mut live = String::new();
        while !rest.is_empty() {
            match self.state {
                ScanState::InBlockComment => match rest.find(BLOCK_CLOSE) {
                    Some(pos) => {
                        rest = &rest[pos + BLOCK_CLOSE.len()..];
                        self.state = ScanState::Live;
                    }
                    None => rest = "",
                },
                ScanState::Live => {
                    let block = rest.find(BLOCK_OPEN);
                    let comment = rest.find(LINE_COMMENT);
                    match (block, comment) {
                        (Some(b), Some(c)) if c < b => {
                            push_segment(&mut live, &rest[..c]);
                            rest = "";
                        }
                        (None, Some(c)) => {
                            push_segment(&mut live, &rest[..c]);
                            rest = "";
                        }
                        (Some(b), _) => {
                            push_segment(&mut live, &rest[..b]);
                            rest = &rest[b + BLOCK_OPEN.len()..];
                            self.state = ScanState::InBlockComment;
                        }
                        (None, None) => {
                            push_segment(&mut live, rest);
                            rest = "";
                        }
                    }
                }
            }
        }

        if live.is_empty() {
            None
        } else {
            Some(live)
        }
    }
}

fn push_segment(live: &mut String, segment: &str) {
    let segment = segment.trim();
    if segment.is_empty() {
        return;
    }
    if !live.is_empty() {
        live.push(' ');
    }
    live.push_str(segment);
}

#[cfg(test)]
#[path = "cursor_test.rs"]
mod tests;
