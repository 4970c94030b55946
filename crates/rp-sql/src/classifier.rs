//! Statement classification and synopsis listing
//!
//! Each file is summarised by its first meaningful statement: the first live
//! line containing a classifier keyword, in keyword priority order. The
//! synopsis lines up those summaries in a column next to each file's path.

use crate::cursor::ParseCursor;
use crate::error::{read_sql, SqlResult};
use crate::keywords::{match_keyword, Keyword};
use rp_core::fs_utils::write_atomic;
use rp_core::SourceFile;
use serde::Serialize;
use std::path::Path;

/// Width DML and statistics summaries are cut to
pub const MAX_DISPLAY_WIDTH: usize = 50;

/// Summary of a zero-byte file
pub const EMPTY_FILE_MARKER: &str = "(empty file)";

/// Summary of a file in which no keyword matched
pub const UNCLASSIFIED_MARKER: &str = "(no statement found)";

/// The outcome of classifying one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Classification {
    /// Zero-byte file
    Empty,

    /// No live line contained a classifier keyword
    Unclassified { statements: usize },

    /// First matching statement
    Statement {
        keyword: Keyword,

        /// Live line text, truncated for DML
        text: String,

        /// Statement terminators counted in the file
        statements: usize,
    },
}

impl Classification {
    /// Synopsis text, including the `(+N more)` suffix for multi-statement files
    pub fn display(&self) -> String {
        match self {
            Classification::Empty => EMPTY_FILE_MARKER.to_string(),
            Classification::Unclassified { .. } => UNCLASSIFIED_MARKER.to_string(),
            Classification::Statement {
                text, statements, ..
            } => {
                if *statements > 1 {
                    format!("{} (+{} more)", text, statements - 1)
                } else {
                    text.clone()
                }
            }
        }
    }
}

/// Classify SQL text.
pub fn classify_text(text: &str) -> Classification {
    let mut cursor = ParseCursor::for_text(text);
    let statements = cursor.terminators();

    for line in text.lines() {
        let Some(live) = cursor.advance(line) else {
            continue;
        };
        if let Some(keyword) = match_keyword(&live.to_uppercase()) {
            let text = if keyword.category.truncates() {
                truncate(&live, MAX_DISPLAY_WIDTH)
            } else {
                live
            };
            return Classification::Statement {
                keyword: *keyword,
                text,
                statements,
            };
        }
    }

    Classification::Unclassified { statements }
}

/// Classify a file on disk. Zero-byte files are not read.
pub fn classify_file(file: &SourceFile) -> SqlResult<Classification> {
    if file.is_empty() {
        return Ok(Classification::Empty);
    }
    Ok(classify_text(&read_sql(file.path())?))
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect::<String>().trim().to_string()
}

/// One synopsis line before alignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynopsisEntry {
    pub text: String,
    pub file: SourceFile,
}

/// Classified summaries of a batch of files, in input order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Synopsis {
    entries: Vec<SynopsisEntry>,
}

impl Synopsis {
    /// Classify every file. Exactly one entry per input file, order preserved.
    pub fn build(files: &[SourceFile]) -> SqlResult<Self> {
        let entries = files
            .iter()
            .map(|file| {
                Ok(SynopsisEntry {
                    text: classify_file(file)?.display(),
                    file: file.clone(),
                })
            })
            .collect::<SqlResult<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[SynopsisEntry] {
        &self.entries
    }

    /// Render the aligned listing.
    ///
    /// Summaries are padded to the longest summary plus one space, followed by
    /// the file path with `strip_prefix` removed.
    pub fn render(&self, strip_prefix: &Path) -> String {
        let width = self
            .entries
            .iter()
            .map(|e| e.text.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for entry in &self.entries {
            let path = entry
                .file
                .path()
                .strip_prefix(strip_prefix)
                .unwrap_or(entry.file.path());
            out.push_str(&format!("{:<width$} {}\n", entry.text, path.display()));
        }
        out
    }

    /// Write the rendered listing atomically to `path`.
    pub fn write_to(&self, path: &Path, strip_prefix: &Path) -> SqlResult<()> {
        write_atomic(path, self.render(strip_prefix).as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
