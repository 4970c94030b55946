//! Non-fatal findings reported while scanning source files

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// How serious a scan finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Statement recognised but not fully readable; worth investigating
    Issue,
    /// Statement recognised but its name could not be indexed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Issue => write!(f, "ISSUE"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A line that was skipped, with enough context to find and fix it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub file: PathBuf,

    /// 1-based line number
    pub line: usize,

    /// The offending line's live text
    pub text: String,

    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} in {}:{}: {}",
            self.severity,
            self.message,
            self.file.display(),
            self.line,
            self.text
        )
    }
}
