//! rp-sql - SQL/DDL text analysis for relprep
//!
//! Teradata DDL is scanned line by line rather than parsed: a shared
//! [`ParseCursor`] skips comments, and ordered keyword tables decide what each
//! live line defines. On top of that vocabulary sit the statement classifier
//! (synopsis listing), the object-database extractor, and generators for the
//! consistency queries run after deployment.

pub mod classifier;
pub mod cursor;
pub mod diagnostic;
pub mod error;
pub mod extractor;
pub mod keywords;
pub mod names;
pub mod queries;
pub mod redeploy;

pub use classifier::{classify_file, classify_text, Classification, Synopsis, SynopsisEntry};
pub use cursor::{ParseCursor, ScanState};
pub use diagnostic::{Diagnostic, Severity};
pub use error::{SqlError, SqlResult};
pub use extractor::{extract_objects, Extraction, ObjectDatabaseIndex, ObjectEntry};
pub use keywords::{Keyword, StatementCategory, CLASSIFIER_KEYWORDS};
