//! Object-database extraction
//!
//! Scans deployable files for schema-defining statements and records, for
//! every table or view name, each database that will host a copy of it.
//! Lines that cannot be read are reported as diagnostics and skipped.

use crate::cursor::ParseCursor;
use crate::diagnostic::{Diagnostic, Severity};
use crate::error::{read_sql, SqlResult};
use crate::keywords::{match_object_keyword, ObjectStatement};
use crate::names::{
    defined_name, is_staging_object, rename_target, split_database_object, substitute_environment,
};
use rp_core::manifest::MANIFEST_TEMP_NAME;
use rp_core::SourceFile;
use serde::Serialize;
use std::collections::HashMap;

/// An object name and the databases it is defined in, in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectEntry {
    pub object: String,
    pub databases: Vec<String>,
}

/// Object name to owning databases.
///
/// Object names and database names are compared case-insensitively. Object
/// names are stored upper-cased and database names in the case they were
/// first seen. Objects iterate in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ObjectDatabaseIndex {
    entries: Vec<ObjectEntry>,
    positions: HashMap<String, usize>,
}

impl ObjectDatabaseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `object` lives in `database`. Returns false if the pair
    /// was already known.
    pub fn insert(&mut self, object: &str, database: &str) -> bool {
        let key = object.to_uppercase();
        let idx = match self.positions.get(&key) {
            Some(&idx) => idx,
            None => {
                self.entries.push(ObjectEntry {
                    object: key.clone(),
                    databases: Vec::new(),
                });
                self.positions.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        let databases = &mut self.entries[idx].databases;
        if databases.iter().any(|d| d.eq_ignore_ascii_case(database)) {
            return false;
        }
        databases.push(database.to_string());
        true
    }

    /// Databases hosting `object`, if it is known
    pub fn get(&self, object: &str) -> Option<&[String]> {
        self.positions
            .get(&object.to_uppercase())
            .map(|&idx| self.entries[idx].databases.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every distinct database across all objects, sorted case-insensitively.
    pub fn databases(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for db in self.entries.iter().flat_map(|e| e.databases.iter()) {
            if !seen.iter().any(|s| s.eq_ignore_ascii_case(db)) {
                seen.push(db.clone());
            }
        }
        seen.sort_by_key(|s| s.to_uppercase());
        seen
    }
}

impl Serialize for ObjectDatabaseIndex {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

/// The index built from a batch of files, plus everything that was skipped
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
    pub index: ObjectDatabaseIndex,
    pub diagnostics: Vec<Diagnostic>,
}

/// What a single live line contributes
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineMatch {
    /// No object keyword on the line
    None,
    /// `database.object`, environment already substituted
    Defines { database: String, object: String },
    /// Staging copy, never indexed
    Staging,
    /// Keyword found but the name could not be read
    Unreadable(Severity, &'static str),
}

fn scan_line(live: &str, environment: &str) -> LineMatch {
    // ASCII upper-casing keeps byte offsets aligned with `live`
    let upper = live.to_ascii_uppercase();
    let Some((statement, rest_upper)) = match_object_keyword(&upper) else {
        return LineMatch::None;
    };
    let rest = &live[live.len() - rest_upper.len()..];

    let name = match statement {
        ObjectStatement::Rename => match rename_target(rest) {
            Some(name) => name,
            None => {
                return LineMatch::Unreadable(Severity::Issue, "cannot read RENAME VIEW target")
            }
        },
        ObjectStatement::Define => {
            let name = defined_name(rest);
            if is_staging_object(&name.to_ascii_uppercase()) {
                return LineMatch::Staging;
            }
            name
        }
    };

    match split_database_object(&name) {
        Some((database, object)) => LineMatch::Defines {
            database: substitute_environment(database, environment),
            object: object.to_string(),
        },
        None => LineMatch::Unreadable(Severity::Error, "cannot read database.object"),
    }
}

fn is_eligible(file: &SourceFile) -> bool {
    file.is_deployable() && !file.is_empty() && !file.has_name(MANIFEST_TEMP_NAME)
}

/// Build the object-database index for `files`.
///
/// Only non-empty `.sql`/`.ddl` files are read. Each line contributes at most
/// one name, taken from the first object keyword it contains.
pub fn extract_objects(files: &[SourceFile], environment: &str) -> SqlResult<Extraction> {
    let mut extraction = Extraction::default();

    for file in files.iter().filter(|f| is_eligible(f)) {
        let text = read_sql(file.path())?;
        let mut cursor = ParseCursor::new();

        for line in text.lines() {
            let Some(live) = cursor.advance(line) else {
                continue;
            };
            match scan_line(&live, environment) {
                LineMatch::None => {}
                LineMatch::Staging => {
                    log::debug!("Skipping staging object in {}: {}", file.path().display(), live);
                }
                LineMatch::Defines { database, object } => {
                    if extraction.index.insert(&object, &database) {
                        log::debug!("{} -> {}", object, database);
                    }
                }
                LineMatch::Unreadable(severity, message) => {
                    let diagnostic = Diagnostic {
                        severity,
                        file: file.path().to_path_buf(),
                        line: cursor.line_number(),
                        text: live,
                        message: message.to_string(),
                    };
                    match severity {
                        Severity::Issue => log::warn!("{}", diagnostic),
                        Severity::Error => log::error!("{}", diagnostic),
                    }
                    extraction.diagnostics.push(diagnostic);
                }
            }
        }
    }

    log::debug!(
        "Extracted {} objects across {} databases",
        extraction.index.len(),
        extraction.index.databases().len()
    );
    Ok(extraction)
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod tests;
