//! Qualified-name handling for extracted objects

use regex::{NoExpand, Regex};
use std::sync::OnceLock;

/// Placeholder standing in for the target environment in database names
pub const ENV_PLACEHOLDER: &str = "$$ENV$$";

/// Name suffixes of staging copies that are never indexed
pub const STAGING_SUFFIXES: &[&str] = &["_N", "_O"];

/// Qualifiers that may follow a table name in Teradata DDL
const TABLE_QUALIFIERS: &[&str] = &["NO", "FALLBACK"];

/// Read the defined name from the text following a `CREATE`/`REPLACE` keyword.
///
/// Quotes and commas are dropped, `FALLBACK`/`NO FALLBACK` qualifiers are
/// skipped, and anything from an `AS` clause on is ignored. Returns the first
/// remaining word, cut at `(` or `;`, or an empty string if there is none.
pub fn defined_name(rest: &str) -> String {
    let cleaned = rest.replace('"', "").replace(',', " ");
    cleaned
        .split_whitespace()
        .take_while(|word| !word.eq_ignore_ascii_case("AS"))
        .find(|word| {
            !TABLE_QUALIFIERS
                .iter()
                .any(|q| word.eq_ignore_ascii_case(q))
        })
        .map(|word| {
            word.split(['(', ';'])
                .next()
                .unwrap_or_default()
                .to_string()
        })
        .unwrap_or_default()
}

/// Read the new name from the text following `RENAME VIEW`.
///
/// The name sits between the `TO` keyword and the terminating `;`.
pub fn rename_target(rest: &str) -> Option<String> {
    static RENAME_TARGET: OnceLock<Regex> = OnceLock::new();
    let re = RENAME_TARGET
        .get_or_init(|| Regex::new(r"(?i)\bTO\s+([^;]+?)\s*;").expect("valid regex literal"));
    re.captures(rest)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().replace('"', "").trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Whether a name denotes a staging copy (`..._N`, `..._O`).
pub fn is_staging_object(name: &str) -> bool {
    STAGING_SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// Split `database.object`. Exactly one `.` is accepted.
pub fn split_database_object(name: &str) -> Option<(&str, &str)> {
    let (database, object) = name.split_once('.')?;
    if database.is_empty() || object.is_empty() || object.contains('.') {
        return None;
    }
    Some((database, object))
}

/// Replace the environment placeholder (any case) in a database name.
pub fn substitute_environment(database: &str, environment: &str) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER.get_or_init(|| {
        Regex::new(&format!("(?i){}", regex::escape(ENV_PLACEHOLDER))).expect("valid regex literal")
    });
    re.replace_all(database, NoExpand(environment)).into_owned()
}

#[cfg(test)]
#[path = "names_test.rs"]
mod tests;
