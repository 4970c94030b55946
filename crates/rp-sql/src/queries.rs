//! Consistency queries run after deployment
//!
//! Every generator here produces Teradata SQL text from an
//! [`ObjectDatabaseIndex`]; nothing is executed.

use crate::extractor::ObjectDatabaseIndex;

/// Longer column names may come back truncated from the dictionary, so they
/// are never compared
pub const MAX_COLUMN_NAME_LEN: usize = 29;

/// Load-audit columns that differ between copies, left out of data checks
pub const AUDIT_COLUMNS: &[&str] = &[
    "start_date",
    "end_date",
    "start_ts",
    "end_ts",
    "record_deleted_flag",
    "ctl_id",
    "process_name",
    "process_id",
    "update_process_name",
    "update_process_id",
];

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Query returning one row if `database` exists.
pub fn database_exists_query(database: &str) -> String {
    format!(
        "SELECT DatabaseName FROM DBC.Databases WHERE DatabaseName = {};",
        quote(database)
    )
}

/// Row counts of every copy of `object`, one `UNION` branch per database.
///
/// Column aliases are given on the first branch only. Returns `None` when
/// there are no databases.
pub fn row_count_query(object: &str, databases: &[String]) -> Option<String> {
    if databases.is_empty() {
        return None;
    }
    let branches: Vec<String> = databases
        .iter()
        .enumerate()
        .map(|(i, db)| {
            let n = i + 1;
            let (num, name, total) = if n == 1 {
                (" #", " name", " total")
            } else {
                ("", "", "")
            };
            format!(
                "SELECT {n}{num}, CAST('{db}.{object}' AS VARCHAR(100)){name}, \
                 CAST(COUNT(*) AS BIGINT){total} FROM {db}.{object}"
            )
        })
        .collect();
    Some(format!("{};", branches.join(" UNION\n")))
}

/// Existence queries for every distinct database in the index, sorted.
pub fn existence_script(index: &ObjectDatabaseIndex) -> String {
    index
        .databases()
        .iter()
        .map(|db| format!("{}\n", database_exists_query(db)))
        .collect()
}

/// Row-count queries for every object in the index, in index order.
pub fn row_count_script(index: &ObjectDatabaseIndex) -> String {
    index
        .iter()
        .filter_map(|entry| row_count_query(&entry.object, &entry.databases))
        .map(|q| format!("{}\n\n", q))
        .collect()
}

/// Columns usable for comparing copies of one object.
///
/// `copies` holds each database copy's column list. A column is kept when it
/// appears in every copy (case-insensitively) and its name is at most
/// [`MAX_COLUMN_NAME_LEN`] characters. First-seen order is preserved.
pub fn common_columns(copies: &[Vec<String>]) -> Vec<String> {
    let Some((first, rest)) = copies.split_first() else {
        return Vec::new();
    };
    let mut kept: Vec<String> = Vec::new();
    for column in first {
        if column.chars().count() > MAX_COLUMN_NAME_LEN
            || kept.iter().any(|k| k.eq_ignore_ascii_case(column))
        {
            continue;
        }
        if rest
            .iter()
            .all(|copy| copy.iter().any(|c| c.eq_ignore_ascii_case(column)))
        {
            kept.push(column.clone());
        }
    }
    kept
}

/// Compare one keyed row across every copy of `object`.
///
/// Each branch selects the qualified name followed by every column cast to
/// `VARCHAR(50)`, filtered on `key_column`. A `None` key matches `NULL`.
pub fn data_check_query(
    object: &str,
    databases: &[String],
    columns: &[String],
    key_column: &str,
    key_value: Option<&str>,
) -> Option<String> {
    if databases.is_empty() {
        return None;
    }
    let filter = match key_value {
        Some(value) => format!("{} = {}", key_column, quote(value)),
        None => format!("{} IS NULL", key_column),
    };
    let branches: Vec<String> = databases
        .iter()
        .map(|db| {
            let mut select = format!("SELECT CAST('{}.{}' AS VARCHAR(50))", db, object);
            for column in columns {
                select.push_str(&format!(", CAST(\"{}\" AS VARCHAR(50))", column));
            }
            format!("{} FROM {}.{} WHERE {}", select, db, object, filter)
        })
        .collect();
    Some(format!("{};", branches.join(" UNION ALL\n")))
}
