//! Post-load data checks
//!
//! Each object deployed to several databases is compared row by row. The
//! catalog supplies the columns every copy shares and a set of key values
//! present in every copy; one comparison query is emitted per key value.

use crate::error::DbResult;
use crate::traits::Database;
use rp_sql::queries::{common_columns, data_check_query, AUDIT_COLUMNS};
use rp_sql::ObjectDatabaseIndex;

/// Distinct key values read from each copy
pub const KEY_SAMPLE_ROWS: usize = 50_000;

/// Key values compared per object
pub const MAX_KEYS_PER_OBJECT: usize = 20;

/// Data-check queries and the objects that could not be checked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataCheckScript {
    pub queries: Vec<String>,
    pub skipped: Vec<String>,
}

impl DataCheckScript {
    /// Queries separated by blank lines
    pub fn render(&self) -> String {
        self.queries.iter().map(|q| format!("{}\n\n", q)).collect()
    }
}

/// Build data-check queries for every object in `index`, in index order.
///
/// An object is skipped when a copy is missing from the catalog, the copies
/// share no comparable column, or no key value is present in every copy.
pub async fn build_data_checks(
    db: &dyn Database,
    index: &ObjectDatabaseIndex,
) -> DbResult<DataCheckScript> {
    let mut script = DataCheckScript::default();

    for entry in index.iter() {
        let mut copies = Vec::with_capacity(entry.databases.len());
        for database in &entry.databases {
            let columns: Vec<String> = db
                .column_names(database, &entry.object)
                .await?
                .into_iter()
                .filter(|c| !AUDIT_COLUMNS.iter().any(|a| a.eq_ignore_ascii_case(c)))
                .collect();
            if columns.is_empty() {
                log::warn!("{}.{} has no comparable columns", database, entry.object);
            }
            copies.push(columns);
        }
        if copies.iter().any(|c| c.is_empty()) {
            script.skipped.push(entry.object.clone());
            continue;
        }

        let columns = common_columns(&copies);
        let Some(key_column) = columns.first() else {
            log::warn!("Copies of {} share no column", entry.object);
            script.skipped.push(entry.object.clone());
            continue;
        };

        let keys = shared_keys(db, &entry.databases, &entry.object, key_column).await?;
        if keys.is_empty() {
            log::warn!("No {} value of {} is present in every copy", key_column, entry.object);
            script.skipped.push(entry.object.clone());
            continue;
        }

        log::debug!("{}: {} keys on {}", entry.object, keys.len(), key_column);
        script.queries.extend(keys.iter().filter_map(|key| {
            data_check_query(
                &entry.object,
                &entry.databases,
                &columns,
                key_column,
                key.as_deref(),
            )
        }));
    }

    Ok(script)
}

/// Key values of the first copy that every other copy also holds, in the
/// first copy's order.
async fn shared_keys(
    db: &dyn Database,
    databases: &[String],
    object: &str,
    key_column: &str,
) -> DbResult<Vec<Option<String>>> {
    let mut samples = Vec::with_capacity(databases.len());
    for database in databases {
        samples.push(
            db.sample_values(database, object, key_column, KEY_SAMPLE_ROWS)
                .await?,
        );
    }
    let Some((first, rest)) = samples.split_first() else {
        return Ok(Vec::new());
    };

    Ok(first
        .iter()
        .filter(|value| rest.iter().all(|other| other.contains(*value)))
        .take(MAX_KEYS_PER_OBJECT)
        .cloned()
        .collect())
}

#[cfg(test)]
#[path = "data_checks_test.rs"]
mod tests;
