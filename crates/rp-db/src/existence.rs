//! Database existence check
//!
//! Every database named in an object-database index must exist in the
//! warehouse before deployment. Missing databases are reported; a catalog
//! that answers ambiguously is treated as broken and aborts the check.

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use rp_sql::ObjectDatabaseIndex;
use std::fmt;

/// Outcome of checking every database in an index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistenceReport {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

impl ExistenceReport {
    pub fn all_exist(&self) -> bool {
        self.missing.is_empty()
    }
}

impl fmt::Display for ExistenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_exist() {
            return write!(f, "All dbs exist.");
        }
        for (i, db) in self.missing.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "WARNING: db does not exist: {}", db)?;
        }
        Ok(())
    }
}

/// Look up every distinct database in `index`, in sorted order.
pub async fn check_databases(
    db: &dyn Database,
    index: &ObjectDatabaseIndex,
) -> DbResult<ExistenceReport> {
    let mut report = ExistenceReport::default();

    for name in index.databases() {
        let matches = db.find_databases(&name).await?;
        match matches.as_slice() {
            [] => {
                log::warn!("Database does not exist: {}", name);
                report.missing.push(name);
            }
            [found] if found.eq_ignore_ascii_case(&name) => {
                log::debug!("Database exists: {}", name);
                report.found.push(name);
            }
            [found] => {
                return Err(DbError::UnexpectedDatabase {
                    requested: name,
                    found: found.clone(),
                })
            }
            _ => {
                return Err(DbError::AmbiguousDatabase {
                    name,
                    matches: matches.clone(),
                })
            }
        }
    }

    log::debug!(
        "Checked {} databases on {}: {} missing",
        report.found.len() + report.missing.len(),
        db.db_type(),
        report.missing.len()
    );
    Ok(report)
}

#[cfg(test)]
#[path = "existence_test.rs"]
mod tests;
