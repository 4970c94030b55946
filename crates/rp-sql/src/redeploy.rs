//! Redeploy initialisation template
//!
//! Releases that are deployed more than once need their control-table rows
//! cleared first. The template is appended to the release's redeploy script
//! commented out, for the tester to adapt, and only once per script.

use crate::error::{read_sql, SqlResult};
use chrono::NaiveDate;
use rp_core::fs_utils::write_atomic;
use std::path::Path;

/// Marks a script that already carries the template
pub const REDEPLOY_SENTINEL: &str = "-- relprep: redeploy init template";

/// The commented-out control-table cleanup for `environment` on `today`.
pub fn redeploy_statements(environment: &str, today: NaiveDate) -> Vec<String> {
    let date = today.format("%Y-%m-%d");
    let gcfr = format!("DW{}T_GCFR", environment);
    vec![
        REDEPLOY_SENTINEL.to_string(),
        "/*".to_string(),
        format!("DELETE FROM {gcfr}.GCFR_SSIS_File WHERE Ctl_Id = 123 AND File_Id IN (1,2,3);"),
        format!("DELETE FROM {gcfr}.SSIS_File_Config WHERE TableType LIKE 'SOMETHING%';"),
        format!(
            "DELETE FROM {gcfr}.GCFR_System_File_Extract WHERE Ctl_Id = 123 AND File_Id IN (1,2,3) \
             AND Business_Date IN (DATE '{date}', DATE '{date}');"
        ),
        "*/".to_string(),
    ]
}

/// Append the template to the script at `path` unless it is already there.
///
/// The script is created if missing. Returns whether anything was written.
pub fn append_redeploy_template(path: &Path, environment: &str, today: NaiveDate) -> SqlResult<bool> {
    let existing = if path.exists() {
        read_sql(path)?
    } else {
        String::new()
    };

    if existing.lines().any(|l| l.trim() == REDEPLOY_SENTINEL) {
        log::debug!("Redeploy template already present in {}", path.display());
        return Ok(false);
    }

    let mut contents = existing;
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    for line in redeploy_statements(environment, today) {
        contents.push_str(&line);
        contents.push('\n');
    }
    write_atomic(path, contents.as_bytes())?;
    log::info!("Appended redeploy template to {}", path.display());
    Ok(true)
}
