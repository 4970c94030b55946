//! Queries command implementation

use anyhow::{Context, Result};
use rp_core::fs_utils::write_atomic;
use rp_db::{build_data_checks, DuckDbBackend};
use rp_sql::queries::{existence_script, row_count_script};
use rp_sql::{extract_objects, ObjectDatabaseIndex};

use crate::cli::{QueriesArgs, QueryKind};
use crate::commands::common::load_tree;

/// Execute the queries command
pub async fn execute(args: &QueriesArgs) -> Result<()> {
    let tree = load_tree(&args.root)?;
    let extraction =
        extract_objects(&tree.files, &args.environment).context("Failed to extract objects")?;
    let index = &extraction.index;

    let (script, what) = match args.kind {
        QueryKind::RowCounts => (row_count_script(index), "Row count"),
        QueryKind::Existence => (existence_script(index), "Database existence"),
        QueryKind::DataChecks => (data_check_script(args, index).await?, "Data check"),
    };

    match &args.output {
        Some(path) => {
            write_atomic(path, script.as_bytes())?;
            println!(
                "{} queries for {} objects written to {}",
                what,
                index.len(),
                path.display()
            );
        }
        None => print!("{}", script),
    }

    Ok(())
}

async fn data_check_script(args: &QueriesArgs, index: &ObjectDatabaseIndex) -> Result<String> {
    let Some(database) = &args.database else {
        anyhow::bail!("--database is required for data checks");
    };
    let db = DuckDbBackend::new(database).context("Failed to open catalog database")?;
    let script = build_data_checks(&db, index)
        .await
        .context("Failed to build data checks")?;
    if !script.skipped.is_empty() {
        eprintln!("Not checked: {}", script.skipped.join(", "));
    }
    Ok(script.render())
}
