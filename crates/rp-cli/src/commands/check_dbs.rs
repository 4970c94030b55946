//! Check-dbs command implementation

use anyhow::{Context, Result};
use rp_db::{check_databases, DuckDbBackend};
use rp_sql::extract_objects;

use crate::cli::CheckDbsArgs;
use crate::commands::common::{load_tree, ExitCode, EXIT_FATAL, EXIT_REVIEW};

/// Execute the check-dbs command
pub async fn execute(args: &CheckDbsArgs) -> Result<()> {
    let tree = load_tree(&args.root)?;
    let extraction =
        extract_objects(&tree.files, &args.environment).context("Failed to extract objects")?;

    let db = DuckDbBackend::new(&args.database).context("Failed to open catalog database")?;
    let report = match check_databases(&db, &extraction.index).await {
        Ok(report) => report,
        Err(e) if e.is_invariant_violation() => {
            eprintln!("Error: {}", e);
            return Err(ExitCode(EXIT_FATAL).into());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", report);
    if !report.all_exist() {
        return Err(ExitCode(EXIT_REVIEW).into());
    }
    Ok(())
}
