//! Prepare command implementation
//!
//! Runs every preparation step for each checked-out location of a release:
//! manifest reconciliation, synopsis, redeploy template and row-count queries.
//! Checking out is left to the caller; locations not on disk are skipped.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rp_core::fs_utils::write_atomic;
use rp_core::manifest::reconcile;
use rp_core::{ReleaseConfig, SvnLocation};
use rp_sql::queries::row_count_script;
use rp_sql::redeploy::append_redeploy_template;
use rp_sql::{extract_objects, Synopsis};
use std::path::PathBuf;

use crate::cli::{GlobalArgs, PrepareArgs};
use crate::commands::common::{load_release, load_tree, resolve_deploy_root, ExitCode, EXIT_REVIEW};

/// Folder under the work folder that receives generated test scripts
const TEST_SCRIPTS_DIR: &str = "Test Scripts";

/// Output files for one location
struct PrepareOutputs {
    synopsis: PathBuf,
    redeploy: PathBuf,
    row_counts: PathBuf,
}

impl PrepareOutputs {
    fn new(release: &ReleaseConfig, location: &SvnLocation) -> Self {
        let prefix = format!("{}_", release.id);
        let suffix = location.suffix();
        let work = &release.work_folder;
        Self {
            synopsis: work.join(format!("{prefix}synopsis{suffix}.txt")),
            redeploy: work.join(format!("{prefix}redeploy_init{suffix}.sql")),
            row_counts: work
                .join(TEST_SCRIPTS_DIR)
                .join(format!("{prefix}row_counts{suffix}.sql")),
        }
    }
}

/// Execute the prepare command
pub async fn execute(args: &PrepareArgs, global: &GlobalArgs) -> Result<()> {
    let release = load_release(global, &args.release)?;
    let today = Local::now().date_naive();

    println!("Preparing {}: {}", release.id, release.summary);

    let mut prepared = 0;
    let mut needs_review = false;
    for location in &release.svn_locations {
        let checkout = release.checkout_dir(location);
        if !checkout.is_dir() {
            log::warn!("{} is not checked out at {}", location.url, checkout.display());
            println!("SKIPPED|{} (not checked out)", checkout.display());
            continue;
        }

        let ok = prepare_location(&release, location, today)
            .with_context(|| format!("Failed to prepare {}", checkout.display()))?;
        needs_review |= !ok;
        prepared += 1;
    }

    if prepared == 0 {
        anyhow::bail!(
            "No checked-out locations found for {} under {}",
            release.id,
            release.work_folder.display()
        );
    }
    if needs_review {
        return Err(ExitCode(EXIT_REVIEW).into());
    }
    Ok(())
}

/// Prepare one checked-out location. Returns false when the manifest needs review.
fn prepare_location(
    release: &ReleaseConfig,
    location: &SvnLocation,
    today: NaiveDate,
) -> Result<bool> {
    let checkout = release.checkout_dir(location);
    let outputs = PrepareOutputs::new(release, location);

    let tree = load_tree(&checkout)?;
    let deploy_root = resolve_deploy_root(&tree, None)?;

    let outcome = reconcile(&tree, &deploy_root)?;
    if let Some(relocation) = &outcome.relocated {
        println!(
            "MOVED|{} -> {}",
            relocation.from.display(),
            relocation.to.display()
        );
    }
    println!("{}", outcome.status);

    let files = tree.deployable_files_under(deploy_root.path());
    let synopsis = Synopsis::build(&files)?;
    synopsis.write_to(&outputs.synopsis, &checkout)?;
    println!("Synopsis           : {}", outputs.synopsis.display());

    if append_redeploy_template(&outputs.redeploy, &release.environment, today)? {
        println!("Redeploy template  : {}", outputs.redeploy.display());
    }

    let extraction = extract_objects(&tree.files, &release.environment)?;
    if let Some(dir) = outputs.row_counts.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    write_atomic(&outputs.row_counts, row_count_script(&extraction.index).as_bytes())?;
    println!("Row count queries  : {}", outputs.row_counts.display());

    Ok(outcome.status.is_ok())
}
