//! Manifest command implementation

use anyhow::Result;
use rp_core::manifest::reconcile;

use crate::cli::ManifestArgs;
use crate::commands::common::{load_tree, resolve_deploy_root, ExitCode, EXIT_REVIEW};

/// Execute the manifest command
pub async fn execute(args: &ManifestArgs) -> Result<()> {
    let tree = load_tree(&args.root)?;
    let deploy_root = resolve_deploy_root(&tree, args.deploy_root.as_deref())?;

    let outcome = reconcile(&tree, &deploy_root)?;
    if let Some(relocation) = &outcome.relocated {
        println!(
            "MOVED|{} -> {} (original kept as {})",
            relocation.from.display(),
            relocation.to.display(),
            relocation.backup.display()
        );
    }
    println!("{}", outcome.status);

    if !outcome.status.is_ok() {
        return Err(ExitCode(EXIT_REVIEW).into());
    }
    Ok(())
}
