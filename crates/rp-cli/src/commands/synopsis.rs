//! Synopsis command implementation

use anyhow::{Context, Result};
use rp_sql::Synopsis;

use crate::cli::SynopsisArgs;
use crate::commands::common::{load_tree, resolve_deploy_root};

/// Execute the synopsis command
pub async fn execute(args: &SynopsisArgs) -> Result<()> {
    let tree = load_tree(&args.root)?;
    let deploy_root = resolve_deploy_root(&tree, args.deploy_root.as_deref())?;
    let files = tree.deployable_files_under(deploy_root.path());

    let synopsis = Synopsis::build(&files).context("Failed to classify SQL files")?;

    match &args.output {
        Some(path) => {
            synopsis.write_to(path, &tree.root)?;
            println!("Synopsis of {} files written to {}", files.len(), path.display());
        }
        None => print!("{}", synopsis.render(&tree.root)),
    }

    Ok(())
}
