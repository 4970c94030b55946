//! Objects command implementation

use anyhow::{Context, Result};
use rp_sql::extract_objects;

use crate::cli::{ObjectsArgs, OutputFormat};
use crate::commands::common::load_tree;

/// Execute the objects command
pub async fn execute(args: &ObjectsArgs) -> Result<()> {
    let tree = load_tree(&args.root)?;
    let extraction =
        extract_objects(&tree.files, &args.environment).context("Failed to extract objects")?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&extraction)?),
        OutputFormat::Text => {
            let width = extraction
                .index
                .iter()
                .map(|e| e.object.chars().count())
                .max()
                .unwrap_or(0);
            for entry in extraction.index.iter() {
                println!("{:<width$}  {}", entry.object, entry.databases.join(", "));
            }
            println!();
            println!(
                "{} objects, {} databases, {} skipped lines",
                extraction.index.len(),
                extraction.index.databases().len(),
                extraction.diagnostics.len()
            );
        }
    }

    Ok(())
}
