//! Index command implementation

use anyhow::Result;

use crate::cli::{IndexArgs, OutputFormat};
use crate::commands::common::load_tree;

/// Execute the index command
pub async fn execute(args: &IndexArgs) -> Result<()> {
    let tree = load_tree(&args.root)?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
        OutputFormat::Text => {
            println!("Directories ({}):", tree.dirs.len());
            for dir in &tree.dirs {
                println!("  {}", display_relative(dir, &tree.root));
            }
            println!();
            println!("Files ({}):", tree.files.len());
            for file in &tree.files {
                println!(
                    "  {:>10}  {}",
                    file.size(),
                    display_relative(file.path(), &tree.root)
                );
            }
        }
    }

    Ok(())
}

fn display_relative(path: &std::path::Path, root: &std::path::Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => path.display().to_string(),
    }
}
