//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// relprep - index, summarise and validate a checked-out Teradata release
#[derive(Parser, Debug)]
#[command(name = "rp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override config file path (default: relprep.yml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the directories and files of a checked-out tree
    Index(IndexArgs),

    /// Summarise each deployable SQL/DDL file by its first statement
    Synopsis(SynopsisArgs),

    /// List every table/view and the databases that define it
    Objects(ObjectsArgs),

    /// Create or validate the deployment manifest
    Manifest(ManifestArgs),

    /// Check that every referenced database exists
    CheckDbs(CheckDbsArgs),

    /// Generate consistency queries: row counts, database existence or data checks
    Queries(QueriesArgs),

    /// Run the full preparation flow for a configured release
    Prepare(PrepareArgs),
}

/// Output formats for listing commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

/// Query scripts the queries command can generate
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Row count of every copy of each object
    RowCounts,
    /// One lookup per referenced database
    Existence,
    /// Row comparisons across copies, keyed from a catalog
    DataChecks,
}

/// Arguments for the index command
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Root of the checked-out tree
    pub root: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the synopsis command
#[derive(Args, Debug)]
pub struct SynopsisArgs {
    /// Root of the checked-out tree
    pub root: PathBuf,

    /// Deployable subtree, when it cannot be located by name
    #[arg(short, long)]
    pub deploy_root: Option<PathBuf>,

    /// Write the synopsis to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the objects command
#[derive(Args, Debug)]
pub struct ObjectsArgs {
    /// Root of the checked-out tree
    pub root: PathBuf,

    /// Environment token substituted for $$ENV$$ in database names
    #[arg(short, long)]
    pub environment: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the manifest command
#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Root of the checked-out tree
    pub root: PathBuf,

    /// Deployable subtree, when it cannot be located by name
    #[arg(short, long)]
    pub deploy_root: Option<PathBuf>,
}

/// Arguments for the check-dbs command
#[derive(Args, Debug)]
pub struct CheckDbsArgs {
    /// Root of the checked-out tree
    pub root: PathBuf,

    /// Environment token substituted for $$ENV$$ in database names
    #[arg(short, long)]
    pub environment: String,

    /// DuckDB catalog file to check against (:memory: for an empty one)
    #[arg(long)]
    pub database: String,
}

/// Arguments for the queries command
#[derive(Args, Debug)]
pub struct QueriesArgs {
    /// Root of the checked-out tree
    pub root: PathBuf,

    /// Environment token substituted for $$ENV$$ in database names
    #[arg(short, long)]
    pub environment: String,

    /// Which queries to generate
    #[arg(short, long, value_enum, default_value = "row-counts")]
    pub kind: QueryKind,

    /// DuckDB catalog that supplies columns and key values for data checks
    #[arg(long, required_if_eq("kind", "data-checks"))]
    pub database: Option<String>,

    /// Write the queries to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the prepare command
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Release id, as named in the config file
    pub release: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
