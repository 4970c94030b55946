//! relprep CLI - release preparation for Teradata deployments

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::common::ExitCode;
use commands::{check_dbs, index, manifest, objects, prepare, queries, synopsis};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if let Err(err) = run(&cli).await {
        let code = match err.downcast_ref::<ExitCode>() {
            Some(ec) => ec.0,
            None => {
                eprintln!("Error: {:#}", err);
                1
            }
        };
        std::process::exit(code);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        cli::Commands::Index(args) => index::execute(args).await,
        cli::Commands::Synopsis(args) => synopsis::execute(args).await,
        cli::Commands::Objects(args) => objects::execute(args).await,
        cli::Commands::Manifest(args) => manifest::execute(args).await,
        cli::Commands::CheckDbs(args) => check_dbs::execute(args).await,
        cli::Commands::Queries(args) => queries::execute(args).await,
        cli::Commands::Prepare(args) => prepare::execute(args, &cli.global).await,
    }
}

/// `--verbose` shows debug output; otherwise only warnings. `RUST_LOG` wins.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
