use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["rp", "index", "some/root", "-v", "-c", "other.yml"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.config.as_deref(), Some("other.yml"));
    match cli.command {
        Commands::Index(args) => {
            assert_eq!(args.root, PathBuf::from("some/root"));
            assert_eq!(args.output, OutputFormat::Text);
        }
        other => panic!("expected index, got {:?}", other),
    }
}

#[test]
fn test_objects_requires_environment() {
    assert!(Cli::try_parse_from(["rp", "objects", "root"]).is_err());
    let cli = Cli::try_parse_from(["rp", "objects", "root", "-e", "T05", "-o", "json"]).unwrap();
    match cli.command {
        Commands::Objects(args) => {
            assert_eq!(args.environment, "T05");
            assert_eq!(args.output, OutputFormat::Json);
        }
        other => panic!("expected objects, got {:?}", other),
    }
}

#[test]
fn test_check_dbs_subcommand_name() {
    let cli = Cli::try_parse_from([
        "rp", "check-dbs", "root", "-e", "T05", "--database", ":memory:",
    ])
    .unwrap();
    assert!(matches!(cli.command, Commands::CheckDbs(_)));
}

#[test]
fn test_queries_kind_defaults_to_row_counts() {
    let cli = Cli::try_parse_from(["rp", "queries", "root", "-e", "T05"]).unwrap();
    match cli.command {
        Commands::Queries(args) => {
            assert_eq!(args.kind, QueryKind::RowCounts);
            assert!(args.database.is_none());
        }
        other => panic!("expected queries, got {:?}", other),
    }
}

#[test]
fn test_data_checks_need_database() {
    assert!(Cli::try_parse_from(["rp", "queries", "root", "-e", "T05", "-k", "data-checks"]).is_err());
    let cli = Cli::try_parse_from([
        "rp", "queries", "root", "-e", "T05", "-k", "data-checks", "--database", "cat.duckdb",
    ])
    .unwrap();
    match cli.command {
        Commands::Queries(args) => {
            assert_eq!(args.kind, QueryKind::DataChecks);
            assert_eq!(args.database.as_deref(), Some("cat.duckdb"));
        }
        other => panic!("expected queries, got {:?}", other),
    }
}
