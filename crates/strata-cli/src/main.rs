#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use output::OutputMode;
use strata_graph::config::load_config;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Config file read from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "strata.toml";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "strata: dependency graph analysis",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format; defaults to pretty on a terminal, text otherwise.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Analysis config (TOML). Defaults to ./strata.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Show graph size, content hash and most depended-upon vertices",
        after_help = "EXAMPLES:\n    strata stats deps.json\n    strata stats deps.json --top 10 --format json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "List vertices reachable from one or more starting vertices",
        after_help = "EXAMPLES:\n    strata follow deps.json app\n    strata follow deps.json app cli --exclude-start"
    )]
    Follow(cmd::follow::FollowArgs),

    #[command(
        about = "Shortest distances from a source vertex",
        after_help = "EXAMPLES:\n    strata path deps.json app\n    strata path deps.json app --reachable-only"
    )]
    Path(cmd::path::PathArgs),

    #[command(
        about = "Cheapest cycle of three or more vertices through a vertex",
        after_help = "EXAMPLES:\n    strata cycle deps.json lib"
    )]
    Cycle(cmd::cycle::CycleArgs),

    #[command(
        about = "Layer the graph and report irreducible cycles",
        after_help = "EXAMPLES:\n    strata linearize deps.json\n    strata linearize deps.json --no-witness --format json"
    )]
    Linearize(cmd::linearize::LinearizeArgs),

    #[command(
        about = "List edges sorted by weight",
        after_help = "EXAMPLES:\n    strata edges deps.json --limit 5\n    strata edges deps.json --descending"
    )]
    Edges(cmd::edges::EdgesArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("STRATA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "strata=debug,info"
        } else {
            "strata=info,warn"
        })
    });

    let format = env::var("STRATA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = load_config(&config_path)?;
    debug!(path = %config_path.display(), ?config, "config resolved");

    let ctx = cmd::RunContext {
        config,
        output: output::resolve_output_mode(cli.format),
    };

    match &cli.command {
        Commands::Stats(args) => cmd::stats::run_stats(args, &ctx),
        Commands::Follow(args) => cmd::follow::run_follow(args, &ctx),
        Commands::Path(args) => cmd::path::run_path(args, &ctx),
        Commands::Cycle(args) => cmd::cycle::run_cycle(args, &ctx),
        Commands::Linearize(args) => cmd::linearize::run_linearize(args, &ctx),
        Commands::Edges(args) => cmd::edges::run_edges(args, &ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn format_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["strata", "stats", "g.json", "--format", "json"]);
        assert_eq!(cli.format, Some(OutputMode::Json));
    }

    #[test]
    fn default_format_is_unset() {
        let cli = Cli::parse_from(["strata", "linearize", "g.json"]);
        assert!(cli.format.is_none());
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Linearize(_)));
    }

    #[test]
    fn config_flag_parsed() {
        let cli = Cli::parse_from(["strata", "--config", "x.toml", "edges", "g.json", "--descending"]);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        match cli.command {
            Commands::Edges(args) => {
                assert!(args.descending);
                assert_eq!(args.limit, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn all_subcommands_listed() {
        let command = Cli::command();
        let names: Vec<&str> = command.get_subcommands().map(clap::Command::get_name).collect();
        assert_eq!(names, ["stats", "follow", "path", "cycle", "linearize", "edges"]);
    }
}
