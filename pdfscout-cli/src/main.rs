use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pdfscout::{
    config::CliOverrides,
    search::{configure_thread_pool, scan_paths},
    BoundaryMode, ScanConfig, ScanReport, ScanStrategy, SearchError,
};
use std::{num::NonZeroUsize, path::PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct CheckArgs {
    /// Files or directories to check
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Marker to look for instead of /Encrypt
    #[arg(short, long)]
    keyword: Option<String>,

    /// Number of threads to use
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Scan strategy (auto|parallel|simple)
    #[arg(short, long)]
    strategy: Option<String>,

    /// Search each chunk strictly inside its own range
    #[arg(long)]
    disjoint: bool,

    /// File extensions to include when walking directories (e.g. pdf,fdf)
    #[arg(short = 'e', long)]
    extensions: Option<String>,

    /// Patterns to ignore (glob format)
    #[arg(short, long)]
    ignore: Vec<String>,

    /// Report the offset of the first occurrence
    #[arg(short, long)]
    locate: bool,

    /// Show only statistics, not per-file verdicts
    #[arg(long)]
    stats: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check documents for the encryption marker
    Check(Box<CheckArgs>),

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    run()
}

fn parse_strategy(value: &str) -> Result<ScanStrategy, SearchError> {
    match value.to_lowercase().as_str() {
        "auto" => Ok(ScanStrategy::Auto),
        "parallel" => Ok(ScanStrategy::Parallel),
        "simple" => Ok(ScanStrategy::Simple),
        other => Err(SearchError::config_error(format!(
            "Unknown strategy '{}' (expected auto, parallel or simple)",
            other
        ))),
    }
}

fn setup_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("{},ignore=warn", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let file_config = ScanConfig::load_from(cli.config.as_deref())
        .map_err(SearchError::from)
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Check(args) => {
            let strategy = args.strategy.as_deref().map(parse_strategy).transpose()?;
            let file_extensions = args.extensions.as_ref().map(|e| {
                e.split(',')
                    .map(|s| s.trim().to_string())
                    .collect::<Vec<_>>()
            });

            let config = file_config.merge_with_cli(CliOverrides {
                keyword: args.keyword.clone(),
                thread_count: args.threads,
                boundary_mode: args.disjoint.then_some(BoundaryMode::Disjoint),
                strategy,
                file_extensions,
                ignore_patterns: args.ignore.clone(),
                locate: args.locate,
                log_level: cli.log_level,
            });

            setup_logging(&config.log_level);
            configure_thread_pool(config.thread_count)?;
            debug!("Effective configuration: {:?}", config);

            let report = scan_paths(&config, &args.paths)?;
            if args.json {
                println!("{}", report.to_json()?);
            } else {
                print_report(&report, args.stats);
            }
            Ok(())
        }
        Commands::Config => {
            let config = match cli.log_level {
                Some(level) => file_config.merge_with_cli(CliOverrides {
                    log_level: Some(level),
                    ..CliOverrides::default()
                }),
                None => file_config,
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn print_report(report: &ScanReport, stats_only: bool) {
    if !stats_only {
        for result in &report.file_results {
            let path = result.path.display().to_string();
            if result.encrypted {
                match result.offset {
                    Some(offset) => println!(
                        "{}: {} (offset {})",
                        path.blue(),
                        "encrypted".red().bold(),
                        offset
                    ),
                    None => println!("{}: {}", path.blue(), "encrypted".red().bold()),
                }
            } else {
                println!("{}: {}", path.blue(), "not encrypted".green());
            }
        }
    }

    for failure in &report.failures {
        eprintln!(
            "{}: {}",
            failure.path.display().to_string().yellow(),
            failure.error
        );
    }

    println!(
        "\n{} of {} files encrypted ({} bytes scanned, {} failed)",
        report.encrypted_files,
        report.files_scanned,
        report.bytes_scanned,
        report.failures.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategy() {
        assert_eq!(parse_strategy("auto").unwrap(), ScanStrategy::Auto);
        assert_eq!(parse_strategy("PARALLEL").unwrap(), ScanStrategy::Parallel);
        assert_eq!(parse_strategy("simple").unwrap(), ScanStrategy::Simple);
        assert!(parse_strategy("fast").is_err());
    }

    #[test]
    fn test_cli_parses_check() {
        let cli = Cli::try_parse_from([
            "pdfscout", "check", "a.pdf", "docs", "-j", "4", "--disjoint", "--locate",
        ])
        .unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.paths, vec![PathBuf::from("a.pdf"), PathBuf::from("docs")]);
                assert_eq!(args.threads, NonZeroUsize::new(4));
                assert!(args.disjoint);
                assert!(args.locate);
            }
            Commands::Config => panic!("expected check"),
        }
    }

    #[test]
    fn test_cli_rejects_zero_threads() {
        assert!(Cli::try_parse_from(["pdfscout", "check", "a.pdf", "-j", "0"]).is_err());
    }
}
