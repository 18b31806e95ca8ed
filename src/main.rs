//! checkgen CLI
//!
//! Usage:
//!   checkgen [OPTIONS]
//!
//! Options:
//!   -o, --output <FILE>       Output file [default: services.cfg]
//!   -a, --assignments <FILE>  Host assignment file [default: hosts.cfg]
//!   -c, --catalog <FILE>      Check template catalog [default: checks.cfg]
//!       --config <FILE>       Settings file (TOML format)
//!       --no-timestamp        Omit the timestamp from the header
//!   -n, --dry-run             Validate only, do not write output
//!   -v, --verbose             Increase log verbosity (repeatable)
//!   -h, --help                Print help

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use checkgen::run::{run, RunOptions};
use checkgen::{CompileConfig, Settings};

#[derive(Parser)]
#[command(name = "checkgen")]
#[command(about = "Compile host/check assignments into monitoring configuration")]
struct Cli {
    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Host assignment file
    #[arg(short, long)]
    assignments: Option<PathBuf>,

    /// Check template catalog
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Settings file (TOML format)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Omit the timestamp from the header
    #[arg(long)]
    no_timestamp: bool,

    /// Validate only, do not write output
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load settings, then let flags override them
    let settings = match &cli.config {
        Some(path) => match Settings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mut header = settings.header;
    if cli.no_timestamp {
        header.timestamp = false;
    }
    let generated_at = chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S %z")
        .to_string();

    let options = RunOptions {
        catalog: cli.catalog.unwrap_or(settings.catalog),
        assignments: cli.assignments.unwrap_or(settings.assignments),
        output: cli.output.unwrap_or(settings.output),
        dry_run: cli.dry_run,
        config: CompileConfig::new()
            .with_header(header)
            .with_generated_at(generated_at),
    };

    match run(&options) {
        Ok(summary) if summary.written => {
            eprintln!(
                "Wrote {} checks for {} hosts to '{}'",
                summary.invocations,
                summary.hosts,
                options.output.display()
            );
        }
        Ok(summary) => {
            eprintln!(
                "OK: {} checks for {} hosts (dry run, nothing written)",
                summary.invocations, summary.hosts
            );
        }
        Err(e) => {
            for report in e.reports() {
                eprint!("{}", report);
            }
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
