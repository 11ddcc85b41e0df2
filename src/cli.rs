//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "catalint",
    version,
    about = "Catalint (Rust + CSV)",
    long_about = "Catalint — a tiny, fast CLI to validate product catalog exports against pricing, inventory, image, HTML, and variant-order rules.\n\nConfiguration precedence: CLI > catalint.toml > defaults.",
    after_help = "Examples:\n  catalint validate --input exports/catalog.csv\n  catalint validate --input exports/catalog.csv --output json --offline\n  catalint validate --input exports/catalog.csv --write-report --report-dir reports",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current catalint version."
    )]
    Version,
    /// Validate a catalog export
    #[command(
        about = "Run catalog validation",
        long_about = "Validate the rows of a catalog CSV export: price hierarchy, inventory, image URLs and dimensions, HTML bodies, and variant ordering. Issues never abort the run; fatal pre-checks (empty file, missing columns) do.",
        after_help = "Examples:\n  catalint validate --input exports/catalog.csv\n  catalint validate --input exports/catalog.csv --output json"
    )]
    Validate {
        #[arg(long, help = "Working root for config discovery (default: current dir)")]
        root: Option<String>,
        #[arg(long, help = "Path to the catalog CSV export")]
        input: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(
            long,
            action = clap::ArgAction::SetTrue,
            help = "Skip DNS lookups and image fetches; syntactic URL checks still run"
        )]
        offline: bool,
        #[arg(long, help = "Per-request fetch timeout in seconds (default: 10)")]
        timeout_secs: Option<u64>,
        #[arg(
            long,
            action = clap::ArgAction::SetTrue,
            help = "Write detail and summary CSVs to the report dir"
        )]
        write_report: bool,
        #[arg(long, help = "Directory for written reports (default: reports)")]
        report_dir: Option<String>,
    },
}
