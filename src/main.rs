//! Catalint CLI binary entry point.
//! Delegates to modules for ingest/validation and prints results.

mod checks;
mod cli;
mod config;
mod engine;
mod export;
mod ingest;
mod models;
mod net;
mod output;
mod utils;

use crate::engine::{Progress, SilentProgress};
use clap::Parser;
use cli::{Cli, Commands};
use std::time::Duration;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Validate {
            root,
            input,
            output,
            offline,
            timeout_secs,
            write_report,
            report_dir,
        } => {
            let eff = config::resolve_effective(
                root.as_deref(),
                input.as_deref(),
                output.as_deref(),
                if offline { Some(true) } else { None },
                timeout_secs,
                report_dir.as_deref(),
                if write_report { Some(true) } else { None },
            );
            // Friendly note if no catalint config was found
            if config::load_config(&eff.root).is_none() {
                eprintln!(
                    "{} {}",
                    crate::utils::note_prefix(),
                    "No catalint.toml found; using defaults."
                );
            }
            // Require an input to be configured (no default)
            let Some(input_path) = eff.input.clone() else {
                eprintln!(
                    "{} {}",
                    crate::utils::error_prefix(),
                    "Input is not configured. Pass --input or add catalint.toml."
                );
                std::process::exit(2);
            };
            if !input_path.is_file() {
                eprintln!(
                    "{} {}",
                    crate::utils::error_prefix(),
                    format!(
                        "Input file not found: {} (pass --input or configure catalint.toml)",
                        input_path.to_string_lossy()
                    )
                );
                std::process::exit(2);
            }

            let rows = match ingest::load_rows(&input_path) {
                Ok(rows) => rows,
                Err(e) => {
                    eprintln!("{} {}", crate::utils::error_prefix(), e);
                    std::process::exit(2);
                }
            };

            let fetcher = match net::HttpFetcher::new(Duration::from_secs(eff.timeout_secs)) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!(
                        "{} {}",
                        crate::utils::error_prefix(),
                        format!("failed to build HTTP client: {e}")
                    );
                    std::process::exit(2);
                }
            };
            let resolver = net::SystemResolver;
            let deps = engine::Deps {
                remote: checks::remote::RemoteChecks {
                    resolver: &resolver,
                    fetcher: &fetcher,
                    offline: eff.offline,
                },
                columns: eff.columns.clone(),
            };

            // Keep JSON output clean; row-by-row progress is a human nicety.
            let progress: Box<dyn Progress> = if eff.output == "json" {
                Box::new(SilentProgress)
            } else {
                Box::new(output::ConsoleProgress)
            };
            let report = engine::run_validation(&rows, &deps, progress.as_ref());
            output::print_report(&report, &eff.output);

            if eff.write_report {
                match export::write_report(&report, &eff.report_dir) {
                    Ok((detail, summary)) => {
                        eprintln!(
                            "{} {}",
                            crate::utils::note_prefix(),
                            format!(
                                "Report written to {} (summary: {})",
                                detail.to_string_lossy(),
                                summary.to_string_lossy()
                            )
                        );
                    }
                    Err(e) => {
                        eprintln!(
                            "{} {}",
                            crate::utils::error_prefix(),
                            format!("failed to write report: {e}")
                        );
                        std::process::exit(2);
                    }
                }
            }

            if !report.issues.is_empty() {
                std::process::exit(1);
            }
        }
    }
}
