use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use lumi_report_api::runner::replay::RecordedResults;
use lumi_report_api::{run_session, ReportApiArgs, SessionHooks, SessionReporter};

#[derive(Parser)]
#[command(name = "lumi-report-api")]
#[command(author = "NL Team")]
#[command(version = "0.1.0")]
#[command(about = "Report test session progress and results to an API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved reporting header
    Header {
        #[command(flatten)]
        report_api: ReportApiArgs,
    },

    /// Report a recorded results file (JSON or YAML) to the API
    Replay {
        /// Path to the results file
        results: PathBuf,

        #[command(flatten)]
        report_api: ReportApiArgs,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Header { report_api } => {
            let mut reporter = SessionReporter::from_args(&report_api)
                .context("Failed to configure report API")?;
            for line in reporter.on_configure() {
                println!("{}", line);
            }
        }

        Commands::Replay {
            results,
            report_api,
        } => {
            let recorded = RecordedResults::load(&results)?;
            let mut reporter = SessionReporter::from_args(&report_api)
                .context("Failed to configure report API")?;

            for line in reporter.on_configure() {
                println!("{} {}", "▶".green().bold(), line);
            }
            println!(
                "  Replaying {} tests from: {}",
                recorded.tests.len(),
                results.display().to_string().cyan()
            );

            let summary = run_session(&mut reporter, recorded.tests)
                .context("Reporting to the API failed")?;

            println!("\n{} Test session finished", "■".blue().bold());
            println!(
                "  {} passed, {} failed, {} skipped",
                summary.passed.to_string().green(),
                summary.failed.to_string().red(),
                summary.skipped.to_string().yellow()
            );
            println!("  Reported: {}/{}", summary.reported, summary.total);
        }
    }

    Ok(())
}
