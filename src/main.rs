use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use scribe_runner::{catalog, summarize_report, RunnerConfig, WorkflowRunner};

#[derive(Parser)]
#[command(name = "scribe-runner")]
#[command(version = "0.1.0")]
#[command(about = "Browser workflow runner for Scribe recording capture", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the workflow catalog against the application
    Run {
        /// Base URL of the target application
        #[arg(short, long, default_value = "http://localhost:3093")]
        base_url: String,

        /// Run the browser headless (Scribe capture needs a visible window)
        #[arg(long, default_value = "false")]
        headless: bool,

        /// Output path for the run report
        #[arg(short, long, default_value = "scribe_test_results.json")]
        output: PathBuf,

        /// Pause between workflows so the recorder captures state (ms)
        #[arg(long, default_value = "2000")]
        workflow_pause: u64,

        /// Default timeout for wait-for actions (ms)
        #[arg(long, default_value = "15000")]
        timeout: u64,
    },

    /// Summarize a previously saved run report
    Report {
        /// Path to the run report JSON
        results: PathBuf,
    },

    /// List the workflow catalog in execution order
    Workflows,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            base_url,
            headless,
            output,
            workflow_pause,
            timeout,
        } => {
            let config = RunnerConfig {
                base_url,
                headless,
                report_path: output,
                workflow_pause_ms: workflow_pause,
                default_timeout_ms: timeout,
                ..RunnerConfig::default()
            };

            print_banner(&config);

            let runner = WorkflowRunner::new(config);
            let report = runner.run_all(&catalog()).await?;

            if report.failed > 0 {
                std::process::exit(1);
            }
        }

        Commands::Report { results } => {
            summarize_report(&results)?;
        }

        Commands::Workflows => {
            for (index, workflow) in catalog().iter().enumerate() {
                println!("{}. {}", index + 1, workflow.name());
            }
        }
    }

    Ok(())
}

fn print_banner(config: &RunnerConfig) {
    println!("\n{}", "=".repeat(60));
    println!("{}", "🎥 SCRIBE AUTOMATION RUN".bold());
    println!("{}", "=".repeat(60));
    println!("  Target: {}", config.base_url.cyan());
    println!("  Report: {}", config.report_path.display().to_string().cyan());
    if config.headless {
        println!(
            "  {} Headless mode: the Scribe extension cannot record without a visible window",
            "⚠".yellow()
        );
    } else {
        println!("\n  Before starting:");
        println!("  1. Install the Scribe extension in Chrome");
        println!("  2. Click Record on the extension");
        println!("  3. Clicks and inputs below will be captured");
    }
    println!("{}\n", "=".repeat(60));
}
