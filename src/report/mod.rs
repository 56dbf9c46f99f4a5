pub mod json;
pub mod types;

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::runner::state::WorkflowStatus;
use types::RunReport;

/// Print a human-readable summary of a previously saved run report
pub fn summarize_report(results_path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(results_path)
        .with_context(|| format!("Failed to read {}", results_path.display()))?;
    let report: RunReport = serde_json::from_str(&raw).context("Malformed run report")?;

    println!("Run {} against {}", report.run_id.cyan(), report.base_url.cyan());
    println!("  Generated: {}", report.timestamp);

    if let Some(ref reason) = report.aborted {
        println!("  {} Aborted: {}", "■".red().bold(), reason.red());
    }

    for result in &report.results {
        match result.status {
            WorkflowStatus::Success => {
                println!("  {} {}", "✓".green(), result.workflow);
            }
            WorkflowStatus::Failed => {
                println!(
                    "  {} {}: {}",
                    "✗".red(),
                    result.workflow,
                    result.error.as_deref().unwrap_or("unknown error").red()
                );
            }
        }
    }

    println!(
        "  Total: {}, {} passed, {} failed",
        report.total_workflows,
        report.passed.to_string().green(),
        report.failed.to_string().red()
    );

    Ok(())
}
