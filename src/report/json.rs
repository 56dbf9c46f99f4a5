use anyhow::{Context, Result};
use std::path::Path;

use super::types::RunReport;

/// Write the run report as pretty-printed JSON
pub fn generate(report: &RunReport, output: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(output, json)
        .with_context(|| format!("Failed to write report to {}", output.display()))?;
    println!("JSON report saved to: {}", output.display());
    Ok(())
}
