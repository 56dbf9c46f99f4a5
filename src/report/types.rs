use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::runner::state::{RunState, WorkflowResult};

/// Persisted run report. Written exactly once per run, after the session is
/// released.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub run_id: String,
    pub timestamp: String,
    pub base_url: String,
    pub total_workflows: u32,
    pub passed: u32,
    pub failed: u32,
    /// Abort reason when session acquisition failed before any workflow ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
    pub results: Vec<WorkflowResult>,
}

impl RunReport {
    pub fn from_state(state: &RunState, base_url: &str) -> Self {
        let summary = state.summary();
        Self {
            run_id: state.run_id.clone(),
            timestamp: Local::now().to_rfc3339(),
            base_url: base_url.to_string(),
            total_workflows: summary.total_workflows,
            passed: summary.passed,
            failed: summary.failed,
            aborted: state.aborted.clone(),
            results: state.results.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::state::{WorkflowState, WorkflowStatus};

    #[test]
    fn test_report_counts_follow_results() {
        let mut state = RunState::new("run-1");
        state.record(WorkflowState::start("Login").succeed());
        state.record(WorkflowState::start("View Users").fail("table missing".into()));

        let report = RunReport::from_state(&state, "http://localhost:3093");
        assert_eq!(report.total_workflows, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert!(report.aborted.is_none());
        assert_eq!(report.results[0].workflow, "Login");
        assert_eq!(report.results[1].status, WorkflowStatus::Failed);
    }

    #[test]
    fn test_aborted_report_is_empty_but_marked() {
        let mut state = RunState::new("run-1");
        state.abort("failed to launch browser".into());

        let report = RunReport::from_state(&state, "http://localhost:3093");
        assert_eq!(report.total_workflows, 0);
        assert!(report.results.is_empty());
        assert_eq!(report.aborted.as_deref(), Some("failed to launch browser"));

        let json = serde_json::to_string(&report).unwrap();
        let back: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.aborted.as_deref(), Some("failed to launch browser"));
    }
}
