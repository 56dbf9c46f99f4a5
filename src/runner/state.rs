use chrono::Local;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Workflow execution status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkflowStatus {
    Success,
    Failed,
}

/// Recorded outcome of one workflow. Appended in execution order and never
/// mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResult {
    pub workflow: String,
    pub status: WorkflowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// In-flight state for a single workflow
#[derive(Debug)]
pub struct WorkflowState {
    pub name: String,
    started_at: Instant,
}

impl WorkflowState {
    pub fn start(name: &str) -> Self {
        Self {
            name: name.to_string(),
            started_at: Instant::now(),
        }
    }

    pub fn succeed(self) -> WorkflowResult {
        self.finish(WorkflowStatus::Success, None)
    }

    pub fn fail(self, error: String) -> WorkflowResult {
        self.finish(WorkflowStatus::Failed, Some(error))
    }

    fn finish(self, status: WorkflowStatus, error: Option<String>) -> WorkflowResult {
        WorkflowResult {
            workflow: self.name,
            status,
            error,
            timestamp: Some(Local::now().to_rfc3339()),
            duration_ms: Some(self.started_at.elapsed().as_millis() as u64),
        }
    }
}

/// Run lifecycle phase.
///
/// NotStarted -> SessionAcquired -> Running -> SessionReleased -> Reported
/// -> Done, or Aborted when session acquisition fails before any workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPhase {
    NotStarted,
    SessionAcquired,
    Running { workflow_index: usize },
    SessionReleased,
    Reported,
    Done,
    Aborted,
}

/// Run-scoped result accumulator, owned exclusively by the runner.
#[derive(Debug)]
pub struct RunState {
    pub run_id: String,
    pub phase: RunPhase,
    pub results: Vec<WorkflowResult>,
    pub aborted: Option<String>,
}

impl RunState {
    pub fn new(run_id: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            phase: RunPhase::NotStarted,
            results: Vec::new(),
            aborted: None,
        }
    }

    pub fn record(&mut self, result: WorkflowResult) {
        self.results.push(result);
    }

    pub fn abort(&mut self, reason: String) {
        self.aborted = Some(reason);
        self.phase = RunPhase::Aborted;
    }

    pub fn summary(&self) -> RunSummary {
        let passed = self
            .results
            .iter()
            .filter(|r| r.status == WorkflowStatus::Success)
            .count() as u32;
        let failed = self
            .results
            .iter()
            .filter(|r| r.status == WorkflowStatus::Failed)
            .count() as u32;

        RunSummary {
            total_workflows: self.results.len() as u32,
            passed,
            failed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total_workflows: u32,
    pub passed: u32,
    pub failed: u32,
}
