pub mod actions;
pub mod events;
pub mod state;

use anyhow::Result;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use uuid::Uuid;

use crate::config::RunnerConfig;
use crate::fixtures::TestFixtures;
use crate::report::types::RunReport;
use crate::session::web::WebSession;
use crate::session::{BrowserSession, SessionError};
use crate::workflows::Workflow;
use actions::Actions;
use events::{ConsoleEventListener, EventEmitter, RunEvent};
use state::{RunPhase, RunState, WorkflowState};

/// Executes the workflow catalog against one shared browser session.
///
/// One result is recorded per workflow, in catalog order; a failed workflow
/// never blocks the next one. The session is released exactly once on every
/// exit path, and the report is written exactly once, after release.
pub struct WorkflowRunner {
    config: RunnerConfig,
    fixtures: TestFixtures,
    emitter: EventEmitter,
}

impl WorkflowRunner {
    pub fn new(config: RunnerConfig) -> Self {
        let (emitter, receiver) = EventEmitter::new();

        // Console narration runs in the background, same channel the
        // inspector UI would subscribe to
        tokio::spawn(ConsoleEventListener::listen(receiver));

        Self {
            config,
            fixtures: TestFixtures::generate(),
            emitter,
        }
    }

    /// Subscribe to run events
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<RunEvent> {
        self.emitter.subscribe()
    }

    pub fn fixtures(&self) -> &TestFixtures {
        &self.fixtures
    }

    /// Launch a browser and run the full catalog
    pub async fn run_all(&self, catalog: &[Workflow]) -> Result<RunReport> {
        let web_config = self.config.web_session_config();
        self.run_with(
            || async move {
                let session = WebSession::launch(web_config).await?;
                Ok(Box::new(session) as Box<dyn BrowserSession>)
            },
            catalog,
        )
        .await
    }

    /// Run the catalog against a session produced by `acquire`.
    ///
    /// Acquisition failure is fatal: no workflow runs, the report is written
    /// with the abort reason, and the error is returned to the caller.
    pub async fn run_with<F, Fut>(&self, acquire: F, catalog: &[Workflow]) -> Result<RunReport>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Box<dyn BrowserSession>, SessionError>>,
    {
        let mut run = RunState::new(&Uuid::new_v4().to_string());

        let session = match acquire().await {
            Ok(session) => session,
            Err(e) => {
                let reason = e.to_string();
                log::error!("session acquisition failed: {:#}", e);
                self.emitter.emit(RunEvent::RunAborted {
                    reason: reason.clone(),
                });
                run.abort(reason);
                // A partial report still notes the abort for the operator
                let _ = self.write_report(&mut run)?;
                return Err(e.into());
            }
        };

        run.phase = RunPhase::SessionAcquired;
        self.emitter.emit(RunEvent::RunStarted {
            run_id: run.run_id.clone(),
            base_url: self.config.base_url.clone(),
            workflow_count: catalog.len(),
        });

        for (index, workflow) in catalog.iter().enumerate() {
            run.phase = RunPhase::Running {
                workflow_index: index,
            };
            self.emitter.emit(RunEvent::WorkflowStarted {
                name: workflow.name().to_string(),
                index,
            });

            let workflow_state = WorkflowState::start(workflow.name());
            let actions = Actions::new(session.as_ref(), &self.config);

            // Catch panics too, so an unanticipated failure inside a body
            // cannot skip the remaining workflows or the session release
            let outcome = AssertUnwindSafe(workflow.run(&actions, &self.fixtures))
                .catch_unwind()
                .await;

            let result = match outcome {
                Ok(Ok(())) => workflow_state.succeed(),
                Ok(Err(e)) => workflow_state.fail(format!("{:#}", e)),
                Err(panic) => workflow_state.fail(panic_message(panic)),
            };

            self.emitter.emit(RunEvent::WorkflowFinished {
                name: result.workflow.clone(),
                status: result.status.clone(),
                error: result.error.clone(),
                duration_ms: result.duration_ms.unwrap_or(0),
            });
            run.record(result);

            // Pacing for the external recorder; not a correctness requirement
            tokio::time::sleep(Duration::from_millis(self.config.workflow_pause_ms)).await;
        }

        if let Err(e) = session.close().await {
            log::warn!("browser release reported an error: {:#}", e);
        }
        run.phase = RunPhase::SessionReleased;

        let report = self.write_report(&mut run)?;
        run.phase = RunPhase::Done;

        self.emitter.emit(RunEvent::RunFinished {
            summary: run.summary(),
            report_path: self.config.report_path.display().to_string(),
        });

        Ok(report)
    }

    fn write_report(&self, run: &mut RunState) -> Result<RunReport> {
        let report = RunReport::from_state(run, &self.config.base_url);
        crate::report::json::generate(&report, &self.config.report_path)?;
        if run.phase != RunPhase::Aborted {
            run.phase = RunPhase::Reported;
        }
        Ok(report)
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("workflow panicked: {}", s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("workflow panicked: {}", s)
    } else {
        "workflow panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::MockSession;
    use crate::session::Selector;
    use crate::workflows;
    use super::state::WorkflowStatus;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn test_config(report_name: &str) -> RunnerConfig {
        let report_path: PathBuf = std::env::temp_dir().join(format!(
            "scribe_runner_{}_{}.json",
            report_name,
            Uuid::new_v4()
        ));
        RunnerConfig {
            report_path,
            navigate_pause_ms: 0,
            action_pause_ms: 0,
            workflow_pause_ms: 0,
            ..RunnerConfig::default()
        }
    }

    /// Session double shared with the runner through an Arc so tests can
    /// inspect it after the run consumed the Box.
    struct SharedSession(Arc<MockSession>);

    #[async_trait::async_trait]
    impl BrowserSession for SharedSession {
        async fn open(&self, url: &str) -> Result<()> {
            self.0.open(url).await
        }
        async fn wait_for(&self, selector: &Selector, timeout_ms: u64) -> Result<bool> {
            self.0.wait_for(selector, timeout_ms).await
        }
        async fn click(&self, selector: &Selector) -> Result<()> {
            self.0.click(selector).await
        }
        async fn fill(&self, selector: &Selector, value: &str) -> Result<()> {
            self.0.fill(selector, value).await
        }
        async fn scroll_into_view(&self, selector: &Selector) -> Result<()> {
            self.0.scroll_into_view(selector).await
        }
        async fn title(&self) -> Result<String> {
            self.0.title().await
        }
        async fn eval(&self, script: &str) -> Result<serde_json::Value> {
            self.0.eval(script).await
        }
        async fn close(&self) -> Result<()> {
            self.0.close().await
        }
    }

    fn acquire(
        mock: Arc<MockSession>,
    ) -> impl FnOnce() -> futures::future::Ready<Result<Box<dyn BrowserSession>, SessionError>>
    {
        move || {
            futures::future::ready(Ok(Box::new(SharedSession(mock)) as Box<dyn BrowserSession>))
        }
    }

    fn simple_workflow(name: &str, path: &'static str) -> Workflow {
        Workflow::new(name, move |a, _f| {
            Box::pin(async move {
                if !a.navigate(path).await {
                    anyhow::bail!("{} did not load", path);
                }
                Ok(())
            })
        })
    }

    fn failing_workflow(name: &str) -> Workflow {
        Workflow::new(name, |_a, _f| {
            Box::pin(async move { anyhow::bail!("deliberate failure") })
        })
    }

    fn panicking_workflow(name: &str) -> Workflow {
        Workflow::new(name, |_a, _f| {
            Box::pin(async move { panic!("unanticipated error") })
        })
    }

    #[tokio::test]
    async fn test_results_match_catalog_length_and_order() {
        let mock = Arc::new(MockSession::new());
        let runner = WorkflowRunner::new(test_config("order"));
        let catalog = vec![
            simple_workflow("first", "/a"),
            simple_workflow("second", "/b"),
            simple_workflow("third", "/c"),
        ];

        let report = runner.run_with(acquire(mock.clone()), &catalog).await.unwrap();

        assert_eq!(report.results.len(), 3);
        let names: Vec<&str> = report.results.iter().map(|r| r.workflow.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(mock.closes(), 1);
        let _ = std::fs::remove_file(&runner.config.report_path);
    }

    #[tokio::test]
    async fn test_failure_does_not_block_subsequent_workflows() {
        let mock = Arc::new(MockSession::new());
        let runner = WorkflowRunner::new(test_config("continue"));
        let catalog = vec![
            simple_workflow("first", "/a"),
            failing_workflow("second"),
            simple_workflow("third", "/c"),
        ];

        let report = runner.run_with(acquire(mock.clone()), &catalog).await.unwrap();

        assert_eq!(report.results.len(), 3);
        assert_eq!(report.results[1].status, WorkflowStatus::Failed);
        assert_eq!(report.results[2].status, WorkflowStatus::Success);
        // Session stayed usable until the catalog was exhausted
        assert!(mock.journal().contains(&"open http://localhost:3093/c".to_string()));
        assert_eq!(mock.closes(), 1);
        let _ = std::fs::remove_file(&runner.config.report_path);
    }

    #[tokio::test]
    async fn test_panicking_workflow_is_recorded_and_session_released() {
        let mock = Arc::new(MockSession::new());
        let runner = WorkflowRunner::new(test_config("panic"));
        let catalog = vec![
            panicking_workflow("exploder"),
            simple_workflow("survivor", "/x"),
        ];

        let report = runner.run_with(acquire(mock.clone()), &catalog).await.unwrap();

        assert_eq!(report.results[0].status, WorkflowStatus::Failed);
        assert!(report.results[0]
            .error
            .as_deref()
            .unwrap()
            .contains("unanticipated error"));
        assert_eq!(report.results[1].status, WorkflowStatus::Success);
        assert_eq!(mock.closes(), 1);
        let _ = std::fs::remove_file(&runner.config.report_path);
    }

    #[tokio::test]
    async fn test_login_failure_scenario() {
        // Submit button missing: login records FAILED with the exact reason,
        // the dashboard workflow still passes
        let mock = Arc::new(MockSession::new().fail_click_on("submit"));
        let runner = WorkflowRunner::new(test_config("login_fail"));
        let full = workflows::catalog();
        let catalog: Vec<Workflow> = full
            .into_iter()
            .filter(|w| w.name() == "Login" || w.name() == "View Dashboard")
            .collect();

        let report = runner.run_with(acquire(mock.clone()), &catalog).await.unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].workflow, "Login");
        assert_eq!(report.results[0].status, WorkflowStatus::Failed);
        assert_eq!(report.results[0].error.as_deref(), Some("Login button not found"));
        assert_eq!(report.results[1].workflow, "View Dashboard");
        assert_eq!(report.results[1].status, WorkflowStatus::Success);
        assert_eq!(mock.closes(), 1);
        let _ = std::fs::remove_file(&runner.config.report_path);
    }

    #[tokio::test]
    async fn test_acquisition_failure_aborts_without_running_workflows() {
        let runner = WorkflowRunner::new(test_config("abort"));
        let catalog = vec![simple_workflow("never_runs", "/a")];

        let err = runner
            .run_with(
                || {
                    futures::future::ready(Err(SessionError::Launch(anyhow::anyhow!(
                        "driver start failed"
                    ))))
                },
                &catalog,
            )
            .await
            .unwrap_err();

        assert!(err.to_string().contains("failed to launch browser"));

        // The partial report notes the abort and lists no results
        let raw = std::fs::read_to_string(&runner.config.report_path).unwrap();
        let report: RunReport = serde_json::from_str(&raw).unwrap();
        assert!(report.results.is_empty());
        assert!(report.aborted.as_deref().unwrap().contains("driver start failed"));
        let _ = std::fs::remove_file(&runner.config.report_path);
    }

    #[tokio::test]
    async fn test_report_written_once_with_final_counts() {
        let mock = Arc::new(MockSession::new());
        let runner = WorkflowRunner::new(test_config("report"));
        let catalog = vec![simple_workflow("only", "/a"), failing_workflow("bad")];

        let report = runner.run_with(acquire(mock.clone()), &catalog).await.unwrap();

        let raw = std::fs::read_to_string(&runner.config.report_path).unwrap();
        let persisted: RunReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.total_workflows, report.total_workflows);
        assert_eq!(persisted.passed, 1);
        assert_eq!(persisted.failed, 1);
        // Close came before the report write
        let journal = mock.journal();
        assert_eq!(journal.last().map(String::as_str), Some("close"));
        let _ = std::fs::remove_file(&runner.config.report_path);
    }
}
