use super::state::{RunSummary, WorkflowStatus};
use tokio::sync::broadcast;

/// Run execution events for real-time console updates
#[derive(Debug, Clone)]
pub enum RunEvent {
    RunStarted {
        run_id: String,
        base_url: String,
        workflow_count: usize,
    },
    WorkflowStarted {
        name: String,
        index: usize,
    },
    WorkflowFinished {
        name: String,
        status: WorkflowStatus,
        error: Option<String>,
        duration_ms: u64,
    },
    RunAborted {
        reason: String,
    },
    RunFinished {
        summary: RunSummary,
        report_path: String,
    },
}

/// Event emitter for broadcasting run events
pub struct EventEmitter {
    sender: broadcast::Sender<RunEvent>,
}

impl EventEmitter {
    pub fn new() -> (Self, broadcast::Receiver<RunEvent>) {
        let (sender, receiver) = broadcast::channel(100);
        (Self { sender }, receiver)
    }

    pub fn emit(&self, event: RunEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }
}

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration as StdDuration;

/// Console event listener for printing real-time updates
pub struct ConsoleEventListener;

impl ConsoleEventListener {
    pub async fn listen(mut receiver: broadcast::Receiver<RunEvent>) {
        use colored::Colorize;

        let mut spinner: Option<ProgressBar> = None;

        while let Ok(event) = receiver.recv().await {
            match event {
                RunEvent::RunStarted {
                    run_id,
                    base_url,
                    workflow_count,
                } => {
                    println!(
                        "\n{} Run {} started against {} ({} workflows)",
                        "▶".green().bold(),
                        run_id.cyan(),
                        base_url.cyan(),
                        workflow_count
                    );
                }

                RunEvent::WorkflowStarted { name, index } => {
                    let pb = ProgressBar::new_spinner();
                    let style = ProgressStyle::default_spinner()
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                        .template("  {spinner} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner());
                    pb.set_style(style);
                    pb.set_message(format!("[{}] {}...", index, name));
                    pb.enable_steady_tick(StdDuration::from_millis(100));
                    spinner = Some(pb);
                }

                RunEvent::WorkflowFinished {
                    name,
                    status,
                    error,
                    duration_ms,
                } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    match status {
                        WorkflowStatus::Success => {
                            println!("  {} {} ({}ms)", "✓".green(), name, duration_ms);
                        }
                        WorkflowStatus::Failed => {
                            println!(
                                "  {} {} ({}ms): {}",
                                "✗".red(),
                                name,
                                duration_ms,
                                error.unwrap_or_default().red()
                            );
                        }
                    }
                }

                RunEvent::RunAborted { reason } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    println!("\n{} Run aborted: {}", "■".red().bold(), reason.red());
                }

                RunEvent::RunFinished {
                    summary,
                    report_path,
                } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    println!("\n{} Run finished", "■".blue().bold());
                    println!("  Total workflows: {}", summary.total_workflows);
                    println!(
                        "  {} passed, {} failed",
                        summary.passed.to_string().green(),
                        summary.failed.to_string().red()
                    );
                    println!("  Report: {}", report_path.cyan());
                }
            }
        }
    }
}
