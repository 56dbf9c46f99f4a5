pub mod config;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod session;
pub mod workflows;

// Re-export common items
pub use config::RunnerConfig;
pub use report::summarize_report;
pub use runner::WorkflowRunner;
pub use workflows::catalog;
