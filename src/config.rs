use std::path::PathBuf;

use crate::session::web::WebSessionConfig;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Base URL of the target application
    pub base_url: String,

    /// Run the browser headless (Scribe capture needs a visible window)
    pub headless: bool,

    /// Path the run report is written to
    pub report_path: PathBuf,

    /// Default timeout for wait-for actions (ms)
    pub default_timeout_ms: u64,

    /// Pause after a navigation so the recorder captures the loaded page (ms)
    pub navigate_pause_ms: u64,

    /// Pause after a click or fill (ms)
    pub action_pause_ms: u64,

    /// Pause between workflows (ms)
    pub workflow_pause_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3093".to_string(),
            headless: false,
            report_path: PathBuf::from("scribe_test_results.json"),
            default_timeout_ms: 15000,
            navigate_pause_ms: 1000,
            action_pause_ms: 500,
            workflow_pause_ms: 2000,
        }
    }
}

impl RunnerConfig {
    /// Resolve an application path against the base URL
    pub fn full_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), path)
        }
    }

    pub fn web_session_config(&self) -> WebSessionConfig {
        WebSessionConfig {
            headless: self.headless,
            ..WebSessionConfig::default()
        }
    }
}
