//! Primitive UI actions over the shared browser session.
//!
//! Every helper follows the same failure policy: a failed interaction is
//! logged with its selector and description, then reported as `false` to the
//! caller. Nothing here raises past the primitive boundary; the workflow body
//! decides whether a `false` return is fatal for the whole workflow.

use colored::Colorize;
use std::time::Duration;

use crate::config::RunnerConfig;
use crate::session::{BrowserSession, Selector};

pub struct Actions<'a> {
    session: &'a dyn BrowserSession,
    config: &'a RunnerConfig,
}

impl<'a> Actions<'a> {
    pub fn new(session: &'a dyn BrowserSession, config: &'a RunnerConfig) -> Self {
        Self { session, config }
    }

    /// Pause so the external recorder captures the current state
    pub async fn pause(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    /// Navigate to an application path relative to the base URL
    pub async fn navigate(&self, path: &str) -> bool {
        let url = self.config.full_url(path);
        println!("  {} Navigating to: {}", "📍".blue(), url.cyan());

        match self.session.open(&url).await {
            Ok(()) => {
                self.pause(self.config.navigate_pause_ms).await;
                true
            }
            Err(e) => {
                println!("  {} Navigation to {} failed: {}", "❌".red(), url, e);
                log::error!("navigate {} failed: {:#}", url, e);
                false
            }
        }
    }

    /// Click an element
    pub async fn click(&self, selector: &Selector, description: &str) -> bool {
        if selector.is_empty() {
            println!("  {} Refusing click with empty selector", "❌".red());
            return false;
        }
        let desc = display_name(description, selector);
        println!("  {} Clicking: {}", "🖱".blue(), desc);

        match self.session.click(selector).await {
            Ok(()) => {
                self.pause(self.config.action_pause_ms).await;
                true
            }
            Err(e) => {
                println!("  {} Could not click {} [{}]: {}", "❌".red(), desc, selector, e);
                log::error!("click {} failed: {:#}", selector, e);
                false
            }
        }
    }

    /// Fill an input, replacing existing content
    pub async fn fill(&self, selector: &Selector, value: &str, description: &str) -> bool {
        if selector.is_empty() {
            println!("  {} Refusing fill with empty selector", "❌".red());
            return false;
        }
        let desc = display_name(description, selector);
        println!("  {} Filling: {} = {}", "⌨".blue(), desc, value);

        match self.session.fill(selector, value).await {
            Ok(()) => {
                self.pause(self.config.action_pause_ms).await;
                true
            }
            Err(e) => {
                println!("  {} Could not fill {} [{}]: {}", "❌".red(), desc, selector, e);
                log::error!("fill {} failed: {:#}", selector, e);
                false
            }
        }
    }

    /// Wait for an element to appear, up to `timeout_ms` (default from config).
    ///
    /// Returns false on timeout instead of blocking indefinitely.
    pub async fn wait_for(&self, selector: &Selector, timeout_ms: Option<u64>) -> bool {
        if selector.is_empty() {
            println!("  {} Refusing wait with empty selector", "❌".red());
            return false;
        }
        let timeout = timeout_ms.unwrap_or(self.config.default_timeout_ms);
        if timeout == 0 {
            println!("  {} Refusing wait with zero timeout [{}]", "❌".red(), selector);
            return false;
        }

        match self.session.wait_for(selector, timeout).await {
            Ok(true) => true,
            Ok(false) => {
                println!(
                    "  {} Element did not appear within {}ms: {}",
                    "❌".red(),
                    timeout,
                    selector
                );
                false
            }
            Err(e) => {
                println!("  {} Wait for {} failed: {}", "❌".red(), selector, e);
                log::error!("wait_for {} failed: {:#}", selector, e);
                false
            }
        }
    }

    /// Scroll an element into the viewport
    pub async fn scroll_into_view(&self, selector: &Selector) -> bool {
        if selector.is_empty() {
            println!("  {} Refusing scroll with empty selector", "❌".red());
            return false;
        }

        match self.session.scroll_into_view(selector).await {
            Ok(()) => {
                self.pause(self.config.action_pause_ms).await;
                true
            }
            Err(e) => {
                println!("  {} Could not scroll to {}: {}", "❌".red(), selector, e);
                log::error!("scroll_into_view {} failed: {:#}", selector, e);
                false
            }
        }
    }
}

fn display_name(description: &str, selector: &Selector) -> String {
    if description.is_empty() {
        selector.to_string()
    } else {
        description.to_string()
    }
}
