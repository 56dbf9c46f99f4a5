pub mod web;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

/// Element selector with its lookup strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Select by CSS selector
    Css(String),
    /// Select by XPath expression
    XPath(String),
}

impl Selector {
    pub fn css(selector: impl Into<String>) -> Self {
        Selector::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Selector::XPath(expression.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Selector::Css(s) | Selector::XPath(s) => s.trim().is_empty(),
        }
    }

    /// Convert to a Playwright selector string
    pub fn to_playwright(&self) -> String {
        match self {
            Selector::Css(css) => css.clone(),
            Selector::XPath(xpath) => format!("xpath={}", xpath),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Css(s) => write!(f, "css={}", s),
            Selector::XPath(s) => write!(f, "xpath={}", s),
        }
    }
}

/// Error raised when the browser session cannot be acquired.
///
/// This is the one fatal error class: nothing in the catalog runs without a
/// live session, so the run aborts before the first workflow.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to launch browser: {0}")]
    Launch(#[source] anyhow::Error),
}

/// Controllable browser session shared by all workflows in one run.
///
/// The runner depends only on this capability surface, not on any specific
/// automation library. A production run uses [`web::WebSession`]; tests
/// substitute a scripted double.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the session to an absolute URL
    async fn open(&self, url: &str) -> Result<()>;

    /// Wait for an element to be present
    ///
    /// Returns true if the element appeared within `timeout_ms`, false on
    /// timeout. Must not block past the timeout.
    async fn wait_for(&self, selector: &Selector, timeout_ms: u64) -> Result<bool>;

    /// Click an element, waiting for it to become actionable first
    async fn click(&self, selector: &Selector) -> Result<()>;

    /// Fill an input, replacing any existing content
    async fn fill(&self, selector: &Selector, value: &str) -> Result<()>;

    /// Scroll an element into the viewport
    async fn scroll_into_view(&self, selector: &Selector) -> Result<()>;

    /// Read the current page title
    async fn title(&self) -> Result<String>;

    /// Execute an inline script against the page
    async fn eval(&self, script: &str) -> Result<serde_json::Value>;

    /// Release the underlying browser. Called exactly once per run.
    async fn close(&self) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted session double for runner and action tests.
    ///
    /// Selectors whose Playwright form contains a registered substring fail
    /// their operation; everything else succeeds. Every call is journaled so
    /// tests can assert ordering, and closes are counted to verify the
    /// release-exactly-once guarantee.
    #[derive(Default)]
    pub struct MockSession {
        pub calls: Mutex<Vec<String>>,
        pub close_count: AtomicUsize,
        fail_click_on: Vec<String>,
        fail_fill_on: Vec<String>,
        timeout_wait_on: Vec<String>,
    }

    impl MockSession {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_click_on(mut self, fragment: &str) -> Self {
            self.fail_click_on.push(fragment.to_string());
            self
        }

        pub fn fail_fill_on(mut self, fragment: &str) -> Self {
            self.fail_fill_on.push(fragment.to_string());
            self
        }

        pub fn timeout_wait_on(mut self, fragment: &str) -> Self {
            self.timeout_wait_on.push(fragment.to_string());
            self
        }

        pub fn closes(&self) -> usize {
            self.close_count.load(Ordering::SeqCst)
        }

        pub fn journal(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, entry: String) {
            self.calls.lock().unwrap().push(entry);
        }

        fn matches(patterns: &[String], sel: &Selector) -> bool {
            let s = sel.to_playwright();
            patterns.iter().any(|p| s.contains(p.as_str()))
        }
    }

    #[async_trait]
    impl BrowserSession for MockSession {
        async fn open(&self, url: &str) -> Result<()> {
            self.record(format!("open {}", url));
            Ok(())
        }

        async fn wait_for(&self, selector: &Selector, _timeout_ms: u64) -> Result<bool> {
            self.record(format!("wait_for {}", selector));
            Ok(!Self::matches(&self.timeout_wait_on, selector))
        }

        async fn click(&self, selector: &Selector) -> Result<()> {
            self.record(format!("click {}", selector));
            if Self::matches(&self.fail_click_on, selector) {
                anyhow::bail!("no element matching {}", selector);
            }
            Ok(())
        }

        async fn fill(&self, selector: &Selector, value: &str) -> Result<()> {
            self.record(format!("fill {} = {}", selector, value));
            if Self::matches(&self.fail_fill_on, selector) {
                anyhow::bail!("no element matching {}", selector);
            }
            Ok(())
        }

        async fn scroll_into_view(&self, selector: &Selector) -> Result<()> {
            self.record(format!("scroll {}", selector));
            Ok(())
        }

        async fn title(&self) -> Result<String> {
            Ok("Mock Page".to_string())
        }

        async fn eval(&self, _script: &str) -> Result<serde_json::Value> {
            Ok(serde_json::Value::Null)
        }

        async fn close(&self) -> Result<()> {
            self.close_count.fetch_add(1, Ordering::SeqCst);
            self.record("close".to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_to_playwright() {
        assert_eq!(Selector::css("#employee_id").to_playwright(), "#employee_id");
        assert_eq!(
            Selector::xpath("//button[contains(., 'Add')]").to_playwright(),
            "xpath=//button[contains(., 'Add')]"
        );
    }

    #[test]
    fn test_selector_emptiness() {
        assert!(Selector::css("").is_empty());
        assert!(Selector::xpath("   ").is_empty());
        assert!(!Selector::css("body").is_empty());
    }
}
