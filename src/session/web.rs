//! Playwright-backed browser session.
//!
//! One Chromium instance is launched per run and owned by the runner until
//! release. The browser stays visible by default: the Scribe extension only
//! records what is actually on screen, so headless mode is opt-in.

use anyhow::{Context, Result};
use async_trait::async_trait;
use playwright::api::{Browser, BrowserContext, Page, Viewport};
use playwright::Playwright;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{BrowserSession, Selector, SessionError};

/// Web session configuration
#[derive(Debug, Clone)]
pub struct WebSessionConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for WebSessionConfig {
    fn default() -> Self {
        let headless = std::env::var("SCRIBE_HEADLESS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            headless,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

/// Browser session using Playwright
pub struct WebSession {
    #[allow(dead_code)]
    playwright: Arc<Playwright>,
    browser: Arc<Browser>,
    #[allow(dead_code)]
    context: Arc<BrowserContext>,
    page: Arc<Mutex<Page>>,
}

impl WebSession {
    /// Launch a new browser session.
    ///
    /// Any failure here is fatal to the run, so it is mapped into
    /// [`SessionError::Launch`] rather than a plain `anyhow` error.
    pub async fn launch(config: WebSessionConfig) -> Result<Self, SessionError> {
        Self::launch_inner(config)
            .await
            .map_err(SessionError::Launch)
    }

    async fn launch_inner(config: WebSessionConfig) -> Result<Self> {
        let playwright = Playwright::initialize()
            .await
            .context("Failed to initialize Playwright")?;

        let browser = playwright
            .chromium()
            .launcher()
            .headless(config.headless)
            .launch()
            .await
            .context("Failed to launch Chromium")?;

        let context = browser.context_builder().build().await?;
        let page = context.new_page().await?;

        page.set_viewport_size(Viewport {
            width: config.viewport_width as i32,
            height: config.viewport_height as i32,
        })
        .await?;

        log::info!(
            "browser launched (headless: {}, viewport: {}x{})",
            config.headless,
            config.viewport_width,
            config.viewport_height
        );

        Ok(Self {
            playwright: Arc::new(playwright),
            browser: Arc::new(browser),
            context: Arc::new(context),
            page: Arc::new(Mutex::new(page)),
        })
    }
}

#[async_trait]
impl BrowserSession for WebSession {
    async fn open(&self, url: &str) -> Result<()> {
        let page = self.page.lock().await;
        page.goto_builder(url)
            .goto()
            .await
            .with_context(|| format!("Failed to navigate to {}", url))?;
        Ok(())
    }

    async fn wait_for(&self, selector: &Selector, timeout_ms: u64) -> Result<bool> {
        let page = self.page.lock().await;
        let sel = selector.to_playwright();

        // Playwright enforces the timeout itself; a timeout surfaces as Err,
        // which we map to false rather than propagating.
        let result = page
            .wait_for_selector_builder(&sel)
            .timeout(timeout_ms as f64)
            .wait_for_selector()
            .await;

        Ok(result.is_ok())
    }

    async fn click(&self, selector: &Selector) -> Result<()> {
        let page = self.page.lock().await;
        let sel = selector.to_playwright();
        page.click_builder(&sel)
            .click()
            .await
            .with_context(|| format!("Failed to click {}", sel))?;
        Ok(())
    }

    async fn fill(&self, selector: &Selector, value: &str) -> Result<()> {
        let page = self.page.lock().await;
        let sel = selector.to_playwright();
        match page.query_selector(&sel).await? {
            // fill() replaces existing content, matching the clear-then-type
            // behavior workflows rely on
            Some(el) => {
                el.fill_builder(value).fill().await?;
                Ok(())
            }
            None => anyhow::bail!("No element matching {}", sel),
        }
    }

    async fn scroll_into_view(&self, selector: &Selector) -> Result<()> {
        let page = self.page.lock().await;
        let sel = selector.to_playwright();
        match page.query_selector(&sel).await? {
            Some(el) => {
                el.scroll_into_view_if_needed(None).await?;
                Ok(())
            }
            None => anyhow::bail!("No element matching {}", sel),
        }
    }

    async fn title(&self) -> Result<String> {
        let page = self.page.lock().await;
        Ok(page.title().await?)
    }

    async fn eval(&self, script: &str) -> Result<serde_json::Value> {
        let page = self.page.lock().await;
        let value: serde_json::Value = page.evaluate(script, ()).await?;
        Ok(value)
    }

    async fn close(&self) -> Result<()> {
        self.browser.close().await?;
        log::info!("browser closed");
        Ok(())
    }
}
