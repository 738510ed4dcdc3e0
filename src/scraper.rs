use headless_chrome::{Browser, LaunchOptions, Tab};
use scraper::Html;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::ScraperConfig;
use crate::extractor::ProductPage;
use crate::{AppError, Result};

/// A launched headless browser. One session can open many pages, but a
/// page is scoped to a single extraction call.
pub struct BrowserSession {
    browser: Browser,
    user_agent: String,
}

impl BrowserSession {
    pub fn launch(config: &ScraperConfig) -> Result<Self> {
        let mut launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false) // Often needed in containerized environments
            .window_size(Some((1920, 1080)))
            .args(vec![
                std::ffi::OsStr::new("--no-sandbox"),
                std::ffi::OsStr::new("--disable-dev-shm-usage"),
                std::ffi::OsStr::new("--disable-gpu"),
                std::ffi::OsStr::new("--disable-extensions"),
            ])
            .build()
            .map_err(|e| AppError::Session(format!("failed to create launch options: {}", e)))?;

        if let Some(chrome_path) = &config.chrome_path {
            launch_options.path = Some(std::path::PathBuf::from(chrome_path));
        }

        let browser = Browser::new(launch_options)
            .map_err(|e| AppError::Session(format!("failed to launch browser: {}", e)))?;

        Ok(Self {
            browser,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Navigates a fresh tab to `url`. The returned page closes its tab
    /// when dropped, on every exit path.
    pub fn open(&self, url: &str) -> Result<PageSession> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| AppError::Session(format!("failed to create tab: {}", e)))?;

        tab.set_user_agent(&self.user_agent, None, None)
            .map_err(|e| AppError::Session(format!("failed to set user agent: {}", e)))?;

        tab.navigate_to(url)
            .map_err(|e| AppError::Session(format!("navigation to {} failed: {}", url, e)))?;
        tab.wait_until_navigated()
            .map_err(|e| AppError::Session(format!("page load failed: {}", e)))?;

        Ok(PageSession { tab })
    }
}

/// A navigated tab exposed to the extractor as a `ProductPage`.
pub struct PageSession {
    tab: Arc<Tab>,
}

impl ProductPage for PageSession {
    fn locate_text(&self, selector: &str, timeout: Duration) -> Result<Option<String>> {
        // A selector that never resolves is a normal miss, not a fault.
        let element = match self.tab.wait_for_element_with_custom_timeout(selector, timeout) {
            Ok(element) => element,
            Err(e) => {
                debug!(selector, error = %e, "selector wait failed");
                return Ok(None);
            }
        };

        match element.get_inner_text() {
            Ok(text) if !text.trim().is_empty() => Ok(Some(text)),
            Ok(_) => Ok(None),
            Err(e) => {
                debug!(selector, error = %e, "text extraction failed");
                Ok(None)
            }
        }
    }

    fn full_text(&self) -> Result<String> {
        let html = self
            .tab
            .get_content()
            .map_err(|e| AppError::Session(format!("failed to get page content: {}", e)))?;
        Ok(html_to_text(&html))
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        let _ = self.tab.close(true);
    }
}

/// Flattens page HTML into line-separated text for the fallback scan.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .root_element()
        .text()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
