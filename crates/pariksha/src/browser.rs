//! Real browser control via the Chrome DevTools Protocol.
//!
//! Compiled only with the `browser` feature. [`CdpDriver`] realizes
//! [`PageDriver`](crate::driver::PageDriver) by compiling matchers to
//! JavaScript query expressions and evaluating them in the page, which keeps
//! the heuristics identical between live runs and scripted unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page as CdpPage, ScreenshotParams};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::driver::{ElementFacts, PageDriver};
use crate::matcher::{js_string, Matcher};
use crate::result::{HarnessError, HarnessResult};

/// Browser launch configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// Browser instance with a live CDP connection
#[derive(Debug)]
pub struct Browser {
    config: BrowserConfig,
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a new browser instance
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::BrowserLaunch`] if the browser cannot be
    /// launched.
    pub async fn launch(config: BrowserConfig) -> HarnessResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| HarnessError::BrowserLaunch {
                message: e.to_string(),
            })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| HarnessError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        // Drive the CDP event stream for the lifetime of the browser.
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            config,
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// Open a fresh page and return a driver over it
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Page`] if the page cannot be created.
    pub async fn new_page(&self) -> HarnessResult<CdpDriver> {
        let browser = self.inner.lock().await;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| HarnessError::page(e.to_string()))?;
        Ok(CdpDriver { page })
    }

    /// The launch configuration
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Close the browser
    pub async fn close(self) -> HarnessResult<()> {
        let mut browser = self.inner.lock().await;
        browser
            .close()
            .await
            .map_err(|e| HarnessError::page(e.to_string()))?;
        Ok(())
    }
}

/// [`PageDriver`] over one CDP page
#[derive(Debug)]
pub struct CdpDriver {
    page: CdpPage,
}

impl CdpDriver {
    async fn eval<T: DeserializeOwned>(&self, script: &str) -> HarnessResult<T> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| HarnessError::page(e.to_string()))?
            .into_value()
            .map_err(|e| HarnessError::page(e.to_string()))
    }
}

/// Wrap a statement body into an IIFE over the first match of `matcher`.
/// The body sees `el`; when nothing matches the expression yields `none`.
fn first_match_js(matcher: &Matcher, body: &str, none: &str) -> String {
    format!(
        "(() => {{ const els = {}; if (els.length === 0) return {none}; const el = els[0]; {body} }})()",
        matcher.to_collect_query()
    )
}

const VISIBILITY_CHECK: &str = "const rect = el.getBoundingClientRect(); \
     const style = window.getComputedStyle(el); \
     return rect.width > 0 && rect.height > 0 && \
     style.display !== 'none' && style.visibility !== 'hidden';";

fn fill_js(matcher: &Matcher, text: &str) -> String {
    let literal = js_string(text);
    first_match_js(
        matcher,
        &format!(
            "if (el.isContentEditable) {{ el.textContent = {literal}; }} \
             else {{ \
               const proto = el.tagName === 'TEXTAREA' ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
               const desc = Object.getOwnPropertyDescriptor(proto, 'value'); \
               if (desc && desc.set) {{ desc.set.call(el, {literal}); }} else {{ el.value = {literal}; }} \
             }} \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return true;"
        ),
        "false",
    )
}

fn describe_all_js(matcher: &Matcher) -> String {
    format!(
        "(() => {{ const els = {}; return els.map(el => {{ \
           const rect = el.getBoundingClientRect(); \
           const style = window.getComputedStyle(el); \
           return {{ \
             text: (el.textContent || '').trim(), \
             ariaLabel: el.getAttribute('aria-label'), \
             title: el.getAttribute('title'), \
             className: typeof el.className === 'string' ? el.className : null, \
             visible: rect.width > 0 && rect.height > 0 && \
               style.display !== 'none' && style.visibility !== 'hidden' \
           }}; }}); }})()",
        matcher.to_collect_query()
    )
}

#[async_trait]
impl PageDriver for CdpDriver {
    async fn navigate(&mut self, url: &str) -> HarnessResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| HarnessError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn reload(&mut self) -> HarnessResult<()> {
        self.page
            .reload()
            .await
            .map_err(|e| HarnessError::page(e.to_string()))?;
        Ok(())
    }

    async fn count(&self, matcher: &Matcher) -> HarnessResult<usize> {
        self.eval(&matcher.to_count_query()).await
    }

    async fn is_visible(&self, matcher: &Matcher) -> HarnessResult<bool> {
        self.eval(&first_match_js(matcher, VISIBILITY_CHECK, "false"))
            .await
    }

    async fn click(&self, matcher: &Matcher) -> HarnessResult<()> {
        let clicked: bool = self
            .eval(&first_match_js(matcher, "el.click(); return true;", "false"))
            .await?;
        if clicked {
            Ok(())
        } else {
            Err(HarnessError::page(format!("nothing to click for {matcher}")))
        }
    }

    async fn fill(&self, matcher: &Matcher, text: &str) -> HarnessResult<()> {
        let filled: bool = self.eval(&fill_js(matcher, text)).await?;
        if filled {
            Ok(())
        } else {
            Err(HarnessError::page(format!("nothing to fill for {matcher}")))
        }
    }

    async fn clear(&self, matcher: &Matcher) -> HarnessResult<()> {
        self.fill(matcher, "").await
    }

    async fn text_content(&self, matcher: &Matcher) -> HarnessResult<Option<String>> {
        self.eval(&first_match_js(matcher, "return el.textContent;", "null"))
            .await
    }

    async fn attribute(&self, matcher: &Matcher, name: &str) -> HarnessResult<Option<String>> {
        let body = format!("return el.getAttribute({});", js_string(name));
        self.eval(&first_match_js(matcher, &body, "null")).await
    }

    async fn input_value(&self, matcher: &Matcher) -> HarnessResult<Option<String>> {
        self.eval(&first_match_js(
            matcher,
            "return ('value' in el) ? String(el.value) : null;",
            "null",
        ))
        .await
    }

    async fn describe_all(&self, matcher: &Matcher) -> HarnessResult<Vec<ElementFacts>> {
        self.eval(&describe_all_js(matcher)).await
    }

    async fn body_text(&self) -> HarnessResult<String> {
        self.eval("document.body ? document.body.innerText : ''")
            .await
    }

    async fn screenshot(&self) -> HarnessResult<Vec<u8>> {
        self.page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(true)
                    .build(),
            )
            .await
            .map_err(|e| HarnessError::Screenshot {
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_js_short_circuits_on_empty() {
        let js = first_match_js(&Matcher::css("textarea"), "return el.textContent;", "null");
        assert!(js.contains("if (els.length === 0) return null;"));
        assert!(js.contains("querySelectorAll(\"textarea\")"));
    }

    #[test]
    fn fill_js_uses_native_setter_and_fires_events() {
        let js = fill_js(&Matcher::css("textarea"), "api yamu");
        assert!(js.contains("Object.getOwnPropertyDescriptor"));
        assert!(js.contains("dispatchEvent(new Event('input'"));
        assert!(js.contains("dispatchEvent(new Event('change'"));
        assert!(js.contains("\"api yamu\""));
    }

    #[test]
    fn fill_js_handles_contenteditable() {
        let js = fill_js(&Matcher::css("[contenteditable=\"true\"]"), "x");
        assert!(js.contains("isContentEditable"));
        assert!(js.contains("el.textContent = \"x\""));
    }

    #[test]
    fn describe_all_js_emits_camel_case_fields() {
        let js = describe_all_js(&Matcher::css("button"));
        for field in ["text:", "ariaLabel:", "title:", "className:", "visible:"] {
            assert!(js.contains(field), "missing {field}");
        }
    }

    #[test]
    fn browser_config_builders() {
        let config = BrowserConfig::default()
            .with_viewport(800, 600)
            .with_headless(false)
            .with_no_sandbox();
        assert_eq!(config.viewport_width, 800);
        assert!(!config.headless);
        assert!(!config.sandbox);
    }
}
