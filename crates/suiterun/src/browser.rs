//! Chromium control over the Chrome DevTools Protocol.
//!
//! With the `browser` feature, [`ChromiumDriver`] implements
//! [`BrowserDriver`](crate::driver::BrowserDriver) with chromiumoxide.
//! Element queries, clicks and submits run as page scripts built from the
//! [`Selector`]'s JavaScript query, so XPath and CSS locators behave the
//! same. Typing goes through real key events.
//!
//! Chrome and Edge are supported. Firefox and remote WebDriver endpoints are
//! rejected at launch.

use std::path::PathBuf;

use crate::config::{BrowserConfig, BrowserType};
use crate::locator::Selector;
use crate::result::{RunError, RunResult};

/// Wrap a WebDriver-style script body (`return ...`) as an expression
#[must_use]
pub fn script_expression(script: &str) -> String {
    format!("(() => {{ {script} }})()")
}

/// Expression describing every match of `selector` as `{tag, text, visible}`
#[must_use]
pub fn describe_elements_script(selector: &Selector) -> String {
    format!(
        "{}.map(e => ({{ \
           tag: e.tagName.toLowerCase(), \
           text: (e.innerText ?? e.textContent ?? ''), \
           visible: !!(e.offsetWidth || e.offsetHeight || e.getClientRects().length) \
                    && getComputedStyle(e).visibility !== 'hidden' \
         }}))",
        selector.to_query_all()
    )
}

/// Expression clicking the `index`-th match; evaluates to `false` if absent
#[must_use]
pub fn click_script(selector: &Selector, index: usize) -> String {
    format!(
        "(() => {{ const e = {}[{index}]; if (!e) return false; \
         e.scrollIntoView({{ block: 'center' }}); e.click(); return true; }})()",
        selector.to_query_all()
    )
}

/// Expression submitting the form owning the first match
#[must_use]
pub fn submit_script(selector: &Selector) -> String {
    format!(
        "(() => {{ const e = {}; const f = e && (e.form || e.closest('form')); \
         if (!f) return false; \
         if (f.requestSubmit) {{ f.requestSubmit(); }} else {{ f.submit(); }} return true; }})()",
        selector.to_query()
    )
}

/// CSS equivalent for non-XPath selectors
#[must_use]
pub fn css_for(selector: &Selector) -> Option<String> {
    match selector {
        Selector::XPath(_) => None,
        Selector::Css(css) => Some(css.clone()),
        Selector::Id(id) => Some(format!("[id={id:?}]")),
        Selector::ClassName(class) => Some(format!(".{class}")),
        Selector::TagName(tag) => Some(tag.clone()),
    }
}

fn executable_name(browser: BrowserType) -> &'static str {
    match (browser, cfg!(windows)) {
        (BrowserType::Edge, true) => "msedge.exe",
        (BrowserType::Edge, false) => "microsoft-edge",
        (_, true) => "chrome.exe",
        (_, false) => "google-chrome",
    }
}

/// Browser executable for the configuration; `None` lets chromiumoxide
/// find Chrome on its own
pub fn resolve_executable(config: &BrowserConfig) -> RunResult<Option<PathBuf>> {
    match config.browser_type {
        BrowserType::Firefox | BrowserType::Remote => Err(RunError::config(format!(
            "{} is not supported by the Chromium driver; use Chrome or Edge",
            config.browser_type
        ))),
        browser => match config.drivers_path.as_deref() {
            Some(path) if path.is_dir() => Ok(Some(path.join(executable_name(browser)))),
            Some(path) => Ok(Some(path.to_path_buf())),
            None if browser == BrowserType::Edge => Err(RunError::config(
                "Edge needs browser.drivers_path pointing at msedge",
            )),
            None => Ok(None),
        },
    }
}

#[cfg(feature = "browser")]
mod cdp {
    use super::*;
    use crate::driver::{BrowserDriver, ElementHandle, ImageFormat, Key, Screenshot};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
    use chromiumoxide::element::Element as CdpElement;
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::Deserialize;
    use tokio::sync::Mutex;

    #[derive(Debug, Deserialize)]
    struct RawElement {
        tag: String,
        text: String,
        visible: bool,
    }

    fn driver_error(e: impl std::fmt::Display) -> RunError {
        RunError::driver(e.to_string())
    }

    /// Chrome/Edge session over CDP
    #[derive(Debug)]
    pub struct ChromiumDriver {
        browser: Mutex<CdpBrowser>,
        page: CdpPage,
        handle: tokio::task::JoinHandle<()>,
    }

    impl ChromiumDriver {
        /// Launch a browser and open a blank page
        pub async fn launch(config: &BrowserConfig) -> RunResult<Self> {
            let executable = resolve_executable(config)?;
            let mut builder = CdpConfig::builder().window_size(1920, 1080);
            if !config.headless {
                builder = builder.with_head();
            }
            if config.private_mode {
                builder = builder.incognito();
            }
            if let Some(path) = executable.as_deref() {
                builder = builder.chrome_executable(path);
            }
            if let Some(ua) = &config.user_agent {
                builder = builder.arg(format!("--user-agent={ua}"));
            }
            let cdp_config = builder.build().map_err(|e| {
                RunError::config(format!("invalid browser configuration: {e}"))
            })?;

            tracing::info!(
                browser = %config.browser_type,
                headless = config.headless,
                private = config.private_mode,
                "launching browser"
            );
            let (browser, mut handler) = CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| RunError::driver(format!("browser launch failed: {e}")))?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(driver_error)?;

            Ok(Self {
                browser: Mutex::new(browser),
                page,
                handle,
            })
        }

        async fn evaluate(&self, expression: String) -> RunResult<serde_json::Value> {
            let params = EvaluateParams::builder()
                .expression(expression)
                .return_by_value(true)
                .await_promise(true)
                .build()
                .map_err(RunError::driver)?;
            let result = self
                .page
                .evaluate_expression(params)
                .await
                .map_err(driver_error)?;
            Ok(result.value().cloned().unwrap_or_default())
        }

        async fn element(&self, selector: &Selector) -> RunResult<CdpElement> {
            let found = match css_for(selector) {
                Some(css) => self.page.find_element(css).await,
                None => self.page.find_xpath(selector.expression()).await,
            };
            found.map_err(|e| RunError::driver(format!("no such element {selector}: {e}")))
        }

        async fn click_nth(&self, selector: &Selector, index: usize) -> RunResult<()> {
            match self.evaluate(click_script(selector, index)).await? {
                serde_json::Value::Bool(true) => Ok(()),
                _ => Err(RunError::driver(format!("no such element: {selector}"))),
            }
        }
    }

    #[async_trait]
    impl BrowserDriver for ChromiumDriver {
        async fn navigate(&self, url: &str) -> RunResult<()> {
            self.page
                .goto(url)
                .await
                .map(|_| ())
                .map_err(|e| RunError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })
        }

        async fn current_url(&self) -> RunResult<String> {
            Ok(self
                .page
                .url()
                .await
                .map_err(driver_error)?
                .unwrap_or_default())
        }

        async fn find_element(&self, selector: &Selector) -> RunResult<Option<ElementHandle>> {
            Ok(self.find_elements(selector).await?.into_iter().next())
        }

        async fn find_elements(&self, selector: &Selector) -> RunResult<Vec<ElementHandle>> {
            let value = self.evaluate(describe_elements_script(selector)).await?;
            let raw: Vec<RawElement> = serde_json::from_value(value)?;
            Ok(raw
                .into_iter()
                .enumerate()
                .map(|(index, e)| ElementHandle {
                    selector: Some(selector.clone()),
                    index,
                    tag_name: e.tag,
                    text_content: Some(e.text),
                    visible: e.visible,
                })
                .collect())
        }

        async fn click(&self, selector: &Selector) -> RunResult<()> {
            self.click_nth(selector, 0).await
        }

        async fn click_element(&self, element: &ElementHandle) -> RunResult<()> {
            let selector = element
                .selector
                .as_ref()
                .ok_or_else(|| RunError::driver("element handle has no selector"))?;
            self.click_nth(selector, element.index).await
        }

        async fn send_keys(&self, selector: &Selector, text: &str) -> RunResult<()> {
            let element = self.element(selector).await?;
            element.click().await.map_err(driver_error)?;
            element.type_str(text).await.map_err(driver_error)?;
            Ok(())
        }

        async fn press_key(&self, selector: &Selector, key: Key) -> RunResult<()> {
            let element = self.element(selector).await?;
            element.press_key(key.as_str()).await.map_err(driver_error)?;
            Ok(())
        }

        async fn submit(&self, selector: &Selector) -> RunResult<()> {
            match self.evaluate(submit_script(selector)).await? {
                serde_json::Value::Bool(true) => Ok(()),
                _ => Err(RunError::driver(format!("no form to submit for {selector}"))),
            }
        }

        async fn execute_script(&self, script: &str) -> RunResult<serde_json::Value> {
            self.evaluate(script_expression(script)).await
        }

        async fn screenshot(&self, format: ImageFormat) -> RunResult<Screenshot> {
            let cdp_format = match format {
                ImageFormat::Jpeg => CaptureScreenshotFormat::Jpeg,
                ImageFormat::Png => CaptureScreenshotFormat::Png,
            };
            let params = CaptureScreenshotParams::builder().format(cdp_format).build();
            let screenshot = self
                .page
                .execute(params)
                .await
                .map_err(|e| RunError::Screenshot {
                    message: e.to_string(),
                })?;

            use base64::Engine;
            let data = base64::engine::general_purpose::STANDARD
                .decode(&screenshot.data)
                .map_err(|e| RunError::Screenshot {
                    message: e.to_string(),
                })?;
            Ok(Screenshot::new(data, format))
        }

        async fn close(&self) -> RunResult<()> {
            let mut browser = self.browser.lock().await;
            let closed = browser.close().await.map(|_| ()).map_err(driver_error);
            let _ = browser.wait().await;
            self.handle.abort();
            closed
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::ChromiumDriver;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod script_tests {
        use super::*;

        #[test]
        fn test_script_expression_wraps_return() {
            assert_eq!(
                script_expression("return document.readyState"),
                "(() => { return document.readyState })()"
            );
        }

        #[test]
        fn test_describe_uses_query_all() {
            let script = describe_elements_script(&Selector::class_name("apps-list"));
            assert!(script.starts_with("Array.from(document.getElementsByClassName(\"apps-list\"))"));
            assert!(script.contains("visible:"));
        }

        #[test]
        fn test_click_script_indexes() {
            let script = click_script(&Selector::css("button"), 2);
            assert!(script.contains("[2]"));
            assert!(script.contains("e.click()"));
        }

        #[test]
        fn test_submit_script_finds_form() {
            let script = submit_script(&Selector::xpath("//input[@type='password']"));
            assert!(script.contains("closest('form')"));
        }

        #[test]
        fn test_css_for() {
            assert_eq!(css_for(&Selector::id("a b")).as_deref(), Some("[id=\"a b\"]"));
            assert_eq!(css_for(&Selector::class_name("x")).as_deref(), Some(".x"));
            assert!(css_for(&Selector::xpath("//a")).is_none());
        }
    }

    mod executable_tests {
        use super::*;

        #[test]
        fn test_firefox_and_remote_rejected() {
            for browser_type in [BrowserType::Firefox, BrowserType::Remote] {
                let config = BrowserConfig {
                    browser_type,
                    ..BrowserConfig::default()
                };
                assert!(matches!(
                    resolve_executable(&config),
                    Err(RunError::Config { .. })
                ));
            }
        }

        #[test]
        fn test_chrome_autodetects() {
            assert!(resolve_executable(&BrowserConfig::default()).unwrap().is_none());
        }

        #[test]
        fn test_edge_needs_path() {
            let config = BrowserConfig {
                browser_type: BrowserType::Edge,
                ..BrowserConfig::default()
            };
            assert!(resolve_executable(&config).is_err());
        }

        #[test]
        fn test_directory_gets_executable_name() {
            let dir = tempfile::tempdir().unwrap();
            let config = BrowserConfig {
                browser_type: BrowserType::Edge,
                drivers_path: Some(dir.path().to_path_buf()),
                ..BrowserConfig::default()
            };
            let exe = resolve_executable(&config).unwrap().unwrap();
            assert!(exe.starts_with(dir.path()));
            assert!(exe
                .file_name()
                .unwrap()
                .to_string_lossy()
                .contains("edge"));
        }

        #[test]
        fn test_file_path_used_verbatim() {
            let config = BrowserConfig {
                drivers_path: Some(PathBuf::from("/opt/chrome/chrome")),
                ..BrowserConfig::default()
            };
            assert_eq!(
                resolve_executable(&config).unwrap(),
                Some(PathBuf::from("/opt/chrome/chrome"))
            );
        }
    }
}
