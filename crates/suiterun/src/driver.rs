//! BrowserDriver - the browser capability seam
//!
//! Everything the orchestration core does to a browser goes through the
//! [`BrowserDriver`] trait: navigation, element lookup, key input, script
//! execution and screenshots. Two implementations exist:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  BrowserDriver (async trait, &self receivers)                 │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────┐   ┌──────────────────────────┐  │
//! │  │  ChromiumDriver         │   │  MockDriver              │  │
//! │  │  (feature = "browser")  │   │  (always available)      │  │
//! │  │  CDP via chromiumoxide  │   │  scripted page model     │  │
//! │  └─────────────────────────┘   └──────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! All methods take `&self` so a driver can be shared between the waiter
//! and callbacks running nested waits; implementations use interior
//! mutability where they need state.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::locator::Selector;
use crate::result::{RunError, RunResult};

/// Handle to an element found on the current page
///
/// Handles are positional: they refer to the `index`-th match of `selector`
/// at lookup time and go stale when the page changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Selector the element was found with
    #[serde(skip)]
    pub selector: Option<Selector>,
    /// Position among the selector's matches
    pub index: usize,
    /// Element tag name (lowercase)
    pub tag_name: String,
    /// Rendered text content
    pub text_content: Option<String>,
    /// Whether the element is displayed
    pub visible: bool,
}

impl ElementHandle {
    /// Create a new, visible element handle
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            selector: None,
            index: 0,
            tag_name: tag_name.into(),
            text_content: None,
            visible: true,
        }
    }

    /// Set text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Set visibility
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Check if element is displayed
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Trimmed text content, empty when absent
    #[must_use]
    pub fn text(&self) -> &str {
        self.text_content.as_deref().map_or("", str::trim)
    }
}

/// Keys the orchestration core sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Tab
    Tab,
    /// Enter / Return
    Enter,
}

impl Key {
    /// DOM key name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tab => "Tab",
            Self::Enter => "Enter",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screenshot image encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG
    #[default]
    Jpeg,
    /// PNG
    Png,
}

impl ImageFormat {
    /// File extension without the dot
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Screenshot data with metadata
#[derive(Debug, Clone)]
pub struct Screenshot {
    /// Encoded image data
    pub data: Vec<u8>,
    /// Encoding of `data`
    pub format: ImageFormat,
    /// Timestamp when screenshot was taken
    pub timestamp: std::time::SystemTime,
}

impl Screenshot {
    /// Create a new screenshot
    #[must_use]
    pub fn new(data: Vec<u8>, format: ImageFormat) -> Self {
        Self {
            data,
            format,
            timestamp: std::time::SystemTime::now(),
        }
    }

    /// Get the size in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if screenshot is valid (has data)
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.data.is_empty()
    }
}

/// Abstract driver trait for browser automation
///
/// # Implementations
///
/// - `ChromiumDriver` - CDP via chromiumoxide (`browser` feature)
/// - [`MockDriver`] - scripted page model for tests
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Navigate to URL
    async fn navigate(&self, url: &str) -> RunResult<()>;

    /// Get current URL
    async fn current_url(&self) -> RunResult<String>;

    /// First element matching the selector, visible or not
    async fn find_element(&self, selector: &Selector) -> RunResult<Option<ElementHandle>>;

    /// All elements matching the selector
    async fn find_elements(&self, selector: &Selector) -> RunResult<Vec<ElementHandle>>;

    /// Click the first element matching the selector
    async fn click(&self, selector: &Selector) -> RunResult<()>;

    /// Click a previously found element
    async fn click_element(&self, element: &ElementHandle) -> RunResult<()>;

    /// Type text into the first element matching the selector
    async fn send_keys(&self, selector: &Selector, text: &str) -> RunResult<()>;

    /// Send a single key press to the first element matching the selector
    async fn press_key(&self, selector: &Selector, key: Key) -> RunResult<()>;

    /// Submit the form owning the first element matching the selector
    async fn submit(&self, selector: &Selector) -> RunResult<()>;

    /// Execute JavaScript in page context and return its value
    async fn execute_script(&self, script: &str) -> RunResult<serde_json::Value>;

    /// Capture the current viewport
    async fn screenshot(&self, format: ImageFormat) -> RunResult<Screenshot>;

    /// Close the browser session
    async fn close(&self) -> RunResult<()>;
}

#[async_trait]
impl<T: BrowserDriver + ?Sized> BrowserDriver for std::sync::Arc<T> {
    async fn navigate(&self, url: &str) -> RunResult<()> {
        (**self).navigate(url).await
    }

    async fn current_url(&self) -> RunResult<String> {
        (**self).current_url().await
    }

    async fn find_element(&self, selector: &Selector) -> RunResult<Option<ElementHandle>> {
        (**self).find_element(selector).await
    }

    async fn find_elements(&self, selector: &Selector) -> RunResult<Vec<ElementHandle>> {
        (**self).find_elements(selector).await
    }

    async fn click(&self, selector: &Selector) -> RunResult<()> {
        (**self).click(selector).await
    }

    async fn click_element(&self, element: &ElementHandle) -> RunResult<()> {
        (**self).click_element(element).await
    }

    async fn send_keys(&self, selector: &Selector, text: &str) -> RunResult<()> {
        (**self).send_keys(selector, text).await
    }

    async fn press_key(&self, selector: &Selector, key: Key) -> RunResult<()> {
        (**self).press_key(selector, key).await
    }

    async fn submit(&self, selector: &Selector) -> RunResult<()> {
        (**self).submit(selector).await
    }

    async fn execute_script(&self, script: &str) -> RunResult<serde_json::Value> {
        (**self).execute_script(script).await
    }

    async fn screenshot(&self, format: ImageFormat) -> RunResult<Screenshot> {
        (**self).screenshot(format).await
    }

    async fn close(&self) -> RunResult<()> {
        (**self).close().await
    }
}

// =============================================================================
// MOCK DRIVER
// =============================================================================

/// Event that can fire a scripted page change on the [`MockDriver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Navigation to a URL containing the given text
    Navigate(String),
    /// Click on an element matching the selector
    Click(Selector),
    /// Key press on an element matching the selector
    Key(Selector, Key),
    /// Text typed into an element matching the selector
    SendKeys(Selector),
    /// Form submission from an element matching the selector
    Submit(Selector),
}

/// Scripted page change applied when a [`Trigger`] fires
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Make the selector's element visible (adding it if absent)
    Show(Selector),
    /// Hide the selector's elements
    Hide(Selector),
    /// Remove the selector's elements from the page
    Remove(Selector),
    /// Change the current URL
    SetUrl(String),
    /// Make scripts containing the fragment return the value
    ScriptResult(String, serde_json::Value),
}

#[derive(Debug, Clone)]
enum ScriptResponse {
    Values(VecDeque<serde_json::Value>),
    Error(String),
}

#[derive(Debug, Default)]
struct MockState {
    url: String,
    elements: HashMap<Selector, Vec<ElementHandle>>,
    pending_reveals: HashMap<Selector, usize>,
    rules: Vec<(Trigger, Effect)>,
    scripts: Vec<(String, ScriptResponse)>,
    typed: HashMap<Selector, String>,
    failures: HashMap<&'static str, VecDeque<String>>,
    history: Vec<String>,
    closed: bool,
}

impl MockState {
    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Show(selector) => {
                let handles = self.elements.entry(selector).or_default();
                if handles.is_empty() {
                    handles.push(ElementHandle::new("div"));
                }
                for handle in handles {
                    handle.visible = true;
                }
            }
            Effect::Hide(selector) => {
                for handle in self.elements.entry(selector).or_default() {
                    handle.visible = false;
                }
            }
            Effect::Remove(selector) => {
                self.elements.remove(&selector);
            }
            Effect::SetUrl(url) => self.url = url,
            Effect::ScriptResult(fragment, value) => {
                self.scripts
                    .push((fragment, ScriptResponse::Values(VecDeque::from([value]))));
            }
        }
    }

    fn fire(&mut self, fired: &Trigger) {
        let effects: Vec<Effect> = self
            .rules
            .iter()
            .filter(|(trigger, _)| match (trigger, fired) {
                (Trigger::Navigate(pattern), Trigger::Navigate(url)) => url.contains(pattern.as_str()),
                _ => trigger == fired,
            })
            .map(|(_, effect)| effect.clone())
            .collect();
        for effect in effects {
            self.apply(effect);
        }
    }

    fn injected_failure(&mut self, method: &'static str) -> RunResult<()> {
        match self.failures.get_mut(method).and_then(VecDeque::pop_front) {
            Some(message) => Err(RunError::driver(message)),
            None => Ok(()),
        }
    }

    fn lookup(&mut self, selector: &Selector) -> Vec<ElementHandle> {
        if let Some(remaining) = self.pending_reveals.get_mut(selector) {
            if *remaining == 0 {
                self.pending_reveals.remove(selector);
                self.apply(Effect::Show(selector.clone()));
            } else {
                *remaining -= 1;
            }
        }
        self.elements
            .get(selector)
            .map(|handles| {
                handles
                    .iter()
                    .enumerate()
                    .map(|(index, handle)| ElementHandle {
                        selector: Some(selector.clone()),
                        index,
                        ..handle.clone()
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn require(&mut self, selector: &Selector) -> RunResult<ElementHandle> {
        self.lookup(selector)
            .into_iter()
            .next()
            .ok_or_else(|| RunError::driver(format!("no such element: {selector}")))
    }
}

/// Mock driver for unit testing
///
/// Models a page as a set of elements keyed by selector, plus trigger rules
/// that change the page when the code under test navigates, clicks or types.
/// Every call is recorded in [`MockDriver::history`].
#[derive(Debug)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl Default for MockDriver {
    fn default() -> Self {
        let driver = Self {
            state: Mutex::new(MockState::default()),
        };
        driver.set_script_result("document.readyState", serde_json::json!("complete"));
        driver
    }
}

impl MockDriver {
    /// Create new mock driver with a page that reports itself loaded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add an element under the selector
    pub fn add_element(&self, selector: Selector, element: ElementHandle) {
        self.state().elements.entry(selector).or_default().push(element);
    }

    /// Make the selector's element visible now
    pub fn show(&self, selector: Selector) {
        self.state().apply(Effect::Show(selector));
    }

    /// Make the selector's element visible after it has been looked up `lookups` times
    pub fn show_after(&self, selector: Selector, lookups: usize) {
        self.state().pending_reveals.insert(selector, lookups);
    }

    /// Hide the selector's elements
    pub fn hide(&self, selector: Selector) {
        self.state().apply(Effect::Hide(selector));
    }

    /// Register a page change for a trigger; rules fire every time
    pub fn on(&self, trigger: Trigger, effect: Effect) {
        self.state().rules.push((trigger, effect));
    }

    /// Scripts containing `fragment` return `value`
    pub fn set_script_result(&self, fragment: impl Into<String>, value: serde_json::Value) {
        self.state().apply(Effect::ScriptResult(fragment.into(), value));
    }

    /// Scripts containing `fragment` return `values` in order; the last one repeats
    pub fn push_script_results(&self, fragment: impl Into<String>, values: Vec<serde_json::Value>) {
        self.state()
            .scripts
            .push((fragment.into(), ScriptResponse::Values(values.into())));
    }

    /// Scripts containing `fragment` raise a driver error
    pub fn fail_script(&self, fragment: impl Into<String>, message: impl Into<String>) {
        self.state()
            .scripts
            .push((fragment.into(), ScriptResponse::Error(message.into())));
    }

    /// The next call to `method` fails with a driver error
    pub fn fail_next(&self, method: &'static str, message: impl Into<String>) {
        self.state()
            .failures
            .entry(method)
            .or_default()
            .push_back(message.into());
    }

    /// Set the current URL without recording a navigation
    pub fn set_url(&self, url: impl Into<String>) {
        self.state().url = url.into();
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state().history.clone()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.state().history.iter().any(|c| c.starts_with(method))
    }

    /// Number of recorded calls starting with `prefix`
    #[must_use]
    pub fn call_count(&self, prefix: &str) -> usize {
        self.state()
            .history
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Text typed into the selector's element so far
    #[must_use]
    pub fn typed_text(&self, selector: &Selector) -> Option<String> {
        self.state().typed.get(selector).cloned()
    }

    /// Whether `close` has been called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state().closed
    }
}

#[async_trait]
impl BrowserDriver for MockDriver {
    async fn navigate(&self, url: &str) -> RunResult<()> {
        let mut state = self.state();
        state.history.push(format!("navigate:{url}"));
        state.injected_failure("navigate")?;
        state.url = url.to_string();
        state.fire(&Trigger::Navigate(url.to_string()));
        Ok(())
    }

    async fn current_url(&self) -> RunResult<String> {
        let mut state = self.state();
        state.injected_failure("current_url")?;
        Ok(state.url.clone())
    }

    async fn find_element(&self, selector: &Selector) -> RunResult<Option<ElementHandle>> {
        let mut state = self.state();
        state.injected_failure("find_element")?;
        Ok(state.lookup(selector).into_iter().next())
    }

    async fn find_elements(&self, selector: &Selector) -> RunResult<Vec<ElementHandle>> {
        let mut state = self.state();
        state.injected_failure("find_elements")?;
        Ok(state.lookup(selector))
    }

    async fn click(&self, selector: &Selector) -> RunResult<()> {
        let mut state = self.state();
        state.history.push(format!("click:{selector}"));
        state.injected_failure("click")?;
        state.require(selector)?;
        state.fire(&Trigger::Click(selector.clone()));
        Ok(())
    }

    async fn click_element(&self, element: &ElementHandle) -> RunResult<()> {
        let mut state = self.state();
        state.history.push(format!("click_element:{}", element.text()));
        state.injected_failure("click_element")?;
        if let Some(selector) = &element.selector {
            state.fire(&Trigger::Click(selector.clone()));
        }
        Ok(())
    }

    async fn send_keys(&self, selector: &Selector, text: &str) -> RunResult<()> {
        let mut state = self.state();
        state.history.push(format!("send_keys:{selector}"));
        state.injected_failure("send_keys")?;
        state.require(selector)?;
        state
            .typed
            .entry(selector.clone())
            .or_default()
            .push_str(text);
        state.fire(&Trigger::SendKeys(selector.clone()));
        Ok(())
    }

    async fn press_key(&self, selector: &Selector, key: Key) -> RunResult<()> {
        let mut state = self.state();
        state.history.push(format!("press_key:{selector}:{key}"));
        state.injected_failure("press_key")?;
        state.require(selector)?;
        state.fire(&Trigger::Key(selector.clone(), key));
        Ok(())
    }

    async fn submit(&self, selector: &Selector) -> RunResult<()> {
        let mut state = self.state();
        state.history.push(format!("submit:{selector}"));
        state.injected_failure("submit")?;
        state.require(selector)?;
        state.fire(&Trigger::Submit(selector.clone()));
        Ok(())
    }

    async fn execute_script(&self, script: &str) -> RunResult<serde_json::Value> {
        let mut state = self.state();
        state.injected_failure("execute_script")?;
        let Some((_, response)) = state
            .scripts
            .iter_mut()
            .rev()
            .find(|(fragment, _)| script.contains(fragment.as_str()))
        else {
            return Ok(serde_json::Value::Null);
        };
        match response {
            ScriptResponse::Error(message) => Err(RunError::driver(message.clone())),
            ScriptResponse::Values(values) => {
                if values.len() > 1 {
                    Ok(values.pop_front().unwrap_or_default())
                } else {
                    Ok(values.front().cloned().unwrap_or_default())
                }
            }
        }
    }

    async fn screenshot(&self, format: ImageFormat) -> RunResult<Screenshot> {
        let mut state = self.state();
        state.history.push("screenshot".to_string());
        state
            .injected_failure("screenshot")
            .map_err(|e| RunError::Screenshot {
                message: e.to_string(),
            })?;
        let magic = match format {
            ImageFormat::Jpeg => vec![0xFF, 0xD8, 0xFF, 0xD9],
            ImageFormat::Png => vec![0x89, 0x50, 0x4E, 0x47],
        };
        Ok(Screenshot::new(magic, format))
    }

    async fn close(&self) -> RunResult<()> {
        let mut state = self.state();
        state.history.push("close".to_string());
        state.closed = true;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    mod element_handle_tests {
        use super::*;

        #[test]
        fn test_element_handle_creation() {
            let elem = ElementHandle::new("button").with_text("  Allow ");
            assert_eq!(elem.tag_name, "button");
            assert_eq!(elem.text(), "Allow");
            assert!(elem.is_visible());
        }

        #[test]
        fn test_element_handle_visibility() {
            let elem = ElementHandle::new("div").with_visible(false);
            assert!(!elem.is_visible());
            assert_eq!(elem.text(), "");
        }
    }

    mod screenshot_tests {
        use super::*;

        #[test]
        fn test_screenshot_size_and_validity() {
            let screenshot = Screenshot::new(vec![0; 1024], ImageFormat::Png);
            assert_eq!(screenshot.size_bytes(), 1024);
            assert!(screenshot.is_valid());
            assert!(!Screenshot::new(vec![], ImageFormat::Jpeg).is_valid());
        }

        #[test]
        fn test_image_format_extension() {
            assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
            assert_eq!(ImageFormat::Png.extension(), "png");
            assert_eq!(ImageFormat::default(), ImageFormat::Jpeg);
        }
    }

    mod mock_driver_tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_driver_navigate() {
            let driver = MockDriver::new();
            driver.navigate("https://example.com").await.unwrap();
            assert_eq!(driver.current_url().await.unwrap(), "https://example.com");
            assert!(driver.was_called("navigate"));
        }

        #[tokio::test]
        async fn test_page_reports_loaded_by_default() {
            let driver = MockDriver::new();
            let state = driver
                .execute_script("return document.readyState")
                .await
                .unwrap();
            assert_eq!(state, json!("complete"));
            let unknown = driver.execute_script("return 1").await.unwrap();
            assert!(unknown.is_null());
        }

        #[tokio::test]
        async fn test_click_trigger_reveals_element() {
            let driver = MockDriver::new();
            let button = Selector::id("go");
            let panel = Selector::id("panel");
            driver.show(button.clone());
            driver.on(Trigger::Click(button.clone()), Effect::Show(panel.clone()));

            assert!(driver.find_element(&panel).await.unwrap().is_none());
            driver.click(&button).await.unwrap();
            let found = driver.find_element(&panel).await.unwrap().unwrap();
            assert!(found.is_visible());
            assert_eq!(found.selector, Some(panel));
        }

        #[tokio::test]
        async fn test_navigate_trigger_matches_substring() {
            let driver = MockDriver::new();
            let field = Selector::id("user");
            driver.on(
                Trigger::Navigate("login".into()),
                Effect::Show(field.clone()),
            );
            driver.navigate("https://x/other").await.unwrap();
            assert!(driver.find_element(&field).await.unwrap().is_none());
            driver.navigate("https://x/login?a=1").await.unwrap();
            assert!(driver.find_element(&field).await.unwrap().is_some());
        }

        #[tokio::test]
        async fn test_click_missing_element_errors() {
            let driver = MockDriver::new();
            let err = driver.click(&Selector::id("ghost")).await.unwrap_err();
            assert!(matches!(err, RunError::Driver { .. }));
        }

        #[tokio::test]
        async fn test_show_after_lookups() {
            let driver = MockDriver::new();
            let sel = Selector::id("late");
            driver.show_after(sel.clone(), 2);
            assert!(driver.find_element(&sel).await.unwrap().is_none());
            assert!(driver.find_element(&sel).await.unwrap().is_none());
            assert!(driver.find_element(&sel).await.unwrap().is_some());
        }

        #[tokio::test]
        async fn test_script_sequence_last_repeats() {
            let driver = MockDriver::new();
            driver.push_script_results("payload", vec![json!(null), json!({"a": 1})]);
            assert!(driver.execute_script("payload()").await.unwrap().is_null());
            assert_eq!(driver.execute_script("payload()").await.unwrap(), json!({"a": 1}));
            assert_eq!(driver.execute_script("payload()").await.unwrap(), json!({"a": 1}));
        }

        #[tokio::test]
        async fn test_fail_script_and_fail_next() {
            let driver = MockDriver::new();
            driver.fail_script("boom", "ReferenceError");
            assert!(driver.execute_script("boom()").await.is_err());

            driver.fail_next("navigate", "net::ERR");
            assert!(driver.navigate("https://a").await.is_err());
            assert!(driver.navigate("https://a").await.is_ok());
        }

        #[tokio::test]
        async fn test_typed_text_and_history() {
            let driver = MockDriver::new();
            let field = Selector::id("user");
            driver.show(field.clone());
            driver.send_keys(&field, "alice").await.unwrap();
            driver.press_key(&field, Key::Tab).await.unwrap();
            assert_eq!(driver.typed_text(&field).as_deref(), Some("alice"));
            assert_eq!(driver.call_count("send_keys"), 1);
            assert!(driver.history().iter().any(|h| h == "press_key:id=user:Tab"));
            assert!(!driver.history().iter().any(|h| h.contains("alice")));
        }

        #[tokio::test]
        async fn test_screenshot_failure_maps_to_screenshot_error() {
            let driver = MockDriver::new();
            driver.fail_next("screenshot", "no surface");
            let err = driver.screenshot(ImageFormat::Png).await.unwrap_err();
            assert!(matches!(err, RunError::Screenshot { .. }));
            let ok = driver.screenshot(ImageFormat::Png).await.unwrap();
            assert!(ok.is_valid());
        }

        #[tokio::test]
        async fn test_close_marks_closed() {
            let driver = MockDriver::new();
            driver.close().await.unwrap();
            assert!(driver.is_closed());
        }
    }
}
