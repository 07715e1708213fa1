//! Condition Waiter
//!
//! Bridges asynchronous page rendering and sequential test logic: a
//! [`Condition`] is polled against the browser until it yields a value or a
//! timeout elapses, then an optional success callback runs on the satisfied
//! value.
//!
//! ```ignore
//! let field = Wait::until(Visible::new(selector))
//!     .timeout(Duration::from_secs(30))
//!     .run(&waiter)
//!     .await?;
//! ```
//!
//! Polling sleeps with `tokio::time::sleep`, so only the calling task is
//! suspended. Every poll and every sleep observes the run's
//! [`CancellationToken`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::driver::{BrowserDriver, ElementHandle};
use crate::locator::Selector;
use crate::result::{RunError, RunResult};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (500ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Script reporting the document ready state
pub const READY_STATE_SCRIPT: &str = "return document.readyState";

// =============================================================================
// CONDITION TRAIT
// =============================================================================

/// A predicate over the browser that yields a value once satisfied
#[async_trait]
pub trait Condition: Send + Sync {
    /// Value produced when the condition holds
    type Output: Send + Sync;

    /// Check the condition once; `None` means "not yet"
    async fn poll(&self, driver: &dyn BrowserDriver) -> RunResult<Option<Self::Output>>;

    /// Get description for error messages
    fn description(&self) -> String;
}

/// Element matching the selector exists and is displayed
#[derive(Debug, Clone)]
pub struct Visible(pub Selector);

impl Visible {
    /// Wait for the selector's element to be displayed
    #[must_use]
    pub const fn new(selector: Selector) -> Self {
        Self(selector)
    }
}

#[async_trait]
impl Condition for Visible {
    type Output = ElementHandle;

    async fn poll(&self, driver: &dyn BrowserDriver) -> RunResult<Option<ElementHandle>> {
        Ok(driver
            .find_element(&self.0)
            .await?
            .filter(ElementHandle::is_visible))
    }

    fn description(&self) -> String {
        format!("element {} visible", self.0)
    }
}

/// Element matching the selector exists, displayed or not
#[derive(Debug, Clone)]
pub struct Present(pub Selector);

#[async_trait]
impl Condition for Present {
    type Output = ElementHandle;

    async fn poll(&self, driver: &dyn BrowserDriver) -> RunResult<Option<ElementHandle>> {
        driver.find_element(&self.0).await
    }

    fn description(&self) -> String {
        format!("element {} present", self.0)
    }
}

/// `document.readyState` is `complete`
#[derive(Debug, Clone, Copy, Default)]
pub struct PageLoaded;

#[async_trait]
impl Condition for PageLoaded {
    type Output = ();

    async fn poll(&self, driver: &dyn BrowserDriver) -> RunResult<Option<()>> {
        match driver.execute_script(READY_STATE_SCRIPT).await {
            Ok(state) if state.as_str() == Some("complete") => Ok(Some(())),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::trace!(error = %e, "ready state not readable yet");
                Ok(None)
            }
        }
    }

    fn description(&self) -> String {
        "page load complete".to_string()
    }
}

/// A script returns a non-null value
///
/// Script errors count as "not yet": the page may still be wiring up the
/// objects the script reads.
#[derive(Debug, Clone)]
pub struct ScriptValue {
    script: String,
    label: String,
}

impl ScriptValue {
    /// Wait for `script` to return non-null
    #[must_use]
    pub fn new(script: impl Into<String>) -> Self {
        let script = script.into();
        Self {
            label: script.clone(),
            script,
        }
    }

    /// Use a short label instead of the script text in messages
    #[must_use]
    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[async_trait]
impl Condition for ScriptValue {
    type Output = serde_json::Value;

    async fn poll(&self, driver: &dyn BrowserDriver) -> RunResult<Option<serde_json::Value>> {
        match driver.execute_script(&self.script).await {
            Ok(serde_json::Value::Null) => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::trace!(error = %e, script = %self.label, "script not ready");
                Ok(None)
            }
        }
    }

    fn description(&self) -> String {
        format!("script {} to return a value", self.label)
    }
}

/// The current URL differs from `from`
#[derive(Debug, Clone)]
pub struct UrlChanged {
    /// URL to move away from
    pub from: String,
}

#[async_trait]
impl Condition for UrlChanged {
    type Output = String;

    async fn poll(&self, driver: &dyn BrowserDriver) -> RunResult<Option<String>> {
        let url = driver.current_url().await?;
        Ok((url != self.from).then_some(url))
    }

    fn description(&self) -> String {
        format!("URL to change from {}", self.from)
    }
}

/// A function-based wait condition
pub struct FnCondition<F> {
    func: F,
    description: String,
}

impl<F> fmt::Debug for FnCondition<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCondition")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<F> FnCondition<F> {
    /// Create a new function condition
    pub fn new(func: F, description: impl Into<String>) -> Self {
        Self {
            func,
            description: description.into(),
        }
    }
}

#[async_trait]
impl<F, T> Condition for FnCondition<F>
where
    F: Fn() -> Option<T> + Send + Sync,
    T: Send + Sync,
{
    type Output = T;

    async fn poll(&self, _driver: &dyn BrowserDriver) -> RunResult<Option<T>> {
        Ok((self.func)())
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

// =============================================================================
// CALLBACKS AND RESULTS
// =============================================================================

/// Action run once on the value of a satisfied condition
///
/// The waiter is passed along so the callback can run nested waits.
#[async_trait]
pub trait OnSatisfied<T: Send + Sync>: Send + Sync {
    /// Handle the satisfied value
    async fn call(&self, waiter: &Waiter<'_>, value: &T) -> RunResult<()>;
}

/// Details of a wait that ran out of time
#[derive(Debug, Clone)]
pub struct WaitTimeout {
    /// What was waited for
    pub description: String,
    /// Time spent polling
    pub elapsed: Duration,
    /// Configured timeout
    pub timeout: Duration,
}

impl WaitTimeout {
    /// Default error for a timed-out wait
    #[must_use]
    pub fn into_error(self) -> RunError {
        RunError::ConditionTimedOut {
            description: self.description,
            elapsed_ms: self.elapsed.as_millis() as u64,
        }
    }
}

/// Result of a wait operation
#[derive(Debug, Clone)]
pub struct WaitResult<T> {
    /// Value produced by the condition
    pub value: T,
    /// Time spent waiting
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
}

impl<T> WaitResult<T> {
    /// Take the value
    pub fn into_value(self) -> T {
        self.value
    }
}

type FailureClassifier<'c> = Box<dyn Fn(&WaitTimeout) -> RunError + Send + Sync + 'c>;

// =============================================================================
// WAIT BUILDER
// =============================================================================

/// A configured wait on one condition
pub struct Wait<'c, C: Condition> {
    condition: C,
    timeout: Duration,
    poll_interval: Option<Duration>,
    on_success: Option<Box<dyn OnSatisfied<C::Output> + 'c>>,
    on_failure: Option<FailureClassifier<'c>>,
}

impl<C: Condition + fmt::Debug> fmt::Debug for Wait<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wait")
            .field("condition", &self.condition)
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .field("on_success", &self.on_success.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}

impl<'c, C: Condition> Wait<'c, C> {
    /// Start building a wait on `condition`
    #[must_use]
    pub fn until(condition: C) -> Self {
        Self {
            condition,
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: None,
            on_success: None,
            on_failure: None,
        }
    }

    /// Set the timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the waiter's polling interval
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Run `callback` once on the satisfied value
    #[must_use]
    pub fn on_success(mut self, callback: impl OnSatisfied<C::Output> + 'c) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Map a timeout to a custom error
    #[must_use]
    pub fn on_failure(mut self, classify: impl Fn(&WaitTimeout) -> RunError + Send + Sync + 'c) -> Self {
        self.on_failure = Some(Box::new(classify));
        self
    }

    /// Poll until satisfied; a timeout is an error
    pub async fn run(self, waiter: &Waiter<'_>) -> RunResult<WaitResult<C::Output>> {
        match self.poll_until(waiter).await? {
            Ok(result) => Ok(result),
            Err(timeout) => Err(match &self.on_failure {
                Some(classify) => classify(&timeout),
                None => timeout.into_error(),
            }),
        }
    }

    /// Poll until satisfied; a timeout yields `None`
    pub async fn probe(self, waiter: &Waiter<'_>) -> RunResult<Option<C::Output>> {
        Ok(self.poll_until(waiter).await?.ok().map(WaitResult::into_value))
    }

    async fn poll_until(
        &self,
        waiter: &Waiter<'_>,
    ) -> RunResult<Result<WaitResult<C::Output>, WaitTimeout>> {
        let description = self.condition.description();
        let interval = self.poll_interval.unwrap_or(waiter.poll_interval);
        let start = Instant::now();

        loop {
            waiter.check_cancelled()?;

            if let Some(value) = self.condition.poll(waiter.driver).await? {
                let elapsed = start.elapsed();
                tracing::trace!(waited_for = %description, ?elapsed, "condition satisfied");
                if let Some(callback) = &self.on_success {
                    callback
                        .call(waiter, &value)
                        .await
                        .map_err(|e| match e {
                            RunError::Cancelled => RunError::Cancelled,
                            other => RunError::ConditionCallbackFailed {
                                description: description.clone(),
                                source: Box::new(other),
                            },
                        })?;
                }
                return Ok(Ok(WaitResult {
                    value,
                    elapsed,
                    waited_for: description,
                }));
            }

            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                return Ok(Err(WaitTimeout {
                    description,
                    elapsed,
                    timeout: self.timeout,
                }));
            }

            let nap = interval.min(self.timeout - elapsed);
            tokio::select! {
                () = waiter.cancel.cancelled() => return Err(RunError::Cancelled),
                () = tokio::time::sleep(nap) => {}
            }
        }
    }
}

// =============================================================================
// WAITER
// =============================================================================

/// Wait context: the driver to poll, the run's cancellation token and the
/// default polling interval
#[derive(Clone)]
pub struct Waiter<'a> {
    driver: &'a dyn BrowserDriver,
    cancel: CancellationToken,
    poll_interval: Duration,
}

impl fmt::Debug for Waiter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Waiter")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl<'a> Waiter<'a> {
    /// Create a waiter with the default polling interval
    #[must_use]
    pub fn new(driver: &'a dyn BrowserDriver, cancel: CancellationToken) -> Self {
        Self {
            driver,
            cancel,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Set polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The driver being polled
    #[must_use]
    pub fn driver(&self) -> &'a dyn BrowserDriver {
        self.driver
    }

    /// The run's cancellation token
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Default polling interval
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Fail with [`RunError::Cancelled`] once the run is cancelled
    pub fn check_cancelled(&self) -> RunResult<()> {
        if self.cancel.is_cancelled() {
            Err(RunError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Wait for the selector's element to be displayed
    pub async fn until_visible(&self, selector: &Selector, timeout: Duration) -> RunResult<ElementHandle> {
        Wait::until(Visible::new(selector.clone()))
            .timeout(timeout)
            .run(self)
            .await
            .map(WaitResult::into_value)
    }

    /// Whether the selector's element is displayed within `timeout`
    pub async fn is_visible_within(&self, selector: &Selector, timeout: Duration) -> RunResult<bool> {
        Ok(Wait::until(Visible::new(selector.clone()))
            .timeout(timeout)
            .probe(self)
            .await?
            .is_some())
    }

    /// Wait for the document to finish loading
    pub async fn page_loaded(&self, timeout: Duration) -> RunResult<()> {
        Wait::until(PageLoaded).timeout(timeout).run(self).await.map(|_| ())
    }

    /// Navigate, abandoning the navigation if the run is cancelled
    pub async fn navigate(&self, url: &str) -> RunResult<()> {
        self.check_cancelled()?;
        tracing::debug!(url, "navigating");
        let navigation = self.driver.navigate(url);
        tokio::select! {
            () = self.cancel.cancelled() => Err(RunError::Cancelled),
            result = navigation => result.map_err(|e| match e {
                RunError::Driver { message } => RunError::Navigation {
                    url: url.to_string(),
                    message,
                },
                other => other,
            }),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, Trigger, Effect};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountCalls(Arc<AtomicUsize>);

    #[async_trait]
    impl<T: Send + Sync> OnSatisfied<T> for CountCalls {
        async fn call(&self, _waiter: &Waiter<'_>, _value: &T) -> RunResult<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailWith(&'static str);

    #[async_trait]
    impl<T: Send + Sync> OnSatisfied<T> for FailWith {
        async fn call(&self, _waiter: &Waiter<'_>, _value: &T) -> RunResult<()> {
            Err(RunError::driver(self.0))
        }
    }

    struct NestedVisible(Selector);

    #[async_trait]
    impl OnSatisfied<ElementHandle> for NestedVisible {
        async fn call(&self, waiter: &Waiter<'_>, _value: &ElementHandle) -> RunResult<()> {
            waiter
                .until_visible(&self.0, Duration::from_secs(2))
                .await
                .map(|_| ())
        }
    }

    fn waiter(driver: &MockDriver) -> Waiter<'_> {
        Waiter::new(driver, CancellationToken::new()).with_poll_interval(Duration::from_millis(100))
    }

    mod wait_builder_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_already_true_returns_immediately_and_calls_back_once() {
            let driver = MockDriver::new();
            let sel = Selector::id("ready");
            driver.show(sel.clone());
            let calls = Arc::new(AtomicUsize::new(0));

            let result = Wait::until(Visible::new(sel))
                .timeout(Duration::from_secs(5))
                .on_success(CountCalls(Arc::clone(&calls)))
                .run(&waiter(&driver))
                .await
                .unwrap();

            assert_eq!(result.elapsed, Duration::ZERO);
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_polls_until_visible() {
            let driver = MockDriver::new();
            let sel = Selector::id("late");
            driver.show_after(sel.clone(), 3);

            let result = Wait::until(Visible::new(sel))
                .timeout(Duration::from_secs(5))
                .run(&waiter(&driver))
                .await
                .unwrap();

            assert_eq!(result.elapsed, Duration::from_millis(300));
            assert!(result.value.is_visible());
        }

        #[tokio::test(start_paused = true)]
        async fn test_timeout_default_error() {
            let driver = MockDriver::new();
            let err = Wait::until(Visible::new(Selector::id("never")))
                .timeout(Duration::from_secs(1))
                .run(&waiter(&driver))
                .await
                .unwrap_err();

            match err {
                RunError::ConditionTimedOut {
                    description,
                    elapsed_ms,
                } => {
                    assert!(description.contains("id=never"));
                    assert_eq!(elapsed_ms, 1000);
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[tokio::test(start_paused = true)]
        async fn test_on_failure_classifies_timeout() {
            let driver = MockDriver::new();
            let err = Wait::until(Visible::new(Selector::id("main")))
                .timeout(Duration::from_secs(2))
                .on_failure(|t| RunError::MainPageLoadFailed {
                    strategy: "PassThrough".into(),
                    timeout_secs: t.timeout.as_secs(),
                })
                .run(&waiter(&driver))
                .await
                .unwrap_err();

            assert!(matches!(
                err,
                RunError::MainPageLoadFailed {
                    timeout_secs: 2,
                    ..
                }
            ));
        }

        #[tokio::test(start_paused = true)]
        async fn test_callback_failure_is_wrapped() {
            let driver = MockDriver::new();
            let sel = Selector::id("x");
            driver.show(sel.clone());
            let err = Wait::until(Visible::new(sel))
                .on_success(FailWith("stale"))
                .run(&waiter(&driver))
                .await
                .unwrap_err();

            match err {
                RunError::ConditionCallbackFailed {
                    description,
                    source,
                } => {
                    assert!(description.contains("id=x"));
                    assert!(source.to_string().contains("stale"));
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[tokio::test(start_paused = true)]
        async fn test_nested_wait_in_callback() {
            let driver = MockDriver::new();
            let outer = Selector::id("outer");
            let inner = Selector::class_name("inner");
            driver.show(outer.clone());
            driver.show_after(inner.clone(), 2);

            let result = Wait::until(Visible::new(outer))
                .on_success(NestedVisible(inner))
                .run(&waiter(&driver))
                .await;
            assert!(result.is_ok());
        }

        #[tokio::test(start_paused = true)]
        async fn test_nested_timeout_surfaces_as_callback_failure() {
            let driver = MockDriver::new();
            let outer = Selector::id("outer");
            driver.show(outer.clone());

            let err = Wait::until(Visible::new(outer))
                .on_success(NestedVisible(Selector::class_name("missing")))
                .run(&waiter(&driver))
                .await
                .unwrap_err();
            let RunError::ConditionCallbackFailed { source, .. } = err else {
                panic!("expected callback failure");
            };
            assert!(matches!(*source, RunError::ConditionTimedOut { .. }));
        }

        #[tokio::test(start_paused = true)]
        async fn test_probe_returns_none_on_timeout() {
            let driver = MockDriver::new();
            let found = Wait::until(Visible::new(Selector::id("nope")))
                .timeout(Duration::from_secs(5))
                .probe(&waiter(&driver))
                .await
                .unwrap();
            assert!(found.is_none());
        }

        #[tokio::test(start_paused = true)]
        async fn test_custom_poll_interval() {
            let driver = MockDriver::new();
            let sel = Selector::id("late");
            driver.show_after(sel.clone(), 2);
            let result = Wait::until(Visible::new(sel))
                .poll_interval(Duration::from_millis(250))
                .run(&waiter(&driver))
                .await
                .unwrap();
            assert_eq!(result.elapsed, Duration::from_millis(500));
        }
    }

    mod condition_tests {
        use super::*;
        use serde_json::json;

        #[tokio::test]
        async fn test_hidden_element_is_present_not_visible() {
            let driver = MockDriver::new();
            let sel = Selector::id("h");
            driver.add_element(sel.clone(), ElementHandle::new("div").with_visible(false));
            assert!(Visible::new(sel.clone()).poll(&driver).await.unwrap().is_none());
            assert!(Present(sel).poll(&driver).await.unwrap().is_some());
        }

        #[tokio::test]
        async fn test_page_loaded_reads_ready_state() {
            let driver = MockDriver::new();
            assert!(PageLoaded.poll(&driver).await.unwrap().is_some());
            driver.set_script_result("document.readyState", json!("interactive"));
            assert!(PageLoaded.poll(&driver).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_script_value_treats_errors_as_not_yet() {
            let driver = MockDriver::new();
            driver.fail_script("Player.result", "Player is not defined");
            let cond = ScriptValue::new("return Player.result()").labelled("result");
            assert!(cond.poll(&driver).await.unwrap().is_none());
            assert!(cond.description().contains("result"));

            driver.set_script_result("Player.result", json!({"ok": true}));
            assert_eq!(cond.poll(&driver).await.unwrap(), Some(json!({"ok": true})));
        }

        #[tokio::test]
        async fn test_url_changed() {
            let driver = MockDriver::new();
            driver.set_url("https://login");
            let cond = UrlChanged {
                from: "https://login".into(),
            };
            assert!(cond.poll(&driver).await.unwrap().is_none());
            driver.set_url("https://idp/adfs");
            assert_eq!(
                cond.poll(&driver).await.unwrap().as_deref(),
                Some("https://idp/adfs")
            );
        }

        #[tokio::test]
        async fn test_fn_condition() {
            let driver = MockDriver::new();
            let cond = FnCondition::new(|| Some(42), "always 42");
            assert_eq!(cond.poll(&driver).await.unwrap(), Some(42));
            assert_eq!(cond.description(), "always 42");
        }
    }

    mod waiter_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_cancel_before_wait() {
            let driver = MockDriver::new();
            let cancel = CancellationToken::new();
            cancel.cancel();
            let w = Waiter::new(&driver, cancel);
            let err = w.page_loaded(Duration::from_secs(1)).await.unwrap_err();
            assert!(matches!(err, RunError::Cancelled));
        }

        #[tokio::test(start_paused = true)]
        async fn test_cancel_during_wait_returns_promptly() {
            let driver = MockDriver::new();
            let cancel = CancellationToken::new();
            let w = Waiter::new(&driver, cancel.clone());
            let start = Instant::now();
            let never = Selector::id("never");

            let (result, ()) = tokio::join!(
                w.until_visible(&never, Duration::from_secs(600)),
                async {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    cancel.cancel();
                }
            );

            assert!(matches!(result, Err(RunError::Cancelled)));
            assert!(start.elapsed() < Duration::from_secs(2));
        }

        #[tokio::test(start_paused = true)]
        async fn test_is_visible_within() {
            let driver = MockDriver::new();
            let sel = Selector::id("toggle");
            let w = waiter(&driver);
            assert!(!w.is_visible_within(&sel, Duration::from_secs(1)).await.unwrap());
            driver.show(sel.clone());
            assert!(w.is_visible_within(&sel, Duration::from_secs(1)).await.unwrap());
        }

        #[tokio::test]
        async fn test_navigate_maps_driver_errors() {
            let driver = MockDriver::new();
            driver.fail_next("navigate", "net::ERR_NAME_NOT_RESOLVED");
            let err = waiter(&driver).navigate("https://bad").await.unwrap_err();
            assert!(matches!(err, RunError::Navigation { ref url, .. } if url == "https://bad"));
        }

        #[tokio::test]
        async fn test_navigate_fires_triggers() {
            let driver = MockDriver::new();
            let sel = Selector::id("field");
            driver.on(Trigger::Navigate("login".into()), Effect::Show(sel.clone()));
            waiter(&driver).navigate("https://x/login").await.unwrap();
            assert!(driver.find_element(&sel).await.unwrap().is_some());
        }
    }
}
