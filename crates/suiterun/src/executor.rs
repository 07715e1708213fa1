//! Test Run Executor
//!
//! Runs one target in an already authenticated session: open it, get past
//! the one-time permission dialog and wait for the page to publish its
//! result payload. Only a missing or undecodable payload is an error; every
//! earlier step degrades to a log line.

use std::time::Duration;

use crate::config::RunConfig;
use crate::locator::Element;
use crate::payload::{TestResultPayload, DEFAULT_RESULT_SCRIPT, SESSION_ID_SCRIPT};
use crate::result::{RunError, RunResult};
use crate::target::TestTarget;
use crate::wait::{Present, ScriptValue, Visible, Wait, Waiter};

/// Text of the affirmative permission dialog button
pub const ALLOW_BUTTON_TEXT: &str = "Allow";

/// Per-target wait budgets and the result script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// Maximum wait for the result payload
    pub max_test_wait: Duration,
    /// Wait for the app host container
    pub app_host_timeout: Duration,
    /// Probe for the permission dialog
    pub permission_dialog_timeout: Duration,
    /// Wait for the document to load
    pub page_load_timeout: Duration,
    /// Script returning the result payload or null
    pub result_script: String,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self::from_config(&RunConfig::default())
    }
}

impl ExecutorOptions {
    /// Options from a run configuration
    #[must_use]
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            max_test_wait: config.max_test_wait(),
            app_host_timeout: config.timeouts.app_host(),
            permission_dialog_timeout: config.timeouts.permission_dialog(),
            page_load_timeout: config.timeouts.page_load(),
            result_script: config
                .result_script
                .clone()
                .unwrap_or_else(|| DEFAULT_RESULT_SCRIPT.to_string()),
        }
    }
}

fn swallow(step: &str, result: RunResult<()>) -> RunResult<()> {
    match result {
        Err(RunError::Cancelled) => Err(RunError::Cancelled),
        Err(e) => {
            tracing::warn!(step, error = %e, "non-fatal step failed");
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}

/// Executes single targets against one session
#[derive(Debug)]
pub struct TestExecutor<'a> {
    waiter: &'a Waiter<'a>,
    options: &'a ExecutorOptions,
}

impl<'a> TestExecutor<'a> {
    /// Create an executor
    #[must_use]
    pub const fn new(waiter: &'a Waiter<'a>, options: &'a ExecutorOptions) -> Self {
        Self { waiter, options }
    }

    /// Run one target and return its result payload
    pub async fn execute(&self, target: &TestTarget, run_index: usize) -> RunResult<TestResultPayload> {
        self.open(target).await?;
        self.dismiss_permission_dialog().await?;
        self.report_session_id(run_index).await;
        self.wait_for_results().await
    }

    async fn open(&self, target: &TestTarget) -> RunResult<()> {
        self.waiter.navigate(target.as_str()).await?;
        swallow(
            "page load",
            self.waiter.page_loaded(self.options.page_load_timeout).await,
        )?;

        let host = Element::TestAutomationAppHost.selector()?;
        let visible = Wait::until(Visible::new(host.clone()))
            .timeout(self.options.app_host_timeout)
            .probe(self.waiter)
            .await?
            .is_some();
        if visible {
            tracing::debug!("app host visible");
        } else {
            tracing::warn!(
                timeout = ?self.options.app_host_timeout,
                "app host not visible; waiting for results anyway"
            );
        }
        Ok(())
    }

    async fn dismiss_permission_dialog(&self) -> RunResult<()> {
        let strip = Element::TestAutomationPermissionDialogButtons.selector()?;
        let dialog = Wait::until(Present(strip.clone()))
            .timeout(self.options.permission_dialog_timeout)
            .probe(self.waiter)
            .await?;
        if dialog.is_none() {
            tracing::debug!("no permission dialog");
            return Ok(());
        }

        let driver = self.waiter.driver();
        let buttons = match driver.find_elements(&strip.descendant("button")).await {
            Ok(buttons) => buttons,
            Err(e) => return swallow("permission dialog buttons", Err(e)),
        };
        let Some(allow) = buttons.iter().find(|b| b.text() == ALLOW_BUTTON_TEXT) else {
            tracing::warn!(buttons = buttons.len(), "permission dialog without an Allow button");
            return Ok(());
        };

        tracing::info!("accepting permission dialog");
        swallow("permission dialog click", driver.click_element(allow).await)?;
        swallow(
            "page load after permission dialog",
            self.waiter.page_loaded(self.options.page_load_timeout).await,
        )
    }

    async fn report_session_id(&self, run_index: usize) {
        match self.waiter.driver().execute_script(SESSION_ID_SCRIPT).await {
            Ok(serde_json::Value::String(session_id)) => {
                tracing::info!(run_index, session_id = session_id.as_str(), "player session");
            }
            Ok(_) => tracing::debug!(run_index, "session id is null"),
            Err(e) => tracing::debug!(run_index, error = %e, "session id unavailable"),
        }
    }

    async fn wait_for_results(&self) -> RunResult<TestResultPayload> {
        let value = Wait::until(ScriptValue::new(self.options.result_script.as_str()).labelled("test results"))
            .timeout(self.options.max_test_wait)
            .on_failure(|t| RunError::ResultPayloadMissing {
                waited_secs: t.timeout.as_secs(),
            })
            .run(self.waiter)
            .await?
            .into_value();
        TestResultPayload::from_value(value)
    }
}
