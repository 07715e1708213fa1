//! Test result payload published by the target application.
//!
//! The page exposes one JSON object once its test finishes:
//!
//! ```json
//! { "ExecutionMode": 0, "TestCaseResult": { "TestCaseName": "...", "Success": true, ... } }
//! { "ExecutionMode": 1, "TestSuiteResult": { "TestsPassed": 3, "TestsFailed": 1, ... } }
//! ```
//!
//! The object may also arrive serialized as a JSON string.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::result::{RunError, RunResult};

/// Default script reading the published result object
pub const DEFAULT_RESULT_SCRIPT: &str =
    "return (typeof window.testAutomationResults === 'undefined') ? null : window.testAutomationResults";

/// Script reading the player's telemetry session id
pub const SESSION_ID_SCRIPT: &str = "return Core.Telemetry.Log.sessionId";

/// Result of running a single test case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TestCaseResult {
    /// Owning suite id
    pub test_suite_id: Option<String>,
    /// Owning suite name
    pub test_suite_name: Option<String>,
    /// Owning suite description
    pub test_suite_description: Option<String>,
    /// Case id
    pub test_case_id: Option<String>,
    /// Case name
    pub test_case_name: Option<String>,
    /// Case description
    pub test_case_description: Option<String>,
    /// Failure message, if any
    pub test_failure_message: Option<String>,
    /// Start, epoch milliseconds
    pub start_time: i64,
    /// End, epoch milliseconds
    pub end_time: i64,
    /// Whether the case passed
    pub success: bool,
    /// Trace lines emitted by the case
    pub traces: Vec<String>,
}

/// Aggregate result of running a test suite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TestSuiteResult {
    /// Suite id
    pub test_suite_id: Option<String>,
    /// Suite name
    pub test_suite_name: Option<String>,
    /// Suite description
    pub test_suite_description: Option<String>,
    /// Start, epoch milliseconds
    pub start_time: i64,
    /// End, epoch milliseconds
    pub end_time: i64,
    /// Passed cases
    pub tests_passed: u32,
    /// Failed cases
    pub tests_failed: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawPayload {
    execution_mode: i64,
    test_case_result: Option<TestCaseResult>,
    test_suite_result: Option<TestSuiteResult>,
}

/// Structured result of one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResultPayload {
    /// Execution mode 0: a single test case
    Case(TestCaseResult),
    /// Execution mode 1: a test suite
    Suite(TestSuiteResult),
}

fn malformed(message: impl Into<String>) -> RunError {
    RunError::ResultPayloadMalformed {
        message: message.into(),
    }
}

fn span_ms(start: i64, end: i64) -> Duration {
    Duration::from_millis(end.saturating_sub(start).max(0) as u64)
}

impl TestResultPayload {
    /// Decode the value returned by the result script
    pub fn from_value(value: serde_json::Value) -> RunResult<Self> {
        let value = match value {
            serde_json::Value::String(text) => serde_json::from_str(&text)
                .map_err(|e| malformed(format!("result string is not JSON: {e}")))?,
            other => other,
        };
        let raw: RawPayload = serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
        match raw.execution_mode {
            0 => raw
                .test_case_result
                .map(Self::Case)
                .ok_or_else(|| malformed("ExecutionMode 0 without TestCaseResult")),
            1 => raw
                .test_suite_result
                .map(Self::Suite)
                .ok_or_else(|| malformed("ExecutionMode 1 without TestSuiteResult")),
            mode => Err(malformed(format!("unknown ExecutionMode {mode}"))),
        }
    }

    /// (passed, failed) contribution to the run tally
    #[must_use]
    pub const fn counts(&self) -> (u32, u32) {
        match self {
            Self::Case(case) if case.success => (1, 0),
            Self::Case(_) => (0, 1),
            Self::Suite(suite) => (suite.tests_passed, suite.tests_failed),
        }
    }

    /// Tests reported; saturates on page-supplied counts
    #[must_use]
    pub const fn total(&self) -> u32 {
        let (passed, failed) = self.counts();
        passed.saturating_add(failed)
    }

    /// Execution time reported by the page
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match self {
            Self::Case(case) => span_ms(case.start_time, case.end_time),
            Self::Suite(suite) => span_ms(suite.start_time, suite.end_time),
        }
    }

    /// Case name, or suite name for suites
    #[must_use]
    pub fn name(&self) -> &str {
        let name = match self {
            Self::Case(case) => case.test_case_name.as_deref(),
            Self::Suite(suite) => suite.test_suite_name.as_deref(),
        };
        name.unwrap_or("<unnamed>")
    }

    /// Log the result the way a pipeline log reader expects it
    pub fn log_summary(&self, run_index: usize) {
        let elapsed = self.elapsed();
        match self {
            Self::Case(case) => {
                tracing::info!(
                    run_index,
                    suite_name = case.test_suite_name.as_deref().unwrap_or_default(),
                    suite_id = case.test_suite_id.as_deref().unwrap_or_default(),
                    case_name = case.test_case_name.as_deref().unwrap_or_default(),
                    case_id = case.test_case_id.as_deref().unwrap_or_default(),
                    result = if case.success { "Pass" } else { "Fail" },
                    ?elapsed,
                    "test case finished"
                );
                if let Some(message) = case.test_failure_message.as_deref().filter(|m| !m.is_empty()) {
                    tracing::info!(run_index, failure = message, "test case failure message");
                }
                for trace in &case.traces {
                    tracing::debug!(run_index, trace = trace.as_str(), "test case trace");
                }
            }
            Self::Suite(suite) => {
                tracing::info!(
                    run_index,
                    suite_name = suite.test_suite_name.as_deref().unwrap_or_default(),
                    suite_id = suite.test_suite_id.as_deref().unwrap_or_default(),
                    total = self.total(),
                    passed = suite.tests_passed,
                    failed = suite.tests_failed,
                    ?elapsed,
                    "test suite finished"
                );
            }
        }
    }
}
