//! Result and error types for Suiterun.

use thiserror::Error;

use crate::runner::RunVerdict;

/// Result type for Suiterun operations
pub type RunResult<T> = Result<T, RunError>;

/// Errors that can occur while driving a test run
#[derive(Debug, Error)]
pub enum RunError {
    /// A polled condition never held within its timeout
    #[error("Timed out after {elapsed_ms}ms waiting for {description}")]
    ConditionTimedOut {
        /// What was waited for
        description: String,
        /// Time spent polling
        elapsed_ms: u64,
    },

    /// The condition held but its success callback failed
    #[error("Callback after {description} failed: {source}")]
    ConditionCallbackFailed {
        /// What was waited for
        description: String,
        /// Error raised by the callback
        #[source]
        source: Box<RunError>,
    },

    /// Every sign-in attempt failed
    #[error("Login failed after {attempts} attempts: {last_error}")]
    AuthenticationExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Reason of the final failure
        last_error: String,
    },

    /// The authenticated landing page never became visible
    #[error("Main page failed to load within {timeout_secs}s using {strategy} login")]
    MainPageLoadFailed {
        /// Login strategy in use
        strategy: String,
        /// Main page timeout in seconds
        timeout_secs: u64,
    },

    /// A single target raised an error
    #[error("Test run #{run_index} of {total} failed: {source}")]
    TargetExecutionFailed {
        /// 1-based index of the target
        run_index: usize,
        /// Number of targets in the run
        total: usize,
        /// Underlying error
        #[source]
        source: Box<RunError>,
    },

    /// The target never published a result payload
    #[error("No test result payload after {waited_secs}s")]
    ResultPayloadMissing {
        /// Maximum wait in seconds
        waited_secs: u64,
    },

    /// The result payload could not be decoded
    #[error("Malformed test result payload: {message}")]
    ResultPayloadMalformed {
        /// Decoding error
        message: String,
    },

    /// The run was started with an empty target list
    #[error("No test targets to run")]
    NoTargets,

    /// The run completed with a non-success verdict
    #[error("{verdict} test run: {message}")]
    RunFailed {
        /// Final verdict
        verdict: RunVerdict,
        /// Summary message including counts
        message: String,
    },

    /// The run was cancelled by the operator
    #[error("Run cancelled")]
    Cancelled,

    /// A symbolic element name has no registered locator
    #[error("No locator registered for element '{name}'")]
    UnknownLocator {
        /// Symbolic name
        name: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Browser automation error
    #[error("Browser driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl RunError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Short stable name of the error kind, used in artifact names
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ConditionTimedOut { .. } => "ConditionTimedOut",
            Self::ConditionCallbackFailed { .. } => "ConditionCallbackFailed",
            Self::AuthenticationExhausted { .. } => "AuthenticationExhausted",
            Self::MainPageLoadFailed { .. } => "MainPageLoadFailed",
            Self::TargetExecutionFailed { .. } => "TargetExecutionFailed",
            Self::ResultPayloadMissing { .. } => "ResultPayloadMissing",
            Self::ResultPayloadMalformed { .. } => "ResultPayloadMalformed",
            Self::NoTargets => "NoTargets",
            Self::RunFailed { .. } => "RunFailed",
            Self::Cancelled => "Cancelled",
            Self::UnknownLocator { .. } => "UnknownLocator",
            Self::Config { .. } => "ConfigError",
            Self::Driver { .. } => "DriverError",
            Self::Navigation { .. } => "NavigationError",
            Self::Screenshot { .. } => "ScreenshotError",
            Self::Io(_) | Self::Json(_) | Self::Yaml(_) => "GenericError",
        }
    }

    /// Whether this error ends the run regardless of retry budgets
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MainPageLoadFailed { .. }
                | Self::AuthenticationExhausted { .. }
                | Self::Cancelled
                | Self::UnknownLocator { .. }
                | Self::Config { .. }
        )
    }
}
