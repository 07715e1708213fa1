//! Suiterun: authenticated browser test-run orchestration
//!
//! Drives a browser through sign-in to a low-code app platform, opens each
//! test-case or test-suite URL, waits for the in-page player to publish its
//! result payload and folds everything into one run verdict.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     SUITERUN Architecture                         │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌───────────────┐   ┌──────────────┐            │
//! │  │ RunConfig  │──►│ RunAggregator │──►│ Authenticator│ (once)     │
//! │  │ + targets  │   │               │   └──────────────┘            │
//! │  └────────────┘   │               │   ┌──────────────┐            │
//! │                   │               │──►│ TestExecutor │ (per URL)  │
//! │                   └───────┬───────┘   └──────┬───────┘            │
//! │                           │                  │                    │
//! │                   ┌───────▼───────┐   ┌──────▼───────┐            │
//! │                   │ ArtifactRec.  │   │ Waiter       │            │
//! │                   └───────────────┘   └──────┬───────┘            │
//! │                                       ┌──────▼───────┐            │
//! │                                       │ BrowserDriver│ CDP / mock │
//! │                                       └──────────────┘            │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use suiterun::prelude::*;
//!
//! # async fn demo() -> RunResult<()> {
//! let config = RunConfig::load("suiterun.yaml".as_ref())?;
//! let targets = load_targets("urls.json".as_ref())?;
//! let credential = Credential::from_env()?;
//! let method = config.resolve_login_method(credential.is_some());
//! let strategy = LoginStrategy::resolve(method, credential.as_ref(), None)?;
//!
//! let driver = MockDriver::new();
//! let mut run = RunAggregator::new(driver, config, strategy, credential)?;
//! let summary = run.run(&targets).await;
//! run.shutdown().await?;
//! println!("{}", summary?.message());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

/// Diagnostic screenshots on failure paths
pub mod artifact;

/// Chromium control over CDP (`browser` feature)
#[allow(clippy::missing_errors_doc)]
pub mod browser;

/// Run configuration and timeouts
pub mod config;

/// Browser driver abstraction and the scripted mock
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
pub mod driver;

/// Per-target execution
pub mod executor;

/// Named UI element registry
pub mod locator;

/// Authentication state machine
#[allow(clippy::missing_errors_doc)]
pub mod login;

/// Result payload decoding
pub mod payload;

/// Error types
pub mod result;

/// Run aggregation and verdicts
pub mod runner;

/// Test target URLs
pub mod target;

/// Condition waiting
#[allow(clippy::missing_errors_doc)]
pub mod wait;

pub use result::{RunError, RunResult};

/// Common imports for driving a run
pub mod prelude {
    pub use super::artifact::{ArtifactContext, ArtifactRecorder, DiagnosticArtifact};
    #[cfg(feature = "browser")]
    pub use super::browser::ChromiumDriver;
    pub use super::config::{
        ArtifactConfig, BrowserConfig, BrowserType, LoginMethod, RunConfig, Timeouts,
    };
    pub use super::driver::{BrowserDriver, ElementHandle, ImageFormat, Key, MockDriver, Screenshot};
    pub use super::executor::{ExecutorOptions, TestExecutor};
    pub use super::locator::{Element, LocatorRegistry, Selector};
    pub use super::login::{
        Authenticator, Credential, FederatedStep, FormFederatedStep, LoginOutcome, LoginReport,
        LoginState, LoginStrategy, Secret,
    };
    pub use super::payload::{TestCaseResult, TestResultPayload, TestSuiteResult};
    pub use super::result::{RunError, RunResult};
    pub use super::runner::{
        RunAggregator, RunObserver, RunSummary, RunTally, RunVerdict, TargetOutcome, TargetReport,
    };
    pub use super::target::{load_targets, parse_targets, TestTarget};
    pub use super::wait::{Condition, Visible, Wait, WaitResult, Waiter};
}
