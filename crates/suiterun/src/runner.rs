//! Run Aggregator
//!
//! Owns the browser session for a whole run:
//!
//! ```text
//! Idle → Authenticate (once, retried) → ExecuteTarget × N → Summarize
//! ```
//!
//! Sign-in failures are retried up to the configured budget with a
//! screenshot per failed attempt. A target error captures a screenshot and
//! aborts the run unless `continue_on_target_error` is set, in which case it
//! counts as one failed test.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::artifact::{ArtifactContext, ArtifactRecorder, DiagnosticArtifact};
use crate::config::RunConfig;
use crate::driver::BrowserDriver;
use crate::executor::{ExecutorOptions, TestExecutor};
use crate::locator::LocatorRegistry;
use crate::login::{Authenticator, Credential, LoginOutcome, LoginReport, LoginStrategy};
use crate::result::{RunError, RunResult};
use crate::target::TestTarget;
use crate::wait::Waiter;

/// Page loaded between sign-in attempts
const BLANK_PAGE: &str = "about:blank";

// =============================================================================
// TALLY AND VERDICT
// =============================================================================

/// Final classification of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunVerdict {
    /// Passes only
    Succeeded,
    /// Failures only, or no results at all
    Failed,
    /// Both passes and failures
    Inconclusive,
}

impl RunVerdict {
    /// Whether the run counts as passed
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for RunVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Inconclusive => "Inconclusive",
        };
        f.write_str(name)
    }
}

/// Test counts accumulated over a run; never decremented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTally {
    /// Tests reported
    pub test_count: u32,
    /// Tests passed
    pub pass_count: u32,
    /// Tests failed
    pub fail_count: u32,
}

impl RunTally {
    /// Add one target's contribution
    pub fn record(&mut self, passed: u32, failed: u32) {
        self.pass_count = self.pass_count.saturating_add(passed);
        self.fail_count = self.fail_count.saturating_add(failed);
        self.test_count = self.test_count.saturating_add(passed.saturating_add(failed));
    }

    /// Verdict for these counts
    #[must_use]
    pub const fn verdict(&self) -> RunVerdict {
        match (self.pass_count, self.fail_count) {
            (p, f) if p > 0 && f > 0 => RunVerdict::Inconclusive,
            (p, 0) if p > 0 => RunVerdict::Succeeded,
            _ => RunVerdict::Failed,
        }
    }
}

// =============================================================================
// REPORTS
// =============================================================================

/// How one target ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// The page published a result
    Completed {
        /// Case or suite name
        name: String,
        /// Passed tests
        passed: u32,
        /// Failed tests
        failed: u32,
        /// Execution time reported by the page
        elapsed: Duration,
    },
    /// The target raised an error and the run continued past it
    Errored {
        /// Error kind
        kind: &'static str,
        /// Error message
        message: String,
    },
}

/// Result of one target within a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    /// 1-based position in the run
    pub run_index: usize,
    /// The target
    pub target: TestTarget,
    /// How it ended
    pub outcome: TargetOutcome,
}

/// Sign-in result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationRecord {
    /// Attempts used, including the successful one
    pub attempts: u32,
    /// Report of the successful attempt
    pub report: LoginReport,
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Run identifier used in log spans
    pub run_id: Uuid,
    /// Final counts
    pub tally: RunTally,
    /// Verdict from the counts
    pub verdict: RunVerdict,
    /// Sign-in result
    pub login: Option<AuthenticationRecord>,
    /// Per-target results, in run order
    pub targets: Vec<TargetReport>,
    /// Screenshots taken during the run
    pub artifacts: Vec<DiagnosticArtifact>,
    /// Run start
    pub started_at: DateTime<Utc>,
    /// Run end
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Verdict message; always carries total, pass and fail counts
    #[must_use]
    pub fn message(&self) -> String {
        let RunTally {
            test_count,
            pass_count,
            fail_count,
        } = self.tally;
        let counts = format!(
            "Total Test Count: {test_count}, Total Pass Count: {pass_count}, Total Fail Count: {fail_count}"
        );
        match self.verdict {
            RunVerdict::Succeeded => format!("Success: {counts}"),
            RunVerdict::Inconclusive => format!("Inconclusive Test Automation Result: {counts}"),
            RunVerdict::Failed if test_count == 0 => format!("Test Failed: no test results. {counts}"),
            RunVerdict::Failed => format!("Test Failed: {counts}"),
        }
    }

    /// `Ok` for a succeeded run, [`RunError::RunFailed`] otherwise
    pub fn into_result(self) -> RunResult<Self> {
        if self.verdict.is_success() {
            Ok(self)
        } else {
            Err(RunError::RunFailed {
                verdict: self.verdict,
                message: self.message(),
            })
        }
    }
}

// =============================================================================
// OBSERVER
// =============================================================================

/// Progress hooks for front ends; every method defaults to doing nothing
pub trait RunObserver: Send + Sync {
    /// A sign-in attempt is starting
    fn login_attempt(&self, _attempt: u32, _of: u32) {}

    /// A target is starting
    fn target_started(&self, _run_index: usize, _total: usize, _target: &TestTarget) {}

    /// A target finished or errored
    fn target_finished(&self, _report: &TargetReport) {}
}

// =============================================================================
// AGGREGATOR
// =============================================================================

/// Drives one authenticated browser session through a list of targets
pub struct RunAggregator<D: BrowserDriver> {
    driver: D,
    config: RunConfig,
    strategy: LoginStrategy,
    credential: Option<Credential>,
    artifacts: ArtifactRecorder,
    executor_options: ExecutorOptions,
    cancel: CancellationToken,
    observer: Option<Arc<dyn RunObserver>>,
    authenticated: Option<AuthenticationRecord>,
    runs: u32,
}

impl<D: BrowserDriver + fmt::Debug> fmt::Debug for RunAggregator<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunAggregator")
            .field("driver", &self.driver)
            .field("strategy", &self.strategy)
            .field("credential", &self.credential)
            .field("authenticated", &self.authenticated.is_some())
            .finish_non_exhaustive()
    }
}

impl<D: BrowserDriver> RunAggregator<D> {
    /// Create an aggregator, validating configuration and locators up front
    pub fn new(
        driver: D,
        config: RunConfig,
        strategy: LoginStrategy,
        credential: Option<Credential>,
    ) -> RunResult<Self> {
        config.validate()?;
        LocatorRegistry::global().validate()?;
        if !matches!(strategy, LoginStrategy::PassThrough) && credential.is_none() {
            return Err(RunError::config(format!("{strategy} login needs a credential")));
        }
        let artifacts = ArtifactRecorder::new(&config.results_directory, &config.artifacts);
        let executor_options = ExecutorOptions::from_config(&config);
        Ok(Self {
            driver,
            config,
            strategy,
            credential,
            artifacts,
            executor_options,
            cancel: CancellationToken::new(),
            observer: None,
            authenticated: None,
            runs: 0,
        })
    }

    /// Use an externally owned cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Report progress to an observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Token cancelling this run
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The browser session
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Screenshots taken by the current or most recent run
    ///
    /// Still populated after a run returned an error.
    #[must_use]
    pub fn artifacts(&self) -> &[DiagnosticArtifact] {
        self.artifacts.artifacts()
    }

    fn waiter(&self) -> Waiter<'_> {
        Waiter::new(&self.driver, self.cancel.clone()).with_poll_interval(self.config.poll_interval())
    }

    /// Run every target in order and summarize
    ///
    /// Sign-in happens before the first target and only if this session has
    /// not signed in yet.
    pub async fn run(&mut self, targets: &[TestTarget]) -> RunResult<RunSummary> {
        if targets.is_empty() {
            return Err(RunError::NoTargets);
        }
        self.runs = self.runs.saturating_add(1);
        self.artifacts.begin_run(self.runs);
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("run", %run_id, run = self.runs, targets = targets.len());
        self.run_targets(run_id, targets).instrument(span).await
    }

    async fn run_targets(&mut self, run_id: Uuid, targets: &[TestTarget]) -> RunResult<RunSummary> {
        let started_at = Utc::now();
        let total = targets.len();

        if self.authenticated.is_none() {
            let record = self.authenticate().await?;
            self.authenticated = Some(record);
        }

        let mut tally = RunTally::default();
        let mut reports = Vec::with_capacity(total);

        for (position, target) in targets.iter().enumerate() {
            let run_index = position + 1;
            tracing::info!(run_index, total, url = %target, "starting test run");
            if let Some(observer) = &self.observer {
                observer.target_started(run_index, total, target);
            }

            let outcome = self.execute_target(target, run_index, total, &mut tally).await?;
            let report = TargetReport {
                run_index,
                target: target.clone(),
                outcome,
            };
            if let Some(observer) = &self.observer {
                observer.target_finished(&report);
            }
            reports.push(report);
            tracing::info!(run_index, total, "test run completed");
        }

        let verdict = tally.verdict();
        let summary = RunSummary {
            run_id,
            tally,
            verdict,
            login: self.authenticated.clone(),
            targets: reports,
            artifacts: self.artifacts.artifacts().to_vec(),
            started_at,
            finished_at: Utc::now(),
        };
        tracing::info!(%verdict, message = %summary.message(), "run finished");
        Ok(summary)
    }

    async fn execute_target(
        &mut self,
        target: &TestTarget,
        run_index: usize,
        total: usize,
        tally: &mut RunTally,
    ) -> RunResult<TargetOutcome> {
        let result = {
            let waiter = self.waiter();
            TestExecutor::new(&waiter, &self.executor_options)
                .execute(target, run_index)
                .instrument(tracing::info_span!("target", run_index, url = %target))
                .await
        };

        match result {
            Ok(payload) => {
                let (passed, failed) = payload.counts();
                tally.record(passed, failed);
                payload.log_summary(run_index);
                if self.config.capture_post_execution {
                    self.artifacts
                        .capture(&self.driver, ArtifactContext::PostExecution(run_index))
                        .await;
                }
                Ok(TargetOutcome::Completed {
                    name: payload.name().to_string(),
                    passed,
                    failed,
                    elapsed: payload.elapsed(),
                })
            }
            Err(RunError::Cancelled) => Err(RunError::Cancelled),
            Err(e) => {
                tracing::error!(run_index, total, error = %e, "test run failed");
                self.artifacts
                    .capture(
                        &self.driver,
                        ArtifactContext::TestRun {
                            index: run_index,
                            kind: e.kind(),
                        },
                    )
                    .await;
                if self.config.continue_on_target_error {
                    tally.record(0, 1);
                    return Ok(TargetOutcome::Errored {
                        kind: e.kind(),
                        message: e.to_string(),
                    });
                }
                Err(RunError::TargetExecutionFailed {
                    run_index,
                    total,
                    source: Box::new(e),
                })
            }
        }
    }

    async fn authenticate(&mut self) -> RunResult<AuthenticationRecord> {
        let attempts = self.config.sign_in_attempts;
        let waiter = Waiter::new(&self.driver, self.cancel.clone())
            .with_poll_interval(self.config.poll_interval());
        let authenticator = Authenticator::new(
            &waiter,
            &self.strategy,
            self.credential.as_ref(),
            &self.config.login_url,
            &self.config.timeouts,
        );
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            tracing::info!(attempt, attempts, strategy = %self.strategy, "signing in");
            if let Some(observer) = &self.observer {
                observer.login_attempt(attempt, attempts);
            }

            let report = match authenticator.execute().await {
                Ok(report) => report,
                Err(e) => {
                    if !matches!(e, RunError::Cancelled) {
                        self.artifacts
                            .capture(&self.driver, ArtifactContext::LoginErrorAttempt(attempt))
                            .await;
                    }
                    return Err(e);
                }
            };

            match report.outcome {
                LoginOutcome::Success | LoginOutcome::Redirect => {
                    return Ok(AuthenticationRecord {
                        attempts: attempt,
                        report,
                    });
                }
                LoginOutcome::Failure(ref reason) => {
                    tracing::warn!(attempt, attempts, reason = reason.as_str(), "sign-in attempt failed");
                    self.artifacts
                        .capture(&self.driver, ArtifactContext::LoginErrorAttempt(attempt))
                        .await;
                    last_error.clone_from(reason);
                    if attempt < attempts {
                        if let Err(e) = waiter.navigate(BLANK_PAGE).await {
                            if matches!(e, RunError::Cancelled) {
                                return Err(e);
                            }
                            tracing::warn!(error = %e, "could not reset page before retrying");
                        }
                    }
                }
            }
        }

        tracing::error!(attempts, "sign-in attempts exhausted");
        Err(RunError::AuthenticationExhausted {
            attempts,
            last_error,
        })
    }

    /// Close the browser session
    pub async fn shutdown(&self) -> RunResult<()> {
        tracing::debug!("closing browser session");
        self.driver.close().await
    }
}
