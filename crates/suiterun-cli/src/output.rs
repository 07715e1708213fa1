//! Output formatting and progress reporting

use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use suiterun::runner::{RunObserver, RunSummary, RunVerdict, TargetOutcome, TargetReport};
use suiterun::target::TestTarget;

/// Progress reporter for a run
///
/// Writes to stderr so stdout carries only the summary.
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: ProgressBar,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        let progress_bar = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );
            pb
        };
        Self {
            term: Term::stderr(),
            progress_bar,
            use_color,
            quiet,
        }
    }

    fn line(&self, message: &str) {
        self.progress_bar.suspend(|| {
            let _ = self.term.write_line(message);
        });
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };
        self.line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };
        self.line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };
        self.line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };
        self.line(&format!("{prefix} {message}"));
    }

    /// Finish progress bar
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }

    /// Styled verdict line
    #[must_use]
    pub fn verdict_line(&self, summary: &RunSummary) -> String {
        let message = summary.message();
        if !self.use_color {
            return message;
        }
        let style = match summary.verdict {
            RunVerdict::Succeeded => Style::new().green().bold(),
            RunVerdict::Inconclusive => Style::new().yellow().bold(),
            RunVerdict::Failed => Style::new().red().bold(),
        };
        style.apply_to(message).to_string()
    }
}

impl RunObserver for ProgressReporter {
    fn login_attempt(&self, attempt: u32, of: u32) {
        if attempt > 1 {
            self.warning(&format!("Sign-in attempt {attempt} of {of}"));
        } else {
            self.info("Signing in");
        }
    }

    fn target_started(&self, run_index: usize, total: usize, target: &TestTarget) {
        self.progress_bar.set_length(total as u64);
        self.progress_bar.set_position(run_index.saturating_sub(1) as u64);
        self.progress_bar.set_message(target.to_string());
    }

    fn target_finished(&self, report: &TargetReport) {
        self.progress_bar.inc(1);
        match &report.outcome {
            TargetOutcome::Completed {
                name,
                passed,
                failed: 0,
                ..
            } => self.success(&format!("{name}: {passed} passed")),
            TargetOutcome::Completed {
                name,
                passed,
                failed,
                ..
            } => self.failure(&format!("{name}: {passed} passed, {failed} failed")),
            TargetOutcome::Errored { kind, message } => {
                self.failure(&format!("{}: {kind}: {message}", report.target));
            }
        }
    }
}

/// Serializable view of a finished run
#[derive(Debug, Serialize)]
pub struct SummaryView {
    /// Run identifier
    pub run_id: String,
    /// Verdict name
    pub verdict: String,
    /// Verdict message
    pub message: String,
    /// Total tests
    pub test_count: u32,
    /// Passed tests
    pub pass_count: u32,
    /// Failed tests
    pub fail_count: u32,
    /// Sign-in attempts used
    pub sign_in_attempts: Option<u32>,
    /// Per-target results
    pub targets: Vec<TargetView>,
    /// Screenshot paths
    pub artifacts: Vec<String>,
    /// Wall-clock duration in seconds
    pub duration_secs: f64,
}

/// Serializable view of one target
#[derive(Debug, Serialize)]
pub struct TargetView {
    /// 1-based position in the run
    pub run_index: usize,
    /// Target URL
    pub url: String,
    /// Case or suite name, when the page reported one
    pub name: Option<String>,
    /// Passed tests
    pub passed: u32,
    /// Failed tests
    pub failed: u32,
    /// Error kind, when the target errored
    pub error: Option<String>,
}

impl From<&RunSummary> for SummaryView {
    fn from(summary: &RunSummary) -> Self {
        let targets = summary
            .targets
            .iter()
            .map(|report| match &report.outcome {
                TargetOutcome::Completed {
                    name,
                    passed,
                    failed,
                    ..
                } => TargetView {
                    run_index: report.run_index,
                    url: report.target.to_string(),
                    name: Some(name.clone()),
                    passed: *passed,
                    failed: *failed,
                    error: None,
                },
                TargetOutcome::Errored { kind, .. } => TargetView {
                    run_index: report.run_index,
                    url: report.target.to_string(),
                    name: None,
                    passed: 0,
                    failed: 1,
                    error: Some((*kind).to_string()),
                },
            })
            .collect();
        let duration = summary.finished_at - summary.started_at;
        Self {
            run_id: summary.run_id.to_string(),
            verdict: summary.verdict.to_string(),
            message: summary.message(),
            test_count: summary.tally.test_count,
            pass_count: summary.tally.pass_count,
            fail_count: summary.tally.fail_count,
            sign_in_attempts: summary.login.as_ref().map(|l| l.attempts),
            targets,
            artifacts: summary
                .artifacts
                .iter()
                .map(|a| a.path.display().to_string())
                .collect(),
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use fixtures::summary;

    mod fixtures {
        use super::*;
        use suiterun::runner::RunTally;

        pub fn summary(pass: u32, fail: u32) -> RunSummary {
            let mut tally = RunTally::default();
            tally.record(pass, fail);
            let target = TestTarget::new("https://apps.example.com/play/1").unwrap();
            let now = std::time::SystemTime::now().into();
            RunSummary {
                run_id: Default::default(),
                tally,
                verdict: tally.verdict(),
                login: None,
                targets: vec![
                    TargetReport {
                        run_index: 1,
                        target: target.clone(),
                        outcome: TargetOutcome::Completed {
                            name: "Checkout".into(),
                            passed: pass,
                            failed: fail,
                            elapsed: std::time::Duration::from_secs(4),
                        },
                    },
                    TargetReport {
                        run_index: 2,
                        target,
                        outcome: TargetOutcome::Errored {
                            kind: "ResultPayloadMissing",
                            message: "no results".into(),
                        },
                    },
                ],
                artifacts: Vec::new(),
                started_at: now,
                finished_at: now,
            }
        }
    }

    mod progress_reporter_tests {
        use super::*;

        #[test]
        fn test_new_reporter() {
            let reporter = ProgressReporter::new(true, false);
            assert!(reporter.use_color);
            assert!(!reporter.quiet);
        }

        #[test]
        fn test_observer_hooks() {
            let reporter = ProgressReporter::new(false, true);
            let run = summary(2, 1);
            reporter.login_attempt(1, 3);
            reporter.login_attempt(2, 3);
            for report in &run.targets {
                reporter.target_started(report.run_index, 2, &report.target);
                reporter.target_finished(report);
            }
            reporter.finish();
        }

        #[test]
        fn test_plain_verdict_line() {
            let reporter = ProgressReporter::new(false, false);
            assert_eq!(reporter.verdict_line(&summary(3, 0)), summary(3, 0).message());
        }
    }

    mod summary_view_tests {
        use super::*;

        #[test]
        fn test_view_fields() {
            let view = SummaryView::from(&summary(2, 1));
            assert_eq!(view.verdict, "Inconclusive");
            assert_eq!((view.test_count, view.pass_count, view.fail_count), (3, 2, 1));
            assert_eq!(view.targets.len(), 2);
            assert_eq!(view.targets[1].error.as_deref(), Some("ResultPayloadMissing"));
            assert_eq!(view.targets[0].name.as_deref(), Some("Checkout"));
        }

        #[test]
        fn test_view_serializes() {
            let json = serde_json::to_value(SummaryView::from(&summary(1, 0))).unwrap();
            assert_eq!(json["verdict"], "Succeeded");
            assert!(json["message"].as_str().unwrap().starts_with("Success: "));
        }
    }
}
