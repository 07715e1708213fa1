//! Diagnostic screenshots.
//!
//! Capture is best effort: a failed screenshot is logged and skipped so it
//! can never hide the failure it was meant to document.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::ArtifactConfig;
use crate::driver::{BrowserDriver, ImageFormat};
use crate::result::RunResult;

/// Why a screenshot was taken
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactContext {
    /// A sign-in attempt failed (1-based attempt number)
    LoginErrorAttempt(u32),
    /// A target raised an error of the given kind (1-based run index)
    TestRun {
        /// Run index
        index: usize,
        /// Error kind, see [`crate::RunError::kind`]
        kind: &'static str,
    },
    /// A target finished and post-execution capture is on
    PostExecution(usize),
}

impl fmt::Display for ArtifactContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoginErrorAttempt(n) => write!(f, "LoginErrorAttempt{n}"),
            Self::TestRun { index, kind } => write!(f, "TestRun{index}-{kind}"),
            Self::PostExecution(index) => write!(f, "TestRun{index}-PostExecution"),
        }
    }
}

/// A screenshot written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticArtifact {
    /// File location
    pub path: PathBuf,
    /// Capture reason
    pub context: ArtifactContext,
    /// Capture time
    pub captured_at: DateTime<Utc>,
}

/// Writes screenshots to the results directory and remembers them
///
/// The captured list covers one run. From the second run of a session on,
/// file names carry `Run{n}-` after the prefix so earlier screenshots are
/// kept.
#[derive(Debug, Clone)]
pub struct ArtifactRecorder {
    directory: PathBuf,
    prefix: String,
    format: ImageFormat,
    run: u32,
    captured: Vec<DiagnosticArtifact>,
}

impl ArtifactRecorder {
    /// Create a recorder writing into `directory`
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, config: &ArtifactConfig) -> Self {
        Self {
            directory: directory.into(),
            prefix: config.prefix.clone(),
            format: config.format,
            run: 1,
            captured: Vec::new(),
        }
    }

    /// Start run number `run` (1-based), dropping anything a previous run left
    pub fn begin_run(&mut self, run: u32) {
        self.run = run.max(1);
        self.captured.clear();
    }

    /// Target file for a context: `{prefix}-{context}.{ext}`, or
    /// `{prefix}-Run{n}-{context}.{ext}` after the first run
    #[must_use]
    pub fn path_for(&self, context: &ArtifactContext) -> PathBuf {
        let ext = self.format.extension();
        let name = if self.run > 1 {
            format!("{}-Run{}-{context}.{ext}", self.prefix, self.run)
        } else {
            format!("{}-{context}.{ext}", self.prefix)
        };
        self.directory.join(name)
    }

    /// Results directory
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Capture a screenshot; failures are logged, never returned
    pub async fn capture(
        &mut self,
        driver: &dyn BrowserDriver,
        context: ArtifactContext,
    ) -> Option<&DiagnosticArtifact> {
        let path = self.path_for(&context);
        match self.write(driver, &path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), %context, "diagnostic screenshot saved");
                self.captured.push(DiagnosticArtifact {
                    path,
                    context,
                    captured_at: Utc::now(),
                });
                self.captured.last()
            }
            Err(e) => {
                tracing::warn!(error = %e, %context, "diagnostic screenshot failed");
                None
            }
        }
    }

    async fn write(&self, driver: &dyn BrowserDriver, path: &Path) -> RunResult<()> {
        let screenshot = driver.screenshot(self.format).await?;
        tokio::fs::create_dir_all(&self.directory).await?;
        tokio::fs::write(path, &screenshot.data).await?;
        Ok(())
    }

    /// Everything captured so far, in capture order
    #[must_use]
    pub fn artifacts(&self) -> &[DiagnosticArtifact] {
        &self.captured
    }

    /// Take the captured list, leaving the recorder empty
    pub fn take(&mut self) -> Vec<DiagnosticArtifact> {
        std::mem::take(&mut self.captured)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;

    #[test]
    fn test_context_names() {
        assert_eq!(ArtifactContext::LoginErrorAttempt(2).to_string(), "LoginErrorAttempt2");
        assert_eq!(
            ArtifactContext::TestRun {
                index: 3,
                kind: "ResultPayloadMissing"
            }
            .to_string(),
            "TestRun3-ResultPayloadMissing"
        );
        assert_eq!(
            ArtifactContext::PostExecution(1).to_string(),
            "TestRun1-PostExecution"
        );
    }

    #[test]
    fn test_path_uses_prefix_and_extension() {
        let recorder = ArtifactRecorder::new("/tmp/results", &ArtifactConfig::default());
        assert_eq!(
            recorder.path_for(&ArtifactContext::LoginErrorAttempt(1)),
            PathBuf::from("/tmp/results/RunTestAutomation-LoginErrorAttempt1.jpg")
        );

        let png = ArtifactConfig {
            prefix: "Nightly".into(),
            format: ImageFormat::Png,
        };
        let recorder = ArtifactRecorder::new("out", &png);
        assert_eq!(
            recorder.path_for(&ArtifactContext::PostExecution(4)),
            PathBuf::from("out/Nightly-TestRun4-PostExecution.png")
        );
    }

    #[test]
    fn test_later_runs_get_distinct_names() {
        let mut recorder = ArtifactRecorder::new("out", &ArtifactConfig::default());
        let context = ArtifactContext::TestRun {
            index: 1,
            kind: "ResultPayloadMissing",
        };
        let first = recorder.path_for(&context);

        recorder.begin_run(2);
        assert_eq!(
            recorder.path_for(&context),
            PathBuf::from("out/RunTestAutomation-Run2-TestRun1-ResultPayloadMissing.jpg")
        );
        assert_ne!(recorder.path_for(&context), first);
    }

    #[tokio::test]
    async fn test_begin_run_drops_previous_captures() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = ArtifactRecorder::new(dir.path(), &ArtifactConfig::default());
        let driver = MockDriver::new();
        recorder
            .capture(&driver, ArtifactContext::LoginErrorAttempt(1))
            .await
            .unwrap();

        recorder.begin_run(2);
        assert!(recorder.artifacts().is_empty());
        assert!(dir.path().join("RunTestAutomation-LoginErrorAttempt1.jpg").exists());
    }

    #[tokio::test]
    async fn test_capture_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("nested/results");
        let mut recorder = ArtifactRecorder::new(&results, &ArtifactConfig::default());
        let driver = MockDriver::new();

        let artifact = recorder
            .capture(&driver, ArtifactContext::LoginErrorAttempt(1))
            .await
            .unwrap()
            .clone();

        assert!(artifact.path.exists());
        assert_eq!(std::fs::read(&artifact.path).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
        assert_eq!(recorder.artifacts().len(), 1);
    }

    #[tokio::test]
    async fn test_capture_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = ArtifactRecorder::new(dir.path(), &ArtifactConfig::default());
        let driver = MockDriver::new();
        driver.fail_next("screenshot", "target closed");

        let artifact = recorder
            .capture(&driver, ArtifactContext::PostExecution(1))
            .await;
        assert!(artifact.is_none());
        assert!(recorder.artifacts().is_empty());

        assert!(recorder
            .capture(&driver, ArtifactContext::PostExecution(1))
            .await
            .is_some());
        assert_eq!(recorder.take().len(), 1);
        assert!(recorder.artifacts().is_empty());
    }
}
