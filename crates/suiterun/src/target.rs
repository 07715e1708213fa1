//! Test targets and the target list file.
//!
//! The list file is JSON with one array of URLs:
//!
//! ```json
//! { "TestURLs": ["https://apps.example.com/play/...&source=testStudioLink"] }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::result::{RunError, RunResult};

/// One navigable test case or test suite URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestTarget(String);

impl TestTarget {
    /// Create a target, rejecting blank and non-http(s) URLs
    pub fn new(url: impl Into<String>) -> RunResult<Self> {
        let url = url.into().trim().to_string();
        if url.starts_with("https://") || url.starts_with("http://") {
            Ok(Self(url))
        } else {
            Err(RunError::config(format!("test URL '{url}' is not an http(s) URL")))
        }
    }

    /// The URL
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize)]
struct TargetFile {
    #[serde(rename = "TestURLs", default)]
    test_urls: Vec<String>,
}

/// Parse a target list, preserving order
pub fn parse_targets(text: &str) -> RunResult<Vec<TestTarget>> {
    let file: TargetFile = serde_json::from_str(text)?;
    file.test_urls.into_iter().map(TestTarget::new).collect()
}

/// Load the target list file; `%20` in the path is read as a space
pub fn load_targets(path: &Path) -> RunResult<Vec<TestTarget>> {
    let path = decode_path(path);
    let text = std::fs::read_to_string(&path).map_err(|e| {
        RunError::config(format!("cannot read test URL file {}: {e}", path.display()))
    })?;
    let targets = parse_targets(&text)?;
    tracing::debug!(path = %path.display(), count = targets.len(), "loaded test targets");
    Ok(targets)
}

fn decode_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(text) if text.contains("%20") => PathBuf::from(text.replace("%20", " ")),
        _ => path.to_path_buf(),
    }
}
