//! Run configuration.
//!
//! One explicit [`RunConfig`] value is handed to the aggregator; nothing is
//! read from global state. The file format is YAML. Credentials are never
//! part of the file: they come from [`USERNAME_ENV`] and [`PASSWORD_ENV`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::driver::ImageFormat;
use crate::result::{RunError, RunResult};

/// Environment variable holding the sign-in user name
pub const USERNAME_ENV: &str = "SUITERUN_USERNAME";

/// Environment variable holding the sign-in password
pub const PASSWORD_ENV: &str = "SUITERUN_PASSWORD";

/// Default maximum wait for one target's result payload (10 minutes)
pub const DEFAULT_MAX_TEST_WAIT_SECS: u64 = 600;

/// Default number of sign-in attempts
pub const DEFAULT_SIGN_IN_ATTEMPTS: u32 = 3;

/// Default artifact file name prefix
pub const DEFAULT_ARTIFACT_PREFIX: &str = "RunTestAutomation";

/// Browser family to launch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrowserType {
    /// Google Chrome / Chromium
    #[default]
    Chrome,
    /// Microsoft Edge (Chromium based)
    Edge,
    /// Mozilla Firefox
    Firefox,
    /// Remote WebDriver endpoint
    Remote,
}

impl std::fmt::Display for BrowserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Chrome => "Chrome",
            Self::Edge => "Edge",
            Self::Firefox => "Firefox",
            Self::Remote => "Remote",
        };
        f.write_str(name)
    }
}

/// Browser launch settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserConfig {
    /// Browser family
    pub browser_type: BrowserType,
    /// Browser executable, or the directory holding it
    pub drivers_path: Option<PathBuf>,
    /// Start an incognito/InPrivate session
    pub private_mode: bool,
    /// Run without a visible window
    pub headless: bool,
    /// User agent override
    pub user_agent: Option<String>,
}

/// How the session authenticates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoginMethod {
    /// Cloud identity provider: user id, password, stay-signed-in prompt
    CloudIdentity,
    /// User id at the cloud provider, then a federated identity provider
    FederatedIdentity,
    /// Session already authenticated by SSO or a previous run
    PassThrough,
}

impl std::fmt::Display for LoginMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CloudIdentity => "CloudIdentity",
            Self::FederatedIdentity => "FederatedIdentity",
            Self::PassThrough => "PassThrough",
        };
        f.write_str(name)
    }
}

/// Diagnostic screenshot settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactConfig {
    /// File name prefix
    pub prefix: String,
    /// Image encoding
    pub format: ImageFormat,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_ARTIFACT_PREFIX.to_string(),
            format: ImageFormat::Jpeg,
        }
    }
}

/// Per-step wait budgets, in seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Timeouts {
    /// User id field on the sign-in page
    pub user_id_field_secs: u64,
    /// Password field after the user id was submitted
    pub password_field_secs: u64,
    /// Optional "stay signed in" prompt
    pub stay_signed_in_secs: u64,
    /// Landing page after credential entry
    pub main_page_secs: u64,
    /// Landing page when no credentials are entered
    pub pass_through_main_page_secs: u64,
    /// Apps list inside the landing page
    pub apps_list_secs: u64,
    /// URL change after handing over to a federated provider
    pub redirect_secs: u64,
    /// Root container of the app under test
    pub app_host_secs: u64,
    /// Optional permission dialog
    pub permission_dialog_secs: u64,
    /// Document ready state
    pub page_load_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            user_id_field_secs: 30,
            password_field_secs: 30,
            stay_signed_in_secs: 5,
            main_page_secs: 120,
            pass_through_main_page_secs: 180,
            apps_list_secs: 30,
            redirect_secs: 5,
            app_host_secs: 30,
            permission_dialog_secs: 5,
            page_load_secs: 30,
        }
    }
}

impl Timeouts {
    /// User id field wait
    #[must_use]
    pub const fn user_id_field(&self) -> Duration {
        Duration::from_secs(self.user_id_field_secs)
    }

    /// Password field wait
    #[must_use]
    pub const fn password_field(&self) -> Duration {
        Duration::from_secs(self.password_field_secs)
    }

    /// Stay-signed-in probe
    #[must_use]
    pub const fn stay_signed_in(&self) -> Duration {
        Duration::from_secs(self.stay_signed_in_secs)
    }

    /// Main page wait after credential entry
    #[must_use]
    pub const fn main_page(&self) -> Duration {
        Duration::from_secs(self.main_page_secs)
    }

    /// Main page wait for pass-through sign-in
    #[must_use]
    pub const fn pass_through_main_page(&self) -> Duration {
        Duration::from_secs(self.pass_through_main_page_secs)
    }

    /// Apps list wait
    #[must_use]
    pub const fn apps_list(&self) -> Duration {
        Duration::from_secs(self.apps_list_secs)
    }

    /// Federated redirect wait
    #[must_use]
    pub const fn redirect(&self) -> Duration {
        Duration::from_secs(self.redirect_secs)
    }

    /// App host wait
    #[must_use]
    pub const fn app_host(&self) -> Duration {
        Duration::from_secs(self.app_host_secs)
    }

    /// Permission dialog probe
    #[must_use]
    pub const fn permission_dialog(&self) -> Duration {
        Duration::from_secs(self.permission_dialog_secs)
    }

    /// Page load wait
    #[must_use]
    pub const fn page_load(&self) -> Duration {
        Duration::from_secs(self.page_load_secs)
    }

    fn named(&self) -> [(&'static str, u64); 10] {
        [
            ("user_id_field_secs", self.user_id_field_secs),
            ("password_field_secs", self.password_field_secs),
            ("stay_signed_in_secs", self.stay_signed_in_secs),
            ("main_page_secs", self.main_page_secs),
            ("pass_through_main_page_secs", self.pass_through_main_page_secs),
            ("apps_list_secs", self.apps_list_secs),
            ("redirect_secs", self.redirect_secs),
            ("app_host_secs", self.app_host_secs),
            ("permission_dialog_secs", self.permission_dialog_secs),
            ("page_load_secs", self.page_load_secs),
        ]
    }
}

/// Configuration of one test run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Browser launch settings
    pub browser: BrowserConfig,
    /// Sign-in entry URL
    pub login_url: String,
    /// Sign-in method; unset picks one from the available credentials
    pub login_method: Option<LoginMethod>,
    /// Maximum wait for one target's result payload
    pub max_test_wait_seconds: u64,
    /// Sign-in attempts before giving up
    pub sign_in_attempts: u32,
    /// Directory for diagnostic screenshots
    pub results_directory: PathBuf,
    /// Screenshot naming and format
    pub artifacts: ArtifactConfig,
    /// Capture a screenshot after every successful target
    pub capture_post_execution: bool,
    /// Count a failing target as one failed test and keep going
    pub continue_on_target_error: bool,
    /// Polling interval for all waits
    pub poll_interval_ms: u64,
    /// Per-step wait budgets
    pub timeouts: Timeouts,
    /// Script returning the result payload; unset uses the player default
    pub result_script: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
            login_url: String::new(),
            login_method: None,
            max_test_wait_seconds: DEFAULT_MAX_TEST_WAIT_SECS,
            sign_in_attempts: DEFAULT_SIGN_IN_ATTEMPTS,
            results_directory: PathBuf::from("results"),
            artifacts: ArtifactConfig::default(),
            capture_post_execution: false,
            continue_on_target_error: false,
            poll_interval_ms: crate::wait::DEFAULT_POLL_INTERVAL_MS,
            timeouts: Timeouts::default(),
            result_script: None,
        }
    }
}

impl RunConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from YAML text
    pub fn from_yaml_str(text: &str) -> RunResult<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Load from a YAML file
    pub fn load(path: &Path) -> RunResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            RunError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Set the sign-in entry URL
    #[must_use]
    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = url.into();
        self
    }

    /// Set the sign-in method
    #[must_use]
    pub const fn with_login_method(mut self, method: LoginMethod) -> Self {
        self.login_method = Some(method);
        self
    }

    /// Set the results directory
    #[must_use]
    pub fn with_results_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_directory = dir.into();
        self
    }

    /// Set the sign-in attempt budget
    #[must_use]
    pub const fn with_sign_in_attempts(mut self, attempts: u32) -> Self {
        self.sign_in_attempts = attempts;
        self
    }

    /// Set the per-target result wait
    #[must_use]
    pub const fn with_max_test_wait(mut self, seconds: u64) -> Self {
        self.max_test_wait_seconds = seconds;
        self
    }

    /// Maximum wait for one target's result payload
    #[must_use]
    pub const fn max_test_wait(&self) -> Duration {
        Duration::from_secs(self.max_test_wait_seconds)
    }

    /// Polling interval for all waits
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Effective sign-in method: the configured one, else pass-through
    /// without a user name and cloud identity with one
    #[must_use]
    pub fn resolve_login_method(&self, has_username: bool) -> LoginMethod {
        match self.login_method {
            Some(method) => method,
            None if has_username => LoginMethod::CloudIdentity,
            None => LoginMethod::PassThrough,
        }
    }

    /// Reject values no run can succeed with
    pub fn validate(&self) -> RunResult<()> {
        if self.login_url.trim().is_empty() {
            return Err(RunError::config("login_url must be set"));
        }
        if self.sign_in_attempts == 0 {
            return Err(RunError::config("sign_in_attempts must be at least 1"));
        }
        if self.max_test_wait_seconds == 0 {
            return Err(RunError::config("max_test_wait_seconds must be positive"));
        }
        if self.poll_interval_ms == 0 {
            return Err(RunError::config("poll_interval_ms must be positive"));
        }
        if let Some((name, _)) = self.timeouts.named().into_iter().find(|(_, secs)| *secs == 0) {
            return Err(RunError::config(format!("timeouts.{name} must be positive")));
        }
        if self.artifacts.prefix.trim().is_empty() {
            return Err(RunError::config("artifacts.prefix must not be empty"));
        }
        Ok(())
    }
}
