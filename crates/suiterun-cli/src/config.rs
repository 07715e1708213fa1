//! CLI configuration and run configuration assembly

use crate::commands::ConfigArgs;
use crate::error::CliResult;
use serde::{Deserialize, Serialize};
use suiterun::config::RunConfig;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Verbosity from `-q` and the `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default log filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn default_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn,suiterun=info",
            Self::Verbose => "info,suiterun=debug",
            Self::Debug => "debug,suiterun=trace",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

/// Build the run configuration: YAML file first, then flag overrides
pub fn build_run_config(args: &ConfigArgs) -> CliResult<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    if let Some(url) = &args.login_url {
        config.login_url.clone_from(url);
    }
    if let Some(method) = args.login_method {
        config.login_method = Some(method.into());
    }
    if let Some(browser) = args.browser {
        config.browser.browser_type = browser.into();
    }
    if let Some(path) = &args.drivers_path {
        config.browser.drivers_path = Some(path.clone());
    }
    if args.headed {
        config.browser.headless = false;
    } else if args.headless {
        config.browser.headless = true;
    }
    if args.private {
        config.browser.private_mode = true;
    }
    if let Some(dir) = &args.results_dir {
        config.results_directory.clone_from(dir);
    }
    if let Some(secs) = args.max_wait {
        config.max_test_wait_seconds = secs;
    }
    if let Some(attempts) = args.attempts {
        config.sign_in_attempts = attempts;
    }
    if args.continue_on_error {
        config.continue_on_target_error = true;
    }
    if args.capture_post_execution {
        config.capture_post_execution = true;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::commands::{BrowserArg, LoginMethodArg};
    use crate::error::CliError;
    use std::path::PathBuf;
    use suiterun::config::{BrowserType, LoginMethod};

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_from_flags() {
            assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
            assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
            assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
            assert_eq!(Verbosity::from_flags(false, 7), Verbosity::Debug);
        }

        #[test]
        fn test_is_verbose() {
            assert!(!Verbosity::Quiet.is_verbose());
            assert!(!Verbosity::Normal.is_verbose());
            assert!(Verbosity::Verbose.is_verbose());
            assert!(Verbosity::Debug.is_verbose());
            assert!(Verbosity::Quiet.is_quiet());
        }

        #[test]
        fn test_default_filter_scopes_library() {
            assert!(Verbosity::Normal.default_filter().contains("suiterun=info"));
            assert_eq!(Verbosity::Quiet.default_filter(), "error");
        }
    }

    mod color_tests {
        use super::*;

        #[test]
        fn test_explicit_choices() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }
    }

    mod run_config_tests {
        use super::*;

        fn base() -> ConfigArgs {
            ConfigArgs {
                login_url: Some("https://make.example.com".into()),
                ..ConfigArgs::default()
            }
        }

        #[test]
        fn test_headless_flag_overrides_default() {
            let args = ConfigArgs {
                headless: true,
                ..base()
            };
            assert!(build_run_config(&args).unwrap().browser.headless);
            assert!(!build_run_config(&base()).unwrap().browser.headless);
        }

        #[test]
        fn test_headed_flag_overrides_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("run.yaml");
            std::fs::write(
                &path,
                "login_url: https://make.example.com\nbrowser:\n  headless: true\n",
            )
            .unwrap();
            let args = ConfigArgs {
                config: Some(path.clone()),
                ..ConfigArgs::default()
            };
            assert!(build_run_config(&args).unwrap().browser.headless);

            let args = ConfigArgs {
                config: Some(path),
                headed: true,
                ..ConfigArgs::default()
            };
            assert!(!build_run_config(&args).unwrap().browser.headless);
        }

        #[test]
        fn test_flags_only() {
            let args = ConfigArgs {
                login_method: Some(LoginMethodArg::PassThrough),
                browser: Some(BrowserArg::Edge),
                drivers_path: Some(PathBuf::from("/opt/edge/msedge")),
                headed: true,
                private: true,
                attempts: Some(1),
                max_wait: Some(90),
                continue_on_error: true,
                ..base()
            };
            let config = build_run_config(&args).unwrap();
            assert_eq!(config.login_url, "https://make.example.com");
            assert_eq!(config.login_method, Some(LoginMethod::PassThrough));
            assert_eq!(config.browser.browser_type, BrowserType::Edge);
            assert!(!config.browser.headless);
            assert!(config.browser.private_mode);
            assert_eq!(config.sign_in_attempts, 1);
            assert_eq!(config.max_test_wait_seconds, 90);
            assert!(config.continue_on_target_error);
        }

        #[test]
        fn test_flags_override_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("run.yaml");
            std::fs::write(
                &path,
                "login_url: https://file.example.com\nsign_in_attempts: 4\nmax_test_wait_seconds: 300\n",
            )
            .unwrap();

            let args = ConfigArgs {
                config: Some(path),
                max_wait: Some(120),
                ..ConfigArgs::default()
            };
            let config = build_run_config(&args).unwrap();
            assert_eq!(config.login_url, "https://file.example.com");
            assert_eq!(config.sign_in_attempts, 4);
            assert_eq!(config.max_test_wait_seconds, 120);
        }

        #[test]
        fn test_missing_login_url_rejected() {
            let err = build_run_config(&ConfigArgs::default()).unwrap_err();
            assert!(matches!(err, CliError::Run(_)));
            assert!(err.to_string().contains("login_url"));
        }

        #[test]
        fn test_zero_attempts_rejected() {
            let args = ConfigArgs {
                attempts: Some(0),
                ..base()
            };
            assert!(build_run_config(&args).is_err());
        }
    }
}
