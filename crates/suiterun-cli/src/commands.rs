//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use suiterun::config::{BrowserType, LoginMethod};

/// Suiterun: sign in once, run every test URL, report one verdict
#[derive(Parser, Debug)]
#[command(name = "suiterun")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Log line format
    #[arg(long, default_value = "text", global = true, env = "SUITERUN_LOG_FORMAT")]
    pub log_format: LogFormatArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and run every test URL in the target file
    Run(RunArgs),

    /// Check configuration and target file without opening a browser
    Validate(ValidateArgs),

    /// List the named element locators
    Locators,
}

/// Configuration file and the overrides shared by `run` and `validate`
#[derive(Args, Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ConfigArgs {
    /// YAML run configuration
    #[arg(short, long, env = "SUITERUN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Login entry URL
    #[arg(long, env = "SUITERUN_LOGIN_URL")]
    pub login_url: Option<String>,

    /// Sign-in method (default: pass-through without a user name)
    #[arg(long, env = "SUITERUN_LOGIN_METHOD")]
    pub login_method: Option<LoginMethodArg>,

    /// Browser to drive
    #[arg(long, env = "SUITERUN_BROWSER")]
    pub browser: Option<BrowserArg>,

    /// Browser executable or the directory holding it
    #[arg(long, env = "SUITERUN_DRIVERS_PATH")]
    pub drivers_path: Option<PathBuf>,

    /// Show the browser window
    #[arg(long, conflicts_with = "headless")]
    pub headed: bool,

    /// Run without a browser window
    #[arg(long)]
    pub headless: bool,

    /// Use a private (incognito) window
    #[arg(long)]
    pub private: bool,

    /// Directory for screenshots
    #[arg(short, long, env = "SUITERUN_RESULTS_DIR")]
    pub results_dir: Option<PathBuf>,

    /// Seconds to wait for each test's results
    #[arg(long, env = "SUITERUN_MAX_TEST_WAIT")]
    pub max_wait: Option<u64>,

    /// Sign-in attempts before giving up
    #[arg(long, env = "SUITERUN_SIGN_IN_ATTEMPTS")]
    pub attempts: Option<u32>,

    /// Record a failed target and keep going
    #[arg(long)]
    pub continue_on_error: bool,

    /// Screenshot every target after it finishes
    #[arg(long)]
    pub capture_post_execution: bool,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// JSON file with {"TestURLs": [...]}
    #[arg(short, long, env = "SUITERUN_TARGETS")]
    pub targets: PathBuf,

    /// Shared configuration
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Summary format on stdout
    #[arg(long, default_value = "text")]
    pub summary: SummaryFormatArg,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON file with {"TestURLs": [...]}
    #[arg(short, long, env = "SUITERUN_TARGETS")]
    pub targets: Option<PathBuf>,

    /// Shared configuration
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Sign-in method argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginMethodArg {
    /// User id and password at the cloud provider
    Cloud,
    /// Federated identity provider after the user id
    Federated,
    /// Existing session
    PassThrough,
}

impl From<LoginMethodArg> for LoginMethod {
    fn from(arg: LoginMethodArg) -> Self {
        match arg {
            LoginMethodArg::Cloud => Self::CloudIdentity,
            LoginMethodArg::Federated => Self::FederatedIdentity,
            LoginMethodArg::PassThrough => Self::PassThrough,
        }
    }
}

/// Browser argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowserArg {
    /// Google Chrome / Chromium
    Chrome,
    /// Microsoft Edge
    Edge,
    /// Firefox (not supported by the Chromium driver)
    Firefox,
}

impl From<BrowserArg> for BrowserType {
    fn from(arg: BrowserArg) -> Self {
        match arg {
            BrowserArg::Chrome => Self::Chrome,
            BrowserArg::Edge => Self::Edge,
            BrowserArg::Firefox => Self::Firefox,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Log format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Summary format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SummaryFormatArg {
    /// Verdict line and per-target results
    #[default]
    Text,
    /// JSON document
    Json,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_run_with_overrides() {
            let cli = Cli::try_parse_from([
                "suiterun",
                "-vv",
                "run",
                "--targets",
                "urls.json",
                "--login-url",
                "https://make.example.com",
                "--login-method",
                "federated",
                "--attempts",
                "5",
                "--headed",
                "--continue-on-error",
            ])
            .unwrap();
            assert_eq!(cli.verbose, 2);
            let Commands::Run(args) = cli.command else {
                panic!("expected run");
            };
            assert_eq!(args.targets, PathBuf::from("urls.json"));
            assert_eq!(args.config.login_method, Some(LoginMethodArg::Federated));
            assert_eq!(args.config.attempts, Some(5));
            assert!(args.config.headed);
            assert!(args.config.continue_on_error);
            assert_eq!(args.summary, SummaryFormatArg::Text);
        }

        #[test]
        fn test_headed_and_headless_conflict() {
            let parsed = Cli::try_parse_from([
                "suiterun", "run", "-t", "urls.json", "--headed", "--headless",
            ]);
            assert!(parsed.is_err());
        }

        #[test]
        fn test_run_requires_targets() {
            assert!(Cli::try_parse_from(["suiterun", "run"]).is_err());
        }

        #[test]
        fn test_validate_targets_optional() {
            let cli = Cli::try_parse_from(["suiterun", "validate", "-c", "run.yaml"]).unwrap();
            let Commands::Validate(args) = cli.command else {
                panic!("expected validate");
            };
            assert_eq!(args.config.config, Some(PathBuf::from("run.yaml")));
        }

        #[test]
        fn test_global_flags_after_subcommand() {
            let cli = Cli::try_parse_from(["suiterun", "locators", "--log-format", "json", "-q"])
                .unwrap();
            assert_eq!(cli.log_format, LogFormatArg::Json);
            assert!(cli.quiet);
        }
    }

    mod conversion_tests {
        use super::*;

        #[test]
        fn test_login_method_mapping() {
            assert_eq!(LoginMethod::from(LoginMethodArg::Cloud), LoginMethod::CloudIdentity);
            assert_eq!(
                LoginMethod::from(LoginMethodArg::PassThrough),
                LoginMethod::PassThrough
            );
        }

        #[test]
        fn test_browser_mapping() {
            assert_eq!(BrowserType::from(BrowserArg::Edge), BrowserType::Edge);
            assert_eq!(BrowserType::from(BrowserArg::Firefox), BrowserType::Firefox);
        }
    }
}
