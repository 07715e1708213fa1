//! Suiterun CLI library
//!
//! Argument parsing, configuration assembly, logging setup and progress
//! output for the `suiterun` binary.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
pub mod runner;

pub use commands::{
    BrowserArg, Cli, ColorArg, Commands, ConfigArgs, LogFormatArg, LoginMethodArg, RunArgs,
    SummaryFormatArg, ValidateArgs,
};
pub use config::{build_run_config, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{ProgressReporter, SummaryView, TargetView};
pub use runner::{execute_plan, RunPlan};
