//! Suiterun CLI: sign in once, run every test URL, report one verdict
//!
//! ## Usage
//!
//! ```bash
//! export SUITERUN_USERNAME=alice@example.com SUITERUN_PASSWORD=...
//! suiterun run --config run.yaml --targets urls.json
//! suiterun run --login-url https://make.example.com --targets urls.json --headed
//! suiterun validate --config run.yaml --targets urls.json
//! suiterun locators
//! ```
//!
//! Exit code 0 means every test passed.

use clap::Parser;
use std::process::ExitCode;
use suiterun_cli::{logging, runner, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init(config.verbosity, cli.log_format, config.color.should_color());

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli, config: CliConfig) -> CliResult<()> {
    match cli.command {
        Commands::Run(args) => runner::run(config, &args).await,
        Commands::Validate(args) => runner::validate(config, &args),
        Commands::Locators => {
            runner::locators();
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.clone().into();
    console::set_colors_enabled_stderr(color.should_color());
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(color)
}
