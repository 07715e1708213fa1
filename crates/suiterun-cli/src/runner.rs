//! Command execution

use std::sync::Arc;

use suiterun::config::RunConfig;
use suiterun::driver::BrowserDriver;
use suiterun::locator::LocatorRegistry;
use suiterun::login::{Credential, FederatedStep, FormFederatedStep, LoginStrategy};
use suiterun::runner::{RunAggregator, RunObserver, RunSummary};
use suiterun::target::{load_targets, TestTarget};
use suiterun::RunError;
use tokio_util::sync::CancellationToken;

use crate::commands::{RunArgs, SummaryFormatArg, ValidateArgs};
use crate::config::{build_run_config, CliConfig};
use crate::error::CliResult;
use crate::output::{ProgressReporter, SummaryView};

/// Everything a run needs before a browser is opened
#[derive(Debug)]
pub struct RunPlan {
    /// Validated configuration
    pub config: RunConfig,
    /// Targets in run order
    pub targets: Vec<TestTarget>,
    /// Sign-in strategy
    pub strategy: LoginStrategy,
    /// Credential from the environment
    pub credential: Option<Credential>,
}

impl RunPlan {
    /// Assemble a plan from already loaded parts
    pub fn new(
        config: RunConfig,
        targets: Vec<TestTarget>,
        credential: Option<Credential>,
    ) -> CliResult<Self> {
        let method = config.resolve_login_method(credential.is_some());
        let step: Arc<dyn FederatedStep> = Arc::new(FormFederatedStep::default());
        let strategy = LoginStrategy::resolve(method, credential.as_ref(), Some(step))?;
        Ok(Self {
            config,
            targets,
            strategy,
            credential,
        })
    }
}

/// Sign in and run every target on `driver`, always closing it afterwards
pub async fn execute_plan<D: BrowserDriver>(
    driver: D,
    plan: RunPlan,
    cancel: CancellationToken,
    observer: Arc<dyn RunObserver>,
) -> CliResult<RunSummary> {
    let RunPlan {
        config,
        targets,
        strategy,
        credential,
    } = plan;

    let mut aggregator = RunAggregator::new(driver, config, strategy, credential)?
        .with_cancellation(cancel)
        .with_observer(observer);
    let result = aggregator.run(&targets).await;
    if let Err(e) = aggregator.shutdown().await {
        tracing::warn!(error = %e, "browser did not close cleanly");
    }
    Ok(result?)
}

fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received; cancelling run");
            cancel.cancel();
        }
    });
}

#[cfg(feature = "browser")]
async fn launch(config: &RunConfig) -> CliResult<suiterun::browser::ChromiumDriver> {
    Ok(suiterun::browser::ChromiumDriver::launch(&config.browser).await?)
}

#[cfg(not(feature = "browser"))]
async fn launch(_config: &RunConfig) -> CliResult<suiterun::driver::MockDriver> {
    Err(crate::error::CliError::config(
        "suiterun was built without browser support; rebuild with --features browser",
    ))
}

/// `suiterun run`
pub async fn run(cli: CliConfig, args: &RunArgs) -> CliResult<()> {
    let reporter = Arc::new(ProgressReporter::new(
        cli.color.should_color(),
        cli.verbosity.is_quiet(),
    ));

    let config = build_run_config(&args.config)?;
    let targets = load_targets(&args.targets)?;
    let plan = RunPlan::new(config, targets, Credential::from_env()?)?;
    if plan.targets.is_empty() {
        return Err(RunError::NoTargets.into());
    }
    reporter.info(&format!(
        "{} test URL(s), {} sign-in",
        plan.targets.len(),
        plan.strategy
    ));

    let driver = launch(&plan.config).await?;
    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let result = execute_plan(driver, plan, cancel, reporter.clone()).await;
    reporter.finish();
    let summary = result?;

    match args.summary {
        SummaryFormatArg::Text => {
            for artifact in &summary.artifacts {
                reporter.info(&format!("Screenshot: {}", artifact.path.display()));
            }
            println!("{}", reporter.verdict_line(&summary));
        }
        SummaryFormatArg::Json => {
            println!("{}", serde_json::to_string_pretty(&SummaryView::from(&summary))?);
        }
    }
    summary.into_result()?;
    Ok(())
}

/// `suiterun validate`
pub fn validate(cli: CliConfig, args: &ValidateArgs) -> CliResult<()> {
    let reporter = ProgressReporter::new(cli.color.should_color(), cli.verbosity.is_quiet());
    let config = build_run_config(&args.config)?;
    LocatorRegistry::global().validate()?;

    let targets = match &args.targets {
        Some(path) => load_targets(path)?,
        None => Vec::new(),
    };
    let plan = RunPlan::new(config, targets, Credential::from_env()?)?;

    reporter.success(&format!("Configuration valid ({} sign-in)", plan.strategy));
    if args.targets.is_some() {
        reporter.success(&format!("{} test URL(s)", plan.targets.len()));
    }
    Ok(())
}

/// `suiterun locators`
pub fn locators() {
    for (name, selector) in LocatorRegistry::global().iter() {
        println!("{name:<40} {selector}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use suiterun::driver::{Effect, MockDriver, Trigger};
    use suiterun::locator::Element;
    use suiterun::payload::DEFAULT_RESULT_SCRIPT;
    use suiterun::runner::RunVerdict;
    use crate::error::CliError;

    const LOGIN_URL: &str = "https://make.example.com/login";

    fn config(dir: &std::path::Path) -> RunConfig {
        RunConfig::new()
            .with_login_url(LOGIN_URL)
            .with_results_directory(dir)
    }

    fn targets() -> Vec<TestTarget> {
        vec![TestTarget::new("https://apps.example.com/play/1").unwrap()]
    }

    fn signed_in_page() -> MockDriver {
        let driver = MockDriver::new();
        for element in [Element::LoginMainPage, Element::LoginAppsList] {
            driver.on(
                Trigger::Navigate(LOGIN_URL.into()),
                Effect::Show(element.selector().unwrap().clone()),
            );
        }
        driver
    }

    mod plan_tests {
        use super::*;

        #[test]
        fn test_no_credential_is_pass_through() {
            let dir = tempfile::tempdir().unwrap();
            let plan = RunPlan::new(config(dir.path()), targets(), None).unwrap();
            assert!(matches!(plan.strategy, LoginStrategy::PassThrough));
        }

        #[test]
        fn test_credential_is_cloud() {
            let dir = tempfile::tempdir().unwrap();
            let plan = RunPlan::new(
                config(dir.path()),
                targets(),
                Some(Credential::new("alice@example.com", "pw")),
            )
            .unwrap();
            assert_eq!(plan.strategy.name(), "CloudIdentity");
        }

        #[test]
        fn test_federated_gets_form_step() {
            let dir = tempfile::tempdir().unwrap();
            let cfg = RunConfig {
                login_method: Some(suiterun::config::LoginMethod::FederatedIdentity),
                ..config(dir.path())
            };
            let plan =
                RunPlan::new(cfg, targets(), Some(Credential::new("alice", "pw"))).unwrap();
            assert!(matches!(plan.strategy, LoginStrategy::FederatedIdentity(_)));
        }

        #[test]
        fn test_cloud_without_credential_rejected() {
            let dir = tempfile::tempdir().unwrap();
            let cfg = RunConfig {
                login_method: Some(suiterun::config::LoginMethod::CloudIdentity),
                ..config(dir.path())
            };
            let err = RunPlan::new(cfg, targets(), None).unwrap_err();
            assert!(matches!(err, CliError::Run(RunError::Config { .. })));
        }
    }

    mod execute_tests {
        use super::*;

        fn quiet() -> Arc<dyn RunObserver> {
            Arc::new(ProgressReporter::new(false, true))
        }

        #[tokio::test(start_paused = true)]
        async fn test_success_closes_browser() {
            let dir = tempfile::tempdir().unwrap();
            let driver = signed_in_page();
            driver.set_script_result(
                DEFAULT_RESULT_SCRIPT,
                serde_json::json!({"ExecutionMode": 0, "TestCaseResult": {"Success": true}}),
            );
            let plan = RunPlan::new(config(dir.path()), targets(), None).unwrap();

            let driver = Arc::new(driver);
            let summary = execute_plan(driver.clone(), plan, CancellationToken::new(), quiet())
                .await
                .unwrap();
            assert_eq!(summary.verdict, RunVerdict::Succeeded);
            assert!(driver.is_closed());
        }

        #[tokio::test(start_paused = true)]
        async fn test_failure_still_closes_browser() {
            let dir = tempfile::tempdir().unwrap();
            let plan = RunPlan::new(config(dir.path()), targets(), None).unwrap();

            let driver = Arc::new(MockDriver::new());
            let err = execute_plan(driver.clone(), plan, CancellationToken::new(), quiet())
                .await
                .unwrap_err();
            assert!(matches!(err, CliError::Run(RunError::MainPageLoadFailed { .. })));
            assert!(driver.is_closed());
        }

        #[tokio::test(start_paused = true)]
        async fn test_cancelled_run_closes_browser() {
            let dir = tempfile::tempdir().unwrap();
            let plan = RunPlan::new(config(dir.path()), targets(), None).unwrap();
            let cancel = CancellationToken::new();
            cancel.cancel();

            let driver = Arc::new(signed_in_page());
            let err = execute_plan(driver.clone(), plan, cancel, quiet())
                .await
                .unwrap_err();
            assert_eq!(err.exit_code(), 130);
            assert!(driver.is_closed());
        }
    }
}
