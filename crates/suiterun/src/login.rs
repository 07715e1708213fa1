//! Authentication state machine.
//!
//! One [`Authenticator::execute`] call is one sign-in attempt. It walks
//!
//! ```text
//! NotStarted → AwaitingUserIdField ─┬─ CredentialSubmitted ─┬─ AwaitingMainPage → Success
//!                                   │                       └─ Redirect (federated)
//!                                   └─ PassThroughDetected → AwaitingMainPage → Success
//! ```
//!
//! with `Failed` reachable from every non-terminal state. Recoverable
//! problems come back as [`LoginOutcome::Failure`] so the caller can retry;
//! fatal ones ([`RunError::is_fatal`]) are returned as errors. Retrying is
//! the aggregator's job, not this module's.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{LoginMethod, Timeouts, PASSWORD_ENV, USERNAME_ENV};
use crate::driver::{ElementHandle, Key};
use crate::locator::{Element, Selector};
use crate::result::{RunError, RunResult};
use crate::wait::{OnSatisfied, UrlChanged, Visible, Wait, Waiter};

const REDACTED: &str = "********";

// =============================================================================
// CREDENTIALS
// =============================================================================

/// A string that never shows up in `Debug` or `Display` output
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret value
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The plain value; only for typing it into the page
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({REDACTED})")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// User name and password for interactive sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    username: String,
    password: Secret,
}

impl Credential {
    /// Create a credential
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Secret::new(password),
        }
    }

    /// Read from [`USERNAME_ENV`] / [`PASSWORD_ENV`]
    pub fn from_env() -> RunResult<Option<Self>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through a variable lookup; no user name means no credential
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RunResult<Option<Self>> {
        let Some(username) = lookup(USERNAME_ENV).filter(|u| !u.trim().is_empty()) else {
            return Ok(None);
        };
        let password = lookup(PASSWORD_ENV)
            .ok_or_else(|| RunError::config(format!("{USERNAME_ENV} is set but {PASSWORD_ENV} is not")))?;
        Ok(Some(Self::new(username, password)))
    }

    /// Sign-in user name
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Sign-in password
    #[must_use]
    pub const fn password(&self) -> &Secret {
        &self.password
    }
}

// =============================================================================
// STRATEGY
// =============================================================================

/// Completes sign-in at a federated identity provider
///
/// Invoked after the user id was submitted at the cloud provider and the
/// browser was handed over to the federated provider's page.
#[async_trait]
pub trait FederatedStep: Send + Sync + fmt::Debug {
    /// Finish sign-in on the provider's page
    async fn complete(&self, credential: &Credential, waiter: &Waiter<'_>) -> RunResult<()>;
}

/// Federated step that fills a user name / password form and submits it
///
/// Defaults target an AD FS forms sign-in page.
#[derive(Debug, Clone)]
pub struct FormFederatedStep {
    /// User name input
    pub username_field: Selector,
    /// Password input
    pub password_field: Selector,
    /// Submit button
    pub submit_button: Selector,
    /// Wait for the form to render
    pub form_timeout: Duration,
}

impl Default for FormFederatedStep {
    fn default() -> Self {
        Self {
            username_field: Selector::css("#userNameInput"),
            password_field: Selector::css("#passwordInput"),
            submit_button: Selector::css("#submitButton"),
            form_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait]
impl FederatedStep for FormFederatedStep {
    async fn complete(&self, credential: &Credential, waiter: &Waiter<'_>) -> RunResult<()> {
        let driver = waiter.driver();
        waiter
            .until_visible(&self.username_field, self.form_timeout)
            .await?;
        driver
            .send_keys(&self.username_field, credential.username())
            .await?;
        driver
            .send_keys(&self.password_field, credential.password().expose())
            .await?;
        driver.click(&self.submit_button).await?;
        tracing::debug!("federated sign-in form submitted");
        Ok(())
    }
}

/// How one run authenticates, fixed at run start
#[derive(Debug, Clone)]
pub enum LoginStrategy {
    /// User id and password at the cloud provider
    CloudIdentity,
    /// User id at the cloud provider, the rest at a federated provider
    FederatedIdentity(Arc<dyn FederatedStep>),
    /// Existing session; no credential entry
    PassThrough,
}

impl LoginStrategy {
    /// Build the strategy for a sign-in method, checking its prerequisites
    pub fn resolve(
        method: LoginMethod,
        credential: Option<&Credential>,
        federated_step: Option<Arc<dyn FederatedStep>>,
    ) -> RunResult<Self> {
        match method {
            LoginMethod::PassThrough => Ok(Self::PassThrough),
            LoginMethod::CloudIdentity if credential.is_none() => Err(RunError::config(format!(
                "CloudIdentity login needs {USERNAME_ENV} and {PASSWORD_ENV}"
            ))),
            LoginMethod::CloudIdentity => Ok(Self::CloudIdentity),
            LoginMethod::FederatedIdentity if credential.is_none() => Err(RunError::config(
                format!("FederatedIdentity login needs {USERNAME_ENV} and {PASSWORD_ENV}"),
            )),
            LoginMethod::FederatedIdentity => federated_step.map(Self::FederatedIdentity).ok_or_else(|| {
                RunError::config("FederatedIdentity login needs a federated step")
            }),
        }
    }

    /// Strategy name for logs and errors
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CloudIdentity => "CloudIdentity",
            Self::FederatedIdentity(_) => "FederatedIdentity",
            Self::PassThrough => "PassThrough",
        }
    }
}

impl fmt::Display for LoginStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// STATES AND OUTCOMES
// =============================================================================

/// Sign-in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginState {
    /// Nothing done yet
    NotStarted,
    /// Entry page requested, looking for the user id field
    AwaitingUserIdField,
    /// User id (and password, for cloud identity) submitted
    CredentialSubmitted,
    /// No user id field: the session is already authenticated
    PassThroughDetected,
    /// Waiting for the landing page
    AwaitingMainPage,
    /// Landing page rendered
    Success,
    /// Handed over to a federated provider
    Redirect,
    /// Attempt failed
    Failed,
}

impl LoginState {
    /// Whether no further transition is possible
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Redirect | Self::Failed)
    }
}

/// States visited by one attempt, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginTrace {
    states: Vec<LoginState>,
}

impl Default for LoginTrace {
    fn default() -> Self {
        Self {
            states: vec![LoginState::NotStarted],
        }
    }
}

impl LoginTrace {
    fn record(&mut self, state: LoginState) {
        tracing::debug!(from = ?self.current(), to = ?state, "login transition");
        self.states.push(state);
    }

    /// All visited states
    #[must_use]
    pub fn states(&self) -> &[LoginState] {
        &self.states
    }

    /// The latest state
    #[must_use]
    pub fn current(&self) -> LoginState {
        self.states.last().copied().unwrap_or(LoginState::NotStarted)
    }

    /// Whether the attempt passed through `state`
    #[must_use]
    pub fn visited(&self, state: LoginState) -> bool {
        self.states.contains(&state)
    }
}

/// Result of one sign-in attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Landing page rendered
    Success,
    /// Federated provider took over
    Redirect,
    /// Recoverable failure with its reason
    Failure(String),
}

impl LoginOutcome {
    /// Whether the session is usable
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Success | Self::Redirect)
    }
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("Success"),
            Self::Redirect => f.write_str("Redirect"),
            Self::Failure(reason) => write!(f, "Failure: {reason}"),
        }
    }
}

/// Outcome and state trace of one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginReport {
    /// How the attempt ended
    pub outcome: LoginOutcome,
    /// States visited
    pub trace: LoginTrace,
}

// =============================================================================
// AUTHENTICATOR
// =============================================================================

/// Landing page check: the apps list renders and the page finishes loading
struct AppsListReady {
    apps_list: &'static Selector,
    apps_list_timeout: Duration,
    page_load_timeout: Duration,
}

#[async_trait]
impl OnSatisfied<ElementHandle> for AppsListReady {
    async fn call(&self, waiter: &Waiter<'_>, _main_page: &ElementHandle) -> RunResult<()> {
        if let Err(e) = waiter
            .until_visible(self.apps_list, self.apps_list_timeout)
            .await
        {
            tracing::warn!("apps list did not become visible");
            return Err(e);
        }
        waiter.page_loaded(self.page_load_timeout).await
    }
}

/// Runs sign-in attempts against one browser session
#[derive(Debug)]
pub struct Authenticator<'a> {
    waiter: &'a Waiter<'a>,
    strategy: &'a LoginStrategy,
    credential: Option<&'a Credential>,
    login_url: &'a str,
    timeouts: &'a Timeouts,
}

impl<'a> Authenticator<'a> {
    /// Create an authenticator
    #[must_use]
    pub const fn new(
        waiter: &'a Waiter<'a>,
        strategy: &'a LoginStrategy,
        credential: Option<&'a Credential>,
        login_url: &'a str,
        timeouts: &'a Timeouts,
    ) -> Self {
        Self {
            waiter,
            strategy,
            credential,
            login_url,
            timeouts,
        }
    }

    /// Run one sign-in attempt
    ///
    /// Fatal conditions ([`RunError::is_fatal`]) are returned as errors;
    /// everything else becomes [`LoginOutcome::Failure`].
    pub async fn execute(&self) -> RunResult<LoginReport> {
        let mut trace = LoginTrace::default();
        let result = match self.strategy {
            LoginStrategy::PassThrough => self.pass_through(&mut trace).await,
            LoginStrategy::CloudIdentity | LoginStrategy::FederatedIdentity(_) => {
                self.interactive(&mut trace).await
            }
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) if e.is_fatal() => {
                trace.record(LoginState::Failed);
                tracing::warn!(strategy = %self.strategy, error = %e, "login aborted");
                return Err(e);
            }
            Err(e) => {
                trace.record(LoginState::Failed);
                tracing::warn!(strategy = %self.strategy, error = %e, "login attempt failed");
                LoginOutcome::Failure(e.to_string())
            }
        };
        if outcome.is_authenticated() {
            tracing::info!(strategy = %self.strategy, %outcome, "login complete");
        }
        Ok(LoginReport { outcome, trace })
    }

    async fn pass_through(&self, trace: &mut LoginTrace) -> RunResult<LoginOutcome> {
        self.waiter.navigate(self.login_url).await?;
        trace.record(LoginState::PassThroughDetected);
        self.await_main_page(trace, self.timeouts.pass_through_main_page())
            .await?;
        trace.record(LoginState::Success);
        Ok(LoginOutcome::Success)
    }

    async fn interactive(&self, trace: &mut LoginTrace) -> RunResult<LoginOutcome> {
        let credential = self.credential.ok_or_else(|| {
            RunError::config(format!("{} login needs a credential", self.strategy))
        })?;
        let driver = self.waiter.driver();

        self.waiter.navigate(self.login_url).await?;
        self.use_another_account().await?;

        trace.record(LoginState::AwaitingUserIdField);
        let user_id = Element::LoginUserId.selector()?;
        if !self
            .waiter
            .is_visible_within(user_id, self.timeouts.user_id_field())
            .await?
        {
            tracing::info!("user id field not shown; expecting an authenticated session");
            trace.record(LoginState::PassThroughDetected);
            self.await_main_page(trace, self.timeouts.main_page()).await?;
            trace.record(LoginState::Success);
            return Ok(LoginOutcome::Success);
        }

        let login_page = driver.current_url().await?;
        driver.send_keys(user_id, credential.username()).await?;
        driver.press_key(user_id, Key::Tab).await?;
        driver.press_key(user_id, Key::Enter).await?;

        match self.strategy {
            LoginStrategy::FederatedIdentity(step) => {
                trace.record(LoginState::CredentialSubmitted);
                let redirected = Wait::until(UrlChanged { from: login_page })
                    .timeout(self.timeouts.redirect())
                    .probe(self.waiter)
                    .await?;
                if redirected.is_none() {
                    tracing::debug!("no redirect observed yet; handing over anyway");
                }
                step.complete(credential, self.waiter).await?;
                trace.record(LoginState::Redirect);
                Ok(LoginOutcome::Redirect)
            }
            _ => {
                let password = Element::LoginPassword.selector()?;
                self.waiter
                    .until_visible(password, self.timeouts.password_field())
                    .await?;
                driver
                    .send_keys(password, credential.password().expose())
                    .await?;
                driver.press_key(password, Key::Tab).await?;
                driver.submit(password).await?;
                trace.record(LoginState::CredentialSubmitted);

                self.stay_signed_in().await?;
                self.await_main_page(trace, self.timeouts.main_page()).await?;
                trace.record(LoginState::Success);
                Ok(LoginOutcome::Success)
            }
        }
    }

    async fn use_another_account(&self) -> RunResult<()> {
        let link = Element::LoginUseAnotherAccount.selector()?;
        match self.waiter.is_visible_within(link, Duration::ZERO).await {
            Ok(true) => {
                if let Err(e) = self.waiter.driver().click(link).await {
                    tracing::debug!(error = %e, "use-another-account click failed");
                }
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(RunError::Cancelled) => Err(RunError::Cancelled),
            Err(e) => {
                tracing::debug!(error = %e, "account picker check failed");
                Ok(())
            }
        }
    }

    async fn stay_signed_in(&self) -> RunResult<()> {
        let button = Element::LoginStaySignedIn.selector()?;
        if self
            .waiter
            .is_visible_within(button, self.timeouts.stay_signed_in())
            .await?
        {
            if let Err(e) = self.waiter.driver().click(button).await {
                tracing::debug!(error = %e, "stay-signed-in click failed");
            }
        }
        Ok(())
    }

    async fn await_main_page(&self, trace: &mut LoginTrace, timeout: Duration) -> RunResult<()> {
        trace.record(LoginState::AwaitingMainPage);
        let strategy = self.strategy.name();
        Wait::until(Visible::new(Element::LoginMainPage.selector()?.clone()))
            .timeout(timeout)
            .on_success(AppsListReady {
                apps_list: Element::LoginAppsList.selector()?,
                apps_list_timeout: self.timeouts.apps_list(),
                page_load_timeout: self.timeouts.page_load(),
            })
            .on_failure(move |t| RunError::MainPageLoadFailed {
                strategy: strategy.to_string(),
                timeout_secs: t.timeout.as_secs(),
            })
            .run(self.waiter)
            .await
            .map(|_| ())
    }
}
