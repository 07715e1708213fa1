//! Locator registry for the target application's page structure.
//!
//! Every element the sign-in flow and the test executor touch has a
//! symbolic name ([`Element`]) that maps to one [`Selector`]. The mapping
//! is built once per process and never mutated, so the rest of the crate
//! stays independent of the underlying markup.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::result::{RunError, RunResult};

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Selector {
    /// XPath expression
    XPath(String),
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// Element id attribute
    Id(String),
    /// Single class name
    ClassName(String),
    /// Tag name (e.g., "button")
    TagName(String),
}

impl Selector {
    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a class-name selector
    #[must_use]
    pub fn class_name(class: impl Into<String>) -> Self {
        Self::ClassName(class.into())
    }

    /// The raw locator expression
    #[must_use]
    pub fn expression(&self) -> &str {
        match self {
            Self::XPath(s) | Self::Css(s) | Self::Id(s) | Self::ClassName(s) | Self::TagName(s) => {
                s
            }
        }
    }

    /// Selector for `tag` descendants of this selector's match
    #[must_use]
    pub fn descendant(&self, tag: &str) -> Self {
        match self {
            Self::XPath(s) => Self::XPath(format!("{s}//{tag}")),
            Self::Css(s) => Self::Css(format!("{s} {tag}")),
            Self::Id(s) => Self::Css(format!("[id={s:?}] {tag}")),
            Self::ClassName(s) => Self::Css(format!(".{s} {tag}")),
            Self::TagName(s) => Self::Css(format!("{s} {tag}")),
        }
    }

    /// JavaScript expression evaluating to all matching elements as an array
    #[must_use]
    pub fn to_query_all(&self) -> String {
        match self {
            Self::XPath(s) => format!(
                "(() => {{ const r = document.evaluate({s:?}, document, null, \
                 XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                 return Array.from({{ length: r.snapshotLength }}, (_, i) => r.snapshotItem(i)); }})()"
            ),
            Self::Css(s) => format!("Array.from(document.querySelectorAll({s:?}))"),
            Self::Id(s) => format!("[document.getElementById({s:?})].filter(Boolean)"),
            Self::ClassName(s) => {
                format!("Array.from(document.getElementsByClassName({s:?}))")
            }
            Self::TagName(s) => format!("Array.from(document.getElementsByTagName({s:?}))"),
        }
    }

    /// JavaScript expression evaluating to the first match or `null`
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("({}[0] ?? null)", self.to_query_all())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::Css(s) => write!(f, "css={s}"),
            Self::Id(s) => write!(f, "id={s}"),
            Self::ClassName(s) => write!(f, "class={s}"),
            Self::TagName(s) => write!(f, "tag={s}"),
        }
    }
}

/// Symbolic names of the elements the orchestration core interacts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    /// Sign-in user id (email) field
    LoginUserId,
    /// Sign-in password field
    LoginPassword,
    /// Sign-in submit button
    LoginSignIn,
    /// Authenticated landing page
    LoginMainPage,
    /// "Stay signed in?" confirmation button
    LoginStaySignedIn,
    /// "Use another account" link on the account picker
    LoginUseAnotherAccount,
    /// Apps list inside the landing page
    LoginAppsList,
    /// Toast message raised by the test player
    TestAutomationToastMessage,
    /// Button strip of the one-time permission dialog
    TestAutomationPermissionDialogButtons,
    /// Root container of the app under test
    TestAutomationAppHost,
}

impl Element {
    /// Every element, in registry order
    pub const ALL: [Self; 10] = [
        Self::LoginUserId,
        Self::LoginPassword,
        Self::LoginSignIn,
        Self::LoginMainPage,
        Self::LoginStaySignedIn,
        Self::LoginUseAnotherAccount,
        Self::LoginAppsList,
        Self::TestAutomationToastMessage,
        Self::TestAutomationPermissionDialogButtons,
        Self::TestAutomationAppHost,
    ];

    /// Registry key of this element
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LoginUserId => "Login_UserId",
            Self::LoginPassword => "Login_Password",
            Self::LoginSignIn => "Login_SignIn",
            Self::LoginMainPage => "Login_MainPage",
            Self::LoginStaySignedIn => "Login_StaySignedIn",
            Self::LoginUseAnotherAccount => "Login_UseAnotherAccount",
            Self::LoginAppsList => "Login_AppsList",
            Self::TestAutomationToastMessage => "TestAutomation_ToastMessage",
            Self::TestAutomationPermissionDialogButtons => "TestAutomation_PermissionDialogButtons",
            Self::TestAutomationAppHost => "TestAutomation_AppHost",
        }
    }

    /// Resolve through the process-wide registry
    pub fn selector(self) -> RunResult<&'static Selector> {
        LocatorRegistry::global().resolve(self.name())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only mapping from symbolic element names to selectors
#[derive(Debug, Clone, Default)]
pub struct LocatorRegistry {
    entries: BTreeMap<&'static str, Selector>,
}

static GLOBAL_REGISTRY: OnceLock<LocatorRegistry> = OnceLock::new();

impl LocatorRegistry {
    /// Registry with the target application's locators
    #[must_use]
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("Login_UserId", Selector::xpath("//input[@type='email']"));
        entries.insert("Login_Password", Selector::xpath("//input[@type='password']"));
        entries.insert("Login_SignIn", Selector::id("cred_sign_in_button"));
        entries.insert(
            "Login_MainPage",
            Selector::xpath("//div[contains(@class,\"home-page-component\")]"),
        );
        entries.insert("Login_StaySignedIn", Selector::id("idSIButton9"));
        entries.insert(
            "Login_UseAnotherAccount",
            Selector::id("use_another_account_link"),
        );
        entries.insert("Login_AppsList", Selector::class_name("apps-list"));
        entries.insert(
            "TestAutomation_ToastMessage",
            Selector::xpath("//*[@class=\"toast-message\"]"),
        );
        entries.insert(
            "TestAutomation_PermissionDialogButtons",
            Selector::xpath("//*[@class=\"button-strip\"]"),
        );
        entries.insert("TestAutomation_AppHost", Selector::id("fullscreen-app-host"));
        Self { entries }
    }

    /// The process-wide registry, initialised on first use
    pub fn global() -> &'static Self {
        GLOBAL_REGISTRY.get_or_init(Self::builtin)
    }

    /// Look up a selector by symbolic name
    pub fn resolve(&self, name: &str) -> RunResult<&Selector> {
        self.entries
            .get(name)
            .ok_or_else(|| RunError::UnknownLocator {
                name: name.to_string(),
            })
    }

    /// Check that every [`Element`] resolves
    pub fn validate(&self) -> RunResult<()> {
        for element in Element::ALL {
            self.resolve(element.name())?;
        }
        Ok(())
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Selector)> + '_ {
        self.entries.iter().map(|(name, selector)| (*name, selector))
    }

    /// Number of registered locators
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
