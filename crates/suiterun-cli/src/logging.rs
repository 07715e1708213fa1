//! Tracing subscriber setup

use crate::commands::LogFormatArg;
use crate::config::Verbosity;
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, falling back to the verbosity default
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()))
}

/// Install the global subscriber; logs go to stderr
///
/// A second call leaves the first subscriber in place.
pub fn init(verbosity: Verbosity, format: LogFormatArg, use_color: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(verbosity.is_verbose());
    let installed = match format {
        LogFormatArg::Text => builder.with_ansi(use_color).try_init(),
        LogFormatArg::Json => builder.json().with_current_span(true).try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
