//! # Startup plugin registry.
//!
//! [`Plugins`] is the crate's configuration surface: the override points for
//! the process log sink, the dialog sink, and the tracing policy. It is read
//! once — [`Plugins::install`] succeeds at most once per process, and should
//! run at the very beginning of the application, before anything resolves a
//! default policy or subscribes to a source.
//!
//! Accessors fall back to the built-in defaults when nothing was installed.
//! A race between first use and lazy initialization is benign: defaults hold
//! no shared mutable state, so redundant construction is observationally
//! indistinguishable, and callers may rely on behavior only.
//!
//! ## Defaults
//! - log sink → `log::error!` with the failure's cause chain
//! - dialog sink → the log sink
//! - tracing policy → [`Passthrough`] (no tracing, no overhead)
//!
//! ## Example
//! ```rust
//! use errvisor::{Failure, Plugins, TraceLogger};
//!
//! let plugins = Plugins::default()
//!     .with_log_sink(|f: Failure| eprintln!("[app] {f}"))
//!     .with_tracing(TraceLogger::new());
//! // Install at the top of main(); a second install is rejected.
//! if plugins.install().is_ok() {
//!     // from here on, log() and subscribe() use the overrides
//! }
//! ```

use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::error::Failure;
use crate::policies::Sink;
use crate::trace::{Passthrough, TracingPolicy};

static PLUGINS: OnceLock<Plugins> = OnceLock::new();

/// Raised when the registry is configured after first use.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum InstallError {
    /// [`Plugins::install`] was called twice, or after a default had already
    /// been resolved.
    #[error("plugins already installed or defaults already resolved")]
    AlreadyInstalled,
}

/// Process-wide override points, installed once at startup.
pub struct Plugins {
    log_sink: Arc<dyn Sink>,
    dialog_sink: Option<Arc<dyn Sink>>,
    tracing: Arc<dyn TracingPolicy>,
}

impl Default for Plugins {
    fn default() -> Self {
        Self {
            log_sink: Arc::new(log_cause_chain),
            dialog_sink: None,
            tracing: Arc::new(Passthrough),
        }
    }
}

impl Plugins {
    /// Replaces the process log sink used by [`log`](crate::log) and by
    /// subscription tracing.
    #[must_use]
    pub fn with_log_sink(mut self, sink: impl Sink) -> Self {
        self.log_sink = Arc::new(sink);
        self
    }

    /// Replaces the user-notification sink used by [`dialog`](crate::dialog).
    #[must_use]
    pub fn with_dialog_sink(mut self, sink: impl Sink) -> Self {
        self.dialog_sink = Some(Arc::new(sink));
        self
    }

    /// Replaces the tracing policy consulted by
    /// [`subscribe`](crate::subscribe) and the pump adapters.
    #[must_use]
    pub fn with_tracing(mut self, policy: impl TracingPolicy) -> Self {
        self.tracing = Arc::new(policy);
        self
    }

    /// Installs this registry for the rest of the process lifetime.
    ///
    /// Fails if a registry was already installed, or if lazy defaults were
    /// already resolved by earlier use.
    pub fn install(self) -> Result<(), InstallError> {
        PLUGINS
            .set(self)
            .map_err(|_rejected| InstallError::AlreadyInstalled)
    }
}

fn registry() -> &'static Plugins {
    PLUGINS.get_or_init(Plugins::default)
}

/// The installed log sink, or the `log::error!` default.
pub(crate) fn log_sink() -> Arc<dyn Sink> {
    Arc::clone(&registry().log_sink)
}

/// The installed dialog sink, falling back to the log sink.
pub(crate) fn dialog_sink() -> Arc<dyn Sink> {
    let plugins = registry();
    match &plugins.dialog_sink {
        Some(sink) => Arc::clone(sink),
        None => Arc::clone(&plugins.log_sink),
    }
}

/// The installed tracing policy, or [`Passthrough`].
pub(crate) fn tracing_policy() -> Arc<dyn TracingPolicy> {
    Arc::clone(&registry().tracing)
}

/// Default log sink: error level, with the cause chain flattened into the
/// message so nested failures stay readable in line-oriented logs.
fn log_cause_chain(fail: Failure) {
    let mut message = fail.to_string();
    let mut source = fail.source();
    while let Some(cause) = source {
        message.push_str(&format!("; caused by: {cause}"));
        source = cause.source();
    }
    log::error!(target: "errvisor", "{message}");
}
