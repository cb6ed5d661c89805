//! # Process-wide default policies.
//!
//! Four ready-made policies cover the common dispositions of a failure:
//!
//! - [`suppress`] — discard it.
//! - [`log`] — write it to the process log sink.
//! - [`dialog`] — notify the user through the installed dialog sink.
//! - [`rethrow`] — promote it to [`Unchecked`](crate::Unchecked) and raise.
//!
//! Each accessor returns a clone of a lazily created shared instance. Callers
//! may rely only on behavior, never on instance identity: clones share one
//! sink, and redundant construction under concurrent first use would be
//! observationally indistinguishable anyway.
//!
//! The sinks behind [`log`] and [`dialog`] are resolved through the
//! [`Plugins`](crate::Plugins) registry, so an override installed at process
//! start is picked up here. [`suppress`] is fixed and not overridable.
//!
//! ## Example
//! ```rust
//! use errvisor::{failure, suppress};
//!
//! // Completes normally: the failure is discarded without side effect.
//! suppress().run(|| Err(failure(std::fmt::Error)));
//! ```

use std::sync::OnceLock;

use crate::error::as_unchecked;
use crate::plugins;
use crate::policies::handling::Handling;
use crate::policies::rethrowing::Rethrowing;

static SUPPRESS: OnceLock<Handling> = OnceLock::new();
static LOG: OnceLock<Handling> = OnceLock::new();
static DIALOG: OnceLock<Handling> = OnceLock::new();
static RETHROW: OnceLock<Rethrowing> = OnceLock::new();

/// A handling policy that suppresses failures entirely.
pub fn suppress() -> Handling {
    SUPPRESS
        .get_or_init(|| Handling::new(|_fail: crate::Failure| {}))
        .clone()
}

/// A handling policy that routes failures to the process log sink.
///
/// By default the sink writes through the `log` facade at error level,
/// including the failure's cause chain. Override it at startup via
/// [`Plugins::with_log_sink`](crate::Plugins::with_log_sink).
pub fn log() -> Handling {
    LOG.get_or_init(|| Handling::from_shared(plugins::log_sink()))
        .clone()
}

/// A handling policy that notifies the user of failures.
///
/// The dialog sink is UI glue supplied by the application; override it at
/// startup via [`Plugins::with_dialog_sink`](crate::Plugins::with_dialog_sink).
/// When nothing is installed it falls back to the log sink.
pub fn dialog() -> Handling {
    DIALOG
        .get_or_init(|| Handling::from_shared(plugins::dialog_sink()))
        .clone()
}

/// A rethrowing policy that raises failures as [`Unchecked`](crate::Unchecked)
/// envelopes, with the original failure as cause.
pub fn rethrow() -> Rethrowing {
    RETHROW.get_or_init(|| Rethrowing::new(as_unchecked)).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{failure, Unchecked};

    #[derive(Debug, thiserror::Error)]
    #[error("illegal state: x")]
    struct IllegalState;

    #[test]
    fn suppress_completes_normally_on_failure() {
        suppress().run(|| Err(failure(IllegalState)));
    }

    #[test]
    fn rethrow_raises_unchecked_with_cause() {
        let outcome = std::panic::catch_unwind(|| {
            rethrow().get::<()>(|| Err(failure(IllegalState)));
        });
        let payload = outcome.expect_err("should raise");
        let unchecked = payload.downcast::<Unchecked>().expect("Unchecked payload");
        assert!(unchecked.cause().downcast_ref::<IllegalState>().is_some());
    }

    #[test]
    fn accessors_are_behaviorally_stable() {
        // Two lookups share one sink; there is nothing else to observe.
        let first = suppress();
        let second = suppress();
        first.run(|| Err(failure(IllegalState)));
        second.run(|| Err(failure(IllegalState)));
        assert_eq!(rethrow().get(|| Ok(1)), rethrow().get(|| Ok(1)));
    }
}
