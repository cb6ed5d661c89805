//! # Tracing policy: the subscription-time hook.
//!
//! A [`TracingPolicy`] is consulted exactly once per subscription, before the
//! listener reaches the source. It may substitute the listener's
//! [`Terminal`]; value callbacks are out of its reach by design, so a policy
//! can never reorder or drop values.
//!
//! The substitute terminal must eventually delegate completion and error to
//! the original, preserving content — the one sanctioned exception being the
//! double-log avoidance of [`TraceLogger`](crate::TraceLogger).
//!
//! Install a policy at startup via
//! [`Plugins::with_tracing`](crate::Plugins::with_tracing).

use std::any::Any;

use crate::subscribe::Terminal;

/// Hook invoked at subscription time.
///
/// `source` is the asynchronous source being subscribed to, type-erased;
/// predicates can downcast it to react to specific source types.
pub trait TracingPolicy: Send + Sync + 'static {
    /// Returns the terminal to attach: the original (pass-through) or an
    /// instrumented substitute.
    fn hook(&self, source: &dyn Any, terminal: &Terminal) -> Terminal;
}

/// The default policy: no tracing, no overhead beyond a reference-count bump.
pub struct Passthrough;

impl TracingPolicy for Passthrough {
    fn hook(&self, _source: &dyn Any, terminal: &Terminal) -> Terminal {
        terminal.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::failure;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, thiserror::Error)]
    #[error("late failure")]
    struct Late;

    #[test]
    fn passthrough_delegates_everything() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let original = Terminal::new(move |outcome| {
            sink.lock().unwrap().push(outcome.is_some());
        });
        let hooked = Passthrough.hook(&(), &original);
        hooked.complete();
        hooked.error(failure(Late));
        assert_eq!(*seen.lock().unwrap(), vec![false, true]);
        assert!(!hooked.is_logging());
    }
}
