//! # TraceLogger: decorate callback failures with their subscription origin.
//!
//! [`TraceLogger`] is the tracing policy for debugging errors inside
//! callbacks: at subscription time it captures the caller's stack, and when
//! the subscription later surfaces a failure it logs a
//! [`SubscriptionError`] carrying that stack — so the log shows where the
//! subscription was established, not just where the failure was raised.
//!
//! Capturing a stack per subscription is not free, so the
//! [`TracePredicate`] decides which subscriptions are traced. The default
//! traces exactly the listeners that are themselves in logging mode: those
//! are the ones whose failures would otherwise be logged with no context at
//! all.
//!
//! ## Delivery rules on a traced failure
//! 1. The decoration is handed to the process log sink — subscription origin
//!    is always visible in logs.
//! 2. If the original terminal is *not* a pure logger, it then receives the
//!    original, undecorated failure (same value, same identity), so its catch
//!    logic is unaffected.
//! 3. If the original terminal *is* a pure logger, it is not invoked at all:
//!    it would only log the same failure a second time.
//!
//! ## Example
//! ```rust
//! use errvisor::{Plugins, TraceLogger};
//!
//! let plugins = Plugins::default().with_tracing(TraceLogger::new());
//! let _ = plugins.install();
//! // every traced subscription now logs its origin on failure
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::Failure;
use crate::policies;
use crate::subscribe::Terminal;
use crate::trace::policy::TracingPolicy;
use crate::trace::stack::SubscriptionTrace;

/// Decides which subscriptions are worth the cost of a stack capture.
pub type TracePredicate = Arc<dyn Fn(&dyn Any, &Terminal) -> bool + Send + Sync>;

/// Failure decoration carrying the subscription-time stack.
///
/// Created only inside the tracing path and handed straight to the log sink;
/// listeners never observe it.
#[derive(Clone, Debug)]
pub struct SubscriptionError {
    cause: Failure,
    subscribed_at: SubscriptionTrace,
}

impl SubscriptionError {
    pub fn new(cause: Failure, subscribed_at: SubscriptionTrace) -> Self {
        Self {
            cause,
            subscribed_at,
        }
    }

    /// The original failure raised inside the callback.
    pub fn cause(&self) -> &Failure {
        &self.cause
    }

    /// Where the failing subscription was established.
    pub fn subscribed_at(&self) -> &SubscriptionTrace {
        &self.subscribed_at
    }
}

impl fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (in a callback subscribed at:\n{})",
            self.cause, self.subscribed_at
        )
    }
}

impl std::error::Error for SubscriptionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let cause: &(dyn std::error::Error + 'static) = self.cause.as_ref();
        Some(cause)
    }
}

/// Tracing policy that logs the subscription origin of callback failures.
pub struct TraceLogger {
    should_trace: TracePredicate,
}

impl TraceLogger {
    /// Traces listeners in logging mode (the default predicate).
    pub fn new() -> Self {
        Self::with_predicate(|_source, terminal| terminal.is_logging())
    }

    /// Traces whatever the given predicate selects.
    ///
    /// The predicate sees the type-erased source and the terminal about to be
    /// attached; it runs once per subscription, on the subscribing thread.
    pub fn with_predicate(
        should_trace: impl Fn(&dyn Any, &Terminal) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            should_trace: Arc::new(should_trace),
        }
    }
}

impl Default for TraceLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingPolicy for TraceLogger {
    fn hook(&self, source: &dyn Any, terminal: &Terminal) -> Terminal {
        if !(self.should_trace)(source, terminal) {
            return terminal.clone();
        }
        let subscribed_at = SubscriptionTrace::capture();
        let original = terminal.clone();
        Terminal::new(move |outcome| match outcome {
            None => original.complete(),
            Some(fail) => {
                let decoration =
                    SubscriptionError::new(Arc::clone(&fail), subscribed_at.clone());
                policies::log().handle(Arc::new(decoration));
                if !original.is_logging() {
                    original.error(fail);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::failure;
    use std::sync::Mutex;

    #[derive(Debug, thiserror::Error)]
    #[error("callback blew up")]
    struct BlewUp;

    fn trace_everything() -> TraceLogger {
        TraceLogger::with_predicate(|_source, _terminal| true)
    }

    #[test]
    fn predicate_false_passes_terminal_through() {
        let hits = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&hits);
        let original = Terminal::new(move |_outcome| *counter.lock().unwrap() += 1);
        let logger = TraceLogger::with_predicate(|_source, _terminal| false);
        let hooked = logger.hook(&(), &original);
        hooked.complete();
        hooked.error(failure(BlewUp));
        assert_eq!(*hits.lock().unwrap(), 2);
    }

    #[test]
    fn default_predicate_keys_on_logging_mode() {
        let logger = TraceLogger::new();
        let custom = Terminal::new(|_outcome| {});
        assert!(!(logger.should_trace)(&(), &custom));
    }

    #[test]
    fn traced_completion_is_forwarded_unchanged() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let original = Terminal::new(move |outcome| sink.lock().unwrap().push(outcome.is_some()));
        let hooked = trace_everything().hook(&(), &original);
        hooked.complete();
        assert_eq!(*seen.lock().unwrap(), vec![false]);
    }

    #[test]
    fn non_logging_terminal_receives_the_original_failure() {
        let fail = failure(BlewUp);
        let expected = fail.clone();
        let delivered = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&delivered);
        let original = Terminal::new(move |outcome| {
            let got = outcome.expect("terminal failure");
            assert!(Arc::ptr_eq(&got, &expected));
            assert!(got.downcast_ref::<SubscriptionError>().is_none());
            *flag.lock().unwrap() = true;
        });
        let hooked = trace_everything().hook(&(), &original);
        hooked.error(fail);
        assert!(*delivered.lock().unwrap());
    }

    #[test]
    fn logging_terminal_is_spared_the_duplicate_delivery() {
        let hits = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&hits);
        let pure_logger = Terminal::logging(move |_outcome| *counter.lock().unwrap() += 1);
        let hooked = trace_everything().hook(&(), &pure_logger);
        hooked.error(failure(BlewUp));
        // The decoration went to the process log sink instead; invoking the
        // original would log the same failure twice.
        assert_eq!(*hits.lock().unwrap(), 0);
    }

    #[test]
    fn decoration_points_at_the_subscription_site() {
        let decoration = SubscriptionError::new(failure(BlewUp), SubscriptionTrace::capture());
        assert!(!decoration.subscribed_at().is_empty());
        assert!(decoration.to_string().contains("callback blew up"));
        assert!(decoration.to_string().contains("subscribed at"));
        let source = std::error::Error::source(&decoration).expect("has cause");
        assert_eq!(source.to_string(), "callback blew up");
    }

    #[test]
    fn instrumented_terminal_is_not_logging_mode() {
        // The substitute forwards; it is not itself a pure logger, and a
        // second tracing layer must not mistake it for one.
        let original = Terminal::logging(|_outcome| {});
        let hooked = trace_everything().hook(&(), &original);
        assert!(!hooked.is_logging());
    }
}
