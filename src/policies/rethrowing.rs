//! # Rethrowing policy: every captured failure raises.
//!
//! [`Rethrowing`] is the policy flavor for call sites where no sane default
//! return value exists: the stored transform converts the failure into an
//! [`Unchecked`] envelope and raises it as a panic payload. Because the
//! wrapped operation cannot return after a failure, none of the wrapping
//! operations take a fallback value — `T = ()` covers the plain-action shape.
//!
//! The transform is applied exactly once per failure.
//!
//! ## Example
//! ```rust
//! use errvisor::{failure, rethrow};
//!
//! let parsed = rethrow().get(|| "80".parse::<u16>().map_err(failure));
//! assert_eq!(parsed, 80);
//! ```

use std::panic;
use std::sync::Arc;

use crate::error::{Failure, Unchecked};

/// A policy whose derived sink always raises and never returns.
///
/// Raised failures travel as panic payloads of type [`Unchecked`]; callers
/// that need to observe them (test harnesses, isolation layers) can
/// `catch_unwind` and downcast the payload.
///
/// Cloning is cheap (shared transform) and clones are behaviorally identical.
#[derive(Clone)]
pub struct Rethrowing {
    transform: Arc<dyn Fn(Failure) -> Unchecked + Send + Sync>,
}

impl Rethrowing {
    /// Creates a policy from a failure transform.
    ///
    /// The transform decides what envelope is raised; the common case is
    /// [`as_unchecked`](crate::as_unchecked), available ready-made through
    /// [`rethrow`](crate::rethrow).
    pub fn new(transform: impl Fn(Failure) -> Unchecked + Send + Sync + 'static) -> Self {
        Self {
            transform: Arc::new(transform),
        }
    }

    /// The policy's sink: transforms the failure and raises it.
    pub fn handle(&self, fail: Failure) -> ! {
        panic::panic_any((self.transform)(fail))
    }

    /// Executes a fallible operation, returning its value unchanged on
    /// success and raising the transformed failure otherwise.
    pub fn get<T>(&self, op: impl FnOnce() -> Result<T, Failure>) -> T {
        match op() {
            Ok(value) => value,
            Err(fail) => self.handle(fail),
        }
    }

    /// Returns a reusable operation that raises the transformed failure
    /// instead of returning an error.
    pub fn wrap<T>(&self, op: impl Fn() -> Result<T, Failure>) -> impl Fn() -> T {
        let transform = Arc::clone(&self.transform);
        move || match op() {
            Ok(value) => value,
            Err(fail) => panic::panic_any(transform(fail)),
        }
    }

    /// Returns a reusable single-argument function that raises the
    /// transformed failure instead of returning an error.
    pub fn wrap_fn<A, T>(&self, op: impl Fn(A) -> Result<T, Failure>) -> impl Fn(A) -> T {
        let transform = Arc::clone(&self.transform);
        move |arg| match op(arg) {
            Ok(value) => value,
            Err(fail) => panic::panic_any(transform(fail)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{as_unchecked, failure};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, thiserror::Error)]
    #[error("illegal state: x")]
    struct IllegalState;

    fn raised_payload(outcome: Result<(), Box<dyn std::any::Any + Send>>) -> Unchecked {
        let payload = outcome.expect_err("operation should raise");
        *payload.downcast::<Unchecked>().expect("payload is Unchecked")
    }

    #[test]
    fn get_raises_with_original_cause() {
        let policy = Rethrowing::new(as_unchecked);
        let fail = failure(IllegalState);
        let cloned = fail.clone();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            policy.get::<i32>(move || Err(cloned));
        }));
        let unchecked = raised_payload(outcome);
        assert!(Arc::ptr_eq(unchecked.cause(), &fail));
    }

    #[test]
    fn get_passes_success_through() {
        let policy = Rethrowing::new(as_unchecked);
        assert_eq!(policy.get(|| Ok(41)), 41);
    }

    #[test]
    fn transform_applied_exactly_once() {
        let applied = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&applied);
        let policy = Rethrowing::new(move |fail| {
            counter.fetch_add(1, Ordering::SeqCst);
            as_unchecked(fail)
        });
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            policy.get::<()>(|| Err(failure(IllegalState)));
        }));
        assert!(outcome.is_err());
        assert_eq!(applied.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn wrapped_function_raises_per_call() {
        let policy = Rethrowing::new(as_unchecked);
        let parse = policy.wrap_fn(|s: &str| s.parse::<u16>().map_err(failure));
        assert_eq!(parse("8080"), 8080);
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            parse("nope");
        }));
        assert!(outcome.is_err());
    }
}
