//! Failure values shared across the crate.
//!
//! This module defines the crate-wide failure representation and the
//! runtime-level ("unchecked") envelope:
//!
//! - [`Failure`] — a shared, type-erased error value. Shared so that one
//!   failure can be both logged (decorated with subscription context) and
//!   delivered to a listener's error callback without cloning the underlying
//!   error.
//! - [`Unchecked`] — the envelope raised by rethrowing policies.
//! - [`as_unchecked`] — idempotent promotion of any failure to [`Unchecked`].
//!
//! ## Example
//! ```rust
//! use errvisor::{as_unchecked, failure};
//!
//! let err = failure(std::io::Error::other("boom"));
//! let unchecked = as_unchecked(err);
//! assert_eq!(unchecked.to_string(), "boom");
//! ```

use std::fmt;
use std::sync::Arc;

/// Shared, type-erased failure value.
///
/// Every fallible operation handed to a policy reports its failure as a
/// `Failure`. The `Arc` makes failures cheap to fan out: a tracing policy can
/// log a decorated copy while the listener still observes the original value.
pub type Failure = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Erases a concrete error into a [`Failure`].
///
/// ## Example
/// ```rust
/// use errvisor::{failure, Failure};
///
/// let f: Failure = failure(std::fmt::Error);
/// assert!(f.downcast_ref::<std::fmt::Error>().is_some());
/// ```
pub fn failure(err: impl std::error::Error + Send + Sync + 'static) -> Failure {
    Arc::new(err)
}

/// Runtime-level failure envelope.
///
/// Produced by [`as_unchecked`] and raised by
/// [`Rethrowing`](crate::Rethrowing) policies as a panic payload. Displays as
/// its cause; the cause is reachable through [`std::error::Error::source`].
#[derive(Clone, Debug)]
pub struct Unchecked {
    cause: Failure,
}

impl Unchecked {
    /// Wraps the given failure. Prefer [`as_unchecked`], which avoids
    /// double-wrapping an envelope in another envelope.
    pub fn new(cause: Failure) -> Self {
        Self { cause }
    }

    /// The original failure this envelope carries.
    pub fn cause(&self) -> &Failure {
        &self.cause
    }

    /// Consumes the envelope, returning the original failure.
    pub fn into_cause(self) -> Failure {
        self.cause
    }
}

impl fmt::Display for Unchecked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cause, f)
    }
}

impl std::error::Error for Unchecked {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let cause: &(dyn std::error::Error + 'static) = self.cause.as_ref();
        Some(cause)
    }
}

/// Promotes a failure to an [`Unchecked`] envelope, with a minimum of new
/// wrappers to obscure the cause.
///
/// Idempotent: promoting an already-unchecked failure returns an envelope
/// with the same cause, so repeated promotion never stacks envelopes.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use errvisor::{as_unchecked, failure, Failure};
///
/// let err = failure(std::fmt::Error);
/// let first = as_unchecked(err.clone());
/// let again = as_unchecked(Arc::new(first) as Failure);
/// assert!(Arc::ptr_eq(again.cause(), &err));
/// ```
pub fn as_unchecked(fail: Failure) -> Unchecked {
    match fail.downcast_ref::<Unchecked>() {
        Some(existing) => existing.clone(),
        None => Unchecked::new(fail),
    }
}
