//! # Terminal failure consumer.
//!
//! [`Sink`] is the leaf building block of every policy: a single `accept`
//! operation that disposes of one failure value. Any `Fn(Failure)` closure is
//! a sink via the blanket impl, so custom handlers need no boilerplate.
//!
//! ## Contract
//! - `accept` may have side effects (logging, counters, notification).
//! - `accept` is allowed to panic; policies make no attempt to guard
//!   themselves against their own sink. A panicking sink propagates to the
//!   caller of the wrapped operation unmodified.
//!
//! ## Example
//! ```rust
//! use errvisor::{failure, Sink};
//!
//! let sink = |f: errvisor::Failure| eprintln!("dropped: {f}");
//! sink.accept(failure(std::fmt::Error));
//! ```

use crate::error::Failure;

/// Contract for terminal failure consumers.
///
/// Called synchronously on whatever thread the wrapped operation failed on.
pub trait Sink: Send + Sync + 'static {
    /// Consumes one failure value.
    fn accept(&self, fail: Failure);
}

impl<F> Sink for F
where
    F: Fn(Failure) + Send + Sync + 'static,
{
    fn accept(&self, fail: Failure) {
        self(fail)
    }
}
