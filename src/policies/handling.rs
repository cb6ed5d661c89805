//! # Handling policy: route failures to a sink, keep going.
//!
//! [`Handling`] wraps fallible operations into shapes that cannot fail past
//! the policy's [`Sink`]. It is the right flavor when a sane default return
//! value exists (or no value is produced at all); when every failure must
//! raise, use [`Rethrowing`](crate::Rethrowing) instead.
//!
//! ## Wrapping shapes
//! | Operation                 | Input                         | Output            |
//! |---------------------------|-------------------------------|-------------------|
//! | [`Handling::run`]         | `FnOnce() -> Result<(), _>`   | executed now      |
//! | [`Handling::wrap`]        | `Fn() -> Result<(), _>`       | `Fn()`            |
//! | [`Handling::wrap_fn`]     | `Fn(A) -> Result<(), _>`      | `Fn(A)`           |
//! | [`Handling::get_with_default`]     | supplier + fallback  | `T` now           |
//! | [`Handling::wrap_with_default`]    | supplier + fallback  | `Fn() -> T`       |
//! | [`Handling::wrap_fn_with_default`] | function + fallback  | `Fn(A) -> T`      |
//!
//! ## Example
//! ```rust
//! use errvisor::{failure, Handling};
//!
//! let quiet = Handling::new(|_f: errvisor::Failure| {});
//! let port = quiet.get_with_default(|| "not a number".parse::<u16>().map_err(failure), 8080);
//! assert_eq!(port, 8080);
//! ```

use std::sync::Arc;

use crate::error::Failure;
use crate::policies::sink::Sink;

/// A policy that routes failures to its sink and continues.
///
/// The sink is free to panic if it wants every failure to raise after all,
/// but a sink that *always* raises belongs in a
/// [`Rethrowing`](crate::Rethrowing) policy instead.
///
/// Cloning is cheap (shared sink) and clones are behaviorally identical.
#[derive(Clone)]
pub struct Handling {
    sink: Arc<dyn Sink>,
}

impl Handling {
    /// Creates a policy from any sink.
    pub fn new(sink: impl Sink) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Creates a policy from an already-shared sink.
    ///
    /// Used by the process-wide default accessors, where several policies
    /// share one installed sink.
    pub fn from_shared(sink: Arc<dyn Sink>) -> Self {
        Self { sink }
    }

    /// Passes the given failure straight to this policy's sink.
    pub fn handle(&self, fail: Failure) {
        self.sink.accept(fail);
    }

    /// Executes a fallible action; a failure is routed to the sink.
    pub fn run(&self, op: impl FnOnce() -> Result<(), Failure>) {
        if let Err(fail) = op() {
            self.sink.accept(fail);
        }
    }

    /// Returns a reusable action whose failures are routed to the sink.
    pub fn wrap(&self, op: impl Fn() -> Result<(), Failure>) -> impl Fn() {
        let sink = Arc::clone(&self.sink);
        move || {
            if let Err(fail) = op() {
                sink.accept(fail);
            }
        }
    }

    /// Returns a reusable single-argument action whose failures are routed to
    /// the sink.
    pub fn wrap_fn<A>(&self, op: impl Fn(A) -> Result<(), Failure>) -> impl Fn(A) {
        let sink = Arc::clone(&self.sink);
        move |arg| {
            if let Err(fail) = op(arg) {
                sink.accept(fail);
            }
        }
    }

    /// Executes a fallible supplier, returning `fallback` on failure.
    ///
    /// The sink sees the failure exactly once. Never panics, unless the sink
    /// itself does.
    pub fn get_with_default<T>(&self, op: impl FnOnce() -> Result<T, Failure>, fallback: T) -> T {
        match op() {
            Ok(value) => value,
            Err(fail) => {
                self.sink.accept(fail);
                fallback
            }
        }
    }

    /// Returns a reusable supplier that yields `fallback` on failure.
    pub fn wrap_with_default<T: Clone>(
        &self,
        op: impl Fn() -> Result<T, Failure>,
        fallback: T,
    ) -> impl Fn() -> T {
        let sink = Arc::clone(&self.sink);
        move || match op() {
            Ok(value) => value,
            Err(fail) => {
                sink.accept(fail);
                fallback.clone()
            }
        }
    }

    /// Returns a reusable single-argument function that yields `fallback` on
    /// failure.
    pub fn wrap_fn_with_default<A, T: Clone>(
        &self,
        op: impl Fn(A) -> Result<T, Failure>,
        fallback: T,
    ) -> impl Fn(A) -> T {
        let sink = Arc::clone(&self.sink);
        move |arg| match op(arg) {
            Ok(value) => value,
            Err(fail) => {
                sink.accept(fail);
                fallback.clone()
            }
        }
    }
}
