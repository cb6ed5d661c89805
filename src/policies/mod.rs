//! # Error-handling policies.
//!
//! This module groups the strategy objects that decide **what happens** when
//! a wrapped operation fails.
//!
//! ## Contents
//! - [`Sink`] the terminal consumer of a failure value
//! - [`Handling`] routes failures to a sink and continues (with fallbacks)
//! - [`Rethrowing`] converts failures to [`Unchecked`](crate::Unchecked) and raises
//! - [`suppress`] / [`log`] / [`dialog`] / [`rethrow`] process-wide defaults
//!
//! ## Quick wiring
//! ```text
//! fallible op ──wrap──► policy ──Err──► Sink ──► suppressed / logged / raised
//!                         │
//!                         └──Ok──► value passes through unchanged
//! ```
//!
//! ## Choosing a flavor
//! - A sane fallback value exists, or none is needed → [`Handling`].
//! - The call site cannot proceed after a failure → [`Rethrowing`].

mod defaults;
mod handling;
mod rethrowing;
mod sink;

pub use defaults::{dialog, log, rethrow, suppress};
pub use handling::Handling;
pub use rethrowing::Rethrowing;
pub use sink::Sink;
