//! # Subscription tracing.
//!
//! This module lets an error surfacing inside a callback be correlated back
//! to the code location that established the subscription.
//!
//! ## Contents
//! - [`TracingPolicy`] the once-per-subscription hook
//! - [`Passthrough`]   the zero-overhead default
//! - [`TraceLogger`]   captures the subscription stack, logs decorated failures
//! - [`SubscriptionTrace`] the captured caller stack
//! - [`SubscriptionError`] the decoration handed to the log sink
//!
//! ## Flow
//! ```text
//! subscribe(source, listener)
//!     └─► policy.hook(source, terminal)
//!           ├─ should_trace == false ──► terminal unchanged
//!           └─ should_trace == true  ──► capture stack, substitute terminal
//!                 on error: log SubscriptionError { cause, subscribed_at }
//!                           forward original failure (unless pure logger)
//! ```

mod policy;
mod stack;
mod trace_log;

pub use policy::{Passthrough, TracingPolicy};
pub use stack::SubscriptionTrace;
pub use trace_log::{SubscriptionError, TraceLogger, TracePredicate};
