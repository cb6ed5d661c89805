//! # errvisor
//!
//! **Errvisor** is a safety and observability layer for callback-driven Rust:
//! it turns fallible operations into callbacks that cannot fail silently, and
//! traces subscriptions so a failure inside a callback can be correlated back
//! to the code that established the subscription.
//!
//! Both problems show up whenever a system lets user code register callbacks
//! against asynchronous sources (futures, streams, observables) and wants
//! consistent, debuggable failure behavior instead of ad-hoc error handling
//! scattered through callback sites.
//!
//! ## Architecture
//! ```text
//!     ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//!     │ fallible op │     │ fallible op  │     │ fallible op  │
//!     └──────┬──────┘     └──────┬───────┘     └──────┬───────┘
//!            ▼                   ▼                    ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Policy (Handling | Rethrowing)                               │
//! │  - wrap / run / get_with_default: capture the failure         │
//! │  - route it through the policy's Sink                         │
//! └──────┬──────────────────────────┬─────────────────────────────┘
//!        ▼                          ▼
//!   Handling: sink decides     Rethrowing: transform + raise
//!   (suppress / log / dialog)  (always Unchecked, never returns)
//!
//!     subscribe(source, listener)
//!            │
//!            ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  TracingPolicy::hook (once per subscription)                  │
//! │  - Passthrough: terminal unchanged                            │
//! │  - TraceLogger: capture caller stack, substitute terminal     │
//! └──────┬────────────────────────────────────────────────────────┘
//!        ▼
//!   Source::attach ──► value… value… terminal (complete | error)
//!                                        │
//!                 traced error: log SubscriptionError(origin stack),
//!                 then forward the original failure (unless the
//!                 listener is a pure logger — one log entry, not two)
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types / fns                               |
//! |-------------------|-----------------------------------------------------------|-----------------------------------------------|
//! | **Policies**      | Decide how a captured failure is disposed of.             | [`Handling`], [`Rethrowing`], [`Sink`]        |
//! | **Defaults**      | Process-wide suppress / log / dialog / rethrow.           | [`suppress`], [`log`], [`dialog`], [`rethrow`]|
//! | **Failures**      | Shared failure values and the unchecked envelope.         | [`Failure`], [`Unchecked`], [`as_unchecked`]  |
//! | **Subscriptions** | Attach listeners to sources through one traced entry.     | [`Listener`], [`Source`], [`subscribe`]       |
//! | **Adapters**      | Futures and streams as callback sources.                  | [`subscribe_future`], [`subscribe_stream`]    |
//! | **Tracing**       | Correlate callback failures to their subscription site.   | [`TracingPolicy`], [`TraceLogger`]            |
//! | **Configuration** | Startup override points, installed once.                  | [`Plugins`]                                   |
//!
//! ## Example
//! ```rust
//! use errvisor::{failure, subscribe_stream, suppress, Listener};
//! use futures::stream;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     // Wrap a fallible parse into a callback that cannot fail silently.
//!     let quiet = suppress();
//!     let parse = quiet.wrap_fn_with_default(|s: &str| s.parse::<u32>().map_err(failure), 0);
//!     assert_eq!(parse("12"), 12);
//!     assert_eq!(parse("nope"), 0);
//!
//!     // Attach a listener to a stream; tracing interposes here if enabled.
//!     let sub = subscribe_stream(
//!         stream::iter(vec![1, 2, 3]),
//!         Listener::values(|v| println!("item {v}")),
//!     );
//!     sub.join().await;
//! }
//! ```
//!
//! Wrapping is purely synchronous decoration: a wrapped operation runs on the
//! calling thread, exactly once per invocation, with no reordering and no
//! suspension points introduced.

mod convert;
mod error;
mod plugins;
mod policies;
mod subscribe;
mod trace;

// ---- Public re-exports ----

pub use convert::{as_option, as_set};
pub use error::{as_unchecked, failure, Failure, Unchecked};
pub use plugins::{InstallError, Plugins};
pub use policies::{dialog, log, rethrow, suppress, Handling, Rethrowing, Sink};
pub use subscribe::{
    subscribe, subscribe_future, subscribe_stream, Listener, Source, Subscription, Terminal,
};
pub use trace::{
    Passthrough, SubscriptionError, SubscriptionTrace, TraceLogger, TracePredicate, TracingPolicy,
};
