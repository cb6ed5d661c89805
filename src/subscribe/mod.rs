//! # Subscriptions: listeners, sources, and the traced entry points.
//!
//! ## Architecture
//! ```text
//! caller ── subscribe(source, listener) ──► TracingPolicy::hook ──► terminal'
//!                                                │
//!                        Source::attach(listener with terminal')
//!                                                │
//!                source invokes: value… value… terminal (complete | error)
//! ```
//!
//! ## Contents
//! - [`Listener`] / [`Terminal`] the callback bundle and its terminal half
//! - [`Source`] the minimal capability contract for asynchronous sources
//! - [`subscribe`] the traced registration choke point
//! - [`subscribe_stream`] / [`subscribe_future`] pump adapters for the
//!   ecosystem's native primitives, returning a [`Subscription`] handle

mod listener;
mod pump;
mod source;

pub use listener::{Listener, Terminal};
pub use pump::{subscribe_future, subscribe_stream, Subscription};
pub use source::{subscribe, Source};
