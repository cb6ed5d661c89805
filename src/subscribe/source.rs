//! # Source contract and the traced subscribe entry point.
//!
//! [`Source`] is the minimal capability this crate requires from an
//! asynchronous source: accept a [`Listener`]. Futures, streams, event buses
//! and custom observables all reduce to it; the crate ships ready-made
//! adapters for `Future` and `Stream` in [`pump`](crate::subscribe_stream).
//!
//! [`subscribe`] is the single choke point where the installed
//! [`TracingPolicy`](crate::TracingPolicy) intercepts a registration: the
//! hook may substitute the listener's terminal before the listener reaches
//! the source. Attaching a listener directly via [`Source::attach`] bypasses
//! tracing and should be left to source implementations themselves.

use std::any::Any;

use crate::plugins;
use crate::subscribe::listener::Listener;

/// Minimal capability contract for an asynchronous source.
///
/// Implementations invoke the listener's callbacks on whichever thread they
/// choose; this crate adds no scheduling of its own.
pub trait Source<T> {
    /// Registers the listener with this source.
    fn attach(&self, listener: Listener<T>);
}

/// Subscribes a listener to a source, routing through the installed tracing
/// policy.
///
/// Called exactly once per subscription. With the default
/// [`Passthrough`](crate::Passthrough) policy this is observably identical to
/// `source.attach(listener)`.
///
/// ## Example
/// ```rust
/// use errvisor::{subscribe, Listener, Source};
///
/// struct Immediate(u32);
///
/// impl Source<u32> for Immediate {
///     fn attach(&self, listener: Listener<u32>) {
///         listener.value(self.0);
///         listener.terminal_handle().complete();
///     }
/// }
///
/// subscribe(&Immediate(7), Listener::values(|v| assert_eq!(v, 7)));
/// ```
pub fn subscribe<T, S>(source: &S, listener: Listener<T>)
where
    S: Source<T> + Any,
{
    let terminal = plugins::tracing_policy().hook(source, listener.terminal_handle());
    source.attach(listener.with_terminal(terminal));
}
