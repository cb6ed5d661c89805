//! # Pump adapters: futures and streams as sources.
//!
//! The ecosystem's native async primitives do not push values into callbacks
//! by themselves, so these adapters spawn a small pump task on the tokio
//! runtime that drives the primitive and feeds the listener:
//!
//! - [`subscribe_stream`] — each item becomes a value callback; stream end is
//!   clean completion.
//! - [`subscribe_future`] — success becomes one value callback followed by
//!   completion; failure becomes the terminal error.
//!
//! Both route through the installed tracing policy before the pump starts,
//! exactly like [`subscribe`](crate::subscribe), and both return a
//! [`Subscription`] handle whose [`cancel`](Subscription::cancel) stops
//! future deliveries. Cancellation never interrupts a callback already in
//! flight, and a cancelled pump emits no terminal event (mirroring an
//! unsubscribed listener, which simply stops hearing from its source).
//!
//! ## Example
//! ```rust
//! use errvisor::{subscribe_stream, Listener};
//! use futures::stream;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sub = subscribe_stream(
//!         stream::iter(vec![1, 2, 3]),
//!         Listener::values(|v| println!("item {v}")),
//!     );
//!     sub.join().await;
//! }
//! ```

use std::future::Future;

use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::Failure;
use crate::plugins;
use crate::subscribe::listener::Listener;

/// Handle to a running pump task.
///
/// Dropping the handle does **not** cancel the pump; the subscription stays
/// live for as long as the source produces events.
pub struct Subscription {
    token: CancellationToken,
    worker: JoinHandle<()>,
}

impl Subscription {
    /// Stops future deliveries. Idempotent; a callback already executing
    /// finishes normally.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once [`cancel`](Subscription::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits for the pump task to finish (source exhausted, failed, or
    /// cancelled).
    pub async fn join(self) {
        let _ = self.worker.await;
    }
}

/// Subscribes a listener to a stream.
///
/// Every item is delivered as a value callback; when the stream ends the
/// terminal completes cleanly. Must be called within a tokio runtime.
pub fn subscribe_stream<T, S>(stream: S, listener: Listener<T>) -> Subscription
where
    T: Send + 'static,
    S: Stream<Item = T> + Send + 'static,
{
    let terminal = plugins::tracing_policy().hook(&stream, listener.terminal_handle());
    let listener = listener.with_terminal(terminal);
    let token = CancellationToken::new();
    let pump = token.clone();
    let worker = tokio::spawn(async move {
        let mut stream = Box::pin(stream);
        loop {
            tokio::select! {
                _ = pump.cancelled() => return,
                next = stream.next() => match next {
                    Some(value) => listener.value(value),
                    None => {
                        listener.terminal_handle().complete();
                        return;
                    }
                },
            }
        }
    });
    Subscription { token, worker }
}

/// Subscribes a listener to a fallible future.
///
/// Success delivers the value followed by clean completion; failure delivers
/// the terminal error. Must be called within a tokio runtime.
pub fn subscribe_future<T, F>(future: F, listener: Listener<T>) -> Subscription
where
    T: Send + 'static,
    F: Future<Output = Result<T, Failure>> + Send + 'static,
{
    let terminal = plugins::tracing_policy().hook(&future, listener.terminal_handle());
    let listener = listener.with_terminal(terminal);
    let token = CancellationToken::new();
    let pump = token.clone();
    let worker = tokio::spawn(async move {
        tokio::select! {
            _ = pump.cancelled() => {}
            outcome = future => match outcome {
                Ok(value) => {
                    listener.value(value);
                    listener.terminal_handle().complete();
                }
                Err(fail) => listener.terminal_handle().error(fail),
            },
        }
    });
    Subscription { token, worker }
}
