//! # Listener: the callback bundle attached to a source.
//!
//! A [`Listener`] carries the two callback shapes an asynchronous source
//! needs: a value callback invoked zero or more times, and exactly one
//! [`Terminal`] callback reporting either clean completion or a terminal
//! failure.
//!
//! The terminal half is a separate, type-erased handle on purpose: it is the
//! only part a [`TracingPolicy`](crate::TracingPolicy) may substitute, which
//! keeps the hook object-safe and guarantees by construction that value
//! callbacks reach the original listener unchanged.
//!
//! ## Logging mode
//! A listener built with [`Listener::values`] has no error handling of its
//! own; its terminal merely logs failures through [`log`](crate::log). Such
//! terminals are marked as *logging mode*, which is what the default tracing
//! predicate keys on and what spares them a duplicate log entry.
//!
//! ## Example
//! ```rust
//! use errvisor::Listener;
//!
//! let listener: Listener<u32> = Listener::values(|v| println!("got {v}"));
//! listener.value(7);
//! assert!(listener.is_logging());
//! ```

use std::sync::Arc;

use crate::error::Failure;
use crate::policies;

/// Type-erased terminal callback: completion or terminal failure.
///
/// Cloning is cheap (shared callback) and clones are behaviorally identical.
#[derive(Clone)]
pub struct Terminal {
    op: Arc<dyn Fn(Option<Failure>) + Send + Sync>,
    logging: bool,
}

impl Terminal {
    /// Creates a terminal from a completion-or-failure callback.
    ///
    /// `None` means clean completion; `Some(failure)` is terminal.
    pub fn new(op: impl Fn(Option<Failure>) + Send + Sync + 'static) -> Self {
        Self {
            op: Arc::new(op),
            logging: false,
        }
    }

    /// Creates a terminal whose only error handling is logging.
    ///
    /// Used for listeners that never asked for error callbacks; tracing
    /// policies treat these specially to avoid double-logging.
    pub(crate) fn logging(op: impl Fn(Option<Failure>) + Send + Sync + 'static) -> Self {
        Self {
            op: Arc::new(op),
            logging: true,
        }
    }

    /// True if this terminal does nothing but log failures.
    pub fn is_logging(&self) -> bool {
        self.logging
    }

    /// Reports clean completion.
    pub fn complete(&self) {
        (self.op)(None);
    }

    /// Reports a terminal failure.
    pub fn error(&self, fail: Failure) {
        (self.op)(Some(fail));
    }

    /// Reports a raw outcome (`None` = completion).
    pub fn call(&self, outcome: Option<Failure>) {
        (self.op)(outcome);
    }
}

/// The callback bundle registered against an asynchronous source.
pub struct Listener<T> {
    on_value: Arc<dyn Fn(T) + Send + Sync>,
    terminal: Terminal,
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            on_value: Arc::clone(&self.on_value),
            terminal: self.terminal.clone(),
        }
    }
}

impl<T> Listener<T> {
    /// A listener interested in values only.
    ///
    /// Completion is ignored; failures are logged through
    /// [`log`](crate::log). The resulting terminal is in logging mode.
    pub fn values(on_value: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            on_value: Arc::new(on_value),
            terminal: Terminal::logging(|outcome| {
                if let Some(fail) = outcome {
                    policies::log().handle(fail);
                }
            }),
        }
    }

    /// A listener interested in the terminal event only.
    pub fn terminal(on_terminate: impl Fn(Option<Failure>) + Send + Sync + 'static) -> Self {
        Self {
            on_value: Arc::new(|_value| {}),
            terminal: Terminal::new(on_terminate),
        }
    }

    /// A listener with both value and terminal callbacks.
    pub fn values_terminal(
        on_value: impl Fn(T) + Send + Sync + 'static,
        on_terminate: impl Fn(Option<Failure>) + Send + Sync + 'static,
    ) -> Self {
        Self {
            on_value: Arc::new(on_value),
            terminal: Terminal::new(on_terminate),
        }
    }

    /// Delivers one value.
    pub fn value(&self, value: T) {
        (self.on_value)(value);
    }

    /// The terminal half of this listener.
    pub fn terminal_handle(&self) -> &Terminal {
        &self.terminal
    }

    /// True if the terminal does nothing but log failures.
    pub fn is_logging(&self) -> bool {
        self.terminal.is_logging()
    }

    /// Replaces the terminal half, keeping value callbacks untouched.
    ///
    /// This is the substitution point used by tracing policies.
    pub(crate) fn with_terminal(mut self, terminal: Terminal) -> Self {
        self.terminal = terminal;
        self
    }
}
