//! # Subscription-time stack capture.
//!
//! [`SubscriptionTrace`] records where a subscription was established: the
//! caller's own frames, with the tracing machinery trimmed off the top.
//!
//! Trimming is marker-based rather than depth-based: the capture walks the
//! resolved frames and cuts everything up to and including the outermost
//! frame whose symbol matches a machinery marker (the capture call itself,
//! the hook dispatch, the subscribe entry points). A fixed skip depth would
//! silently drift when the dispatch chain changes; markers fail loudly in the
//! test that checks the top captured frame belongs to caller code.

use std::fmt;

/// Symbols belonging to the capture/dispatch chain, never to caller code.
///
/// Fully qualified to avoid accidentally matching caller frames.
const MACHINERY_MARKERS: &[&str] = &[
    "SubscriptionTrace::capture",
    "TracingPolicy>::hook",
    "errvisor::subscribe::source::subscribe",
    "errvisor::subscribe::pump::subscribe_stream",
    "errvisor::subscribe::pump::subscribe_future",
];

/// The call stack captured when a subscription was established.
///
/// Owned by the closure of one subscription; cloned into the decoration of
/// every failure that subscription later surfaces.
#[derive(Clone, Debug)]
pub struct SubscriptionTrace {
    frames: Vec<String>,
}

impl SubscriptionTrace {
    /// Captures the current stack, trimmed below the tracing machinery.
    pub fn capture() -> Self {
        Self::capture_below(MACHINERY_MARKERS)
    }

    /// Captures the current stack, trimmed below the outermost frame whose
    /// symbol contains any of the given markers.
    ///
    /// With an empty marker set (or none matching, as in stripped builds) the
    /// full stack is kept.
    pub fn capture_below(markers: &[&str]) -> Self {
        let backtrace = backtrace::Backtrace::new();
        let mut frames = Vec::new();
        for frame in backtrace.frames() {
            for symbol in frame.symbols() {
                match symbol.name() {
                    Some(name) => frames.push(name.to_string()),
                    None => frames.push("<unresolved>".to_string()),
                }
            }
        }
        let cut = frames
            .iter()
            .rposition(|name| markers.iter().any(|marker| name.contains(marker)))
            .map_or(0, |index| index + 1);
        Self {
            frames: frames.split_off(cut),
        }
    }

    /// The captured frames, innermost caller first.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for SubscriptionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.frames {
            writeln!(f, "    at {frame}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_keeps_caller_frames() {
        let trace = SubscriptionTrace::capture();
        assert!(!trace.is_empty());
        // The machinery stops at the capture call; the first kept frame must
        // belong to this test, not to the capture chain.
        let top = &trace.frames()[0];
        for marker in MACHINERY_MARKERS {
            assert!(!top.contains(marker), "machinery frame leaked: {top}");
        }
    }

    #[test]
    fn unknown_markers_keep_the_full_stack() {
        let trimmed = SubscriptionTrace::capture();
        let full = SubscriptionTrace::capture_below(&["no::such::symbol"]);
        assert!(full.len() >= trimmed.len());
    }

    #[test]
    fn display_is_one_frame_per_line() {
        let trace = SubscriptionTrace::capture();
        let rendered = trace.to_string();
        assert_eq!(rendered.lines().count(), trace.len());
        assert!(rendered.lines().all(|line| line.starts_with("    at ")));
    }
}
