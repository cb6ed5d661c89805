//! Bridging between optional values and sets.
//!
//! Glue for call sites that model "at most one" as an `Option` while their
//! neighbors model it as a set: an empty set is `None`, a singleton is
//! `Some`, and anything larger is resolved by a caller-supplied function.

use std::collections::HashSet;
use std::hash::Hash;

/// Mirrors an optional value as a set: empty or singleton.
pub fn as_set<T: Eq + Hash>(value: Option<T>) -> HashSet<T> {
    value.into_iter().collect()
}

/// Mirrors a set as an optional value.
///
/// `on_multiple` picks the representative when the set holds more than one
/// element.
pub fn as_option<T: Eq + Hash>(
    set: HashSet<T>,
    on_multiple: impl FnOnce(HashSet<T>) -> T,
) -> Option<T> {
    match set.len() {
        0 => None,
        1 => set.into_iter().next(),
        _ => Some(on_multiple(set)),
    }
}
