//! Reveal monotonicity: a found pair stays found.

use crate::{Board, Cell, MarkerId};
use std::collections::BTreeSet;

/// Transition property: every marker id revealed in `before` is still
/// revealed in `after`.
///
/// Unlike the state invariants this compares two boards, so it is checked
/// around an operation rather than on a single state.
pub struct MonotonicReveal;

impl MonotonicReveal {
    fn revealed_ids(board: &Board) -> BTreeSet<MarkerId> {
        board
            .cells()
            .iter()
            .filter_map(Cell::as_occupied)
            .flat_map(|raft| raft.markers())
            .filter(|marker| marker.is_revealed())
            .map(|marker| marker.id())
            .collect()
    }

    /// Whether no reveal was undone between the two states.
    pub fn holds_between(before: &Board, after: &Board) -> bool {
        Self::revealed_ids(before).is_subset(&Self::revealed_ids(after))
    }

    /// Human-readable description of the property.
    pub fn description() -> &'static str {
        "Revealed markers are never hidden again"
    }
}
