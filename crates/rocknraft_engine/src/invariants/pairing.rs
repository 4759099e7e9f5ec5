//! Pairing invariant: every rock number sits on exactly two rocks.

use super::Invariant;
use crate::{Board, Cell, MarkerId};
use std::collections::HashMap;

/// Invariant: across all rafts each marker id appears exactly twice, and
/// never twice on the same raft.
pub struct PairingInvariant;

impl Invariant<Board> for PairingInvariant {
    fn holds(board: &Board) -> bool {
        let mut counts: HashMap<MarkerId, usize> = HashMap::new();

        for raft in board.cells().iter().filter_map(Cell::as_occupied) {
            let markers = raft.markers();
            for (i, marker) in markers.iter().enumerate() {
                if markers[..i].iter().any(|other| other.id() == marker.id()) {
                    return false;
                }
                *counts.entry(marker.id()).or_default() += 1;
            }
        }

        counts.values().all(|&count| count == 2)
    }

    fn description() -> &'static str {
        "Every marker id appears on exactly two rafts"
    }
}
