//! Turn exclusivity: exactly one seat holds the turn, never a surrogate.

use super::Invariant;
use crate::Board;

/// Invariant: exactly one player has the turn, and it is not a surrogate.
pub struct TurnExclusivityInvariant;

impl Invariant<Board> for TurnExclusivityInvariant {
    fn holds(board: &Board) -> bool {
        let holders: Vec<_> = board.players().iter().filter(|p| p.has_turn()).collect();
        holders.len() == 1 && !holders[0].is_surrogate()
    }

    fn description() -> &'static str {
        "Exactly one non-surrogate player holds the turn"
    }
}
