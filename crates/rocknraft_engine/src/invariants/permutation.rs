//! Position invariant: cells cover the grid exactly once.

use super::Invariant;
use crate::Board;

/// Invariant: cell positions are a permutation of `0..total_cells`, the
/// cells are stored in position order, and the open-water count is fixed.
pub struct PositionPermutationInvariant;

impl Invariant<Board> for PositionPermutationInvariant {
    fn holds(board: &Board) -> bool {
        let cells = board.cells();
        let in_order = cells.len() == board.total_cells()
            && cells
                .iter()
                .enumerate()
                .all(|(index, cell)| cell.position() == index);
        let water = cells.iter().filter(|cell| cell.is_empty()).count();

        in_order && water == board.empty_cell_count() && cells.iter().any(|cell| !cell.is_empty())
    }

    fn description() -> &'static str {
        "Cell positions form a permutation of the grid"
    }
}
