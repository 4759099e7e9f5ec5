//! Picking two hidden rocks and checking them for a pair.

use super::Board;
use crate::error::{BoardError, BoardResult};
use crate::marker::MarkerId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Result of comparing two picked rocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum MatchOutcome {
    /// Same number: both rocks are revealed for good.
    Matched,
    /// Different numbers: nothing is revealed.
    NoMatch,
}

/// Two (raft position, hidden-rock slot) picks.
///
/// Slots index the raft's *unrevealed* rocks, so slot 0 is always the
/// first rock a player can still choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Selection {
    /// Position of the first raft.
    pub first_cell: usize,
    /// Hidden-rock slot on the first raft.
    pub first_slot: usize,
    /// Position of the second raft.
    pub second_cell: usize,
    /// Hidden-rock slot on the second raft.
    pub second_slot: usize,
}

impl Board {
    /// Hidden rock at (`position`, `slot`).
    fn selectable_marker(&self, position: usize, slot: usize) -> BoardResult<MarkerId> {
        let raft = self
            .cell(position)?
            .as_occupied()
            .ok_or(BoardError::EmptyCellSelected(position))?;
        Ok(raft.unrevealed_at(slot)?.id())
    }

    /// Resolves both picks without touching the board.
    ///
    /// # Errors
    ///
    /// [`BoardError::GameOver`], [`BoardError::CellNotFound`],
    /// [`BoardError::SameCellSelected`], [`BoardError::EmptyCellSelected`] or
    /// [`BoardError::MarkerIndexOutOfRange`].
    pub fn peek_selection(&self, selection: &Selection) -> BoardResult<(MarkerId, MarkerId)> {
        if self.is_complete() {
            return Err(BoardError::GameOver);
        }
        self.cell(selection.first_cell)?;
        self.cell(selection.second_cell)?;
        if selection.first_cell == selection.second_cell {
            return Err(BoardError::SameCellSelected(selection.first_cell));
        }
        let first = self.selectable_marker(selection.first_cell, selection.first_slot)?;
        let second = self.selectable_marker(selection.second_cell, selection.second_slot)?;
        Ok((first, second))
    }

    /// Compares two hidden rocks.
    ///
    /// A pair reveals both rocks and scores a point for the player holding
    /// the turn. The outcome is remembered for [`Board::advance_turn`]; this
    /// call never slides.
    ///
    /// # Errors
    ///
    /// See [`Board::peek_selection`]. On error the board is unchanged.
    #[instrument(skip(self), fields(session_key = %self.session_key))]
    pub fn select_match(
        &mut self,
        cell_a: usize,
        slot_a: usize,
        cell_b: usize,
        slot_b: usize,
    ) -> BoardResult<MatchOutcome> {
        let (_, _, outcome) = self.resolve_match(&Selection::new(cell_a, slot_a, cell_b, slot_b))?;
        Ok(outcome)
    }

    /// Validates once, then applies the pick. Returns both rock numbers.
    pub(super) fn resolve_match(
        &mut self,
        selection: &Selection,
    ) -> BoardResult<(MarkerId, MarkerId, MatchOutcome)> {
        let (first, second) = self.peek_selection(selection)?;

        let outcome = if first == second {
            for (position, slot) in [
                (selection.first_cell, selection.first_slot),
                (selection.second_cell, selection.second_slot),
            ] {
                self.cells[position]
                    .as_occupied_mut()
                    .ok_or(BoardError::EmptyCellSelected(position))?
                    .reveal_unrevealed(slot)?;
            }
            let seat = self.turn_index();
            self.players[seat].add_point();
            info!(marker = %first, player = %self.players[seat].display_name(), "Pair matched");
            MatchOutcome::Matched
        } else {
            debug!(%first, %second, "No match");
            MatchOutcome::NoMatch
        };

        self.pending = Some(outcome);
        Ok((first, second, outcome))
    }
}
