//! Board error types.

use crate::player::UserId;

/// Error raised by a board operation.
///
/// Every operation validates fully before mutating, so an error always
/// leaves the board exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The requested board cannot be built.
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// No cell sits at this position.
    #[display("No cell found at position {}", _0)]
    CellNotFound(usize),

    /// Markers were requested from an empty cell.
    #[display("Empty cell at position {} has no markers", _0)]
    EmptyCellHasNoMarkers(usize),

    /// An empty cell was picked for a match.
    #[display("Cell {} is empty and cannot be selected", _0)]
    EmptyCellSelected(usize),

    /// The slot does not address a marker of this cell.
    #[display("Marker {} not found in cell {}", slot, position)]
    MarkerIndexOutOfRange {
        /// Cell position.
        position: usize,
        /// Requested slot.
        slot: usize,
    },

    /// Both picks addressed the same cell.
    #[display("Both markers must come from different cells, got {} twice", _0)]
    SameCellSelected(usize),

    /// The acting user does not play on this board.
    #[display("User {} is not in this game", _0)]
    NotAParticipant(UserId),

    /// The acting user plays here but does not hold the turn.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(UserId),

    /// Every pair has already been found.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for BoardError {}

/// Result alias for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
