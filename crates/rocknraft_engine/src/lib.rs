//! Rock'n'Raft engine - pure board logic for the raft memory game.
//!
//! A board is a grid of rafts. Each raft carries a fixed number of rocks,
//! every rock number appears on exactly two rocks, and one or more grid
//! positions are open water. Players pick two hidden rocks per turn; a pair
//! stays revealed and grants another pick, a miss makes the open water drift
//! into a neighbouring raft and passes the turn.
//!
//! # Architecture
//!
//! - **Types**: [`Marker`], [`Cell`], [`Player`] are plain data, mutated only
//!   through [`Board`]
//! - **Board**: dealing, the slide step, matching and turn rules
//! - **Invariants**: first-class board properties checked after every turn
//! - **Render**: the read-only [`BoardSnapshot`] handed to renderers
//!
//! # Example
//!
//! ```
//! use rocknraft_engine::{Board, BoardConfig, Difficulty, Player, UserRef};
//!
//! # fn example() -> Result<(), rocknraft_engine::BoardError> {
//! let config = BoardConfig::new(Difficulty::Medium).with_seed(7);
//! let players = [
//!     Player::human(UserRef::new("42", "alice")),
//!     Player::surrogate(),
//! ];
//! let board = Board::new("msg-1".to_string(), config, players)?;
//! assert_eq!(board.cells().len(), 9);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod cell;
mod config;
mod error;
mod marker;
mod player;
mod render;

pub mod invariants;

pub use board::{Board, MatchOutcome, Selection, SlideMove, TurnAdvance, TurnReport};
pub use cell::{Cell, OccupiedCell};
pub use config::{BoardConfig, Difficulty};
pub use error::{BoardError, BoardResult};
pub use invariants::{BoardInvariants, Invariant, InvariantSet, InvariantViolation};
pub use marker::{Marker, MarkerId};
pub use player::{Player, UserId, UserRef};
pub use render::{BoardSnapshot, CellView, MarkerView, RenderMode, Renderer, TextRenderer};

/// Opaque, externally assigned key for a game session.
pub type SessionKey = String;
