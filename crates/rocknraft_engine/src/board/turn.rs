//! Turn rules: who plays next and when the water moves.

use super::{Board, MatchOutcome, Selection, SlideMove};
use crate::error::{BoardError, BoardResult};
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::marker::MarkerId;
use crate::player::UserId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// What [`Board::advance_turn`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAdvance {
    /// No pick was pending; nothing changed.
    Idle,
    /// The pick was a pair: same player goes again, nothing slides.
    ExtraTurn,
    /// The pick missed: the water slid, and the turn passed unless the
    /// opponent is a surrogate.
    Slid {
        /// Swaps made by the slide step.
        slides: Vec<SlideMove>,
        /// Whether the other player now holds the turn.
        turn_passed: bool,
    },
}

/// Everything one played turn changed, for the caller to present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Number on the first picked rock.
    pub first: MarkerId,
    /// Number on the second picked rock.
    pub second: MarkerId,
    /// Pair or miss.
    pub outcome: MatchOutcome,
    /// Slide and turn consequences.
    pub advance: TurnAdvance,
    /// Whether the last pair was just found.
    pub completed: bool,
    /// Name of the player holding the turn afterwards.
    pub next_player: String,
}

impl Board {
    /// Applies the consequences of the pending pick.
    ///
    /// A pair keeps the turn with the same player. A miss runs exactly one
    /// slide step and then passes the turn, except to a surrogate.
    #[instrument(skip(self), fields(session_key = %self.session_key))]
    pub fn advance_turn(&mut self) -> TurnAdvance {
        match self.pending.take() {
            None => TurnAdvance::Idle,
            Some(MatchOutcome::Matched) => {
                debug!(player = %self.current_player().display_name(), "Extra turn after pair");
                TurnAdvance::ExtraTurn
            }
            Some(MatchOutcome::NoMatch) => {
                let slides = self.slide_step();
                let turn_passed = self.pass_turn();
                TurnAdvance::Slid {
                    slides,
                    turn_passed,
                }
            }
        }
    }

    fn pass_turn(&mut self) -> bool {
        let current = self.turn_index();
        let other = 1 - current;
        if self.players[other].is_surrogate() {
            debug!("Opponent is a surrogate, turn stays");
            return false;
        }
        self.players[current].set_turn(false);
        self.players[other].set_turn(true);
        info!(player = %self.players[other].display_name(), "Turn switched");
        true
    }

    /// Plays one whole turn for `actor`: checks the turn owner, compares the
    /// picks and advances the turn, as one step.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotAParticipant`], [`BoardError::NotYourTurn`], or any
    /// error of [`Board::peek_selection`]. On error the board is unchanged.
    #[instrument(skip(self), fields(session_key = %self.session_key, actor = %actor))]
    pub fn play_turn(&mut self, actor: &UserId, selection: Selection) -> BoardResult<TurnReport> {
        let seat = self
            .players
            .iter()
            .position(|player| player.is(actor))
            .ok_or_else(|| BoardError::NotAParticipant(actor.clone()))?;
        if !self.players[seat].has_turn() {
            return Err(BoardError::NotYourTurn(actor.clone()));
        }

        let (first, second, outcome) = self.resolve_match(&selection)?;
        let advance = self.advance_turn();
        let completed = self.is_complete();

        debug_assert!(
            BoardInvariants::check_all(self).is_ok(),
            "board invariants broken after turn: {:?}",
            BoardInvariants::check_all(self)
        );

        if completed {
            info!(player = %self.players[seat].display_name(), "All pairs found");
        }

        Ok(TurnReport {
            first,
            second,
            outcome,
            advance,
            completed,
            next_player: self.current_player().display_name().to_string(),
        })
    }
}
