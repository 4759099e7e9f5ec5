//! First-class invariants for the raft board.
//!
//! Invariants are logical properties that must hold between any two public
//! operations. They are checked after every turn in debug builds and can be
//! tested independently.

mod monotonic_reveal;
mod pairing;
mod permutation;
mod turn_exclusive;

pub use monotonic_reveal::MonotonicReveal;
pub use pairing::PairingInvariant;
pub use permutation::PositionPermutationInvariant;
pub use turn_exclusive::TurnExclusivityInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violated: {}", self.description)
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        finish(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        finish(violations)
    }
}

/// Every board invariant as a composable set.
pub type BoardInvariants = (
    PairingInvariant,
    PositionPermutationInvariant,
    TurnExclusivityInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, BoardConfig, Difficulty, Player, UserRef};

    fn board() -> Board {
        let players = [
            Player::human(UserRef::new("1", "alice")),
            Player::human(UserRef::new("2", "bob")),
        ];
        Board::new("k".into(), BoardConfig::new(Difficulty::Hard).with_seed(9), players).unwrap()
    }

    #[test]
    fn test_invariant_set_holds_for_fresh_board() {
        assert!(BoardInvariants::check_all(&board()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_slides() {
        let mut board = board();
        for _ in 0..25 {
            board.slide_step();
            assert!(BoardInvariants::check_all(&board).is_ok());
        }
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (PairingInvariant, TurnExclusivityInvariant);
        assert!(TwoInvariants::check_all(&board()).is_ok());
    }

    #[test]
    fn test_violation_display() {
        let violation = InvariantViolation::new("rocks come in pairs");
        assert_eq!(violation.to_string(), "Invariant violated: rocks come in pairs");
    }
}
