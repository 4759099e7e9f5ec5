//! Turn input: parsing typed picks and choosing random ones.

use derive_more::Display;
use rand::prelude::*;
use rocknraft_engine::{Board, Selection};
use tracing::debug;

/// A typed pick that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseSelectionError {
    /// Not four whitespace-separated fields.
    #[display("Expected `raft rock raft rock`, got {} field(s)", _0)]
    WrongFieldCount(usize),

    /// A field was not a positive whole number.
    #[display("`{}` is not a number from 1 up", _0)]
    NotANumber(String),
}

impl std::error::Error for ParseSelectionError {}

/// Parses `raft rock raft rock`, all counted from 1.
///
/// Rafts are grid positions. Rocks count only the still-hidden rocks on the
/// raft, which is what [`Selection`] slots index.
pub fn parse_selection(input: &str) -> Result<Selection, ParseSelectionError> {
    let fields: Vec<&str> = input.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(ParseSelectionError::WrongFieldCount(fields.len()));
    }

    let mut numbers = [0usize; 4];
    for (slot, field) in numbers.iter_mut().zip(&fields) {
        *slot = field
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .ok_or_else(|| ParseSelectionError::NotANumber(field.to_string()))?;
    }

    let [first_cell, first_slot, second_cell, second_slot] = numbers;
    Ok(Selection::new(first_cell, first_slot, second_cell, second_slot))
}

/// Picks two hidden rocks on two different rafts at random.
///
/// Returns `None` once nothing is left to pick.
pub fn random_selection(board: &Board, rng: &mut StdRng) -> Option<Selection> {
    let mut rafts: Vec<_> = board.selectable_cells().collect();
    if rafts.len() < 2 {
        return None;
    }
    rafts.shuffle(rng);

    let first = rafts[0];
    let second = rafts[1];
    let first_slots: Vec<usize> = (0..first.unrevealed_count()).collect();
    let second_slots: Vec<usize> = (0..second.unrevealed_count()).collect();

    let selection = Selection::new(
        first.position(),
        *first_slots.choose(rng)?,
        second.position(),
        *second_slots.choose(rng)?,
    );
    debug!(?selection, "Random pick");
    Some(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocknraft_engine::{BoardConfig, Player, UserRef};

    #[test]
    fn test_parse_one_based() {
        assert_eq!(parse_selection("1 2 9 1"), Ok(Selection::new(0, 1, 8, 0)));
        assert_eq!(parse_selection("  3   1 4 4 \n"), Ok(Selection::new(2, 0, 3, 3)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(parse_selection("1 2 3"), Err(ParseSelectionError::WrongFieldCount(3)));
        assert_eq!(parse_selection(""), Err(ParseSelectionError::WrongFieldCount(0)));
        assert_eq!(
            parse_selection("1 0 2 1"),
            Err(ParseSelectionError::NotANumber("0".into()))
        );
        assert_eq!(
            parse_selection("1 x 2 1"),
            Err(ParseSelectionError::NotANumber("x".into()))
        );
    }

    #[test]
    fn test_random_selection_is_always_legal() {
        let players = [Player::human(UserRef::new("1", "alice")), Player::surrogate()];
        let board = Board::new("k".into(), BoardConfig::default().with_seed(4), players).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..100 {
            let pick = random_selection(&board, &mut rng).unwrap();
            assert_ne!(pick.first_cell, pick.second_cell);
            assert!(board.peek_selection(&pick).is_ok());
        }
    }
}
