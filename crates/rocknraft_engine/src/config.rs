//! Board dimensions and difficulty.

use serde::{Deserialize, Serialize};

/// How many rocks each raft carries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Three rocks per raft.
    Easy,
    /// Four rocks per raft.
    #[default]
    Medium,
    /// Five rocks per raft.
    Hard,
}

impl Difficulty {
    /// Pairing arity: markers per occupied cell.
    pub fn arity(self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
        }
    }

    /// Maps an arity back to a difficulty.
    pub fn from_arity(arity: usize) -> Option<Self> {
        match arity {
            3 => Some(Difficulty::Easy),
            4 => Some(Difficulty::Medium),
            5 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Memorise time in units: harder boards are shown for less time.
    pub fn memorize_units(self) -> u64 {
        10 - self.arity() as u64
    }
}

/// Shape of a board to deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Rocks per raft.
    pub difficulty: Difficulty,
    /// Open-water positions.
    pub empty_cells: usize,
    /// Fixed RNG seed; random when unset.
    pub seed: Option<u64>,
}

impl BoardConfig {
    /// A 3x3 board with one open-water position.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            width: 3,
            height: 3,
            difficulty,
            empty_cells: 1,
            seed: None,
        }
    }

    /// Sets the grid size.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the number of open-water positions.
    pub fn with_empty_cells(mut self, empty_cells: usize) -> Self {
        self.empty_cells = empty_cells;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total grid positions.
    pub fn total_cells(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Positions that carry a raft.
    pub fn occupied_cells(&self) -> usize {
        self.total_cells().saturating_sub(self.empty_cells)
    }

    /// Number of distinct marker ids dealt.
    pub fn total_marker_ids(&self) -> usize {
        self.occupied_cells().saturating_mul(self.difficulty.arity()) / 2
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_arity_round_trip() {
        for difficulty in <Difficulty as strum::IntoEnumIterator>::iter() {
            assert_eq!(Difficulty::from_arity(difficulty.arity()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_arity(6), None);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Difficulty::from_str("HARD").unwrap(), Difficulty::Hard);
        assert_eq!(Difficulty::Easy.to_string(), "easy");
    }

    #[test]
    fn test_default_board_counts() {
        let config = BoardConfig::new(Difficulty::Medium);
        assert_eq!(config.total_cells(), 9);
        assert_eq!(config.occupied_cells(), 8);
        assert_eq!(config.total_marker_ids(), 16);
    }

    #[test]
    fn test_memorize_units() {
        assert_eq!(Difficulty::Easy.memorize_units(), 7);
        assert_eq!(Difficulty::Hard.memorize_units(), 5);
    }
}
