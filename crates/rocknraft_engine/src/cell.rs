//! Grid cells: open water or a raft carrying rocks.

use crate::error::{BoardError, BoardResult};
use crate::marker::Marker;
use serde::{Deserialize, Serialize};

/// A raft: an occupied cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupiedCell {
    position: usize,
    markers: Vec<Marker>,
    relocated_this_turn: bool,
}

impl OccupiedCell {
    pub(crate) fn new(position: usize, markers: Vec<Marker>) -> Self {
        Self {
            position,
            markers,
            relocated_this_turn: false,
        }
    }

    /// Current grid position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// All markers in slot order, revealed ones included.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Whether the last slide step moved this raft.
    pub fn relocated_this_turn(&self) -> bool {
        self.relocated_this_turn
    }

    /// Markers still hidden, in slot order. Selection slots index this list.
    pub fn unrevealed(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(|marker| !marker.is_revealed())
    }

    /// Number of markers still hidden.
    pub fn unrevealed_count(&self) -> usize {
        self.unrevealed().count()
    }

    /// Whether every marker on this raft has been matched.
    pub fn all_revealed(&self) -> bool {
        self.markers.iter().all(Marker::is_revealed)
    }

    /// The `slot`-th hidden marker.
    pub fn unrevealed_at(&self, slot: usize) -> BoardResult<&Marker> {
        self.unrevealed()
            .nth(slot)
            .ok_or(BoardError::MarkerIndexOutOfRange {
                position: self.position,
                slot,
            })
    }

    /// Reveals the `slot`-th hidden marker.
    pub(crate) fn reveal_unrevealed(&mut self, slot: usize) -> BoardResult<()> {
        let position = self.position;
        self.markers
            .iter_mut()
            .filter(|marker| !marker.is_revealed())
            .nth(slot)
            .map(Marker::reveal)
            .ok_or(BoardError::MarkerIndexOutOfRange { position, slot })
    }

    pub(crate) fn set_relocated(&mut self, relocated: bool) {
        self.relocated_this_turn = relocated;
    }
}

/// One grid position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Open water.
    Empty {
        /// Current grid position.
        position: usize,
    },
    /// A raft with rocks.
    Occupied(OccupiedCell),
}

impl Cell {
    /// Current grid position.
    pub fn position(&self) -> usize {
        match self {
            Cell::Empty { position } => *position,
            Cell::Occupied(raft) => raft.position,
        }
    }

    pub(crate) fn set_position(&mut self, new_position: usize) {
        match self {
            Cell::Empty { position } => *position = new_position,
            Cell::Occupied(raft) => raft.position = new_position,
        }
    }

    /// Whether this is open water.
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty { .. })
    }

    /// The raft at this position, if there is one.
    pub fn as_occupied(&self) -> Option<&OccupiedCell> {
        match self {
            Cell::Empty { .. } => None,
            Cell::Occupied(raft) => Some(raft),
        }
    }

    pub(crate) fn as_occupied_mut(&mut self) -> Option<&mut OccupiedCell> {
        match self {
            Cell::Empty { .. } => None,
            Cell::Occupied(raft) => Some(raft),
        }
    }

    /// All markers, in slot order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyCellHasNoMarkers`] for open water.
    pub fn markers(&self) -> BoardResult<&[Marker]> {
        match self {
            Cell::Empty { position } => Err(BoardError::EmptyCellHasNoMarkers(*position)),
            Cell::Occupied(raft) => Ok(raft.markers()),
        }
    }

    /// The marker at raw `slot`.
    ///
    /// # Errors
    ///
    /// [`BoardError::EmptyCellHasNoMarkers`] for open water,
    /// [`BoardError::MarkerIndexOutOfRange`] past the last slot.
    pub fn marker(&self, slot: usize) -> BoardResult<&Marker> {
        self.markers()?
            .get(slot)
            .ok_or(BoardError::MarkerIndexOutOfRange {
                position: self.position(),
                slot,
            })
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty { position } => write!(f, "Empty({})", position),
            Cell::Occupied(raft) => {
                write!(f, "Raft({}: ", raft.position)?;
                for (i, marker) in raft.markers.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", marker)?;
                }
                f.write_str(")")
            }
        }
    }
}
