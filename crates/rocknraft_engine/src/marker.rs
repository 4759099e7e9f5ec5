//! Rocks: numbered markers hidden on rafts.

use serde::{Deserialize, Serialize};

/// Number printed on a rock. Every number appears on exactly two rocks.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct MarkerId(pub u32);

/// A single rock on a raft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    id: MarkerId,
    revealed: bool,
}

impl Marker {
    /// Creates a hidden marker.
    pub fn new(id: MarkerId) -> Self {
        Self {
            id,
            revealed: false,
        }
    }

    /// Returns the marker number.
    pub fn id(&self) -> MarkerId {
        self.id
    }

    /// Whether this marker has been matched.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Marks the marker as matched. There is no way back.
    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.revealed {
            write!(f, "({})", self.id)
        } else {
            write!(f, "{}", self.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_marker_is_hidden() {
        let marker = Marker::new(MarkerId(3));
        assert_eq!(marker.id(), MarkerId(3));
        assert!(!marker.is_revealed());
    }

    #[test]
    fn test_reveal_is_sticky() {
        let mut marker = Marker::new(MarkerId(3));
        marker.reveal();
        marker.reveal();
        assert!(marker.is_revealed());
        assert_eq!(marker.to_string(), "(3)");
    }
}
