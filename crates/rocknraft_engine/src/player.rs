//! Players seated at a board.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Opaque external user identifier (e.g. a chat user id).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, derive_more::From,
)]
#[serde(transparent)]
pub struct UserId(pub String);

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Reference to an external user. Two references are equal when their ids are.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct UserRef {
    /// External id.
    id: UserId,
    /// Name shown to other players.
    name: String,
}

impl UserRef {
    /// Creates a user reference.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl PartialEq for UserRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UserRef {}

/// One of the two seats at a board.
///
/// Turn and score fields are managed by [`crate::Board`]; a player on its
/// own only describes who sits there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    identity: Option<UserRef>,
    is_surrogate: bool,
    has_turn: bool,
    score: u32,
}

impl Player {
    /// A human participant.
    pub fn human(user: UserRef) -> Self {
        Self {
            identity: Some(user),
            is_surrogate: false,
            has_turn: false,
            score: 0,
        }
    }

    /// A stand-in opponent that never takes a turn.
    pub fn surrogate() -> Self {
        Self {
            identity: None,
            is_surrogate: true,
            has_turn: false,
            score: 0,
        }
    }

    /// External identity, if any.
    pub fn identity(&self) -> Option<&UserRef> {
        self.identity.as_ref()
    }

    /// External id, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        self.identity.as_ref().map(UserRef::id)
    }

    /// Name to show for this seat.
    pub fn display_name(&self) -> &str {
        self.identity.as_ref().map_or("Bot", |user| user.name().as_str())
    }

    /// Whether this seat is the stand-in opponent.
    pub fn is_surrogate(&self) -> bool {
        self.is_surrogate
    }

    /// Whether this seat holds the turn.
    pub fn has_turn(&self) -> bool {
        self.has_turn
    }

    /// Pairs found so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether this seat belongs to `user`.
    pub fn is(&self, user: &UserId) -> bool {
        self.user_id() == Some(user)
    }

    pub(crate) fn set_turn(&mut self, has_turn: bool) {
        self.has_turn = has_turn;
    }

    pub(crate) fn add_point(&mut self) {
        self.score += 1;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.user_id() {
            Some(id) => write!(
                f,
                "Player(User ID: {}, Username: {}, Score: {})",
                id,
                self.display_name(),
                self.score
            ),
            None => write!(f, "Player(Bot, Score: {})", self.score),
        }
    }
}
