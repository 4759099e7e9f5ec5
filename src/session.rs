//! Game session registry: one guarded board per external session key.

use rocknraft_engine::{
    Board, BoardConfig, BoardError, BoardSnapshot, Player, RenderMode, Selection, SessionKey,
    TurnReport, UserId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex as BoardLock, MutexGuard as BoardGuard};
use tracing::{debug, info, instrument, warn};

/// Error raised by the session registry.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum SessionError {
    /// A board already exists under this key.
    #[display("Session {} already exists", _0)]
    DuplicateSession(SessionKey),

    /// No board exists under this key.
    #[display("No board found matching the {}", _0)]
    SessionNotFound(SessionKey),

    /// The board rejected the request.
    #[display("{}", _0)]
    #[from]
    Board(BoardError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Board(err) => Some(err),
            _ => None,
        }
    }
}

/// Shared handle to one session's board.
///
/// Every mutation goes through the board lock, so turns on the same board
/// never interleave. Handles stay usable after the session is removed from
/// the registry; the board lives until the last handle drops.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    key: SessionKey,
    board: Arc<BoardLock<Board>>,
}

impl SessionHandle {
    /// Session key.
    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Waits for exclusive access to the board.
    pub async fn lock(&self) -> BoardGuard<'_, Board> {
        self.board.lock().await
    }

    /// Plays a turn for `actor` once the board is free.
    ///
    /// The turn owner is checked after the lock is taken, since the turn may
    /// have passed while this call was waiting.
    #[instrument(skip(self), fields(session_id = %self.key))]
    pub async fn play_turn(
        &self,
        actor: &UserId,
        selection: Selection,
    ) -> Result<TurnReport, SessionError> {
        let mut board = self.board.lock().await;
        let report = board.play_turn(actor, selection).map_err(|e| {
            warn!(actor = %actor, error = %e, "Turn rejected");
            e
        })?;
        info!(
            actor = %actor,
            outcome = %report.outcome,
            completed = report.completed,
            next = %report.next_player,
            "Turn completed"
        );
        Ok(report)
    }

    /// Snapshot of the board for a renderer.
    pub async fn snapshot(&self, mode: RenderMode) -> BoardSnapshot {
        self.board.lock().await.snapshot(mode)
    }
}

/// Owns every live board.
///
/// The map lock is only held for the lookup itself and never while a board
/// lock is held, so registry calls cannot deadlock against a running turn.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<SessionKey, SessionHandle>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session registry");
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionKey, SessionHandle>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deals a new board under `key`.
    ///
    /// # Errors
    ///
    /// [`SessionError::DuplicateSession`] if the key is taken, or
    /// [`SessionError::Board`] with [`BoardError::InvalidConfiguration`].
    #[instrument(skip(self, players))]
    pub fn create(
        &self,
        key: SessionKey,
        config: BoardConfig,
        players: [Player; 2],
    ) -> Result<SessionHandle, SessionError> {
        let mut sessions = self.sessions();

        if sessions.contains_key(&key) {
            warn!(session_id = %key, "Session already exists");
            return Err(SessionError::DuplicateSession(key));
        }

        let board = Board::new(key.clone(), config, players)?;
        let handle = SessionHandle {
            key: key.clone(),
            board: Arc::new(BoardLock::new(board)),
        };
        sessions.insert(key.clone(), handle.clone());

        info!(session_id = %key, "Created new session");
        Ok(handle)
    }

    /// Looks up a session.
    ///
    /// # Errors
    ///
    /// [`SessionError::SessionNotFound`] for an unknown key.
    #[instrument(skip(self))]
    pub fn get(&self, key: &str) -> Result<SessionHandle, SessionError> {
        self.sessions().get(key).cloned().ok_or_else(|| {
            debug!(session_id = key, "Session not found");
            SessionError::SessionNotFound(key.to_string())
        })
    }

    /// Drops a session. Removing an unknown key is not an error.
    #[instrument(skip(self))]
    pub fn remove(&self, key: &str) {
        if self.sessions().remove(key).is_some() {
            info!(session_id = key, "Removed session");
        }
    }

    /// Lists all active session keys.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<SessionKey> {
        let mut keys: Vec<_> = self.sessions().keys().cloned().collect();
        keys.sort();
        debug!(count = keys.len(), "Listed sessions");
        keys
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    /// Whether no session is live.
    pub fn is_empty(&self) -> bool {
        self.sessions().is_empty()
    }
}
