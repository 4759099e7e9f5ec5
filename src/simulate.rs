//! Headless games: two random players racing for each board.

use crate::play::random_selection;
use crate::session::{SessionError, SessionHandle, SessionRegistry};
use crate::settings::Settings;
use rand::prelude::*;
use rocknraft_engine::{BoardError, Player, UserId, UserRef};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

/// Turns after which a simulated board is abandoned.
pub const TURN_LIMIT: usize = 10_000;

/// How one simulated game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Session key the board ran under.
    pub session_key: String,
    /// Whether every pair was found.
    pub completed: bool,
    /// Turns played by both players together.
    pub turns: usize,
    /// Final scores, first seat first.
    pub scores: [u32; 2],
}

/// Plays `games` boards at once, each between two random players.
///
/// Both players of a board run as separate tasks and race for the board
/// lock; only the turn holder's attempt goes through. Finished boards are
/// removed from the registry.
#[instrument(skip(registry, settings))]
pub async fn simulate(
    registry: &SessionRegistry,
    settings: &Settings,
    games: usize,
) -> Result<Vec<GameSummary>, SessionError> {
    let base_seed = settings.seed().unwrap_or_else(rand::random);
    let mut boards = JoinSet::new();

    for game in 0..games {
        let key = format!("sim-{game}");
        let seed = base_seed.wrapping_add(game as u64);
        let config = settings.board_config().with_seed(seed);
        let players = [
            Player::human(UserRef::new(format!("{game}-north"), "north")),
            Player::human(UserRef::new(format!("{game}-south"), "south")),
        ];
        let handle = registry.create(key, config, players)?;
        let registry = registry.clone();
        boards.spawn(async move { run_board(registry, handle, seed).await });
    }

    let mut summaries = Vec::with_capacity(games);
    while let Some(joined) = boards.join_next().await {
        match joined {
            Ok(summary) => summaries.push(summary?),
            Err(e) => warn!(error = %e, "Board task failed"),
        }
    }
    summaries.sort_by(|a, b| a.session_key.cmp(&b.session_key));

    let completed = summaries.iter().filter(|s| s.completed).count();
    info!(games, completed, "Simulation finished");
    Ok(summaries)
}

async fn run_board(
    registry: SessionRegistry,
    handle: SessionHandle,
    seed: u64,
) -> Result<GameSummary, SessionError> {
    let seats: Vec<UserId> = handle
        .lock()
        .await
        .participant_ids()
        .into_iter()
        .cloned()
        .collect();

    let turns = Arc::new(AtomicUsize::new(0));
    let mut players = JoinSet::new();
    for (seat, user) in seats.into_iter().enumerate() {
        let handle = handle.clone();
        let turns = Arc::clone(&turns);
        let seed = seed.wrapping_mul(31).wrapping_add(seat as u64);
        players.spawn(async move { run_player(handle, user, turns, seed).await });
    }

    while let Some(joined) = players.join_next().await {
        match joined {
            Ok(result) => result?,
            Err(e) => warn!(session_id = %handle.key(), error = %e, "Player task failed"),
        }
    }

    let board = handle.lock().await;
    let summary = GameSummary {
        session_key: handle.key().clone(),
        completed: board.is_complete(),
        turns: turns.load(Ordering::Relaxed),
        scores: [board.players()[0].score(), board.players()[1].score()],
    };
    drop(board);

    registry.remove(handle.key());
    debug!(?summary, "Board finished");
    Ok(summary)
}

/// Plays every turn that falls to `user` until the board is done or the
/// shared turn count reaches [`TURN_LIMIT`].
async fn run_player(
    handle: SessionHandle,
    user: UserId,
    turns: Arc<AtomicUsize>,
    seed: u64,
) -> Result<(), SessionError> {
    let mut rng = StdRng::seed_from_u64(seed);

    while turns.load(Ordering::Relaxed) < TURN_LIMIT {
        let pick = {
            let board = handle.lock().await;
            if board.is_complete() {
                break;
            }
            if !board.current_player().is(&user) {
                None
            } else {
                random_selection(&board, &mut rng)
            }
        };

        let Some(pick) = pick else {
            tokio::task::yield_now().await;
            continue;
        };

        match handle.play_turn(&user, pick).await {
            Ok(_) => {
                turns.fetch_add(1, Ordering::Relaxed);
            }
            // lost the race: the board moved on while the lock was free
            Err(SessionError::Board(BoardError::NotYourTurn(_) | BoardError::GameOver)) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulation_finishes_and_cleans_up() {
        let registry = SessionRegistry::new();
        let settings = Settings::default().with_seed(5);

        let summaries = simulate(&registry, &settings, 3).await.unwrap();

        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].session_key, "sim-0");
        for summary in &summaries {
            assert!(summary.completed);
            assert_eq!(summary.scores.iter().sum::<u32>(), 8 * 4 / 2);
        }
        assert!(registry.is_empty());
    }
}
