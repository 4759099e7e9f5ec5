//! The board: rafts on a grid, two seats and the rules that move them.

mod deal;
mod matching;
mod slide;
mod turn;

pub use matching::{MatchOutcome, Selection};
pub use slide::SlideMove;
pub use turn::{TurnAdvance, TurnReport};

use crate::SessionKey;
use crate::cell::{Cell, OccupiedCell};
use crate::config::{BoardConfig, Difficulty};
use crate::error::{BoardError, BoardResult};
use crate::marker::{Marker, MarkerId};
use crate::player::{Player, UserId};
use rand::prelude::*;
use rand::rngs::SmallRng;
use std::collections::HashMap;
use tracing::{info, instrument};

/// A single game: the grid, both seats and the turn state.
///
/// All mutation goes through the public operations, each of which either
/// fully applies or returns an error without touching the board.
#[derive(Debug, Clone)]
pub struct Board {
    session_key: SessionKey,
    width: usize,
    height: usize,
    difficulty: Difficulty,
    empty_cells: usize,
    players: [Player; 2],
    /// Sorted by position between operations.
    cells: Vec<Cell>,
    pending: Option<MatchOutcome>,
    last_slides: Vec<SlideMove>,
    rng: SmallRng,
}

impl Board {
    /// Deals a fresh board.
    ///
    /// # Errors
    ///
    /// [`BoardError::InvalidConfiguration`] when the grid cannot hold a
    /// pairable deal or the seats are unusable.
    #[instrument(skip(players), fields(session_key = %session_key))]
    pub fn new(
        session_key: SessionKey,
        config: BoardConfig,
        players: [Player; 2],
    ) -> BoardResult<Self> {
        let total_ids = validate_config(&config)?;
        let players = seat_players(players)?;

        let mut rng = SmallRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let cells = deal::deal_cells(&config, total_ids, &mut rng);

        let board = Self {
            session_key,
            width: config.width,
            height: config.height,
            difficulty: config.difficulty,
            empty_cells: config.empty_cells,
            players,
            cells,
            pending: None,
            last_slides: Vec::new(),
            rng,
        };

        info!(
            width = board.width,
            height = board.height,
            difficulty = %board.difficulty,
            marker_ids = total_ids,
            "Board dealt"
        );
        Ok(board)
    }

    /// Builds a board from an explicit layout.
    ///
    /// `layout[p]` describes position `p`: `None` is open water, `Some(ids)`
    /// a raft with those rock numbers in slot order.
    ///
    /// # Errors
    ///
    /// [`BoardError::InvalidConfiguration`] unless every raft has the same
    /// 3, 4 or 5 distinct ids, each id appears exactly twice, and there is at
    /// least one open-water position.
    #[instrument(skip(players, layout), fields(session_key = %session_key))]
    pub fn from_layout(
        session_key: SessionKey,
        width: usize,
        height: usize,
        players: [Player; 2],
        layout: Vec<Option<Vec<u32>>>,
    ) -> BoardResult<Self> {
        if layout.len() != width.saturating_mul(height) {
            return Err(invalid(format!(
                "layout has {} cells, grid is {}x{}",
                layout.len(),
                width,
                height
            )));
        }

        let arity = layout
            .iter()
            .flatten()
            .map(Vec::len)
            .next()
            .ok_or_else(|| invalid("layout has no rafts".to_string()))?;
        let difficulty = Difficulty::from_arity(arity)
            .ok_or_else(|| invalid(format!("rafts carry {} rocks, expected 3, 4 or 5", arity)))?;

        let mut counts: HashMap<u32, usize> = HashMap::new();
        let mut cells = Vec::with_capacity(layout.len());
        for (position, slot) in layout.into_iter().enumerate() {
            match slot {
                None => cells.push(Cell::Empty { position }),
                Some(ids) => {
                    if ids.len() != arity {
                        return Err(invalid(format!(
                            "raft {} carries {} rocks, expected {}",
                            position,
                            ids.len(),
                            arity
                        )));
                    }
                    for (i, id) in ids.iter().enumerate() {
                        if ids[..i].contains(id) {
                            return Err(invalid(format!(
                                "raft {} carries rock {} twice",
                                position, id
                            )));
                        }
                        *counts.entry(*id).or_default() += 1;
                    }
                    let markers = ids.into_iter().map(|id| Marker::new(MarkerId(id))).collect();
                    cells.push(Cell::Occupied(OccupiedCell::new(position, markers)));
                }
            }
        }

        if let Some((id, count)) = counts.iter().find(|&(_, &count)| count != 2) {
            return Err(invalid(format!(
                "rock {} appears {} times, expected 2",
                id, count
            )));
        }

        let empty_cells = cells.iter().filter(|cell| cell.is_empty()).count();
        let config = BoardConfig::new(difficulty)
            .with_size(width, height)
            .with_empty_cells(empty_cells);
        validate_config(&config)?;
        let players = seat_players(players)?;

        info!(width, height, difficulty = %difficulty, "Board loaded from layout");
        Ok(Self {
            session_key,
            width,
            height,
            difficulty,
            empty_cells,
            players,
            cells,
            pending: None,
            last_slides: Vec::new(),
            rng: SmallRng::seed_from_u64(rand::random()),
        })
    }

    /// Replaces the slide RNG with a seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Session key this board was created under.
    pub fn session_key(&self) -> &SessionKey {
        &self.session_key
    }

    /// Grid columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total grid positions.
    pub fn total_cells(&self) -> usize {
        self.width * self.height
    }

    /// Rocks per raft.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Open-water positions.
    pub fn empty_cell_count(&self) -> usize {
        self.empty_cells
    }

    /// Both seats, first player first.
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// The seat holding the turn.
    pub fn current_player(&self) -> &Player {
        &self.players[self.turn_index()]
    }

    /// External ids of the seated humans.
    pub fn participant_ids(&self) -> Vec<&UserId> {
        self.players.iter().filter_map(Player::user_id).collect()
    }

    /// All cells in position order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at `position`.
    ///
    /// # Errors
    ///
    /// [`BoardError::CellNotFound`] outside the grid.
    pub fn cell(&self, position: usize) -> BoardResult<&Cell> {
        self.cells
            .get(position)
            .filter(|cell| cell.position() == position)
            .ok_or(BoardError::CellNotFound(position))
    }

    /// Rafts that still have hidden rocks, in position order.
    pub fn selectable_cells(&self) -> impl Iterator<Item = &OccupiedCell> {
        self.cells
            .iter()
            .filter_map(Cell::as_occupied)
            .filter(|raft| !raft.all_revealed())
    }

    /// Swaps made by the most recent slide step.
    pub fn last_slides(&self) -> &[SlideMove] {
        &self.last_slides
    }

    /// Whether every rock on every raft has been matched.
    pub fn is_complete(&self) -> bool {
        self.cells
            .iter()
            .filter_map(Cell::as_occupied)
            .all(OccupiedCell::all_revealed)
    }

    pub(crate) fn turn_index(&self) -> usize {
        if self.players[0].has_turn() { 0 } else { 1 }
    }

    /// Index into `cells` of whatever sits at `position` right now.
    ///
    /// Unlike [`Board::cell`] this does not rely on the sort order, so it is
    /// safe to use in the middle of a slide step.
    fn index_at(&self, position: usize) -> Option<usize> {
        self.cells.iter().position(|cell| cell.position() == position)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Board(Session: {}, Size: {}x{}, Players: {}, {})",
            self.session_key, self.width, self.height, self.players[0], self.players[1]
        )
    }
}

fn invalid(message: String) -> BoardError {
    BoardError::InvalidConfiguration(message)
}

/// Checks that the grid holds a pairable deal and returns its distinct
/// rock count.
fn validate_config(config: &BoardConfig) -> BoardResult<u32> {
    if config.width == 0 || config.height == 0 {
        return Err(invalid(format!(
            "grid {}x{} has no cells",
            config.width, config.height
        )));
    }
    let total = config.width.checked_mul(config.height).ok_or_else(|| {
        invalid(format!("grid {}x{} is too large", config.width, config.height))
    })?;
    if config.empty_cells == 0 {
        return Err(invalid("at least one open-water position is required".to_string()));
    }
    if config.empty_cells >= total {
        return Err(invalid(format!(
            "{} open-water positions leave no rafts on a {} cell grid",
            config.empty_cells, total
        )));
    }
    let occupied = total - config.empty_cells;
    if occupied < 2 {
        return Err(invalid(format!(
            "{} raft cannot hold a pair split across rafts",
            occupied
        )));
    }
    let arity = config.difficulty.arity();
    let markers = occupied
        .checked_mul(arity)
        .ok_or_else(|| invalid(format!("{} rafts carry too many rocks", occupied)))?;
    if markers % 2 != 0 {
        return Err(invalid(format!(
            "{} rafts with {} rocks each cannot be paired",
            occupied, arity
        )));
    }
    u32::try_from(markers / 2)
        .map_err(|_| invalid(format!("{} rock numbers do not fit the id range", markers / 2)))
}

/// Checks the seats and hands the first one the turn.
fn seat_players(mut players: [Player; 2]) -> BoardResult<[Player; 2]> {
    if players[0].is_surrogate() {
        return Err(invalid("the first player cannot be a surrogate".to_string()));
    }
    if let (Some(a), Some(b)) = (players[0].user_id(), players[1].user_id()) {
        if a == b {
            return Err(invalid(format!("user {} cannot play against themself", a)));
        }
    }
    players[0].set_turn(true);
    players[1].set_turn(false);
    Ok(players)
}
