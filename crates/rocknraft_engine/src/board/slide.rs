//! The slide step: open water drifts into a neighbouring raft.

use super::Board;
use crate::cell::Cell;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// One swap made by a slide step: the raft at `from` moved to `to`, and
/// the open water at `to` moved to `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct SlideMove {
    /// Raft position before the swap.
    pub from: usize,
    /// Raft position after the swap.
    pub to: usize,
}

impl std::fmt::Display for SlideMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Raft Moved to {}", self.from + 1, self.to + 1)
    }
}

impl Board {
    /// Positions orthogonally next to `position`, without wrapping around
    /// row or column edges.
    fn orthogonal_neighbors(&self, position: usize) -> impl Iterator<Item = usize> {
        let width = self.width;
        let total = self.total_cells();
        let inside = position < total;

        let left = (inside && position % width != 0).then(|| position - 1);
        let right = (inside && position % width != width - 1).then(|| position + 1);
        let up = (inside && position >= width).then(|| position - width);
        let down = (inside && position + width < total).then(|| position + width);

        [left, right, up, down].into_iter().flatten()
    }

    /// Rafts next to `position` that may slide into it this step: occupied
    /// and not moved by the previous step.
    pub fn adjacent_occupied_candidates(&self, position: usize) -> BTreeSet<usize> {
        self.orthogonal_neighbors(position)
            .filter(|&neighbor| {
                self.index_at(neighbor)
                    .and_then(|i| self.cells[i].as_occupied())
                    .is_some_and(|raft| !raft.relocated_this_turn())
            })
            .collect()
    }

    /// Moves every open-water cell into a random neighbouring raft.
    ///
    /// Open water with no candidate stays where it is. After the step only
    /// the rafts moved by it keep their relocation flag, so the next step
    /// cannot slide them straight back.
    #[instrument(skip(self), fields(session_key = %self.session_key))]
    pub fn slide_step(&mut self) -> Vec<SlideMove> {
        let mut water: Vec<usize> = self
            .cells
            .iter()
            .filter(|cell| cell.is_empty())
            .map(Cell::position)
            .collect();
        water.sort_unstable();

        let mut moved = Vec::with_capacity(water.len());
        let mut slides = Vec::with_capacity(water.len());

        for origin in water {
            let candidates: Vec<usize> = self
                .adjacent_occupied_candidates(origin)
                .into_iter()
                .collect();
            let Some(&target) = candidates.choose(&mut self.rng) else {
                debug!(position = origin, "No raft can slide into open water");
                continue;
            };
            let (Some(water_index), Some(raft_index)) =
                (self.index_at(origin), self.index_at(target))
            else {
                continue;
            };

            self.cells[water_index].set_position(target);
            self.cells[raft_index].set_position(origin);
            if let Some(raft) = self.cells[raft_index].as_occupied_mut() {
                raft.set_relocated(true);
            }
            moved.push(raft_index);

            let slide = SlideMove::new(target, origin);
            debug!(%slide, ?candidates, "Raft slid");
            slides.push(slide);
        }

        for (i, cell) in self.cells.iter_mut().enumerate() {
            if let Some(raft) = cell.as_occupied_mut() {
                raft.set_relocated(moved.contains(&i));
            }
        }
        self.cells.sort_by_key(Cell::position);

        self.last_slides = slides.clone();
        slides
    }
}
