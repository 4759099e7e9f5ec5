//! Dealing rocks onto rafts.

use crate::cell::{Cell, OccupiedCell};
use crate::config::BoardConfig;
use crate::marker::{Marker, MarkerId};
use rand::prelude::*;
use rand::rngs::SmallRng;
use tracing::debug;

/// Lays out a validated config: rafts first, open water in the last positions.
///
/// `total_ids` is the distinct rock count the config was validated for.
pub(super) fn deal_cells(config: &BoardConfig, total_ids: u32, rng: &mut SmallRng) -> Vec<Cell> {
    let arity = config.difficulty.arity();
    let occupied = config.occupied_cells();

    let mut bag: Vec<MarkerId> = (0..total_ids)
        .flat_map(|id| [MarkerId(id), MarkerId(id)])
        .collect();
    bag.shuffle(rng);

    let mut cells = Vec::with_capacity(config.total_cells());
    for position in 0..occupied {
        let rafts_left = occupied - position;
        let ids = draw_distinct(&mut bag, arity, rafts_left == 2, rng);
        debug!(position, ?ids, "Dealt raft");
        let markers = ids.into_iter().map(Marker::new).collect();
        cells.push(Cell::Occupied(OccupiedCell::new(position, markers)));
    }
    debug_assert!(bag.is_empty(), "every dealt id must land on a raft");

    cells.extend((occupied..config.total_cells()).map(|position| Cell::Empty { position }));
    cells
}

/// Takes `count` distinct ids out of the shuffled bag.
///
/// With two rafts left, every id still in the bag twice has to be split
/// between them, so those are taken first; otherwise the last raft would be
/// handed a duplicate.
fn draw_distinct(
    bag: &mut Vec<MarkerId>,
    count: usize,
    split_pairs: bool,
    rng: &mut SmallRng,
) -> Vec<MarkerId> {
    let mut picked: Vec<MarkerId> = Vec::with_capacity(count);

    if split_pairs {
        for (i, id) in bag.iter().enumerate() {
            if bag[i + 1..].contains(id) && !picked.contains(id) {
                picked.push(*id);
            }
        }
    }

    for id in bag.iter() {
        if picked.len() == count {
            break;
        }
        if !picked.contains(id) {
            picked.push(*id);
        }
    }
    debug_assert_eq!(picked.len(), count, "bag ran out of distinct ids");

    for id in &picked {
        if let Some(i) = bag.iter().position(|candidate| candidate == id) {
            bag.remove(i);
        }
    }

    picked.shuffle(rng);
    picked
}
