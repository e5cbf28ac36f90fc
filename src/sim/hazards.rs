//! Hazard lifecycle
//!
//! Owns the active hazard batch. Tiles are placed at random, promoted from
//! warning to lethal once old enough, and replaced wholesale on respawn.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Board, GridPos};
use super::state::HazardTile;

/// Rejection-sampling draws allowed per tile before falling back to the free list
const MAX_DRAWS_PER_TILE: usize = 32;

/// The active hazard batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardField {
    tiles: Vec<HazardTile>,
    /// Tiles per batch
    count: usize,
    /// Warning age (ms) at which a tile turns lethal
    promote_after_ms: u64,
}

impl HazardField {
    pub fn new(count: usize, promote_after_ms: u64) -> Self {
        Self {
            tiles: Vec::new(),
            count,
            promote_after_ms,
        }
    }

    pub fn tiles(&self) -> &[HazardTile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Hazard at a cell (first match; the initial batch may stack tiles)
    pub fn at(&self, pos: GridPos) -> Option<&HazardTile> {
        self.tiles.iter().find(|t| t.pos == pos)
    }

    /// Initial batch: independent uniform cells, duplicates allowed.
    /// Never places more tiles than the board has cells.
    pub fn populate<R: Rng + ?Sized>(&mut self, board: &Board, rng: &mut R, now_ms: u64) {
        self.tiles.clear();

        let target = self.capped_count(board);
        self.tiles.reserve(target);
        for _ in 0..target {
            self.tiles.push(HazardTile::new(board.random_cell(rng), now_ms));
        }
    }

    /// Batch size limited to the board area, warning when it had to shrink
    fn capped_count(&self, board: &Board) -> usize {
        let target = self.count.min(board.area());
        if target < self.count {
            log::warn!(
                "Hazard count {} exceeds board area {}; placing {}",
                self.count,
                board.area(),
                target
            );
        }
        target
    }

    /// Discard every tile and place a fresh batch on distinct cells.
    ///
    /// Returns the number of tiles placed. That is `count` unless the board
    /// has fewer cells, in which case every cell gets one.
    pub fn respawn<R: Rng + ?Sized>(&mut self, board: &Board, rng: &mut R, now_ms: u64) -> usize {
        self.tiles.clear();

        let target = self.capped_count(board);
        let mut taken: HashSet<GridPos> = HashSet::with_capacity(target);
        let mut draws = 0;
        let max_draws = target * MAX_DRAWS_PER_TILE;

        while taken.len() < target && draws < max_draws {
            draws += 1;
            let pos = board.random_cell(rng);
            if taken.insert(pos) {
                self.tiles.push(HazardTile::new(pos, now_ms));
            }
        }

        if taken.len() < target {
            // Dense board: pick from whatever is still free
            let mut free: Vec<GridPos> = board.cells().filter(|c| !taken.contains(c)).collect();
            while taken.len() < target {
                let pos = free.swap_remove(rng.random_range(0..free.len()));
                taken.insert(pos);
                self.tiles.push(HazardTile::new(pos, now_ms));
            }
        }

        log::info!("Respawned {} hazards at t={}ms", self.tiles.len(), now_ms);
        self.tiles.len()
    }

    /// Promote every warning tile whose own age reached the threshold.
    /// Returns the promoted positions.
    pub fn promote(&mut self, now_ms: u64) -> Vec<GridPos> {
        let threshold = self.promote_after_ms;
        let promoted: Vec<GridPos> = self
            .tiles
            .iter_mut()
            .filter_map(|tile| tile.try_promote(now_ms, threshold).then_some(tile.pos))
            .collect();
        for pos in &promoted {
            log::debug!("Hazard at ({}, {}) turned lethal", pos.x, pos.y);
        }
        promoted
    }

    /// Drop tiles matching the predicate. Returns how many were removed.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&HazardTile) -> bool) -> usize {
        let before = self.tiles.len();
        self.tiles.retain(|t| !pred(t));
        before - self.tiles.len()
    }

    /// Insert a tile directly (scripted scenarios and tests)
    pub fn insert(&mut self, tile: HazardTile) {
        self.tiles.push(tile);
    }
}
