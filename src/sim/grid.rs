//! Board geometry
//!
//! Positions are integer (column, row) cells. Row 0 is the top of the board,
//! so "up" decreases the row.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A cell on the board: `x` is the column, `y` is the row
pub type GridPos = IVec2;

/// Cardinal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// One-tile offset for this direction
    #[inline]
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }
}

/// Board dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub columns: i32,
    pub rows: i32,
}

impl Board {
    pub fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows }
    }

    /// Number of cells on the board
    #[inline]
    pub fn area(&self) -> usize {
        (self.columns.max(0) as usize) * (self.rows.max(0) as usize)
    }

    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.columns && pos.y >= 0 && pos.y < self.rows
    }

    /// Clamp a position into `[0, columns) × [0, rows)`
    #[inline]
    pub fn clamp(&self, pos: GridPos) -> GridPos {
        let max = IVec2::new(self.columns - 1, self.rows - 1).max(IVec2::ZERO);
        pos.clamp(IVec2::ZERO, max)
    }

    /// Uniformly random cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> GridPos {
        IVec2::new(
            rng.random_range(0..self.columns),
            rng.random_range(0..self.rows),
        )
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| IVec2::new(x, y)))
    }
}
