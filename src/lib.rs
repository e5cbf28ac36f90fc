//! White Rains - a grid arcade game where warning tiles turn lethal
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, hazard lifecycle, tick)
//! - `game`: Fixed-interval scheduler driving the simulation
//! - `render`: Renderer seam and a text renderer
//! - `assets`: Sprite loading (missing files degrade, never fail)
//! - `settings`: Data-driven game configuration

pub mod assets;
pub mod game;
pub mod render;
pub mod settings;
pub mod sim;

pub use assets::Assets;
pub use game::Game;
pub use render::{AsciiRenderer, Renderer};
pub use settings::Settings;

use glam::IVec2;

/// Game configuration defaults
pub mod consts {
    /// Simulation tick interval (ms)
    pub const TICK_INTERVAL_MS: u64 = 25;
    /// How often warning tiles are checked for promotion (ms)
    pub const PROMOTION_INTERVAL_MS: u64 = 2000;
    /// How often the whole hazard batch is replaced (ms)
    pub const RESPAWN_INTERVAL_MS: u64 = 5000;

    /// Board dimensions in tiles
    pub const BOARD_COLUMNS: i32 = 19;
    pub const BOARD_ROWS: i32 = 12;
    /// Pixel size of one tile, for renderers
    pub const TILE_SIZE_PX: u32 = 50;

    /// Hazard tiles per batch
    pub const HAZARD_COUNT: usize = 5;
    /// Health lost per lethal hit
    pub const HAZARD_DAMAGE: i32 = 10;

    /// Player defaults
    pub const PLAYER_START_HEALTH: i32 = 100;
    pub const PLAYER_START_AMMO: u32 = 20;
    pub const PLAYER_START_COLUMN: i32 = 9;
    pub const PLAYER_START_ROW: i32 = 11;

    /// Rows travelled by a projectile per tick
    pub const PROJECTILE_SPEED: i32 = 5;
}

/// Convert a grid cell to the pixel position of its top-left corner
#[inline]
pub fn tile_to_pixel(cell: IVec2, tile_size: u32) -> IVec2 {
    cell * tile_size as i32
}
