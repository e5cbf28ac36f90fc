//! Game settings
//!
//! Every tunable lives here. Loaded from an optional JSON file; missing keys
//! fall back to the defaults in [`crate::consts`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Simulation tick interval (ms)
    pub tick_interval_ms: u64,
    /// Promotion check interval (ms); also the warning age that turns a tile lethal
    pub promotion_interval_ms: u64,
    /// Hazard respawn interval (ms)
    pub respawn_interval_ms: u64,

    // === Board ===
    pub columns: i32,
    pub rows: i32,
    /// Pixel size of one tile (renderers only)
    pub tile_size_px: u32,

    // === Hazards ===
    pub hazard_count: usize,
    pub hazard_damage: i32,

    // === Player ===
    pub starting_health: i32,
    pub starting_ammo: u32,
    pub start_column: i32,
    pub start_row: i32,
    /// Rows per tick
    pub projectile_speed: i32,

    // === Run ===
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
    /// Directory holding warning.png, death.png and player.png
    pub asset_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            promotion_interval_ms: PROMOTION_INTERVAL_MS,
            respawn_interval_ms: RESPAWN_INTERVAL_MS,

            columns: BOARD_COLUMNS,
            rows: BOARD_ROWS,
            tile_size_px: TILE_SIZE_PX,

            hazard_count: HAZARD_COUNT,
            hazard_damage: HAZARD_DAMAGE,

            starting_health: PLAYER_START_HEALTH,
            starting_ammo: PLAYER_START_AMMO,
            start_column: PLAYER_START_COLUMN,
            start_row: PLAYER_START_ROW,
            projectile_speed: PROJECTILE_SPEED,

            seed: None,
            asset_dir: PathBuf::from("images"),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("invalid settings JSON in {}", path.display()))?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write settings file {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        ensure!(self.promotion_interval_ms > 0, "promotion_interval_ms must be positive");
        ensure!(self.respawn_interval_ms > 0, "respawn_interval_ms must be positive");
        ensure!(
            self.columns > 0 && self.rows > 0,
            "board must have at least one cell (got {}x{})",
            self.columns,
            self.rows
        );
        ensure!(self.projectile_speed > 0, "projectile_speed must be positive");
        ensure!(self.hazard_damage >= 0, "hazard_damage must not be negative");
        ensure!(self.starting_health > 0, "starting_health must be positive");
        ensure!(
            (0..self.columns).contains(&self.start_column)
                && (0..self.rows).contains(&self.start_row),
            "start cell ({}, {}) is off the {}x{} board",
            self.start_column,
            self.start_row,
            self.columns,
            self.rows
        );
        let area = (self.columns as usize) * (self.rows as usize);
        ensure!(
            self.hazard_count <= area,
            "hazard_count {} exceeds the board area of {} cells",
            self.hazard_count,
            area
        );
        Ok(())
    }

    /// Run seed: the configured one or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
