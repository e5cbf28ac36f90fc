//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Board, Direction, GridPos};
use super::hazards::HazardField;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks are being processed
    Playing,
    /// Health reached zero; nothing changes anymore
    GameOver,
}

/// Something that happened during the last tick (for renderers/audio)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A projectile left the player's position
    Fired { pos: GridPos },
    /// Fire pressed with an empty magazine
    OutOfAmmo,
    /// A projectile crossed the top edge
    ProjectileExpired { column: i32 },
    /// The hazard batch was replaced
    HazardsRespawned { count: usize },
    /// A warning tile became lethal
    HazardPromoted { pos: GridPos },
    /// The player stood on a lethal tile
    PlayerHit { pos: GridPos, damage: i32, health: i32 },
    /// Health reached zero
    GameOver,
}

/// The player token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: GridPos,
    /// May dip below zero on the tick that ends the game
    pub health: i32,
    pub ammo: u32,
}

impl Player {
    pub fn new(pos: GridPos, health: i32, ammo: u32) -> Self {
        Self { pos, health, ammo }
    }

    /// Move one tile. Bounds are enforced once per tick by `clamp_to`.
    pub fn step(&mut self, dir: Direction) {
        self.pos += dir.delta();
    }

    /// Pull the position back onto the board (run once per tick, after input)
    pub fn clamp_to(&mut self, board: &Board) {
        self.pos = board.clamp(self.pos);
    }

    /// Spend one round and spawn a projectile here. `None` when out of ammo.
    pub fn fire(&mut self, projectile_speed: i32) -> Option<Projectile> {
        if self.ammo == 0 {
            return None;
        }
        self.ammo -= 1;
        Some(Projectile::new(self.pos, projectile_speed))
    }

    pub fn apply_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// A projectile travelling straight up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: GridPos,
    /// Rows per tick
    pub speed: i32,
}

impl Projectile {
    pub fn new(pos: GridPos, speed: i32) -> Self {
        Self { pos, speed }
    }

    pub fn advance(&mut self) {
        self.pos.y -= self.speed;
    }

    /// Past the top edge
    #[inline]
    pub fn is_off_board(&self) -> bool {
        self.pos.y < 0
    }
}

/// Hazard lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Harmless, about to turn lethal
    Warning,
    /// Damages a player standing on it, once
    Lethal,
}

/// A hazard tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardTile {
    pub pos: GridPos,
    pub kind: HazardKind,
    /// Logical time (ms) of the last state change
    pub changed_at_ms: u64,
}

impl HazardTile {
    pub fn new(pos: GridPos, now_ms: u64) -> Self {
        Self {
            pos,
            kind: HazardKind::Warning,
            changed_at_ms: now_ms,
        }
    }

    #[inline]
    pub fn is_lethal(&self) -> bool {
        self.kind == HazardKind::Lethal
    }

    /// Time since the last state change
    #[inline]
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.changed_at_ms)
    }

    /// Warning → Lethal once the tile is old enough. Returns true on transition.
    pub fn try_promote(&mut self, now_ms: u64, threshold_ms: u64) -> bool {
        if self.kind == HazardKind::Warning && self.age_ms(now_ms) >= threshold_ms {
            self.kind = HazardKind::Lethal;
            self.changed_at_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Hazard placement RNG
    pub rng: Pcg32,
    pub board: Board,
    pub player: Player,
    pub hazards: HazardField,
    /// Live projectiles, oldest first
    pub projectiles: Vec<Projectile>,
    pub phase: GamePhase,
    /// Logical clock (ms) of the last processed trigger
    pub time_ms: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub hazard_damage: i32,
    pub projectile_speed: i32,
    /// Events since the start of the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the initial hazard batch placed at time 0.
    ///
    /// `settings` should pass [`Settings::validate`]; `Game::new` checks this.
    /// An empty board gets no hazards.
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let board = Board::new(settings.columns, settings.rows);
        let start = board.clamp(GridPos::new(settings.start_column, settings.start_row));
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut hazards = HazardField::new(settings.hazard_count, settings.promotion_interval_ms);
        hazards.populate(&board, &mut rng, 0);

        log::info!(
            "New game: seed={} board={}x{} hazards={}",
            seed,
            board.columns,
            board.rows,
            hazards.len()
        );

        Self {
            seed,
            rng,
            board,
            player: Player::new(start, settings.starting_health, settings.starting_ammo),
            hazards,
            projectiles: Vec::new(),
            phase: GamePhase::Playing,
            time_ms: 0,
            time_ticks: 0,
            hazard_damage: settings.hazard_damage,
            projectile_speed: settings.projectile_speed,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Replace the hazard batch (respawn trigger). No-op after game over.
    pub fn respawn_hazards(&mut self, now_ms: u64) {
        if self.is_over() {
            return;
        }
        self.time_ms = now_ms;
        let count = self.hazards.respawn(&self.board, &mut self.rng, now_ms);
        self.events.push(GameEvent::HazardsRespawned { count });
    }

    /// Promote aged warning tiles (promotion trigger). No-op after game over.
    pub fn promote_hazards(&mut self, now_ms: u64) {
        if self.is_over() {
            return;
        }
        self.time_ms = now_ms;
        for pos in self.hazards.promote(now_ms) {
            self.events.push(GameEvent::HazardPromoted { pos });
        }
    }

    /// JSON snapshot for external renderers and debugging
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
