//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Logical clock only (callers pass the time in)
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod grid;
pub mod hazards;
pub mod schedule;
pub mod state;
pub mod tick;

pub use collision::{HitResult, lethal_hits, resolve_hazard_hits};
pub use grid::{Board, Direction, GridPos};
pub use hazards::HazardField;
pub use schedule::{PeriodicTimer, Schedule, Trigger};
pub use state::{
    GameEvent, GamePhase, GameState, HazardKind, HazardTile, Player, Projectile,
};
pub use tick::{InputEvent, TickInput, tick};
