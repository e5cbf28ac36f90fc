//! Fixed interval simulation tick
//!
//! Core game loop that advances the simulation deterministically.

use serde::{Deserialize, Serialize};

use super::autopilot;
use super::collision::resolve_hazard_hits;
use super::grid::Direction;
use super::state::{GameEvent, GamePhase, GameState};

/// A discrete input event, queued until the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Step one tile
    Move(Direction),
    /// Fire a projectile upward
    Fire,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Events received since the previous tick, in arrival order
    pub events: Vec<InputEvent>,
    /// Idle/demo mode - autopilot plays when no events are queued
    pub idle_mode: bool,
}

impl TickInput {
    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            idle_mode: false,
        }
    }
}

/// Advance the game state by one tick at logical time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    // Nothing moves after game over
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;
    state.time_ms = now_ms;

    let planned;
    let events: &[InputEvent] = if input.idle_mode && input.events.is_empty() {
        planned = autopilot::plan(state);
        &planned
    } else {
        &input.events
    };

    // 1. Player input, then clamp
    for event in events {
        match *event {
            InputEvent::Move(dir) => state.player.step(dir),
            InputEvent::Fire => match state.player.fire(state.projectile_speed) {
                Some(projectile) => {
                    state.events.push(GameEvent::Fired { pos: projectile.pos });
                    state.projectiles.push(projectile);
                }
                None => state.events.push(GameEvent::OutOfAmmo),
            },
        }
    }
    state.player.clamp_to(&state.board);

    // 2. Projectiles
    for projectile in &mut state.projectiles {
        projectile.advance();
    }
    let events_out = &mut state.events;
    state.projectiles.retain(|p| {
        if p.is_off_board() {
            events_out.push(GameEvent::ProjectileExpired { column: p.pos.x });
            false
        } else {
            true
        }
    });

    // 3-4. Lethal tiles under the player deal damage and vanish
    let hit = resolve_hazard_hits(&mut state.player, &mut state.hazards, state.hazard_damage);
    if hit.hit() {
        state.events.push(GameEvent::PlayerHit {
            pos: state.player.pos,
            damage: hit.damage,
            health: state.player.health,
        });
    }

    // 5. Terminal check
    if !state.player.is_alive() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!(
            "Game over at tick {} (t={}ms, health {})",
            state.time_ticks,
            now_ms,
            state.player.health
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::grid::GridPos;
    use crate::sim::state::{HazardKind, HazardTile};

    fn empty_state() -> GameState {
        let mut state = GameState::new(&Settings::default(), 12345);
        state.hazards.remove_where(|_| true);
        state
    }

    fn lethal_at(pos: GridPos) -> HazardTile {
        HazardTile {
            pos,
            kind: HazardKind::Lethal,
            changed_at_ms: 0,
        }
    }

    #[test]
    fn test_moves_apply_in_order() {
        let mut state = empty_state();
        let input = TickInput::from_events([
            InputEvent::Move(Direction::Up),
            InputEvent::Move(Direction::Up),
            InputEvent::Move(Direction::Left),
        ]);
        tick(&mut state, &input, 25);
        assert_eq!(state.player.pos, GridPos::new(8, 9));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_moves_stop_at_edges() {
        let mut state = empty_state();
        // Start is on the bottom row
        let input = TickInput::from_events([InputEvent::Move(Direction::Down); 3]);
        tick(&mut state, &input, 25);
        assert_eq!(state.player.pos, GridPos::new(9, 11));
    }

    #[test]
    fn test_moves_clamp_once_per_tick() {
        let mut state = empty_state();
        state.player.pos = GridPos::new(0, 5);
        let input = TickInput::from_events([
            InputEvent::Move(Direction::Left),
            InputEvent::Move(Direction::Right),
        ]);
        tick(&mut state, &input, 25);
        assert_eq!(state.player.pos, GridPos::new(0, 5));
    }

    #[test]
    fn test_fire_uses_unclamped_position() {
        let mut state = empty_state();
        state.player.pos = GridPos::new(0, 11);
        let input = TickInput::from_events([InputEvent::Move(Direction::Left), InputEvent::Fire]);
        tick(&mut state, &input, 25);
        assert_eq!(state.player.pos, GridPos::new(0, 11));
        let fired_at = GridPos::new(-1, 11);
        assert!(state.events.contains(&GameEvent::Fired { pos: fired_at }));
        assert_eq!(state.projectiles[0].pos, GridPos::new(-1, 6));
    }

    #[test]
    fn test_out_of_range_position_clamped_on_tick() {
        let mut state = empty_state();
        state.player.pos = GridPos::new(40, -3);
        tick(&mut state, &TickInput::default(), 25);
        assert_eq!(state.player.pos, GridPos::new(18, 0));
    }

    #[test]
    fn test_fired_projectile_expires_on_third_tick() {
        let mut state = empty_state();
        tick(&mut state, &TickInput::from_events([InputEvent::Fire]), 25);
        assert_eq!(state.player.ammo, 19);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, GridPos::new(9, 6));

        tick(&mut state, &TickInput::default(), 50);
        assert_eq!(state.projectiles[0].pos, GridPos::new(9, 1));

        tick(&mut state, &TickInput::default(), 75);
        assert!(state.projectiles.is_empty());
        assert!(state.events.contains(&GameEvent::ProjectileExpired { column: 9 }));
    }

    #[test]
    fn test_fire_with_empty_magazine() {
        let mut state = empty_state();
        state.player.ammo = 0;
        tick(&mut state, &TickInput::from_events([InputEvent::Fire]), 25);
        assert_eq!(state.player.ammo, 0);
        assert!(state.projectiles.is_empty());
        assert!(state.events.contains(&GameEvent::OutOfAmmo));
    }

    #[test]
    fn test_lethal_hit_on_tick() {
        let mut state = empty_state();
        state.hazards.insert(lethal_at(state.player.pos));
        state.hazards.insert(HazardTile::new(GridPos::new(0, 0), 0));

        tick(&mut state, &TickInput::default(), 25);
        assert_eq!(state.player.health, 90);
        assert_eq!(state.hazards.len(), 1);
        assert!(!state.hazards.tiles()[0].is_lethal());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_warning_tile_never_hurts() {
        let mut state = empty_state();
        state.hazards.insert(HazardTile::new(state.player.pos, 0));
        for i in 1..=10 {
            tick(&mut state, &TickInput::default(), i * 25);
        }
        assert_eq!(state.player.health, 100);
        assert_eq!(state.hazards.len(), 1);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = empty_state();
        state.player.health = 10;
        state.hazards.insert(lethal_at(state.player.pos));
        tick(&mut state, &TickInput::default(), 25);
        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        let frozen_pos = state.player.pos;
        let frozen_ticks = state.time_ticks;
        state.hazards.insert(lethal_at(GridPos::new(8, 11)));
        let input = TickInput::from_events([InputEvent::Move(Direction::Left), InputEvent::Fire]);
        tick(&mut state, &input, 50);
        state.respawn_hazards(5000);
        state.promote_hazards(6000);

        assert_eq!(state.player.pos, frozen_pos);
        assert_eq!(state.player.ammo, 20);
        assert_eq!(state.player.health, 0);
        assert_eq!(state.time_ticks, frozen_ticks);
        assert_eq!(state.hazards.len(), 1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_ten_hits_end_the_game() {
        let mut state = empty_state();
        let mut now = 0;
        for hit in 1..=11 {
            state.hazards.insert(lethal_at(state.player.pos));
            now += 25;
            tick(&mut state, &TickInput::default(), now);
            if hit <= 10 {
                assert_eq!(state.player.health, 100 - 10 * hit);
            }
        }
        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        // The 11th tile was never consumed
        assert_eq!(state.hazards.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut state1 = GameState::new(&settings, 99999);
        let mut state2 = GameState::new(&settings, 99999);

        let inputs = [
            TickInput::from_events([InputEvent::Move(Direction::Left)]),
            TickInput::from_events([InputEvent::Fire]),
            TickInput {
                idle_mode: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for (i, input) in inputs.iter().enumerate() {
            let now = (i as u64 + 1) * 25;
            tick(&mut state1, input, now);
            tick(&mut state2, input, now);
        }
        state1.respawn_hazards(5000);
        state2.respawn_hazards(5000);

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.hazards.tiles(), state2.hazards.tiles());
        assert_eq!(state1.projectiles, state2.projectiles);
    }
}
