//! Idle/demo autopilot
//!
//! Produces the input a cautious player would: step off hazard tiles, and
//! shoot at hazards lined up overhead.

use super::grid::{Direction, GridPos};
use super::state::GameState;
use super::tick::InputEvent;

/// Plan the next tick's input
pub fn plan(state: &GameState) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let here = state.player.pos;

    if state.hazards.at(here).is_some() {
        if let Some(dir) = escape_direction(state, here) {
            events.push(InputEvent::Move(dir));
        }
    }

    let column_has_target = state
        .hazards
        .tiles()
        .iter()
        .any(|t| t.pos.x == here.x && t.pos.y < here.y);
    let column_has_shot = state.projectiles.iter().any(|p| p.pos.x == here.x);
    if state.player.ammo > 0 && column_has_target && !column_has_shot {
        events.push(InputEvent::Fire);
    }

    events
}

/// Neighbouring cell with no hazard, else one with no lethal hazard
fn escape_direction(state: &GameState, from: GridPos) -> Option<Direction> {
    let candidates: Vec<(Direction, GridPos)> = Direction::ALL
        .iter()
        .map(|&dir| (dir, state.board.clamp(from + dir.delta())))
        .filter(|&(_, to)| to != from)
        .collect();

    candidates
        .iter()
        .find(|(_, to)| state.hazards.at(*to).is_none())
        .or_else(|| {
            candidates.iter().find(|(_, to)| {
                !state
                    .hazards
                    .tiles()
                    .iter()
                    .any(|t| t.pos == *to && t.is_lethal())
            })
        })
        .map(|(dir, _)| *dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{HazardKind, HazardTile};

    fn empty_state() -> GameState {
        let mut state = GameState::new(&Settings::default(), 5);
        state.hazards.remove_where(|_| true);
        state
    }

    #[test]
    fn test_idle_when_safe() {
        let state = empty_state();
        assert!(plan(&state).is_empty());
    }

    #[test]
    fn test_steps_off_hazard() {
        let mut state = empty_state();
        state.hazards.insert(HazardTile::new(state.player.pos, 0));
        let events = plan(&state);
        // Up is the first open neighbour from the bottom row
        assert_eq!(events, vec![InputEvent::Move(Direction::Up)]);
    }

    #[test]
    fn test_avoids_lethal_neighbours() {
        let mut state = empty_state();
        state.player.pos = GridPos::new(0, 0);
        state.hazards.insert(HazardTile::new(GridPos::new(0, 0), 0));
        for pos in [GridPos::new(1, 0), GridPos::new(0, 1)] {
            state.hazards.insert(HazardTile {
                pos,
                kind: if pos.x == 1 {
                    HazardKind::Lethal
                } else {
                    HazardKind::Warning
                },
                changed_at_ms: 0,
            });
        }
        assert_eq!(plan(&state), vec![InputEvent::Move(Direction::Down)]);
    }

    #[test]
    fn test_fires_at_hazard_overhead_once() {
        let mut state = empty_state();
        state.hazards.insert(HazardTile::new(GridPos::new(9, 2), 0));
        assert_eq!(plan(&state), vec![InputEvent::Fire]);

        let shot = state.player.fire(5).expect("ammo");
        state.projectiles.push(shot);
        assert!(plan(&state).is_empty());
    }
}
