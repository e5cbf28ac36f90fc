//! Player vs. hazard collision
//!
//! Only lethal tiles hurt, each at most once: a tile that deals damage is
//! removed in the same step.

use super::grid::GridPos;
use super::hazards::HazardField;
use super::state::Player;

/// Outcome of resolving lethal tiles under the player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitResult {
    /// Number of lethal tiles that hit the player
    pub hits: u32,
    /// Total health removed
    pub damage: i32,
}

impl HitResult {
    #[inline]
    pub fn hit(&self) -> bool {
        self.hits > 0
    }
}

/// Lethal tiles sharing the player's cell
pub fn lethal_hits(player_pos: GridPos, hazards: &HazardField) -> usize {
    hazards
        .tiles()
        .iter()
        .filter(|t| t.is_lethal() && t.pos == player_pos)
        .count()
}

/// Apply `damage` for every lethal tile on the player's cell and remove those tiles.
pub fn resolve_hazard_hits(
    player: &mut Player,
    hazards: &mut HazardField,
    damage: i32,
) -> HitResult {
    let pos = player.pos;
    let hits = hazards.remove_where(|t| t.is_lethal() && t.pos == pos) as u32;

    let mut result = HitResult::default();
    for _ in 0..hits {
        player.apply_damage(damage);
        result.hits += 1;
        result.damage += damage;
    }
    if result.hit() {
        log::debug!(
            "Player hit {}x at ({}, {}), health now {}",
            result.hits,
            pos.x,
            pos.y,
            player.health
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{HazardKind, HazardTile};

    fn lethal(pos: GridPos) -> HazardTile {
        HazardTile {
            pos,
            kind: HazardKind::Lethal,
            changed_at_ms: 0,
        }
    }

    #[test]
    fn test_lethal_tile_damages_once_and_disappears() {
        let mut player = Player::new(GridPos::new(4, 4), 100, 20);
        let mut hazards = HazardField::new(1, 2000);
        hazards.insert(lethal(GridPos::new(4, 4)));

        let result = resolve_hazard_hits(&mut player, &mut hazards, 10);
        assert_eq!(result, HitResult { hits: 1, damage: 10 });
        assert_eq!(player.health, 90);
        assert!(hazards.is_empty());

        let again = resolve_hazard_hits(&mut player, &mut hazards, 10);
        assert!(!again.hit());
        assert_eq!(player.health, 90);
    }

    #[test]
    fn test_warning_tile_is_harmless() {
        let mut player = Player::new(GridPos::new(2, 2), 100, 20);
        let mut hazards = HazardField::new(1, 2000);
        hazards.insert(HazardTile::new(GridPos::new(2, 2), 0));

        assert_eq!(lethal_hits(player.pos, &hazards), 0);
        assert!(!resolve_hazard_hits(&mut player, &mut hazards, 10).hit());
        assert_eq!(player.health, 100);
        assert_eq!(hazards.len(), 1);
    }

    #[test]
    fn test_stacked_lethal_tiles_each_resolve() {
        let mut player = Player::new(GridPos::new(0, 0), 100, 20);
        let mut hazards = HazardField::new(3, 2000);
        hazards.insert(lethal(GridPos::new(0, 0)));
        hazards.insert(lethal(GridPos::new(0, 0)));
        hazards.insert(lethal(GridPos::new(5, 5)));

        assert_eq!(lethal_hits(player.pos, &hazards), 2);
        let result = resolve_hazard_hits(&mut player, &mut hazards, 10);
        assert_eq!(result.hits, 2);
        assert_eq!(player.health, 80);
        assert_eq!(hazards.len(), 1);
        assert_eq!(hazards.tiles()[0].pos, GridPos::new(5, 5));
    }
}
