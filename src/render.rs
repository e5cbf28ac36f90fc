//! Rendering seam
//!
//! Renderers receive an immutable view of the game after every tick. The
//! text renderer here backs the headless binary and the tests; a windowed
//! front end would implement [`Renderer`] the same way.

use crate::assets::{Assets, Sprite};
use crate::sim::{GameState, HazardKind, Player};

/// Banner shown once the game has ended
pub const GAME_OVER_TEXT: &str = "GAME OVER";

/// Draws a game state. Must not mutate it.
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

impl<F: FnMut(&GameState)> Renderer for F {
    fn render(&mut self, state: &GameState) {
        self(state)
    }
}

/// Discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState) {}
}

/// Health and ammo status line
pub fn hud_text(player: &Player) -> String {
    format!("HP:{} Ammo:{}", player.health, player.ammo)
}

/// Character-cell renderer
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    assets: Assets,
    frames_drawn: u64,
    last_frame: String,
}

impl AsciiRenderer {
    pub fn new(assets: Assets) -> Self {
        if !assets.is_complete() {
            log::warn!("Some sprites are missing; those entities will not be drawn");
        }
        Self {
            assets,
            frames_drawn: 0,
            last_frame: String::new(),
        }
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }

    /// Draw one frame: board rows, then the HUD, then the banner if over
    pub fn draw(&self, state: &GameState) -> String {
        let board = state.board;
        let width = board.columns.max(0) as usize;
        let height = board.rows.max(0) as usize;

        // Checkered background
        let mut cells: Vec<Vec<char>> = (0..height)
            .map(|row| {
                (0..width)
                    .map(|col| if (row + col) % 2 == 1 { ':' } else { '.' })
                    .collect()
            })
            .collect();

        let mut put = |x: i32, y: i32, glyph: char| {
            if board.contains(glam::IVec2::new(x, y)) {
                cells[y as usize][x as usize] = glyph;
            }
        };

        for tile in state.hazards.tiles() {
            let (sprite, glyph) = match tile.kind {
                HazardKind::Warning => (Sprite::HazardWarning, '!'),
                HazardKind::Lethal => (Sprite::HazardLethal, 'X'),
            };
            if self.assets.has(sprite) {
                put(tile.pos.x, tile.pos.y, glyph);
            }
        }
        if self.assets.has(Sprite::Player) {
            put(state.player.pos.x, state.player.pos.y, '@');
        }
        for projectile in &state.projectiles {
            put(projectile.pos.x, projectile.pos.y, '|');
        }

        let mut out = String::with_capacity((width + 1) * (height + 2));
        for row in cells {
            out.extend(row);
            out.push('\n');
        }
        out.push_str(&hud_text(&state.player));
        out.push('\n');
        if state.is_over() {
            out.push_str(GAME_OVER_TEXT);
            out.push('\n');
        }
        out
    }
}

impl Renderer for AsciiRenderer {
    fn render(&mut self, state: &GameState) {
        self.last_frame = self.draw(state);
        self.frames_drawn += 1;
    }
}
