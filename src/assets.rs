//! Sprite assets
//!
//! Loaded once at startup. A missing or unreadable file is logged and the
//! sprite is left empty; renderers then skip drawing it.

use std::fs;
use std::path::Path;

/// PNG file signature
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Which sprite to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    HazardWarning,
    HazardLethal,
    Player,
}

impl Sprite {
    pub const ALL: [Sprite; 3] = [Sprite::HazardWarning, Sprite::HazardLethal, Sprite::Player];

    pub fn file_name(self) -> &'static str {
        match self {
            Sprite::HazardWarning => "warning.png",
            Sprite::HazardLethal => "death.png",
            Sprite::Player => "player.png",
        }
    }
}

/// Raw encoded sprite images. Never inspected by the simulation.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    warning: Option<Vec<u8>>,
    lethal: Option<Vec<u8>>,
    player: Option<Vec<u8>>,
}

impl Assets {
    /// No sprites at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every sprite from `dir`, logging the ones that fail
    pub fn load(dir: &Path) -> Self {
        let mut assets = Self::empty();
        for sprite in Sprite::ALL {
            let data = load_sprite(&dir.join(sprite.file_name()));
            *assets.slot_mut(sprite) = data;
        }
        if assets.is_complete() {
            log::info!("Loaded sprites from {}", dir.display());
        }
        assets
    }

    /// Install already-encoded image bytes
    pub fn with_sprite(mut self, sprite: Sprite, bytes: Vec<u8>) -> Self {
        *self.slot_mut(sprite) = Some(bytes);
        self
    }

    pub fn get(&self, sprite: Sprite) -> Option<&[u8]> {
        match sprite {
            Sprite::HazardWarning => self.warning.as_deref(),
            Sprite::HazardLethal => self.lethal.as_deref(),
            Sprite::Player => self.player.as_deref(),
        }
    }

    #[inline]
    pub fn has(&self, sprite: Sprite) -> bool {
        self.get(sprite).is_some()
    }

    pub fn is_complete(&self) -> bool {
        Sprite::ALL.iter().all(|&s| self.has(s))
    }

    fn slot_mut(&mut self, sprite: Sprite) -> &mut Option<Vec<u8>> {
        match sprite {
            Sprite::HazardWarning => &mut self.warning,
            Sprite::HazardLethal => &mut self.lethal,
            Sprite::Player => &mut self.player,
        }
    }
}

fn load_sprite(path: &Path) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) if bytes.starts_with(&PNG_SIGNATURE) => Some(bytes),
        Ok(_) => {
            log::warn!("Error opening image file {}: not a PNG", path.display());
            None
        }
        Err(e) => {
            log::warn!("Error opening image file {}: {}", path.display(), e);
            None
        }
    }
}
