use std::collections::HashSet;

use rand::Rng;

use crate::color::color_token::ColorToken;

/// Degrees between adjacent palette hues.
const HUE_STEP: u16 = 24;
/// Palette size; `HUE_STEP * HUE_COUNT` covers the full wheel.
const HUE_COUNT: u16 = 15;
/// Random draws attempted before giving up on a free hue.
const MAX_DRAWS: usize = 5;

/// Tracks which palette hues are currently assigned.
///
/// Uniqueness is best effort: a draw that keeps colliding with assigned
/// hues falls back to [`ColorToken::Fallback`] after `MAX_DRAWS` attempts
/// rather than scanning the palette. The caller decides what to log.
#[derive(Debug, Default)]
pub struct ColorPool {
    used: HashSet<u16>,
}

impl ColorPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws a hue not currently in use, or the fallback sentinel after
    /// `MAX_DRAWS` collisions. The sentinel is never recorded as used.
    pub fn allocate(&mut self, rng: &mut impl Rng) -> ColorToken {
        for _ in 0..MAX_DRAWS {
            let hue = rng.gen_range(0..HUE_COUNT) * HUE_STEP;
            if self.used.insert(hue) {
                return ColorToken::Hue(hue);
            }
        }
        ColorToken::Fallback
    }

    /// Returns the hue to the pool. `false` means the token was not
    /// actually allocated (double release or foreign token); fallback
    /// tokens release as a no-op success since they were never pooled.
    pub fn release(&mut self, token: ColorToken) -> bool {
        match token {
            ColorToken::Hue(hue) => self.used.remove(&hue),
            ColorToken::Fallback => true,
        }
    }

    #[must_use]
    pub fn in_use(&self) -> usize {
        self.used.len()
    }
}
