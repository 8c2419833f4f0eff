//! The pig.

use crate::core::constants::{
    PLAYER_BLINK_COUNT, PLAYER_BLINK_PERIOD_MS, PLAYER_FLY_VELOCITY, PLAYER_SIZE,
    PLAYER_X_FRACTION,
};
use crate::core::contact::{CategoryMask, ContactCategory};
use crate::core::geometry::{Bounds, Point, Viewport};

/// Seconds per wing frame while animating.
const WING_FRAME_SECS: f32 = 0.1;
const WING_FRAMES: usize = 3;

/// The player-controlled sprite and its dynamic physics body.
#[derive(Debug, Clone)]
pub struct Player {
    /// Centre of the sprite.
    pub position: Point,
    /// Vertical velocity in points/s, positive is up.
    pub velocity: f32,
    /// Tilt in radians, positive is nose up.
    pub rotation: f32,
    animating: bool,
    anim_elapsed: f32,
    blink_elapsed: Option<f32>,
    hidden: bool,
}

impl Player {
    pub const CATEGORY: ContactCategory = ContactCategory::Player;

    pub fn new(viewport: Viewport) -> Self {
        Self {
            position: viewport.at(PLAYER_X_FRACTION, 0.5),
            velocity: 0.0,
            rotation: 0.0,
            animating: false,
            anim_elapsed: 0.0,
            blink_elapsed: None,
            hidden: false,
        }
    }

    pub fn category(&self) -> CategoryMask {
        Self::CATEGORY.mask()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.position, PLAYER_SIZE, PLAYER_SIZE)
    }

    /// Flap: velocity is set, not added.
    pub fn fly(&mut self) {
        self.velocity = PLAYER_FLY_VELOCITY;
    }

    /// Start flapping the wings.
    pub fn animate(&mut self) {
        self.animating = true;
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Per-frame update: tilt follows vertical velocity.
    pub fn update(&mut self) {
        self.rotation = (self.velocity / PLAYER_FLY_VELOCITY * 0.5).clamp(-1.5, 0.5);
    }

    /// Blink a few times, then disappear.
    pub fn blink(&mut self) {
        self.animating = false;
        self.blink_elapsed = Some(0.0);
    }

    pub fn is_blinking(&self) -> bool {
        self.blink_elapsed.is_some()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether the sprite is drawn this frame.
    pub fn is_visible(&self) -> bool {
        if self.hidden {
            return false;
        }
        match self.blink_elapsed {
            Some(elapsed) => {
                let half = PLAYER_BLINK_PERIOD_MS as f32 / 2000.0;
                ((elapsed / half) as u32) % 2 == 0
            }
            None => true,
        }
    }

    /// Current wing frame, 0 when not animating.
    pub fn wing_frame(&self) -> usize {
        if !self.animating {
            return 0;
        }
        ((self.anim_elapsed / WING_FRAME_SECS) as usize) % WING_FRAMES
    }

    /// Advance the sprite's own animations by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if self.animating {
            self.anim_elapsed += dt;
        }
        if let Some(elapsed) = self.blink_elapsed.as_mut() {
            *elapsed += dt;
            let total = PLAYER_BLINK_COUNT as f32 * PLAYER_BLINK_PERIOD_MS as f32 / 1000.0;
            if *elapsed >= total {
                self.blink_elapsed = None;
                self.hidden = true;
            }
        }
    }
}
