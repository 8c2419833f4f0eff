//! Short-lived visual effects: smoke puff and camera shake.

use crate::core::constants::{
    SHAKE_AMOUNT_X, SHAKE_AMOUNT_Y, SHAKE_DURATION_MS, SHAKE_OSCILLATIONS, SMOKE_DURATION_MS,
};
use crate::core::geometry::Point;
use std::f32::consts::TAU;

/// A puff of smoke that grows and fades at a fixed point.
#[derive(Debug, Clone)]
pub struct Smoke {
    pub position: Point,
    elapsed: f32,
}

impl Smoke {
    pub fn at(position: Point) -> Self {
        Self {
            position,
            elapsed: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Progress from 0 to 1.
    pub fn progress(&self) -> f32 {
        (self.elapsed / (SMOKE_DURATION_MS as f32 / 1000.0)).min(1.0)
    }

    pub fn is_done(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Current radius in points.
    pub fn radius(&self) -> f32 {
        8.0 + 24.0 * self.progress()
    }
}

/// Damped oscillation applied to the whole world container.
#[derive(Debug, Clone, Default)]
pub struct Shake {
    elapsed: f32,
}

impl Shake {
    pub fn new() -> Self {
        Self::default()
    }

    fn duration() -> f32 {
        SHAKE_DURATION_MS as f32 / 1000.0
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= Self::duration()
    }

    /// Current world offset in points.
    pub fn offset(&self) -> (f32, f32) {
        if self.is_done() {
            return (0.0, 0.0);
        }
        let t = self.elapsed / Self::duration();
        let decay = 1.0 - t;
        let wave = (t * SHAKE_OSCILLATIONS as f32 * TAU).sin() * decay;
        (SHAKE_AMOUNT_X * wave, SHAKE_AMOUNT_Y * wave)
    }
}
