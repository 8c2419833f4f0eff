//! Background scenery: sun, clouds, hills and the ground strip.

use crate::core::constants::{
    CLOUD_DRIFT_SPEED, GROUND_HEIGHT, HILLS_SCROLL_SPEED, SCROLL_SPEED,
};
use crate::core::geometry::{Point, Viewport};

/// Width of one repeating ground tile in points.
pub const GROUND_TILE: f32 = 32.0;
/// Width of one hill in points.
pub const HILL_PERIOD: f32 = 120.0;
pub const HILL_HEIGHT: f32 = 56.0;

/// Wrap `value` into `0..period`.
fn wrap(value: f32, period: f32) -> f32 {
    value.rem_euclid(period)
}

/// Static decoration in the top-left sky.
#[derive(Debug, Clone)]
pub struct Sun {
    pub position: Point,
    pub radius: f32,
}

impl Sun {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            position: viewport.at(0.15, 0.8),
            radius: 22.0,
        }
    }
}

/// Slowly drifting clouds. They drift in every state.
#[derive(Debug, Clone)]
pub struct Clouds {
    /// (x, y, half-width) of each cloud at zero offset.
    pub puffs: Vec<(f32, f32, f32)>,
    pub offset: f32,
    width: f32,
}

impl Clouds {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            puffs: vec![
                (viewport.width * 0.35, viewport.height * 0.72, 34.0),
                (viewport.width * 0.75, viewport.height * 0.64, 26.0),
                (viewport.width * 1.1, viewport.height * 0.78, 30.0),
            ],
            offset: 0.0,
            width: viewport.width * 1.4,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.offset = wrap(self.offset + CLOUD_DRIFT_SPEED * dt, self.width);
    }

    /// Current on-screen puff centres and half-widths.
    pub fn positions(&self) -> impl Iterator<Item = (Point, f32)> + '_ {
        self.puffs.iter().map(move |&(x, y, r)| {
            let x = wrap(x - self.offset, self.width) - r;
            (Point::new(x, y), r)
        })
    }
}

/// Rolling hills behind the ground.
#[derive(Debug, Clone, Default)]
pub struct Hills {
    pub offset: f32,
    scrolling: bool,
}

impl Hills {
    pub fn scroll(&mut self) {
        self.scrolling = true;
    }

    pub fn stop(&mut self) {
        self.scrolling = false;
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    pub fn advance(&mut self, dt: f32) {
        if self.scrolling {
            self.offset = wrap(self.offset + HILLS_SCROLL_SPEED * dt, HILL_PERIOD);
        }
    }

    /// Top of the hill silhouette at world x.
    pub fn height_at(&self, x: f32) -> f32 {
        let phase = wrap(x + self.offset, HILL_PERIOD) / HILL_PERIOD;
        GROUND_HEIGHT + HILL_HEIGHT * (phase * std::f32::consts::PI).sin()
    }
}

/// The ground strip at the bottom of the screen.
#[derive(Debug, Clone, Default)]
pub struct Ground {
    pub offset: f32,
    scrolling: bool,
}

impl Ground {
    pub fn height(&self) -> f32 {
        GROUND_HEIGHT
    }

    pub fn scroll(&mut self) {
        self.scrolling = true;
    }

    pub fn stop(&mut self) {
        self.scrolling = false;
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    pub fn advance(&mut self, dt: f32) {
        if self.scrolling {
            self.offset = wrap(self.offset + SCROLL_SPEED * dt, GROUND_TILE);
        }
    }

    /// Which of the two alternating tiles covers world x.
    pub fn tile_at(&self, x: f32) -> usize {
        ((wrap(x + self.offset, GROUND_TILE * 2.0)) / GROUND_TILE) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{VIEW_HEIGHT, VIEW_WIDTH};

    #[test]
    fn test_ground_only_moves_while_scrolling() {
        let mut ground = Ground::default();
        ground.advance(0.1);
        assert_eq!(ground.offset, 0.0);

        ground.scroll();
        ground.advance(0.1);
        assert!(ground.offset > 0.0);

        let before = ground.offset;
        ground.stop();
        ground.advance(0.1);
        assert_eq!(ground.offset, before);
    }

    #[test]
    fn test_ground_offset_wraps() {
        let mut ground = Ground::default();
        ground.scroll();
        for _ in 0..100 {
            ground.advance(0.05);
            assert!(ground.offset >= 0.0 && ground.offset < GROUND_TILE);
        }
    }

    #[test]
    fn test_hills_stay_above_ground() {
        let hills = Hills::default();
        for x in 0..320 {
            let h = hills.height_at(x as f32);
            assert!(h >= GROUND_HEIGHT);
            assert!(h <= GROUND_HEIGHT + HILL_HEIGHT + 0.001);
        }
    }

    #[test]
    fn test_clouds_drift_and_wrap() {
        let mut clouds = Clouds::new(Viewport::new(VIEW_WIDTH, VIEW_HEIGHT));
        let before: Vec<_> = clouds.positions().collect();
        clouds.advance(1.0);
        let after: Vec<_> = clouds.positions().collect();
        assert_ne!(before[0].0, after[0].0);
        assert_eq!(before.len(), after.len());
    }
}
