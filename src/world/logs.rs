//! Log obstacles: a bottom log, a top log and the score trigger in the gap.

use crate::core::constants::{
    GROUND_HEIGHT, LOG_GAP, LOG_GAP_MARGIN, LOG_WIDTH, SCORE_TRIGGER_WIDTH, SCROLL_SPEED,
};
use crate::core::contact::{CategoryMask, ContactCategory};
use crate::core::geometry::{Bounds, Viewport};
use rand::Rng;

/// Which body of a log pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogPart {
    Bottom,
    Top,
    ScoreTrigger,
}

impl LogPart {
    pub const ALL: [LogPart; 3] = [LogPart::Bottom, LogPart::Top, LogPart::ScoreTrigger];

    pub fn category(&self) -> CategoryMask {
        match self {
            Self::Bottom | Self::Top => ContactCategory::Obstacle.mask(),
            Self::ScoreTrigger => ContactCategory::ScoreTrigger.mask(),
        }
    }
}

/// One obstacle. Scrolls left until it leaves the screen or is frozen.
#[derive(Debug, Clone)]
pub struct Logs {
    pub id: u64,
    /// Left edge of the logs.
    pub x: f32,
    /// Bottom of the gap.
    pub gap_bottom: f32,
    pub gap_height: f32,
    view_height: f32,
    frozen: bool,
}

impl Logs {
    /// New logs just past the right edge with a random gap height.
    pub fn spawn<R: Rng>(id: u64, viewport: Viewport, rng: &mut R) -> Self {
        let min_gap = GROUND_HEIGHT + LOG_GAP_MARGIN;
        let max_gap = (viewport.height - LOG_GAP_MARGIN - LOG_GAP).max(min_gap);
        let gap_bottom = if max_gap > min_gap {
            rng.gen_range(min_gap..=max_gap)
        } else {
            min_gap
        };
        Self::with_gap(id, viewport, viewport.width, gap_bottom)
    }

    pub fn with_gap(id: u64, viewport: Viewport, x: f32, gap_bottom: f32) -> Self {
        Self {
            id,
            x,
            gap_bottom,
            gap_height: LOG_GAP,
            view_height: viewport.height,
            frozen: false,
        }
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_bottom + self.gap_height
    }

    /// Bounds of one of the three bodies.
    pub fn part_bounds(&self, part: LogPart) -> Bounds {
        match part {
            LogPart::Bottom => Bounds::new(
                self.x,
                GROUND_HEIGHT,
                LOG_WIDTH,
                self.gap_bottom - GROUND_HEIGHT,
            ),
            LogPart::Top => Bounds::new(
                self.x,
                self.gap_top(),
                LOG_WIDTH,
                self.view_height - self.gap_top(),
            ),
            LogPart::ScoreTrigger => Bounds::new(
                self.x + LOG_WIDTH,
                self.gap_bottom,
                SCORE_TRIGGER_WIDTH,
                self.gap_height,
            ),
        }
    }

    /// Stop all movement for good.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn advance(&mut self, dt: f32) {
        if !self.frozen {
            self.x -= SCROLL_SPEED * dt;
        }
    }

    /// Fully scrolled past the left edge.
    pub fn is_offscreen(&self) -> bool {
        self.x + LOG_WIDTH + SCORE_TRIGGER_WIDTH < 0.0
    }
}
