//! Interface nodes: score HUD, tutorial overlay, music toggle, end-of-run
//! panel and buttons.

use crate::core::constants::{SCORE_HUD_Y_FRACTION, TUTORIAL_BLINK_MS};
use crate::core::geometry::{Bounds, Point, Viewport};

/// Running score shown at the top of the screen during play.
#[derive(Debug, Clone)]
pub struct ScoreHud {
    pub position: Point,
    pub value: u32,
    pub hidden: bool,
}

impl ScoreHud {
    /// Starts at "0" and hidden.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            position: viewport.at(0.5, SCORE_HUD_Y_FRACTION),
            value: 0,
            hidden: true,
        }
    }

    pub fn text(&self) -> String {
        self.value.to_string()
    }
}

/// "Get ready" instructions that blink until play starts.
#[derive(Debug, Clone, Default)]
pub struct Tutorial {
    shown: bool,
    elapsed: f32,
}

impl Tutorial {
    pub fn show(&mut self) {
        self.shown = true;
        self.elapsed = 0.0;
    }

    pub fn hide(&mut self) {
        self.shown = false;
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn advance(&mut self, dt: f32) {
        if self.shown {
            self.elapsed += dt;
        }
    }

    /// Whether the blinking text is in its visible phase.
    pub fn is_lit(&self) -> bool {
        let half = TUTORIAL_BLINK_MS as f32 / 1000.0;
        self.shown && ((self.elapsed / half) as u32) % 2 == 0
    }
}

/// The audio toggle in the top-right corner. Mirrors the audio service.
#[derive(Debug, Clone)]
pub struct MusicButton {
    pub bounds: Bounds,
    muted: bool,
}

impl MusicButton {
    pub fn new(bounds: Bounds, muted: bool) -> Self {
        Self { bounds, muted }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    pub fn glyph(&self) -> &'static str {
        if self.muted {
            "♪×"
        } else {
            "♪"
        }
    }
}

/// End-of-run score panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverPanel {
    pub score: u32,
    pub best: u32,
}

impl GameOverPanel {
    pub fn new(score: u32, previous_best: u32) -> Self {
        Self {
            score,
            best: previous_best.max(score),
        }
    }

    pub fn is_new_best(&self) -> bool {
        self.score > 0 && self.score == self.best
    }
}

/// A labelled tap region drawn on screen.
#[derive(Debug, Clone)]
pub struct Button {
    pub label: &'static str,
    pub bounds: Bounds,
}

impl Button {
    pub fn new(label: &'static str, bounds: Bounds) -> Self {
        Self { label, bounds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{VIEW_HEIGHT, VIEW_WIDTH};

    #[test]
    fn test_score_hud_starts_hidden_at_zero() {
        let hud = ScoreHud::new(Viewport::new(VIEW_WIDTH, VIEW_HEIGHT));
        assert!(hud.hidden);
        assert_eq!(hud.text(), "0");
    }

    #[test]
    fn test_tutorial_blinks_while_shown() {
        let mut t = Tutorial::default();
        assert!(!t.is_lit());
        t.show();
        assert!(t.is_lit());
        t.advance(TUTORIAL_BLINK_MS as f32 / 1000.0 + 0.01);
        assert!(!t.is_lit());
        t.advance(TUTORIAL_BLINK_MS as f32 / 1000.0);
        assert!(t.is_lit());
        t.hide();
        assert!(!t.is_lit());
    }

    #[test]
    fn test_music_button_glyph_follows_mute() {
        let mut b = MusicButton::new(Bounds::new(0.0, 0.0, 10.0, 10.0), false);
        assert_eq!(b.glyph(), "♪");
        b.set_muted(true);
        assert_eq!(b.glyph(), "♪×");
        assert!(b.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_panel_best() {
        let panel = GameOverPanel::new(7, 4);
        assert_eq!(panel.best, 7);
        assert!(panel.is_new_best());

        let panel = GameOverPanel::new(3, 9);
        assert_eq!(panel.best, 9);
        assert!(!panel.is_new_best());
    }
}
