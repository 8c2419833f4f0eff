//! The world container and every entity in it.
//!
//! Entities own their own animation and physics sub-state. Nothing here
//! knows about game states; the scene drives entities through their
//! lifecycle methods in response to the session's effects.

pub mod effects;
pub mod hud;
pub mod logs;
pub mod physics;
pub mod player;
pub mod terrain;

use crate::core::constants::GROUND_HEIGHT;
use crate::core::geometry::{Bounds, Viewport};
use effects::{Shake, Smoke};
use hud::{Button, GameOverPanel, ScoreHud};
use logs::{LogPart, Logs};
use physics::{Body, BodyId, Contact, Physics};
use player::Player;
use rand::Rng;
use terrain::{Clouds, Ground, Hills, Sun};

/// Parent of all gameplay-visible entities.
#[derive(Debug, Clone)]
pub struct World {
    pub viewport: Viewport,
    pub sun: Sun,
    pub clouds: Clouds,
    pub hills: Hills,
    pub ground: Ground,
    pub player: Player,
    pub logs: Vec<Logs>,
    pub score_hud: ScoreHud,
    pub smoke: Option<Smoke>,
    pub shake: Option<Shake>,
    pub flashing: bool,
    pub game_over: Option<GameOverPanel>,
    pub retry: Option<Button>,
    pub leaders: Option<Button>,
    pub physics: Physics,
    next_log_id: u64,
}

impl World {
    /// Build the static scenery, the player and the boundary loop around the
    /// play area above the ground.
    pub fn new(viewport: Viewport) -> Self {
        let boundary = Bounds::new(
            0.0,
            GROUND_HEIGHT,
            viewport.width,
            viewport.height - GROUND_HEIGHT,
        );
        Self {
            viewport,
            sun: Sun::new(viewport),
            clouds: Clouds::new(viewport),
            hills: Hills::default(),
            ground: Ground::default(),
            player: Player::new(viewport),
            logs: Vec::new(),
            score_hud: ScoreHud::new(viewport),
            smoke: None,
            shake: None,
            flashing: false,
            game_over: None,
            retry: None,
            leaders: None,
            physics: Physics::new(boundary),
            next_log_id: 0,
        }
    }

    pub fn spawn_logs<R: Rng>(&mut self, rng: &mut R) {
        self.next_log_id += 1;
        let logs = Logs::spawn(self.next_log_id, self.viewport, rng);
        log::debug!("spawned logs {} with gap at {:.0}", logs.id, logs.gap_bottom);
        self.logs.push(logs);
    }

    /// Stop every obstacle where it is.
    pub fn freeze_logs(&mut self) {
        for logs in &mut self.logs {
            logs.freeze();
        }
    }

    pub fn start_scrolling(&mut self) {
        self.ground.scroll();
        self.hills.scroll();
    }

    pub fn stop_scrolling(&mut self) {
        self.ground.stop();
        self.hills.stop();
    }

    /// Current world-container offset from the camera shake.
    pub fn shake_offset(&self) -> (f32, f32) {
        self.shake.as_ref().map_or((0.0, 0.0), |s| s.offset())
    }

    /// Static bodies the player can touch, in a stable order.
    fn static_bodies(&self) -> Vec<Body> {
        self.logs
            .iter()
            .flat_map(|logs| {
                LogPart::ALL.into_iter().map(move |part| Body {
                    id: BodyId::Log { id: logs.id, part },
                    category: part.category(),
                    bounds: logs.part_bounds(part),
                })
            })
            .collect()
    }

    /// Advance animations and physics by `dt` seconds and return the
    /// contacts that began during this step.
    pub fn step(&mut self, dt: f32) -> Vec<Contact> {
        self.clouds.advance(dt);
        self.hills.advance(dt);
        self.ground.advance(dt);
        self.player.advance(dt);

        for logs in &mut self.logs {
            logs.advance(dt);
        }
        self.logs.retain(|logs| !logs.is_offscreen());

        if let Some(smoke) = self.smoke.as_mut() {
            smoke.advance(dt);
            if smoke.is_done() {
                self.smoke = None;
            }
        }
        if let Some(shake) = self.shake.as_mut() {
            shake.advance(dt);
            if shake.is_done() {
                self.shake = None;
            }
        }

        self.physics.integrate(&mut self.player, dt);
        let bodies = self.static_bodies();
        self.physics.detect_contacts(&self.player, bodies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{LOG_WIDTH, SCROLL_SPEED, VIEW_HEIGHT, VIEW_WIDTH};
    use crate::core::contact::ContactCategory;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn world() -> World {
        World::new(Viewport::new(VIEW_WIDTH, VIEW_HEIGHT))
    }

    #[test]
    fn test_new_world_is_calm() {
        let mut w = world();
        assert!(w.logs.is_empty());
        assert!(w.score_hud.hidden);
        assert_eq!(w.physics.gravity(), 0.0);
        let contacts = w.step(0.016);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_spawned_logs_scroll_and_despawn() {
        let mut w = world();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        w.spawn_logs(&mut rng);
        assert_eq!(w.logs.len(), 1);

        let secs = (VIEW_WIDTH + LOG_WIDTH * 2.0) / SCROLL_SPEED;
        let steps = (secs / 0.016) as usize + 10;
        for _ in 0..steps {
            w.step(0.016);
        }
        assert!(w.logs.is_empty());
    }

    #[test]
    fn test_frozen_logs_stay() {
        let mut w = world();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        w.spawn_logs(&mut rng);
        w.freeze_logs();
        let x = w.logs[0].x;
        w.step(1.0);
        assert_eq!(w.logs[0].x, x);
    }

    #[test]
    fn test_player_passing_gap_hits_score_trigger() {
        let mut w = world();
        let player_y = w.player.position.y;
        let player_x = w.player.position.x;
        // Gap centred on the player, trigger just to the right of the player
        let mut logs = Logs::with_gap(1, w.viewport, 0.0, player_y - 64.0);
        logs.x = player_x - LOG_WIDTH - 16.0;
        logs.freeze();
        w.logs.push(logs);

        let contacts = w.step(0.016);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].b, ContactCategory::ScoreTrigger.mask());
    }

    #[test]
    fn test_player_inside_log_hits_obstacle() {
        let mut w = world();
        let player_x = w.player.position.x;
        let mut logs = Logs::with_gap(1, w.viewport, 0.0, 400.0 - 128.0);
        logs.x = player_x - LOG_WIDTH / 2.0;
        w.logs.push(logs);

        let contacts = w.step(0.016);
        assert!(contacts
            .iter()
            .any(|c| c.b == ContactCategory::Obstacle.mask()));
    }

    #[test]
    fn test_effects_expire() {
        let mut w = world();
        w.smoke = Some(Smoke::at(w.player.position));
        w.shake = Some(Shake::new());
        for _ in 0..100 {
            w.step(0.016);
        }
        assert!(w.smoke.is_none());
        assert!(w.shake.is_none());
        assert_eq!(w.shake_offset(), (0.0, 0.0));
    }

    #[test]
    fn test_scrolling_toggles_ground_and_hills() {
        let mut w = world();
        w.start_scrolling();
        assert!(w.ground.is_scrolling() && w.hills.is_scrolling());
        w.stop_scrolling();
        assert!(!w.ground.is_scrolling() && !w.hills.is_scrolling());
    }
}
