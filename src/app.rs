//! The running game: current scene, modal overlay and restarts.
//!
//! Input goes through a priority chain: an open modal swallows the event
//! and closes, otherwise the event is mapped to a tap for the scene.

use crate::audio::AudioService;
use crate::config::Config;
use crate::core::constants::{LEADERBOARD_LIMIT, VIEW_HEIGHT, VIEW_WIDTH};
use crate::core::{Point, Viewport};
use crate::input::{dismisses_modal, map_event, InputAction, Projection};
use crate::leaderboard::{present, Leaderboard, LeaderboardView};
use crate::scene::{Scene, SceneOptions, SceneRequest};
use crossterm::event::Event;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Whether the main loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Quit,
}

pub struct App<A: AudioService, L: Leaderboard> {
    config: Config,
    scene: Scene,
    audio: A,
    leaderboard: L,
    modal: Option<LeaderboardView>,
    seeds: StdRng,
    restarts: u32,
}

impl<A: AudioService, L: Leaderboard> App<A, L> {
    pub fn new(config: Config, mut audio: A, leaderboard: L) -> Self {
        let mut seeds = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        if config.start_muted && !audio.is_muted() {
            audio.toggle_mute();
        }
        let scene = Self::build_scene(&config, &mut seeds, 0, &mut audio);
        Self {
            config,
            scene,
            audio,
            leaderboard,
            modal: None,
            seeds,
            restarts: 0,
        }
    }

    fn build_scene(config: &Config, seeds: &mut StdRng, best: u32, audio: &mut A) -> Scene {
        let options = SceneOptions {
            viewport: Viewport::new(VIEW_WIDTH, VIEW_HEIGHT),
            device: config.device,
            seed: seeds.gen(),
            best,
        };
        Scene::new(options, audio)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn modal(&self) -> Option<&LeaderboardView> {
        self.modal.as_ref()
    }

    /// Number of times the scene has been replaced.
    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Handle one terminal event against the last drawn projection.
    pub fn handle_event(&mut self, event: &Event, projection: &Projection) -> AppControl {
        if self.modal.is_some() {
            if dismisses_modal(event) {
                self.modal = None;
            }
            return AppControl::Continue;
        }

        match map_event(event, projection, self.scene.state()) {
            InputAction::Tap(point) => {
                self.tap(point);
                AppControl::Continue
            }
            InputAction::ToggleMusic => {
                self.scene.toggle_music(&mut self.audio);
                AppControl::Continue
            }
            InputAction::Quit => AppControl::Quit,
            InputAction::Ignore => AppControl::Continue,
        }
    }

    /// Deliver a tap in world coordinates to the scene.
    pub fn tap(&mut self, point: Point) {
        let requests = self.scene.tap(point, &mut self.audio);
        self.handle_requests(requests);
    }

    /// Advance the scene by `dt_ms` of wall time.
    pub fn tick(&mut self, dt_ms: u64) {
        let requests = self.scene.tick(dt_ms, &mut self.audio);
        self.handle_requests(requests);
    }

    fn handle_requests(&mut self, requests: Vec<SceneRequest>) {
        for request in requests {
            match request {
                SceneRequest::Restart => self.restart(),
                SceneRequest::ShowLeaderboard => {
                    self.modal = Some(present(&self.leaderboard, LEADERBOARD_LIMIT));
                }
            }
        }
    }

    /// Replace the scene with a brand-new instance.
    fn restart(&mut self) {
        let best = self.scene.best();
        self.scene = Self::build_scene(&self.config, &mut self.seeds, best, &mut self.audio);
        self.restarts += 1;
        log::info!("new scene (best {})", best);
    }
}
