//! One scene instance: the session, its timers, the world it drives and
//! the effect interpreter between them.
//!
//! A scene is set up once in [`Scene::new`] and never reset. A retry asks
//! the caller for a brand-new instance through [`SceneRequest::Restart`].

use crate::audio::AudioService;
use crate::core::constants::{MAX_FRAME_DT_MS, PHYSICS_STEP_MS, SCENE_FADE_MS};
use crate::core::{DeviceClass, Effect, Event, GameSession, GameState, Point, TimerWheel, Viewport};
use crate::world::effects::{Shake, Smoke};
use crate::world::hud::{Button, GameOverPanel, MusicButton, Tutorial};
use crate::world::World;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Work the scene cannot do by itself and hands back to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRequest {
    /// Replace this scene with a fresh one.
    Restart,
    /// Present the leaderboard, or the unreachable alert.
    ShowLeaderboard,
}

/// Options for building a scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneOptions {
    pub viewport: Viewport,
    pub device: DeviceClass,
    /// Seed for obstacle gap placement.
    pub seed: u64,
    /// Best score of earlier runs in this process.
    pub best: u32,
}

pub struct Scene {
    session: GameSession,
    timers: TimerWheel,
    world: World,
    tutorial: Tutorial,
    music_button: MusicButton,
    rng: StdRng,
    accumulated_time_ms: u64,
    fade_elapsed_ms: u64,
    best: u32,
    requests: Vec<SceneRequest>,
}

impl Scene {
    /// Run setup and enter the tutorial.
    pub fn new(options: SceneOptions, audio: &mut dyn AudioService) -> Self {
        let (session, effects) = GameSession::start(options.viewport, options.device);
        let music_button = MusicButton::new(session.music_button(), audio.is_muted());

        let mut scene = Self {
            session,
            timers: TimerWheel::new(),
            world: World::new(options.viewport),
            tutorial: Tutorial::default(),
            music_button,
            rng: StdRng::seed_from_u64(options.seed),
            accumulated_time_ms: 0,
            fade_elapsed_ms: 0,
            best: options.best,
            requests: Vec::new(),
        };
        scene.apply_all(effects, audio);
        scene
    }

    pub fn state(&self) -> GameState {
        self.session.state()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    /// Best score including the current run once it has ended.
    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn tutorial(&self) -> &Tutorial {
        &self.tutorial
    }

    pub fn music_button(&self) -> &MusicButton {
        &self.music_button
    }

    pub fn timers(&self) -> &TimerWheel {
        &self.timers
    }

    /// Fade-in progress from 0 to 1 after the scene appears.
    pub fn fade(&self) -> f32 {
        (self.fade_elapsed_ms as f32 / SCENE_FADE_MS as f32).min(1.0)
    }

    /// Deliver a tap in world coordinates.
    pub fn tap(&mut self, point: Point, audio: &mut dyn AudioService) -> Vec<SceneRequest> {
        self.dispatch(Event::Tap(point), audio);
        std::mem::take(&mut self.requests)
    }

    /// Toggle sound without tapping anywhere.
    pub fn toggle_music(&mut self, audio: &mut dyn AudioService) {
        self.apply(Effect::ToggleMusic, audio);
    }

    /// Advance the scene by `dt_ms` of wall time.
    ///
    /// Steps in fixed `PHYSICS_STEP_MS` increments. Each step delivers the
    /// frame update, runs physics, delivers the contacts that began, then
    /// fires due timers one at a time.
    pub fn tick(&mut self, dt_ms: u64, audio: &mut dyn AudioService) -> Vec<SceneRequest> {
        // Clamp to avoid a burst of steps after a stall
        let dt_ms = dt_ms.min(MAX_FRAME_DT_MS);
        self.fade_elapsed_ms = (self.fade_elapsed_ms + dt_ms).min(SCENE_FADE_MS);

        self.accumulated_time_ms += dt_ms;
        while self.accumulated_time_ms >= PHYSICS_STEP_MS {
            self.accumulated_time_ms -= PHYSICS_STEP_MS;
            self.step(audio);
        }
        std::mem::take(&mut self.requests)
    }

    fn step(&mut self, audio: &mut dyn AudioService) {
        let dt = Duration::from_millis(PHYSICS_STEP_MS);
        let secs = dt.as_secs_f32();

        self.dispatch(Event::Frame, audio);
        self.tutorial.advance(secs);

        for contact in self.world.step(secs) {
            self.dispatch(Event::Contact(contact.a, contact.b), audio);
        }

        self.timers.advance(dt);
        while let Some(handle) = self.timers.pop_due() {
            self.dispatch(Event::TimerFired(handle), audio);
        }
    }

    fn dispatch(&mut self, event: Event, audio: &mut dyn AudioService) {
        let effects = self.session.handle(event, &mut self.timers);
        self.apply_all(effects, audio);
    }

    fn apply_all(&mut self, effects: Vec<Effect>, audio: &mut dyn AudioService) {
        for effect in effects {
            self.apply(effect, audio);
        }
    }

    /// Interpret one effect on entities and services.
    fn apply(&mut self, effect: Effect, audio: &mut dyn AudioService) {
        log::trace!("apply {:?}", effect);
        let world = &mut self.world;
        match effect {
            Effect::ShowTutorial => self.tutorial.show(),
            Effect::HideTutorial => self.tutorial.hide(),
            Effect::SetGravity(gravity) => world.physics.set_gravity(gravity),
            Effect::StartScrolling => world.start_scrolling(),
            Effect::StopScrolling => world.stop_scrolling(),
            Effect::AnimatePlayer => world.player.animate(),
            Effect::PlayerFly => world.player.fly(),
            Effect::UpdatePlayer => world.player.update(),
            Effect::BlinkPlayer => world.player.blink(),
            Effect::ShowScoreHud => world.score_hud.hidden = false,
            Effect::HideScoreHud => world.score_hud.hidden = true,
            Effect::SetScoreText(value) => world.score_hud.value = value,
            Effect::SpawnObstacle => world.spawn_logs(&mut self.rng),
            Effect::FreezeObstacles => world.freeze_logs(),
            Effect::PlayCue(cue) => audio.play(cue),
            Effect::ToggleMusic => {
                audio.toggle_mute();
                self.music_button.set_muted(audio.is_muted());
            }
            Effect::FlashBackground => world.flashing = true,
            Effect::RestoreBackground => world.flashing = false,
            Effect::ShakeWorld => world.shake = Some(Shake::new()),
            Effect::SmokeAtPlayer => world.smoke = Some(Smoke::at(world.player.position)),
            Effect::ShowGameOverPanel { score } => {
                let panel = GameOverPanel::new(score, self.best);
                self.best = panel.best;
                world.game_over = Some(panel);
            }
            Effect::ShowEndButtons => {
                world.retry = self.session.retry_button().map(|b| Button::new("Retry", b));
                world.leaders = self
                    .session
                    .leaders_button()
                    .map(|b| Button::new("Leaders", b));
            }
            Effect::ShowLeaderboard => self.requests.push(SceneRequest::ShowLeaderboard),
            Effect::NewScene => self.requests.push(SceneRequest::Restart),
        }
    }
}
