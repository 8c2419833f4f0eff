//! The game session: state machine, scoring, spawning and input dispatch.
//!
//! All mutation of the run's state goes through [`GameSession::handle`].
//! It never touches entities directly; it returns the [`Effect`]s the scene
//! must apply, which keeps the whole transition table testable without a
//! renderer or a real clock.

use super::constants::{
    BONUS_EVERY, FLASH_RESTORE_MS, LEADERS_BUTTON, MUSIC_BUTTON, RETRY_BUTTON,
    SPAWN_INTERVAL_MS, TUTORIAL_TAP_LIMIT,
};
use super::contact::{resolve_contact, CategoryMask, ContactOutcome};
use super::device::DeviceClass;
use super::event::{Cue, Effect, Event};
use super::geometry::{Bounds, Point, Viewport};
use super::state::GameState;
use super::timer::{Scheduler, TimerHandle};
use std::time::Duration;

/// State owned by one scene instance's controller.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    score: u32,
    device: DeviceClass,
    viewport: Viewport,
    music_button: Bounds,
    retry_button: Option<Bounds>,
    leaders_button: Option<Bounds>,
    spawn_timer: Option<TimerHandle>,
    flash_timer: Option<TimerHandle>,
}

impl GameSession {
    /// Set up a fresh session and enter the tutorial.
    ///
    /// Returns the effects of setup. A session is only ever set up here, once.
    pub fn start(viewport: Viewport, device: DeviceClass) -> (Self, Vec<Effect>) {
        let mut session = Self {
            state: GameState::Tutorial,
            score: 0,
            device,
            viewport,
            music_button: viewport.region(MUSIC_BUTTON),
            retry_button: None,
            leaders_button: None,
            spawn_timer: None,
            flash_timer: None,
        };

        // Gravity only switches on when play starts
        let mut effects = vec![Effect::SetGravity(0.0), Effect::SetScoreText(0)];
        effects.extend(session.switch_to_tutorial());
        (session, effects)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn music_button(&self) -> Bounds {
        self.music_button
    }

    /// Retry button bounds, present once the run is over.
    pub fn retry_button(&self) -> Option<Bounds> {
        self.retry_button
    }

    /// Leaderboard button bounds, present once the run is over.
    pub fn leaders_button(&self) -> Option<Bounds> {
        self.leaders_button
    }

    /// True while the obstacle spawn timer is running.
    pub fn is_spawning(&self) -> bool {
        self.spawn_timer.is_some()
    }

    /// Dispatch one event. Every state has defined behaviour for every event.
    pub fn handle<S: Scheduler + ?Sized>(&mut self, event: Event, timers: &mut S) -> Vec<Effect> {
        match event {
            Event::Tap(point) => self.handle_tap(point, timers),
            Event::Frame => match self.state {
                GameState::Play => vec![Effect::UpdatePlayer],
                GameState::Tutorial | GameState::GameOver => Vec::new(),
            },
            Event::Contact(a, b) => self.handle_contact(a, b, timers),
            Event::TimerFired(handle) => self.handle_timer(handle),
        }
    }

    fn handle_tap<S: Scheduler + ?Sized>(&mut self, point: Point, timers: &mut S) -> Vec<Effect> {
        let mut effects = Vec::new();

        match self.state {
            GameState::Tutorial => {
                // Taps in the top quarter never start the run
                if point.y < self.viewport.height * TUTORIAL_TAP_LIMIT {
                    effects.extend(self.switch_to_play(timers));
                }
            }
            GameState::Play => {
                effects.push(Effect::PlayerFly);
            }
            GameState::GameOver => {
                if self.retry_button.is_some_and(|b| b.contains(point)) {
                    effects.push(Effect::NewScene);
                }
                if self.leaders_button.is_some_and(|b| b.contains(point)) {
                    effects.push(Effect::ShowLeaderboard);
                }
            }
        }

        if self.music_button.contains(point) {
            effects.push(Effect::ToggleMusic);
        }

        effects
    }

    fn handle_contact<S: Scheduler + ?Sized>(
        &mut self,
        a: CategoryMask,
        b: CategoryMask,
        timers: &mut S,
    ) -> Vec<Effect> {
        match resolve_contact(self.state, a, b) {
            ContactOutcome::Ignored => Vec::new(),
            ContactOutcome::HitBoundary => {
                let mut effects = vec![Effect::PlayCue(Cue::Bounce), Effect::PlayCue(Cue::Falling)];
                effects.extend(self.switch_to_game_over(timers));
                effects
            }
            ContactOutcome::HitObstacle => {
                let mut effects = vec![Effect::PlayCue(Cue::Whack), Effect::PlayCue(Cue::Falling)];
                effects.extend(self.switch_to_game_over(timers));
                effects
            }
            ContactOutcome::Scored => self.update_score(),
        }
    }

    fn handle_timer(&mut self, handle: TimerHandle) -> Vec<Effect> {
        if self.spawn_timer == Some(handle) {
            if self.state == GameState::Play {
                return vec![Effect::SpawnObstacle];
            }
            log::warn!("spawn timer fired outside play, ignoring");
            return Vec::new();
        }
        if self.flash_timer == Some(handle) {
            self.flash_timer = None;
            return vec![Effect::RestoreBackground];
        }
        log::debug!("ignoring stale timer {}", handle.id());
        Vec::new()
    }

    fn update_score(&mut self) -> Vec<Effect> {
        self.score += 1;
        log::debug!("score {}", self.score);

        let mut effects = vec![
            Effect::SetScoreText(self.score),
            Effect::PlayCue(Cue::Coin),
        ];
        if self.score % BONUS_EVERY == 0 {
            effects.push(Effect::PlayCue(Cue::Oink));
        }
        effects
    }

    fn switch_to_tutorial(&mut self) -> Vec<Effect> {
        self.state = GameState::Tutorial;
        vec![Effect::ShowTutorial]
    }

    fn switch_to_play<S: Scheduler + ?Sized>(&mut self, timers: &mut S) -> Vec<Effect> {
        self.state = GameState::Play;
        log::info!("entering play ({:?} gravity profile)", self.device);

        if let Some(stale) = self.spawn_timer.take() {
            timers.cancel(stale);
        }
        self.spawn_timer = Some(timers.schedule(Duration::from_millis(SPAWN_INTERVAL_MS), true));

        vec![
            Effect::HideTutorial,
            Effect::SetGravity(self.device.gravity()),
            Effect::StartScrolling,
            Effect::AnimatePlayer,
            Effect::ShowScoreHud,
        ]
    }

    fn switch_to_game_over<S: Scheduler + ?Sized>(&mut self, timers: &mut S) -> Vec<Effect> {
        self.state = GameState::GameOver;
        log::info!("game over with score {}", self.score);

        if let Some(spawn) = self.spawn_timer.take() {
            timers.cancel(spawn);
        }
        if let Some(flash) = self.flash_timer.take() {
            timers.cancel(flash);
        }
        self.flash_timer = Some(timers.schedule(Duration::from_millis(FLASH_RESTORE_MS), false));

        self.retry_button = Some(self.viewport.region(RETRY_BUTTON));
        self.leaders_button = Some(self.viewport.region(LEADERS_BUTTON));

        vec![
            Effect::FlashBackground,
            Effect::ShakeWorld,
            Effect::StopScrolling,
            Effect::HideScoreHud,
            Effect::FreezeObstacles,
            Effect::SmokeAtPlayer,
            Effect::BlinkPlayer,
            Effect::ShowGameOverPanel { score: self.score },
            Effect::ShowEndButtons,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{VIEW_HEIGHT, VIEW_WIDTH};
    use crate::core::contact::ContactCategory;
    use crate::core::timer::TimerWheel;

    fn view() -> Viewport {
        Viewport::new(VIEW_WIDTH, VIEW_HEIGHT)
    }

    fn new_session() -> (GameSession, TimerWheel) {
        let (session, _) = GameSession::start(view(), DeviceClass::Phone);
        (session, TimerWheel::new())
    }

    fn play_tap() -> Event {
        Event::Tap(view().at(0.5, 0.1))
    }

    fn contact(other: ContactCategory) -> Event {
        Event::Contact(ContactCategory::Player.mask(), other.mask())
    }

    fn playing() -> (GameSession, TimerWheel) {
        let (mut session, mut timers) = new_session();
        session.handle(play_tap(), &mut timers);
        assert_eq!(session.state(), GameState::Play);
        (session, timers)
    }

    #[test]
    fn test_start_enters_tutorial_with_zero_gravity() {
        let (session, effects) = GameSession::start(view(), DeviceClass::Phone);
        assert_eq!(session.state(), GameState::Tutorial);
        assert_eq!(session.score(), 0);
        assert_eq!(effects[0], Effect::SetGravity(0.0));
        assert!(effects.contains(&Effect::SetScoreText(0)));
        assert!(effects.contains(&Effect::ShowTutorial));
        assert!(!session.is_spawning());
        assert!(session.retry_button().is_none());
    }

    #[test]
    fn test_tutorial_tap_low_starts_play() {
        let (mut session, mut timers) = new_session();
        let effects = session.handle(play_tap(), &mut timers);

        assert_eq!(session.state(), GameState::Play);
        assert!(effects.contains(&Effect::HideTutorial));
        assert!(effects.contains(&Effect::SetGravity(-5.0)));
        assert!(effects.contains(&Effect::StartScrolling));
        assert!(effects.contains(&Effect::AnimatePlayer));
        assert!(effects.contains(&Effect::ShowScoreHud));
        assert!(session.is_spawning());
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn test_tutorial_tap_in_top_quarter_ignored() {
        let (mut session, mut timers) = new_session();
        let effects = session.handle(Event::Tap(view().at(0.2, 0.8)), &mut timers);
        assert_eq!(session.state(), GameState::Tutorial);
        assert!(effects.is_empty());

        // Exactly at the limit is also ignored
        session.handle(Event::Tap(view().at(0.2, TUTORIAL_TAP_LIMIT)), &mut timers);
        assert_eq!(session.state(), GameState::Tutorial);
    }

    #[test]
    fn test_tablet_gravity() {
        let (mut session, _) = GameSession::start(view(), DeviceClass::Tablet);
        let mut timers = TimerWheel::new();
        let effects = session.handle(play_tap(), &mut timers);
        assert!(effects.contains(&Effect::SetGravity(-10.0)));
    }

    #[test]
    fn test_play_tap_flies() {
        let (mut session, mut timers) = playing();
        let effects = session.handle(play_tap(), &mut timers);
        assert_eq!(effects, vec![Effect::PlayerFly]);
        assert_eq!(session.state(), GameState::Play);
    }

    #[test]
    fn test_music_toggle_in_every_state() {
        let (mut session, mut timers) = new_session();
        let music = Event::Tap(session.music_button().center());

        assert_eq!(session.handle(music, &mut timers), vec![Effect::ToggleMusic]);

        session.handle(play_tap(), &mut timers);
        let effects = session.handle(music, &mut timers);
        assert!(effects.contains(&Effect::ToggleMusic));

        session.handle(contact(ContactCategory::Obstacle), &mut timers);
        assert_eq!(session.handle(music, &mut timers), vec![Effect::ToggleMusic]);
    }

    #[test]
    fn test_frame_only_updates_player_in_play() {
        let (mut session, mut timers) = new_session();
        assert!(session.handle(Event::Frame, &mut timers).is_empty());
        session.handle(play_tap(), &mut timers);
        assert_eq!(session.handle(Event::Frame, &mut timers), vec![Effect::UpdatePlayer]);
        session.handle(contact(ContactCategory::SceneBoundary), &mut timers);
        assert!(session.handle(Event::Frame, &mut timers).is_empty());
    }

    #[test]
    fn test_obstacle_contact_ends_run() {
        let (mut session, mut timers) = playing();
        let effects = session.handle(contact(ContactCategory::Obstacle), &mut timers);

        assert_eq!(session.state(), GameState::GameOver);
        assert_eq!(effects[0], Effect::PlayCue(Cue::Whack));
        assert_eq!(effects[1], Effect::PlayCue(Cue::Falling));
        for expected in [
            Effect::FlashBackground,
            Effect::ShakeWorld,
            Effect::StopScrolling,
            Effect::HideScoreHud,
            Effect::FreezeObstacles,
            Effect::SmokeAtPlayer,
            Effect::BlinkPlayer,
            Effect::ShowGameOverPanel { score: 0 },
            Effect::ShowEndButtons,
        ] {
            assert!(effects.contains(&expected), "missing {:?}", expected);
        }
        assert!(!session.is_spawning());
        assert!(session.retry_button().is_some());
        assert!(session.leaders_button().is_some());
    }

    #[test]
    fn test_boundary_contact_ends_run() {
        let (mut session, mut timers) = playing();
        let effects = session.handle(contact(ContactCategory::SceneBoundary), &mut timers);
        assert_eq!(session.state(), GameState::GameOver);
        assert_eq!(effects[0], Effect::PlayCue(Cue::Bounce));
        assert_eq!(effects[1], Effect::PlayCue(Cue::Falling));
    }

    #[test]
    fn test_score_trigger_increments() {
        let (mut session, mut timers) = playing();
        let effects = session.handle(contact(ContactCategory::ScoreTrigger), &mut timers);
        assert_eq!(session.score(), 1);
        assert_eq!(session.state(), GameState::Play);
        assert_eq!(
            effects,
            vec![Effect::SetScoreText(1), Effect::PlayCue(Cue::Coin)]
        );
    }

    #[test]
    fn test_bonus_cue_every_fifth_point() {
        let (mut session, mut timers) = playing();
        for expected in 1..=12u32 {
            let effects = session.handle(contact(ContactCategory::ScoreTrigger), &mut timers);
            assert_eq!(session.score(), expected);
            assert_eq!(
                effects.contains(&Effect::PlayCue(Cue::Oink)),
                expected % 5 == 0,
                "score {}",
                expected
            );
        }
    }

    #[test]
    fn test_contacts_ignored_in_tutorial_and_game_over() {
        let (mut session, mut timers) = new_session();
        for other in ContactCategory::ALL {
            assert!(session.handle(contact(other), &mut timers).is_empty());
        }
        assert_eq!(session.state(), GameState::Tutorial);

        session.handle(play_tap(), &mut timers);
        session.handle(contact(ContactCategory::ScoreTrigger), &mut timers);
        session.handle(contact(ContactCategory::Obstacle), &mut timers);
        for other in ContactCategory::ALL {
            assert!(session.handle(contact(other), &mut timers).is_empty());
        }
        assert_eq!(session.state(), GameState::GameOver);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_spawn_timer_yields_spawn_in_play() {
        let (mut session, mut timers) = playing();
        let fired = timers.advance_and_collect(Duration::from_millis(1000));
        assert_eq!(fired.len(), 1);
        assert_eq!(
            session.handle(Event::TimerFired(fired[0]), &mut timers),
            vec![Effect::SpawnObstacle]
        );
    }

    #[test]
    fn test_flash_restored_after_delay() {
        let (mut session, mut timers) = playing();
        session.handle(contact(ContactCategory::Obstacle), &mut timers);

        let fired = timers.advance_and_collect(Duration::from_millis(FLASH_RESTORE_MS));
        assert_eq!(fired.len(), 1);
        assert_eq!(
            session.handle(Event::TimerFired(fired[0]), &mut timers),
            vec![Effect::RestoreBackground]
        );
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_stale_timer_ignored() {
        let (mut session, mut timers) = playing();
        let fired = timers.advance_and_collect(Duration::from_millis(1000));
        session.handle(contact(ContactCategory::Obstacle), &mut timers);

        // A spawn firing delivered after game over does nothing
        assert!(session.handle(Event::TimerFired(fired[0]), &mut timers).is_empty());
    }

    #[test]
    fn test_game_over_taps() {
        let (mut session, mut timers) = playing();
        session.handle(contact(ContactCategory::Obstacle), &mut timers);

        let retry = session.retry_button().unwrap().center();
        let leaders = session.leaders_button().unwrap().center();

        assert_eq!(session.handle(Event::Tap(retry), &mut timers), vec![Effect::NewScene]);
        assert_eq!(
            session.handle(Event::Tap(leaders), &mut timers),
            vec![Effect::ShowLeaderboard]
        );
        // Elsewhere: nothing, and no flap
        assert!(session.handle(play_tap(), &mut timers).is_empty());
        assert_eq!(session.state(), GameState::GameOver);
    }

    #[test]
    fn test_end_buttons_do_nothing_before_game_over() {
        let (mut session, mut timers) = new_session();
        let retry_spot = view().region(RETRY_BUTTON).center();
        let effects = session.handle(Event::Tap(retry_spot), &mut timers);
        // That spot is low on screen, so it starts play instead
        assert!(!effects.contains(&Effect::NewScene));
        assert_eq!(session.state(), GameState::Play);
    }
}
