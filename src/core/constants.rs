// Frame loop and physics timing
pub const FRAME_MS: u64 = 16; // ~60 FPS redraw
pub const PHYSICS_STEP_MS: u64 = 16;
pub const MAX_FRAME_DT_MS: u64 = 100; // longest frame simulated after a stall

// Logical viewport in points, origin bottom-left, y up
pub const VIEW_WIDTH: f32 = 320.0;
pub const VIEW_HEIGHT: f32 = 480.0;

// Physics
pub const POINTS_PER_METER: f32 = 150.0;
pub const PHONE_GRAVITY: f32 = -5.0; // m/s², vertical axis
pub const TABLET_GRAVITY: f32 = -10.0;
pub const PLAYER_FLY_VELOCITY: f32 = 290.0; // points/s, set (not added) on every flap
pub const PLAYER_MAX_FALL_VELOCITY: f32 = -600.0;

// Input
pub const TUTORIAL_TAP_LIMIT: f32 = 0.75; // taps at or above this fraction of height are ignored

// Spawning and scoring
pub const SPAWN_INTERVAL_MS: u64 = 1000;
pub const BONUS_EVERY: u32 = 5;

// Terrain
pub const GROUND_HEIGHT: f32 = 64.0;
pub const SCROLL_SPEED: f32 = 120.0; // points/s for ground and logs
pub const HILLS_SCROLL_SPEED: f32 = 40.0;
pub const CLOUD_DRIFT_SPEED: f32 = 12.0;

// Obstacles
pub const LOG_WIDTH: f32 = 48.0;
pub const LOG_GAP: f32 = 128.0;
pub const LOG_GAP_MARGIN: f32 = 48.0; // keep the gap clear of ground and ceiling
pub const SCORE_TRIGGER_WIDTH: f32 = 4.0;

// Player
pub const PLAYER_X_FRACTION: f32 = 0.3;
pub const PLAYER_SIZE: f32 = 28.0;
pub const PLAYER_BLINK_COUNT: u32 = 5;
pub const PLAYER_BLINK_PERIOD_MS: u64 = 200;

// Game over presentation
pub const FLASH_RESTORE_MS: u64 = 500;
pub const SHAKE_AMOUNT_X: f32 = 20.0;
pub const SHAKE_AMOUNT_Y: f32 = 15.0;
pub const SHAKE_OSCILLATIONS: u32 = 10;
pub const SHAKE_DURATION_MS: u64 = 750;
pub const SMOKE_DURATION_MS: u64 = 600;
pub const SCENE_FADE_MS: u64 = 250;

// Tutorial overlay blink half-period
pub const TUTORIAL_BLINK_MS: u64 = 500;

// Interactive regions: (centre x fraction, centre y fraction, width, height)
pub const MUSIC_BUTTON: (f32, f32, f32, f32) = (0.9, 0.94, 40.0, 40.0);
pub const RETRY_BUTTON: (f32, f32, f32, f32) = (0.25, 0.3, 112.0, 56.0);
pub const LEADERS_BUTTON: (f32, f32, f32, f32) = (0.75, 0.3, 112.0, 56.0);

// Score HUD position (fractions of the viewport)
pub const SCORE_HUD_Y_FRACTION: f32 = 0.85;

// Leaderboard
pub const LEADERBOARD_LIMIT: usize = 10;
pub const LEADERBOARD_TIMEOUT_SECS: u64 = 3;
