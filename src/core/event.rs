//! Events delivered to the session and the effects it asks the scene to apply.

use super::contact::CategoryMask;
use super::geometry::Point;
use super::timer::TimerHandle;

/// Something that happened to the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A pointer-down at a world position.
    Tap(Point),
    /// Once per frame, before physics runs.
    Frame,
    /// Two bodies started touching.
    Contact(CategoryMask, CategoryMask),
    /// A timer obtained from the scheduler came due.
    TimerFired(TimerHandle),
}

/// Named audio cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Bounce,
    Falling,
    Whack,
    Coin,
    Oink,
}

impl Cue {
    pub const ALL: [Cue; 5] = [Cue::Bounce, Cue::Falling, Cue::Whack, Cue::Coin, Cue::Oink];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bounce => "bounce",
            Self::Falling => "falling",
            Self::Whack => "whack",
            Self::Coin => "coin",
            Self::Oink => "oink",
        }
    }
}

/// A request from the session to the scene's entities and services.
///
/// The session decides; the scene's effect interpreter does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    ShowTutorial,
    HideTutorial,
    /// Vertical gravity in m/s².
    SetGravity(f32),
    StartScrolling,
    StopScrolling,
    AnimatePlayer,
    PlayerFly,
    UpdatePlayer,
    BlinkPlayer,
    ShowScoreHud,
    HideScoreHud,
    SetScoreText(u32),
    SpawnObstacle,
    FreezeObstacles,
    PlayCue(Cue),
    ToggleMusic,
    FlashBackground,
    RestoreBackground,
    ShakeWorld,
    SmokeAtPlayer,
    ShowGameOverPanel { score: u32 },
    ShowEndButtons,
    ShowLeaderboard,
    NewScene,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_names() {
        let names: Vec<&str> = Cue::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["bounce", "falling", "whack", "coin", "oink"]);
    }
}
