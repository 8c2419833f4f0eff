//! The top-level game state of one scene instance.

/// Which phase of a run the scene is in.
///
/// `GameOver` is terminal for a scene instance: retrying builds a new scene
/// that starts again in `Tutorial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Tutorial,
    Play,
    GameOver,
}

impl GameState {
    pub const ALL: [GameState; 3] = [GameState::Tutorial, GameState::Play, GameState::GameOver];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tutorial => "tutorial",
            Self::Play => "play",
            Self::GameOver => "game over",
        }
    }

    /// Physics contacts only matter while playing.
    pub fn accepts_contacts(&self) -> bool {
        matches!(self, Self::Play)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_tutorial() {
        assert_eq!(GameState::default(), GameState::Tutorial);
    }

    #[test]
    fn test_only_play_accepts_contacts() {
        for state in GameState::ALL {
            assert_eq!(state.accepts_contacts(), state == GameState::Play);
        }
    }
}
