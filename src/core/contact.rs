//! Contact categories and the contact resolution policy.
//!
//! Every physics body carries a [`CategoryMask`] fixed when the body is
//! created. When two bodies start touching, the scene asks
//! [`resolve_contact`] what the contact means for the run.

use super::state::GameState;
use std::fmt;
use std::ops::BitOr;

/// Role of a physics body in collision resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactCategory {
    Player,
    SceneBoundary,
    Obstacle,
    ScoreTrigger,
}

impl ContactCategory {
    pub const ALL: [ContactCategory; 4] = [
        ContactCategory::Player,
        ContactCategory::SceneBoundary,
        ContactCategory::Obstacle,
        ContactCategory::ScoreTrigger,
    ];

    /// The single bit this category occupies.
    pub const fn bit(self) -> u32 {
        match self {
            Self::Player => 1 << 0,
            Self::SceneBoundary => 1 << 1,
            Self::Obstacle => 1 << 2,
            Self::ScoreTrigger => 1 << 3,
        }
    }

    pub const fn mask(self) -> CategoryMask {
        CategoryMask(self.bit())
    }
}

/// A set of contact categories, one bit per category.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategoryMask(u32);

impl CategoryMask {
    pub const NONE: CategoryMask = CategoryMask(0);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, category: ContactCategory) -> bool {
        self.0 & category.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<ContactCategory> for CategoryMask {
    fn from(category: ContactCategory) -> Self {
        category.mask()
    }
}

impl BitOr for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: CategoryMask) -> CategoryMask {
        CategoryMask(self.0 | rhs.0)
    }
}

impl BitOr for ContactCategory {
    type Output = CategoryMask;

    fn bitor(self, rhs: ContactCategory) -> CategoryMask {
        self.mask() | rhs.mask()
    }
}

impl fmt::Debug for CategoryMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = ContactCategory::ALL
            .iter()
            .filter(|c| self.contains(**c))
            .map(|c| match c {
                ContactCategory::Player => "Player",
                ContactCategory::SceneBoundary => "SceneBoundary",
                ContactCategory::Obstacle => "Obstacle",
                ContactCategory::ScoreTrigger => "ScoreTrigger",
            })
            .collect();
        write!(f, "CategoryMask({:#06b}: {})", self.0, names.join("|"))
    }
}

/// What a contact means for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Nothing happens.
    Ignored,
    /// The player hit the edge of the play area. Ends the run.
    HitBoundary,
    /// The player hit a log. Ends the run.
    HitObstacle,
    /// The player passed through a gap.
    Scored,
}

impl ContactOutcome {
    pub fn ends_run(&self) -> bool {
        matches!(self, Self::HitBoundary | Self::HitObstacle)
    }
}

/// Classify a contact between bodies `a` and `b` in the given state.
///
/// Only Play-state contacts involving the player mean anything. The body
/// that is not the player decides the outcome, checked in the order
/// boundary, obstacle, score trigger.
pub fn resolve_contact(state: GameState, a: CategoryMask, b: CategoryMask) -> ContactOutcome {
    if !state.accepts_contacts() {
        return ContactOutcome::Ignored;
    }

    let other = if a.contains(ContactCategory::Player) {
        b
    } else if b.contains(ContactCategory::Player) {
        a
    } else {
        return ContactOutcome::Ignored;
    };

    if other.contains(ContactCategory::SceneBoundary) {
        ContactOutcome::HitBoundary
    } else if other.contains(ContactCategory::Obstacle) {
        ContactOutcome::HitObstacle
    } else if other.contains(ContactCategory::ScoreTrigger) {
        ContactOutcome::Scored
    } else {
        ContactOutcome::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ContactCategory::*;

    #[test]
    fn test_category_bits_are_distinct_powers_of_two() {
        let mut seen = 0u32;
        for c in ContactCategory::ALL {
            assert!(c.bit().is_power_of_two());
            assert_eq!(seen & c.bit(), 0);
            seen |= c.bit();
        }
    }

    #[test]
    fn test_mask_combination() {
        let mask = Obstacle | ScoreTrigger;
        assert!(mask.contains(Obstacle));
        assert!(mask.contains(ScoreTrigger));
        assert!(!mask.contains(Player));
        assert!(CategoryMask::NONE.is_empty());
    }

    #[test]
    fn test_play_table() {
        let p = Player.mask();
        assert_eq!(
            resolve_contact(GameState::Play, p, SceneBoundary.mask()),
            ContactOutcome::HitBoundary
        );
        assert_eq!(
            resolve_contact(GameState::Play, p, Obstacle.mask()),
            ContactOutcome::HitObstacle
        );
        assert_eq!(
            resolve_contact(GameState::Play, p, ScoreTrigger.mask()),
            ContactOutcome::Scored
        );
        assert_eq!(
            resolve_contact(GameState::Play, p, Player.mask()),
            ContactOutcome::Ignored
        );
    }

    #[test]
    fn test_body_order_does_not_matter() {
        for other in ContactCategory::ALL {
            for state in GameState::ALL {
                assert_eq!(
                    resolve_contact(state, Player.mask(), other.mask()),
                    resolve_contact(state, other.mask(), Player.mask()),
                    "{:?} in {:?}",
                    other,
                    state
                );
            }
        }
    }

    #[test]
    fn test_contacts_ignored_outside_play() {
        for state in [GameState::Tutorial, GameState::GameOver] {
            for a in ContactCategory::ALL {
                for b in ContactCategory::ALL {
                    assert_eq!(
                        resolve_contact(state, a.mask(), b.mask()),
                        ContactOutcome::Ignored
                    );
                }
            }
        }
    }

    #[test]
    fn test_contact_without_player_is_ignored() {
        assert_eq!(
            resolve_contact(GameState::Play, Obstacle.mask(), SceneBoundary.mask()),
            ContactOutcome::Ignored
        );
    }

    #[test]
    fn test_unknown_category_is_ignored() {
        assert_eq!(
            resolve_contact(GameState::Play, Player.mask(), CategoryMask::from_bits(1 << 7)),
            ContactOutcome::Ignored
        );
        assert_eq!(
            resolve_contact(GameState::Play, Player.mask(), CategoryMask::NONE),
            ContactOutcome::Ignored
        );
    }

    #[test]
    fn test_ends_run() {
        assert!(ContactOutcome::HitBoundary.ends_run());
        assert!(ContactOutcome::HitObstacle.ends_run());
        assert!(!ContactOutcome::Scored.ends_run());
        assert!(!ContactOutcome::Ignored.ends_run());
    }

    #[test]
    fn test_debug_lists_names() {
        let s = format!("{:?}", Player | Obstacle);
        assert!(s.contains("Player"));
        assert!(s.contains("Obstacle"));
    }
}
