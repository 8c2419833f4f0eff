//! Minimal rigid-body simulation for the one dynamic body (the player).
//!
//! The play area is enclosed by a static edge loop tagged SceneBoundary;
//! log bodies are static rectangles. Contacts are reported once when two
//! bodies start touching, never again while they stay in contact.

use super::logs::LogPart;
use super::player::Player;
use crate::core::constants::{PLAYER_MAX_FALL_VELOCITY, POINTS_PER_METER};
use crate::core::contact::{CategoryMask, ContactCategory};
use crate::core::geometry::Bounds;
use std::collections::HashSet;

/// Identity of a static body the player can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyId {
    Boundary,
    Log { id: u64, part: LogPart },
}

/// A static body as seen by contact detection.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub id: BodyId,
    pub category: CategoryMask,
    pub bounds: Bounds,
}

/// A begin-contact notification: the two bodies' categories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: CategoryMask,
    pub b: CategoryMask,
    pub with: BodyId,
}

#[derive(Debug, Clone)]
pub struct Physics {
    /// Vertical gravity in m/s².
    gravity: f32,
    boundary: Bounds,
    touching: HashSet<BodyId>,
}

impl Physics {
    /// A world with no gravity enclosed by `boundary`.
    pub fn new(boundary: Bounds) -> Self {
        Self {
            gravity: 0.0,
            boundary,
            touching: HashSet::new(),
        }
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    pub fn boundary_category(&self) -> CategoryMask {
        ContactCategory::SceneBoundary.mask()
    }

    /// Apply gravity and velocity to the player for `dt` seconds, keeping it
    /// inside the edge loop.
    pub fn integrate(&self, player: &mut Player, dt: f32) {
        player.velocity += self.gravity * POINTS_PER_METER * dt;
        player.velocity = player.velocity.max(PLAYER_MAX_FALL_VELOCITY);
        player.position.y += player.velocity * dt;

        let half = player.bounds().height / 2.0;
        let floor = self.boundary.y + half;
        let ceiling = self.boundary.top() - half;
        if player.position.y <= floor {
            player.position.y = floor;
            player.velocity = player.velocity.max(0.0);
        } else if player.position.y >= ceiling {
            player.position.y = ceiling;
            player.velocity = player.velocity.min(0.0);
        }
    }

    /// Whether the player rests against the top or bottom edge.
    fn touches_boundary(&self, player: Bounds) -> bool {
        player.y <= self.boundary.y || player.top() >= self.boundary.top()
    }

    /// Report bodies the player started touching since the last call.
    pub fn detect_contacts<I>(&mut self, player: &Player, bodies: I) -> Vec<Contact>
    where
        I: IntoIterator<Item = Body>,
    {
        let pb = player.bounds();
        let player_category = player.category();
        let mut now_touching = HashSet::new();
        let mut contacts = Vec::new();

        let boundary = Body {
            id: BodyId::Boundary,
            category: self.boundary_category(),
            bounds: self.boundary,
        };
        let boundary_hit = self.touches_boundary(pb).then_some(boundary);

        for body in boundary_hit.into_iter().chain(
            bodies
                .into_iter()
                .filter(|b| b.bounds.width > 0.0 && b.bounds.height > 0.0)
                .filter(|b| b.bounds.intersects(&pb)),
        ) {
            now_touching.insert(body.id);
            if !self.touching.contains(&body.id) {
                contacts.push(Contact {
                    a: player_category,
                    b: body.category,
                    with: body.id,
                });
            }
        }

        self.touching = now_touching;
        contacts
    }
}
