//! Axis-aligned collision against the solid tile set
//!
//! Movement is resolved one axis at a time: move along x and push out of
//! ground tiles, then move along y and land or bump. Platforms only ever
//! take part in the y pass, and only from above.

use glam::Vec2;

use super::state::{Body, SolidKind, SolidTile};
use crate::consts::PLATFORM_EPSILON;

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test; a positive `margin` shrinks `self` on every side
    pub fn overlaps(&self, other: &Rect, margin: f32) -> bool {
        self.pos.x + margin < other.right()
            && self.right() - margin > other.pos.x
            && self.pos.y + margin < other.bottom()
            && self.bottom() - margin > other.pos.y
    }

    /// Shrink by `by` on every side
    pub fn inset(&self, by: f32) -> Rect {
        Rect::new(self.pos + Vec2::splat(by), self.size - Vec2::splat(2.0 * by))
    }
}

/// How a body treats one-way platforms in the y pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformRule {
    /// Land only when falling and the previous bottom was at or above the top
    OneWay { prev_y: f32 },
    /// Pass through platforms entirely (walkers)
    Ignore,
}

/// Tile touched during the y pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Landed on top of the tile
    Landed(u32),
    /// Hit the tile's underside while rising
    Bumped(u32),
}

/// Resolve horizontal overlap with ground tiles; platforms never block x
///
/// Returns true when a wall stopped the body.
pub fn collide_x(body: &mut Body, solids: &[SolidTile]) -> bool {
    let mut blocked = false;
    for tile in solids {
        if tile.kind == SolidKind::Platform {
            continue;
        }
        let t = tile.rect();
        if !body.rect().overlaps(&t, 0.0) {
            continue;
        }
        if body.vel.x > 0.0 {
            body.pos.x = t.pos.x - body.size.x;
        } else if body.vel.x < 0.0 {
            body.pos.x = t.right();
        }
        body.vel.x = 0.0;
        blocked = true;
    }
    blocked
}

/// Resolve vertical overlap, reporting every tile landed on or bumped
///
/// The caller resets `on_ground` before moving; this only ever sets it.
pub fn collide_y(body: &mut Body, solids: &[SolidTile], platforms: PlatformRule) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for tile in solids {
        let t = tile.rect();
        if !body.rect().overlaps(&t, 0.0) {
            continue;
        }

        if tile.kind == SolidKind::Platform {
            if let PlatformRule::OneWay { prev_y } = platforms {
                let prev_bottom = prev_y + body.size.y;
                if body.vel.y > 0.0 && prev_bottom <= t.pos.y + PLATFORM_EPSILON {
                    body.pos.y = t.pos.y - body.size.y;
                    body.vel.y = 0.0;
                    body.on_ground = true;
                    contacts.push(Contact::Landed(tile.id));
                }
            }
            continue;
        }

        if body.vel.y > 0.0 {
            body.pos.y = t.pos.y - body.size.y;
            body.vel.y = 0.0;
            body.on_ground = true;
            contacts.push(Contact::Landed(tile.id));
        } else {
            body.pos.y = t.bottom();
            body.vel.y = 0.0;
            contacts.push(Contact::Bumped(tile.id));
        }
    }
    contacts
}

/// True when a 2×2 probe at `point` touches a ground tile
pub fn ground_probe(solids: &[SolidTile], point: Vec2) -> bool {
    let probe = Rect::new(point, Vec2::splat(2.0));
    solids
        .iter()
        .any(|t| t.kind != SolidKind::Platform && probe.overlaps(&t.rect(), 0.0))
}

/// First ground tile overlapping `rect`, if any
pub fn first_ground_overlap<'a>(solids: &'a [SolidTile], rect: &Rect) -> Option<&'a SolidTile> {
    solids
        .iter()
        .find(|t| t.kind != SolidKind::Platform && rect.overlaps(&t.rect(), 0.0))
}
