//! Collision detection and response against the tile grid
//!
//! Movement is integrated one axis at a time: move horizontally and push out
//! of any overlapped tile along x, then move vertically and push out along y.
//! Resolving the axes separately keeps corners from snagging and makes the
//! landing/head-bump distinction a simple sign test on the vertical velocity.

use super::aabb::Aabb;
use super::state::Tile;
use crate::consts::STOMP_TOLERANCE;

/// Slack when comparing a previous bottom edge against a tile top
const LANDING_EPSILON: f32 = 0.01;

/// Result of resolving vertical movement
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VerticalHit {
    /// Came down onto a tile
    pub landed: bool,
    /// Index of the tile hit from below, if any
    pub ceiling: Option<usize>,
}

/// Push `aabb` out of overlapped tiles along x after it moved with `vx`.
///
/// Zeroes `vx` and returns true on contact. Without horizontal velocity
/// there is no direction of approach and nothing is resolved.
pub fn resolve_horizontal(aabb: &mut Aabb, vx: &mut f32, tiles: &[Tile]) -> bool {
    if *vx == 0.0 {
        return false;
    }
    let mut hit = false;
    for tile in tiles {
        if !aabb.overlaps(&tile.aabb) {
            continue;
        }
        if *vx > 0.0 {
            aabb.pos.x = tile.aabb.left() - aabb.size.x;
        } else {
            aabb.pos.x = tile.aabb.right();
        }
        hit = true;
    }
    if hit {
        *vx = 0.0;
    }
    hit
}

/// Push `aabb` out of overlapped tiles along y after it moved with `vy`.
///
/// Moving down onto a tile whose top was at or below `prev_bottom` is a
/// landing; moving up into a tile is a head bump.
pub fn resolve_vertical(aabb: &mut Aabb, vy: &mut f32, prev_bottom: f32, tiles: &[Tile]) -> VerticalHit {
    let mut result = VerticalHit::default();
    for (index, tile) in tiles.iter().enumerate() {
        if !aabb.overlaps(&tile.aabb) {
            continue;
        }
        if *vy > 0.0 && prev_bottom <= tile.aabb.top() + LANDING_EPSILON {
            aabb.pos.y = tile.aabb.top() - aabb.size.y;
            *vy = 0.0;
            result.landed = true;
        } else if *vy < 0.0 {
            aabb.pos.y = tile.aabb.bottom();
            *vy = 0.0;
            result.ceiling.get_or_insert(index);
        }
    }
    result
}

/// How the player touched an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Came down on top of it
    Stomp,
    /// Any other touch
    SideHit,
}

/// Classify a player/enemy touch, or `None` if the boxes don't overlap.
///
/// A stomp needs the player falling and its bottom edge from before this
/// tick at most `STOMP_TOLERANCE` below the enemy's top.
pub fn classify_contact(player: &Aabb, player_vy: f32, prev_bottom: f32, enemy: &Aabb) -> Option<Contact> {
    if !player.overlaps(enemy) {
        return None;
    }
    if player_vy > 0.0 && prev_bottom <= enemy.top() + STOMP_TOLERANCE {
        Some(Contact::Stomp)
    } else {
        Some(Contact::SideHit)
    }
}
