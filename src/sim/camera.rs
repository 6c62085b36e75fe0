//! Follow camera
//!
//! Eases toward the player each tick with a framerate-independent factor
//! `min(1, CAMERA_EASE * dt)` and never shows anything outside the world.

use glam::Vec2;

use super::state::Camera;
use crate::consts::CAMERA_EASE;

impl Camera {
    /// Ease toward centering `focus`, then clamp to `world`
    pub fn follow(&mut self, focus: Vec2, world: Vec2, dt: f32) {
        let target = focus - self.size * 0.5;
        let t = (CAMERA_EASE * dt).min(1.0);
        self.pos += (target - self.pos) * t;
        self.clamp_to(world);
    }

    /// Keep the viewport inside `[0, world - size]` on both axes
    pub fn clamp_to(&mut self, world: Vec2) {
        let max = (world - self.size).max(Vec2::ZERO);
        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }

    /// Back to the world origin
    pub fn reset(&mut self) {
        self.pos = Vec2::ZERO;
    }
}
