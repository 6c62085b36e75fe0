//! Enemy behavior
//!
//! Each kind is a small independent update rule selected by the `EnemyKind`
//! tag; kind-specific state lives in `EnemyBrain`.
//! - Walker / Big: patrol at fixed speed, turn around on any tile contact.
//!   No gravity, so they walk straight over gaps.
//! - Flyer: horizontal drift with a sinusoidal bob; ignores tiles.
//! - Jumper: slow drift plus periodic hops, with gravity and landings.

use glam::Vec2;
use rand::Rng;

use super::aabb::Aabb;
use super::collision::{resolve_horizontal, resolve_vertical};
use super::level::EnemySpawn;
use super::state::{Enemy, EnemyBrain, EnemyKind, Tile};
use crate::consts::{GRAVITY, MAX_FALL_SPEED, TILE_SIZE};

/// Flyers hover this far above the ground
const FLYER_HOVER: f32 = 2.0 * TILE_SIZE;
/// Vertical bob amplitude
const FLYER_AMPLITUDE: f32 = 24.0;
/// Radians of bob per unit of phase
const FLYER_BOB_FREQ: f32 = 3.0;
/// Jumper horizontal speed as a fraction of its nominal speed
const JUMPER_DRIFT: f32 = 0.6;

/// Seconds until a jumper hops again
pub fn jumper_rearm<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(1.0..=2.8)
}

/// Upward hop velocity for a jumper
pub fn jumper_impulse<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    -rng.random_range(300.0..=480.0)
}

impl Enemy {
    /// Build an enemy standing on `spawn.surface_y`, centered in its column.
    /// Per-enemy random parameters are drawn here, once.
    pub fn spawn<R: Rng + ?Sized>(spawn: &EnemySpawn, rng: &mut R) -> Self {
        let kind = spawn.kind;
        let size = kind.size();
        let x = spawn.col as f32 * TILE_SIZE + (TILE_SIZE - size.x) / 2.0;
        let mut y = spawn.surface_y - size.y;

        let brain = match kind {
            EnemyKind::Walker | EnemyKind::Big => EnemyBrain::Patrol,
            EnemyKind::Flyer => {
                y -= FLYER_HOVER;
                EnemyBrain::Flyer {
                    base_y: y,
                    phase: rng.random_range(0.0..std::f32::consts::TAU),
                    rate: rng.random_range(0.8..=1.4),
                }
            }
            EnemyKind::Jumper => EnemyBrain::Jumper {
                timer: jumper_rearm(rng),
                vy: 0.0,
            },
        };

        Self {
            aabb: Aabb::new(x, y, size.x, size.y),
            dir: -1.0,
            speed: kind.speed(),
            alive: true,
            kind,
            brain,
        }
    }

    /// Advance one step. `world_width` bounds horizontal travel.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, tiles: &[Tile], world_width: f32, rng: &mut R) {
        if !self.alive {
            return;
        }
        match self.brain {
            EnemyBrain::Patrol => self.patrol(dt, tiles),
            EnemyBrain::Flyer { .. } => self.fly(dt),
            EnemyBrain::Jumper { .. } => self.hop(dt, tiles, rng),
        }
        self.bounce_off_world_edges(world_width);
    }

    fn patrol(&mut self, dt: f32, tiles: &[Tile]) {
        let mut vx = self.dir * self.speed;
        self.aabb.pos.x += vx * dt;
        if resolve_horizontal(&mut self.aabb, &mut vx, tiles) {
            self.dir = -self.dir;
        }
    }

    fn fly(&mut self, dt: f32) {
        if let EnemyBrain::Flyer { base_y, phase, rate } = &mut self.brain {
            *phase += dt * *rate;
            self.aabb.pos.x += self.dir * self.speed * dt;
            self.aabb.pos.y = *base_y + (*phase * FLYER_BOB_FREQ).sin() * FLYER_AMPLITUDE;
        }
    }

    fn hop<R: Rng + ?Sized>(&mut self, dt: f32, tiles: &[Tile], rng: &mut R) {
        let EnemyBrain::Jumper { mut timer, mut vy } = self.brain else {
            return;
        };

        timer -= dt;
        if timer <= 0.0 {
            vy = jumper_impulse(rng);
            timer = jumper_rearm(rng);
        }

        let mut vx = self.dir * self.speed * JUMPER_DRIFT;
        self.aabb.pos.x += vx * dt;
        if resolve_horizontal(&mut self.aabb, &mut vx, tiles) {
            self.dir = -self.dir;
        }

        vy = (vy + GRAVITY * dt).min(MAX_FALL_SPEED);
        let prev_bottom = self.aabb.bottom();
        self.aabb.pos.y += vy * dt;
        resolve_vertical(&mut self.aabb, &mut vy, prev_bottom, tiles);

        self.brain = EnemyBrain::Jumper { timer, vy };
    }

    fn bounce_off_world_edges(&mut self, world_width: f32) {
        let max_x = (world_width - self.aabb.size.x).max(0.0);
        if self.aabb.pos.x < 0.0 {
            self.aabb.pos.x = 0.0;
            self.dir = 1.0;
        } else if self.aabb.pos.x > max_x {
            self.aabb.pos.x = max_x;
            self.dir = -1.0;
        }
    }

    /// Current velocity, for renderers that lean or flip sprites
    pub fn velocity(&self) -> Vec2 {
        let vy = match self.brain {
            EnemyBrain::Jumper { vy, .. } => vy,
            _ => 0.0,
        };
        let drift = if self.kind == EnemyKind::Jumper {
            JUMPER_DRIFT
        } else {
            1.0
        };
        Vec2::new(self.dir * self.speed * drift, vy)
    }
}
