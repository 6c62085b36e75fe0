//! Tile Hopper - A side-scrolling tile platformer
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, enemies, level generation, session)
//! - `clock`: Fixed timestep accumulator
//! - `runner`: Host-facing driver that owns state, clock and input
//! - `autopilot`: Demo input source
//! - `settings`: Configuration

pub mod autopilot;
pub mod clock;
pub mod runner;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::FixedClock;
pub use runner::Runner;
pub use settings::{GeneratorConfig, Settings};
pub use sim::Aabb;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Longest frame delta fed to the accumulator (tab resume, stalls)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Tile edge length in world units
    pub const TILE_SIZE: f32 = 40.0;
    /// Grid height in tiles
    pub const GRID_ROWS: u32 = 12;
    /// Base grid width; each level adds `GRID_COLS_PER_LEVEL`
    pub const GRID_BASE_COLS: u32 = 40;
    pub const GRID_COLS_PER_LEVEL: u32 = 6;

    /// Default viewport
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 480.0;
    /// Distance below the viewport bottom at which the player is lost
    pub const FALL_OFF_MARGIN: f32 = 300.0;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 28.0;
    pub const PLAYER_HEIGHT: f32 = 36.0;
    /// Start position (top-left), standing on the ground strip
    pub const PLAYER_START_X: f32 = 2.0 * TILE_SIZE;
    pub const PLAYER_START_Y: f32 = (GRID_ROWS - 2) as f32 * TILE_SIZE - PLAYER_HEIGHT;

    /// Horizontal movement
    pub const RUN_ACCEL: f32 = 2800.0;
    pub const RUN_MAX_SPEED: f32 = 300.0;
    /// Per-frame friction at 60 fps, applied as `FRICTION^(60 dt)`
    pub const FRICTION: f32 = 0.85;

    /// Vertical movement
    pub const GRAVITY: f32 = 1500.0;
    /// Gravity multiplier while rising with jump released
    pub const JUMP_RELEASE_GRAVITY: f32 = 1.55;
    pub const JUMP_POWER: f32 = 650.0;
    pub const MAX_FALL_SPEED: f32 = 1200.0;
    /// Grace window after leaving the ground (seconds)
    pub const COYOTE_TIME: f32 = 0.12;

    /// Stomp detection tolerance and rebound
    pub const STOMP_TOLERANCE: f32 = 4.0;
    pub const STOMP_BOUNCE: f32 = 0.45;

    /// Scoring
    pub const COIN_SCORE: u64 = 1;
    pub const STOMP_SCORE: u64 = 2;

    /// Session
    pub const START_LIVES: u8 = 3;
    pub const MAX_LEVEL: u32 = 20;
    pub const ENEMIES_PER_LEVEL: u32 = 5;

    /// Narrative delays (seconds)
    pub const RESPAWN_DELAY: f32 = 1.0;
    pub const GAME_OVER_DELAY: f32 = 2.0;
    pub const LEVEL_COMPLETE_DELAY: f32 = 1.2;

    /// Camera easing rate (per second)
    pub const CAMERA_EASE: f32 = 6.0;

    /// Coin box and question-block bounce
    pub const COIN_SIZE: f32 = 16.0;
    pub const COIN_BOUNCE_SPEED: f32 = 420.0;
}
