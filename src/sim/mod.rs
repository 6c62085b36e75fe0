//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - All randomness from the session's seeded RNG
//! - Entity containers replaced only on level regeneration
//! - No rendering or platform dependencies

pub mod aabb;
pub mod camera;
pub mod collision;
pub mod enemy;
pub mod level;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collision::{Contact, VerticalHit, classify_contact, resolve_horizontal, resolve_vertical};
pub use level::{EnemySpawn, GeneratorConfig, LevelLayout, generate, spawn_enemies};
pub use snapshot::{Hud, PlayerPose, Snapshot};
pub use state::{
    Camera, Coin, Enemy, EnemyBrain, EnemyKind, Flag, GameEvent, GamePhase, GameState,
    PendingTransition, Player, Tile, TileKind, TransitionKind,
};
pub use tick::{TickInput, tick};
