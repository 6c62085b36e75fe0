//! Demo input source
//!
//! A simple scripted player for the headless demo and attract loops: run
//! right, hop over gaps, walls and nearby enemies. It reads the state the
//! same way a renderer would and never touches it.

use crate::consts::TILE_SIZE;
use crate::sim::{GamePhase, GameState, TickInput};

/// How far ahead (world units) an enemy triggers a jump
const ENEMY_LOOKAHEAD: f32 = 90.0;

/// Choose input for the next tick
pub fn drive(state: &GameState) -> TickInput {
    if state.phase != GamePhase::Playing || !state.player.alive {
        return TickInput::default();
    }

    let player = &state.player;
    let jump = if player.grounded {
        gap_ahead(state) || wall_ahead(state) || enemy_ahead(state)
    } else {
        // Hold through the rise for full jump height
        player.vel.y < 0.0
    };

    TickInput {
        left: false,
        right: true,
        jump,
    }
}

/// Column just past the player's leading edge
fn col_ahead(state: &GameState) -> u32 {
    let x = state.player.aabb.right() + TILE_SIZE * 0.5;
    (x / TILE_SIZE).max(0.0) as u32
}

fn gap_ahead(state: &GameState) -> bool {
    let col = col_ahead(state);
    let ground_row = state.rows.saturating_sub(2);
    col < state.cols && !state.solid_at(col, ground_row)
}

fn wall_ahead(state: &GameState) -> bool {
    let col = col_ahead(state);
    let aabb = state.player.aabb;
    let top_row = (aabb.top() / TILE_SIZE).max(0.0) as u32;
    let bottom_row = ((aabb.bottom() - 1.0) / TILE_SIZE).max(0.0) as u32;
    (top_row..=bottom_row).any(|row| state.solid_at(col, row))
}

fn enemy_ahead(state: &GameState) -> bool {
    let aabb = state.player.aabb;
    state.enemies.iter().filter(|e| e.alive).any(|e| {
        let dx = e.aabb.left() - aabb.right();
        let same_band = e.aabb.bottom() > aabb.top() - TILE_SIZE && e.aabb.top() < aabb.bottom();
        (0.0..=ENEMY_LOOKAHEAD).contains(&dx) && same_band
    })
}
