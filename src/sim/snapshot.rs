//! Read-only views for renderers and HUD display
//!
//! The simulation never draws. Hosts take a [`Snapshot`] after each frame and
//! render it however they like, and show [`Hud`] values as text.

use glam::Vec2;
use serde::Serialize;

use super::aabb::Aabb;
use super::state::{Coin, Enemy, Flag, GamePhase, GameState, Tile};

/// Player pose for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerPose {
    pub aabb: Aabb,
    pub vel: Vec2,
    pub grounded: bool,
    pub alive: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub tiles: &'a [Tile],
    /// Includes collected coins; skip those when drawing
    pub coins: &'a [Coin],
    /// Includes dead enemies; skip those when drawing
    pub enemies: &'a [Enemy],
    pub player: PlayerPose,
    pub flag: Option<&'a Flag>,
    pub camera: Aabb,
    pub world: Vec2,
}

impl<'a> Snapshot<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            tiles: &state.tiles,
            coins: &state.coins,
            enemies: &state.enemies,
            player: PlayerPose {
                aabb: state.player.aabb,
                vel: state.player.vel,
                grounded: state.player.grounded,
                alive: state.player.alive,
            },
            flag: state.flag.as_ref(),
            camera: state.camera.rect(),
            world: state.world_size(),
        }
    }

    /// Tiles intersecting the camera
    pub fn visible_tiles(&self) -> impl Iterator<Item = &'a Tile> {
        let camera = self.camera;
        self.tiles.iter().filter(move |t| t.aabb.overlaps(&camera))
    }

    /// Uncollected coins
    pub fn live_coins(&self) -> impl Iterator<Item = &'a Coin> {
        self.coins.iter().filter(|c| !c.collected)
    }

    /// Enemies still alive
    pub fn live_enemies(&self) -> impl Iterator<Item = &'a Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    /// World position to screen position
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.camera.pos
    }
}

/// Values for the heads-up display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub level: u32,
    pub score: u64,
    pub lives: u8,
    pub alive_enemies: usize,
    pub phase: GamePhase,
}

impl Hud {
    pub fn of(state: &GameState) -> Self {
        Self {
            level: state.level,
            score: state.score,
            lives: state.lives,
            alive_enemies: state.alive_enemy_count(),
            phase: state.phase,
        }
    }

    /// One-line status text
    pub fn status_line(&self) -> String {
        format!(
            "Level {}  Score {}  Lives {}  Enemies {}",
            self.level, self.score, self.lives, self.alive_enemies
        )
    }

    /// Narrative message for the current phase, if any
    pub fn banner(&self) -> Option<&'static str> {
        match self.phase {
            GamePhase::Loading => Some("Loading..."),
            GamePhase::Playing => None,
            GamePhase::PlayerHurt => Some("Ouch!"),
            GamePhase::LevelComplete => Some("Level complete!"),
            GamePhase::GameOver => Some("Game over"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::LevelLayout;

    #[test]
    fn test_hud_status_line() {
        let mut state = GameState::new(1);
        state.score = 12;
        state.lives = 2;
        state.level = 3;
        let hud = Hud::of(&state);
        assert_eq!(
            hud.status_line(),
            format!("Level 3  Score 12  Lives 2  Enemies {}", state.alive_enemy_count())
        );
        assert_eq!(hud.banner(), None);
    }

    #[test]
    fn test_hud_counts_only_alive_enemies() {
        let mut state = GameState::new(2);
        let total = state.enemies.len();
        state.enemies[0].alive = false;
        assert_eq!(Hud::of(&state).alive_enemies, total - 1);
    }

    #[test]
    fn test_visible_tiles_culls_offscreen() {
        let mut state = GameState::new(4);
        state.load_layout(LevelLayout::flat(1, 46));
        let snapshot = Snapshot::of(&state);
        let visible = snapshot.visible_tiles().count();
        assert!(visible > 0);
        assert!(visible < snapshot.tiles.len());
        for tile in snapshot.visible_tiles() {
            assert!(tile.aabb.left() < 800.0);
        }
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(9);
        let json = serde_json::to_string(&Snapshot::of(&state)).unwrap();
        assert!(json.contains("\"tiles\""));
        assert!(json.contains("\"player\""));
    }
}
