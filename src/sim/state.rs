//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one owned [`GameState`]:
//! session bookkeeping (level, score, lives), the entity store for the active
//! level, the camera, and the seeded RNG. Entity containers are arenas that
//! are only replaced wholesale on level regeneration; dead enemies and
//! collected coins stay in place and are filtered at iteration time.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::level::GeneratorConfig;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No level built yet
    Loading,
    /// Active gameplay
    Playing,
    /// Player was hit or fell; waiting to respawn
    PlayerHurt,
    /// Flag reached; waiting to advance
    LevelComplete,
    /// Out of lives; waiting to restart from level 1
    GameOver,
}

/// Solid tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Ground,
    /// Turns into Ground and releases a coin when hit from below
    QuestionBlock,
}

/// A solid tile. Position never changes after placement; only `kind` does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub col: u32,
    pub row: u32,
    pub aabb: Aabb,
    pub kind: TileKind,
}

impl Tile {
    pub fn new(col: u32, row: u32, kind: TileKind) -> Self {
        Self {
            col,
            row,
            aabb: Aabb::from_cell(col, row),
            kind,
        }
    }
}

/// Vertical pop of a coin released from a question block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoinBounce {
    pub vy: f32,
    /// Y the coin settles back to
    pub rest_y: f32,
}

/// A coin pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub aabb: Aabb,
    pub collected: bool,
    pub bounce: Option<CoinBounce>,
}

impl Coin {
    /// Coin centered in a grid cell
    pub fn in_cell(col: u32, row: u32) -> Self {
        let cell = Aabb::from_cell(col, row);
        let offset = (TILE_SIZE - COIN_SIZE) / 2.0;
        Self {
            aabb: Aabb::new(
                cell.left() + offset,
                cell.top() + offset,
                COIN_SIZE,
                COIN_SIZE,
            ),
            collected: false,
            bounce: None,
        }
    }

    /// Coin popping out of the top of a bumped block
    pub fn popped_from(block: &Aabb) -> Self {
        let mut coin = Self::in_cell(
            (block.left() / TILE_SIZE) as u32,
            (block.top() / TILE_SIZE) as u32,
        );
        let rest_y = block.top() - COIN_SIZE - 4.0;
        coin.aabb.pos.y = rest_y;
        coin.bounce = Some(CoinBounce {
            vy: -COIN_BOUNCE_SPEED,
            rest_y,
        });
        coin
    }

    /// Advance the bounce arc, settling at `rest_y`
    pub fn update_bounce(&mut self, dt: f32) {
        if let Some(bounce) = self.bounce.as_mut() {
            bounce.vy += GRAVITY * dt;
            self.aabb.pos.y += bounce.vy * dt;
            if bounce.vy > 0.0 && self.aabb.pos.y >= bounce.rest_y {
                self.aabb.pos.y = bounce.rest_y;
                self.bounce = None;
            }
        }
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Walker,
    Big,
    Flyer,
    Jumper,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Walker,
        EnemyKind::Big,
        EnemyKind::Flyer,
        EnemyKind::Jumper,
    ];

    /// Kinds cycle through spawn order
    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Box size in world units
    pub fn size(&self) -> Vec2 {
        match self {
            EnemyKind::Walker => Vec2::new(32.0, 28.0),
            EnemyKind::Big => Vec2::new(44.0, 40.0),
            EnemyKind::Flyer => Vec2::new(30.0, 24.0),
            EnemyKind::Jumper => Vec2::new(30.0, 30.0),
        }
    }

    /// Nominal horizontal speed (units/s)
    pub fn speed(&self) -> f32 {
        match self {
            EnemyKind::Walker => 70.0,
            EnemyKind::Big => 45.0,
            EnemyKind::Flyer => 80.0,
            EnemyKind::Jumper => 90.0,
        }
    }
}

/// Kind-specific mutable state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyBrain {
    /// Walker and Big: no extra state
    Patrol,
    /// Sinusoidal bob around `base_y`
    Flyer { base_y: f32, phase: f32, rate: f32 },
    /// Countdown to the next hop
    Jumper { timer: f32, vy: f32 },
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub aabb: Aabb,
    /// -1.0 (left) or 1.0 (right)
    pub dir: f32,
    pub speed: f32,
    pub alive: bool,
    pub kind: EnemyKind,
    pub brain: EnemyBrain,
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub aabb: Aabb,
    pub vel: Vec2,
    pub grounded: bool,
    /// Seconds left in which a jump is still honored after leaving the ground
    pub coyote: f32,
    pub alive: bool,
    /// Bottom edge before this tick's movement (stomp detection)
    pub prev_bottom: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            aabb: Aabb::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            grounded: false,
            coyote: 0.0,
            alive: true,
            prev_bottom: PLAYER_START_Y + PLAYER_HEIGHT,
        }
    }
}

impl Player {
    /// Back to the level start, standing still
    pub fn respawn(&mut self) {
        *self = Self::default();
    }
}

/// Goal marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub aabb: Aabb,
}

/// Viewport into the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Top-left corner in world units
    pub pos: Vec2,
    /// Viewport size
    pub size: Vec2,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::new(width, height),
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Deferred state change run from inside the tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    Respawn,
    NextLevel,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingTransition {
    pub kind: TransitionKind,
    /// Seconds until it fires
    pub remaining: f32,
}

/// Things that happened during a tick, for audio and HUD flashes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    CoinCollected,
    BlockBumped,
    Stomp,
    PlayerHurt,
    FellOff,
    LevelComplete,
    GameOver,
    LevelStarted { level: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Probabilities used when building levels
    pub generator: GeneratorConfig,
    /// Current level, 1..=MAX_LEVEL
    pub level: u32,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    pub pending: Option<PendingTransition>,
    /// Simulation tick counter
    pub time_ticks: u64,

    /// Grid dimensions of the active level
    pub cols: u32,
    pub rows: u32,
    pub tiles: Vec<Tile>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    pub flag: Option<Flag>,
    pub player: Player,
    pub camera: Camera,

    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session with the given seed and build level 1
    pub fn new(seed: u64) -> Self {
        Self::with_viewport(seed, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }

    /// Create a session with a fresh random seed
    pub fn unseeded() -> Self {
        Self::new(rand::random())
    }

    /// Create a session with a custom viewport size
    pub fn with_viewport(seed: u64, width: f32, height: f32) -> Self {
        let mut state = Self::empty(seed, width, height);
        state.regenerate_level();
        state
    }

    /// Session in the `Loading` phase with no level built
    pub fn empty(seed: u64, width: f32, height: f32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            generator: GeneratorConfig::default(),
            level: 1,
            score: 0,
            lives: START_LIVES,
            phase: GamePhase::Loading,
            pending: None,
            time_ticks: 0,
            cols: 0,
            rows: 0,
            tiles: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            flag: None,
            player: Player::default(),
            camera: Camera::new(width, height),
            events: Vec::new(),
        }
    }

    /// World size in units
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.cols as f32, self.rows as f32) * TILE_SIZE
    }

    /// Y beyond which the player counts as fallen out of the world
    pub fn fall_off_y(&self) -> f32 {
        self.camera.size.y + FALL_OFF_MARGIN
    }

    pub fn alive_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    /// Whether a solid tile occupies a grid cell
    pub fn solid_at(&self, col: u32, row: u32) -> bool {
        self.tiles.iter().any(|t| t.col == col && t.row == row)
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_kind_cycles() {
        assert_eq!(EnemyKind::for_index(0), EnemyKind::Walker);
        assert_eq!(EnemyKind::for_index(1), EnemyKind::Big);
        assert_eq!(EnemyKind::for_index(2), EnemyKind::Flyer);
        assert_eq!(EnemyKind::for_index(3), EnemyKind::Jumper);
        assert_eq!(EnemyKind::for_index(4), EnemyKind::Walker);
    }

    #[test]
    fn test_player_start_on_ground_strip() {
        let player = Player::default();
        assert_eq!(player.aabb.bottom(), (GRID_ROWS - 2) as f32 * TILE_SIZE);
        assert!(player.alive);
        assert_eq!(player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_coin_bounce_settles() {
        let block = Aabb::from_cell(5, 6);
        let mut coin = Coin::popped_from(&block);
        let rest = coin.aabb.top();
        assert!(coin.bounce.is_some());

        for _ in 0..240 {
            coin.update_bounce(SIM_DT);
        }
        assert!(coin.bounce.is_none());
        assert_eq!(coin.aabb.top(), rest);
        assert!(coin.aabb.bottom() <= block.top());
    }

    #[test]
    fn test_unseeded_session_can_be_replayed() {
        let state = GameState::unseeded();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies.len(), 5);

        let replay = GameState::new(state.seed);
        assert_eq!(replay.tiles.len(), state.tiles.len());
        assert_eq!(replay.coins.len(), state.coins.len());
        for (a, b) in replay.enemies.iter().zip(&state.enemies) {
            assert_eq!(a.aabb, b.aabb);
        }
    }

    #[test]
    fn test_new_session_defaults() {
        let state = GameState::new(7);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.seed, 7);
    }
}
