//! Procedural level generation
//!
//! A level is a fixed-height tile grid that grows wider with the level index:
//! a two-tile ground strip with occasional gaps, floating platforms carrying
//! coins, a few question blocks, a flag near the right edge, and enemy spawn
//! points on solid ground. Generation draws from the caller's RNG so a seeded
//! RNG gives reproducible layouts. Termination is guaranteed (fixed loop
//! counts); solvability is not.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::state::{EnemyKind, Flag, Tile, TileKind};
use crate::consts::*;

/// Columns at each end of the level where ground is never removed
const SAFE_START_COLS: u32 = 7;
const SAFE_END_COLS: u32 = 9;
/// Columns at each end where no enemy spawns
const ENEMY_EDGE_BUFFER: u32 = 6;
/// Upper bound on platforms per level
const MAX_PLATFORMS: u32 = 20;

/// Generation probabilities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Chance a middle ground column is left open
    pub gap_chance: f64,
    /// Chance a platform carries coins at all
    pub coin_platform_chance: f64,
    /// Chance per platform tile of a coin, given the platform carries coins
    pub coin_tile_chance: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            gap_chance: 0.04,
            coin_platform_chance: 0.6,
            coin_tile_chance: 0.6,
        }
    }
}

impl GeneratorConfig {
    /// Probabilities clamped into [0, 1]
    pub fn sanitized(&self) -> Self {
        let clamp = |p: f64| if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            gap_chance: clamp(self.gap_chance),
            coin_platform_chance: clamp(self.coin_platform_chance),
            coin_tile_chance: clamp(self.coin_tile_chance),
        }
    }
}

/// Where an enemy starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub col: u32,
    /// Y of the ground surface the enemy stands on
    pub surface_y: f32,
}

/// Output of the generator: static grid plus spawn points
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub level: u32,
    pub cols: u32,
    pub rows: u32,
    /// Row-major: index = row * cols + col
    cells: Vec<Option<TileKind>>,
    /// Cells holding a coin
    pub coins: Vec<(u32, u32)>,
    /// Cell of the flag marker
    pub flag: Option<(u32, u32)>,
    pub enemy_spawns: Vec<EnemySpawn>,
}

/// Grid width for a level
pub fn cols_for_level(level: u32) -> u32 {
    GRID_BASE_COLS + level * GRID_COLS_PER_LEVEL
}

/// Number of floating platforms for a level
pub fn platform_count(level: u32) -> u32 {
    (6 + (level as f32 * 1.2).floor() as u32).min(MAX_PLATFORMS)
}

impl LevelLayout {
    /// Empty grid of the given size
    pub fn blank(level: u32, cols: u32, rows: u32) -> Self {
        Self {
            level,
            cols,
            rows,
            cells: vec![None; (cols * rows) as usize],
            coins: Vec::new(),
            flag: None,
            enemy_spawns: Vec::new(),
        }
    }

    /// Unbroken ground, a flag at the end, nothing else
    pub fn flat(level: u32, cols: u32) -> Self {
        let mut layout = Self::blank(level, cols, GRID_ROWS);
        for col in 0..cols {
            layout.set_ground_column(col);
        }
        layout.place_flag();
        layout
    }

    /// Row whose top is the main walking surface
    pub fn ground_row(&self) -> u32 {
        self.rows - 2
    }

    pub fn cell(&self, col: u32, row: u32) -> Option<TileKind> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells[(row * self.cols + col) as usize]
    }

    pub fn set(&mut self, col: u32, row: u32, kind: Option<TileKind>) {
        if col < self.cols && row < self.rows {
            self.cells[(row * self.cols + col) as usize] = kind;
        }
    }

    /// Ground row plus the row beneath it
    fn set_ground_column(&mut self, col: u32) {
        for row in self.ground_row()..self.rows {
            self.set(col, row, Some(TileKind::Ground));
        }
    }

    /// Two support tiles and the flag marker above them
    fn place_flag(&mut self) {
        let flag_col = self.cols.saturating_sub(3);
        for col in flag_col..self.cols.saturating_sub(1) {
            self.set_ground_column(col);
        }
        self.flag = Some((flag_col, self.ground_row() - 1));
    }

    /// Whether a column has solid ground on the walking row
    pub fn has_ground(&self, col: u32) -> bool {
        self.cell(col, self.ground_row()) == Some(TileKind::Ground)
    }

    /// Top of the highest Ground tile in a column, platforms included
    pub fn surface_y(&self, col: u32) -> Option<f32> {
        (0..self.rows)
            .find(|&row| self.cell(col, row) == Some(TileKind::Ground))
            .map(|row| row as f32 * TILE_SIZE)
    }

    /// Columns enemies may spawn in
    pub fn spawn_columns(&self) -> Vec<u32> {
        if self.cols <= 2 * ENEMY_EDGE_BUFFER {
            return Vec::new();
        }
        (ENEMY_EDGE_BUFFER..self.cols - ENEMY_EDGE_BUFFER)
            .filter(|&col| self.has_ground(col))
            .collect()
    }

    /// Flattened tile list in row-major order
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some(kind) = self.cell(col, row) {
                    tiles.push(Tile::new(col, row, kind));
                }
            }
        }
        tiles
    }

    /// Flag pole standing on the ground with its base in the marker cell
    pub fn flag_entity(&self) -> Option<Flag> {
        self.flag.map(|(col, row)| {
            let cell = Aabb::from_cell(col, row);
            let pole_width = 12.0;
            let height = TILE_SIZE * 3.0;
            Flag {
                aabb: Aabb::new(
                    cell.left() + (TILE_SIZE - pole_width) / 2.0,
                    cell.bottom() - height,
                    pole_width,
                    height,
                ),
            }
        })
    }
}

/// Build the layout for `level`
pub fn generate<R: Rng + ?Sized>(level: u32, config: &GeneratorConfig, rng: &mut R) -> LevelLayout {
    let config = config.sanitized();
    let level = level.max(1);
    let cols = cols_for_level(level);
    let mut layout = LevelLayout::blank(level, cols, GRID_ROWS);
    let ground_row = layout.ground_row();

    // Ground strip with hazards in the middle section only
    let gap_zone = SAFE_START_COLS..=cols - SAFE_END_COLS;
    for col in 0..cols {
        let gap = gap_zone.contains(&col) && rng.random_bool(config.gap_chance);
        if !gap {
            layout.set_ground_column(col);
        }
    }

    // Floating platforms, some carrying coins
    for _ in 0..platform_count(level) {
        let width = rng.random_range(1..=4u32);
        let start = rng.random_range(8..=cols - 18);
        let row = ground_row - rng.random_range(2..=6u32);
        let with_coins = rng.random_bool(config.coin_platform_chance);
        for col in start..(start + width).min(cols) {
            layout.set(col, row, Some(TileKind::Ground));
            if with_coins && rng.random_bool(config.coin_tile_chance) {
                layout.coins.push((col, row - 1));
            }
        }
    }

    // Question blocks
    for _ in 0..level / 2 {
        let col = rng.random_range(10..=cols - 20);
        let row = ground_row - rng.random_range(3..=5u32);
        layout.set(col, row, Some(TileKind::QuestionBlock));
    }

    layout.place_flag();

    // Later platforms may have covered earlier coins
    let mut coins = std::mem::take(&mut layout.coins);
    coins.retain(|&(col, row)| layout.cell(col, row).is_none());
    coins.sort_unstable();
    coins.dedup();
    layout.coins = coins;

    spawn_enemies(&mut layout, rng);

    log::info!(
        "Level {}: {}x{} grid, {} coins, {} enemies",
        level,
        cols,
        layout.rows,
        layout.coins.len(),
        layout.enemy_spawns.len()
    );

    layout
}

/// Place `level * ENEMIES_PER_LEVEL` enemies on eligible columns, sampled
/// with replacement. A layout with no eligible column gets none.
pub fn spawn_enemies<R: Rng + ?Sized>(layout: &mut LevelLayout, rng: &mut R) {
    let eligible = layout.spawn_columns();
    let enemy_count = layout.level * ENEMIES_PER_LEVEL;
    if eligible.is_empty() {
        log::warn!("Level {}: no ground to spawn {} enemies on", layout.level, enemy_count);
        return;
    }
    for i in 0..enemy_count as usize {
        let col = eligible[rng.random_range(0..eligible.len())];
        if let Some(surface_y) = layout.surface_y(col) {
            layout.enemy_spawns.push(EnemySpawn {
                kind: EnemyKind::for_index(i),
                col,
                surface_y,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn no_gaps() -> GeneratorConfig {
        GeneratorConfig {
            gap_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_level_one_dimensions() {
        let mut rng = Pcg32::seed_from_u64(1);
        let layout = generate(1, &GeneratorConfig::default(), &mut rng);
        assert_eq!(layout.cols, 46);
        assert_eq!(layout.rows, 12);
        assert_eq!(layout.enemy_spawns.len(), 5);
    }

    #[test]
    fn test_platform_count_caps() {
        assert_eq!(platform_count(1), 7);
        assert_eq!(platform_count(5), 12);
        assert_eq!(platform_count(20), 20);
    }

    #[test]
    fn test_no_gaps_gives_full_ground() {
        let mut rng = Pcg32::seed_from_u64(3);
        let layout = generate(4, &no_gaps(), &mut rng);
        for col in 0..layout.cols {
            assert!(layout.has_ground(col), "gap at column {}", col);
        }
    }

    #[test]
    fn test_certain_gaps_keep_safe_ends() {
        let mut rng = Pcg32::seed_from_u64(3);
        let config = GeneratorConfig {
            gap_chance: 1.0,
            ..Default::default()
        };
        let layout = generate(2, &config, &mut rng);
        for col in 0..SAFE_START_COLS {
            assert!(layout.has_ground(col));
        }
        for col in layout.cols - SAFE_END_COLS + 1..layout.cols {
            assert!(layout.has_ground(col));
        }
        assert!(!layout.has_ground(20));
        // Spawns only on remaining ground
        for spawn in &layout.enemy_spawns {
            assert!(layout.has_ground(spawn.col));
        }
    }

    #[test]
    fn test_flag_and_supports() {
        let mut rng = Pcg32::seed_from_u64(11);
        let layout = generate(3, &GeneratorConfig::default(), &mut rng);
        let ground_row = layout.ground_row();
        assert_eq!(layout.flag, Some((layout.cols - 3, ground_row - 1)));
        assert!(layout.has_ground(layout.cols - 3));
        assert!(layout.has_ground(layout.cols - 2));

        let flag = layout.flag_entity().unwrap();
        assert_eq!(flag.aabb.bottom(), ground_row as f32 * TILE_SIZE);
    }

    #[test]
    fn test_question_blocks_per_level() {
        let mut rng = Pcg32::seed_from_u64(5);
        let layout = generate(6, &GeneratorConfig::default(), &mut rng);
        let blocks = layout
            .tiles()
            .iter()
            .filter(|t| t.kind == TileKind::QuestionBlock)
            .count();
        // Two blocks can land in the same cell
        assert!((1..=3).contains(&blocks));
    }

    #[test]
    fn test_coins_never_inside_tiles() {
        let mut rng = Pcg32::seed_from_u64(21);
        let layout = generate(8, &GeneratorConfig::default(), &mut rng);
        for &(col, row) in &layout.coins {
            assert!(layout.cell(col, row).is_none());
        }
    }

    #[test]
    fn test_enemy_kinds_cycle_and_stand_on_ground() {
        let mut rng = Pcg32::seed_from_u64(9);
        let layout = generate(2, &GeneratorConfig::default(), &mut rng);
        for (i, spawn) in layout.enemy_spawns.iter().enumerate() {
            assert_eq!(spawn.kind, EnemyKind::for_index(i));
            assert!(spawn.col >= ENEMY_EDGE_BUFFER);
            assert!(spawn.col < layout.cols - ENEMY_EDGE_BUFFER);
            let top_row = (0..layout.rows)
                .find(|&row| layout.cell(spawn.col, row) == Some(TileKind::Ground))
                .unwrap();
            assert_eq!(spawn.surface_y, top_row as f32 * TILE_SIZE);
        }
    }

    #[test]
    fn test_enemy_stands_on_platform_above_ground() {
        let mut layout = LevelLayout::flat(1, 46);
        let platform_row = layout.ground_row() - 3;
        for col in 0..layout.cols {
            layout.set(col, platform_row, Some(TileKind::Ground));
        }
        spawn_enemies(&mut layout, &mut Pcg32::seed_from_u64(3));
        assert_eq!(layout.enemy_spawns.len(), 5);
        for spawn in &layout.enemy_spawns {
            assert_eq!(spawn.surface_y, platform_row as f32 * TILE_SIZE);
        }
    }

    #[test]
    fn test_no_spawn_columns_skips_enemies() {
        let mut layout = LevelLayout::blank(3, 46, GRID_ROWS);
        layout.place_flag();
        spawn_enemies(&mut layout, &mut Pcg32::seed_from_u64(1));
        assert!(layout.enemy_spawns.is_empty());

        // Too narrow for any column outside the edge buffers
        let mut narrow = LevelLayout::flat(2, 2 * ENEMY_EDGE_BUFFER);
        spawn_enemies(&mut narrow, &mut Pcg32::seed_from_u64(1));
        assert!(narrow.enemy_spawns.is_empty());
    }

    #[test]
    fn test_all_gap_ground_has_no_spawn_columns() {
        let mut layout = LevelLayout::blank(1, 46, GRID_ROWS);
        layout.place_flag();
        assert!(layout.spawn_columns().is_empty());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = GeneratorConfig::default();
        let a = generate(7, &config, &mut Pcg32::seed_from_u64(42));
        let b = generate(7, &config, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.cells, b.cells);
        assert_eq!(a.coins, b.coins);
        assert_eq!(a.enemy_spawns, b.enemy_spawns);
    }

    #[test]
    fn test_sanitized_config() {
        let config = GeneratorConfig {
            gap_chance: 3.0,
            coin_platform_chance: -1.0,
            coin_tile_chance: f64::NAN,
        }
        .sanitized();
        assert_eq!(config.gap_chance, 1.0);
        assert_eq!(config.coin_platform_chance, 0.0);
        assert_eq!(config.coin_tile_chance, 0.0);
    }

    proptest! {
        #[test]
        fn prop_dimensions_and_enemy_count(level in 1u32..=20, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let layout = generate(level, &GeneratorConfig::default(), &mut rng);
            prop_assert_eq!(layout.cols, 40 + 6 * level);
            prop_assert_eq!(layout.rows, 12);
            prop_assert_eq!(layout.enemy_spawns.len() as u32, 5 * level);
        }
    }
}
