//! Host-facing driver
//!
//! Owns the session, the fixed-timestep clock and the current input. Hosts
//! set input flags from whatever devices they have, call `frame` once per
//! rendered frame, then read a snapshot and the HUD.

use crate::clock::FixedClock;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Hud, Snapshot, TickInput, tick};

#[derive(Debug, Clone)]
pub struct Runner {
    pub state: GameState,
    clock: FixedClock,
    input: TickInput,
}

impl Runner {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            clock: FixedClock::default(),
            input: TickInput::default(),
        }
    }

    /// Build a session from settings, picking a random seed unless one is set
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut state = GameState::empty(seed, settings.viewport_width, settings.viewport_height);
        state.generator = settings.generator;
        state.regenerate_level();
        log::info!("Session started with seed {}", seed);
        Self::new(state)
    }

    pub fn set_input(&mut self, input: TickInput) {
        self.input = input;
    }

    pub fn input(&self) -> TickInput {
        self.input
    }

    /// Run as many fixed steps as `frame_dt` allows; returns the step count
    pub fn frame(&mut self, frame_dt: f32) -> u32 {
        let steps = self.clock.accumulate(frame_dt);
        for _ in 0..steps {
            tick(&mut self.state, &self.input, self.clock.dt());
        }
        steps
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::of(&self.state)
    }

    pub fn hud(&self) -> Hud {
        Hud::of(&self.state)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Rebuild the current level (restart button)
    pub fn regenerate_level(&mut self) {
        self.state.regenerate_level();
        self.clock.reset();
    }

    pub fn restart_level(&mut self) {
        self.state.restart_level();
        self.clock.reset();
    }

    pub fn next_level(&mut self) {
        self.state.next_level();
        self.clock.reset();
    }

    pub fn hurt_player(&mut self) {
        self.state.hurt_player();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::GamePhase;

    fn seeded(seed: u64) -> Settings {
        Settings {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_frame_runs_fixed_steps() {
        let mut runner = Runner::from_settings(&seeded(1));
        let mut total = 0;
        for _ in 0..60 {
            total += runner.frame(SIM_DT);
        }
        assert!((59..=60).contains(&total));
        assert_eq!(runner.state.time_ticks, total as u64);
    }

    #[test]
    fn test_seeded_sessions_match() {
        let a = Runner::from_settings(&seeded(77));
        let b = Runner::from_settings(&seeded(77));
        assert_eq!(a.state.tiles.len(), b.state.tiles.len());
        assert_eq!(a.state.coins.len(), b.state.coins.len());
        for (x, y) in a.state.enemies.iter().zip(&b.state.enemies) {
            assert_eq!(x.aabb, y.aabb);
            assert_eq!(x.brain, y.brain);
        }
    }

    #[test]
    fn test_lifecycle_entry_points() {
        let mut runner = Runner::from_settings(&seeded(3));
        runner.next_level();
        assert_eq!(runner.hud().level, 2);
        assert_eq!(runner.state.enemies.len(), 10);

        runner.hurt_player();
        assert_eq!(runner.hud().phase, GamePhase::PlayerHurt);

        runner.regenerate_level();
        assert_eq!(runner.hud().phase, GamePhase::Playing);
        assert_eq!(runner.hud().level, 2);

        runner.restart_level();
        assert_eq!(runner.hud().level, 1);
        assert_eq!(runner.hud().score, 0);
    }

    #[test]
    fn test_regenerate_during_game_over_restores_lives() {
        let mut runner = Runner::from_settings(&seeded(8));
        while runner.hud().phase != GamePhase::GameOver {
            runner.hurt_player();
            runner.state.advance_transition(crate::consts::RESPAWN_DELAY + 0.01);
        }
        assert_eq!(runner.hud().lives, 0);

        runner.regenerate_level();
        let hud = runner.hud();
        assert_eq!(hud.phase, GamePhase::Playing);
        assert_eq!(hud.lives, crate::consts::START_LIVES);
        assert_eq!(hud.level, 1);
    }

    #[test]
    fn test_viewport_from_settings() {
        let settings = Settings {
            viewport_width: 640.0,
            viewport_height: 360.0,
            ..seeded(5)
        };
        let runner = Runner::from_settings(&settings);
        assert_eq!(runner.snapshot().camera.size.x, 640.0);
    }
}
