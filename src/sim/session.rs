//! Session lifecycle: level building, advancing, damage and respawn
//!
//! Narrative delays (hurt -> respawn, flag -> next level, game over ->
//! restart) are stored as a `PendingTransition` and counted down inside the
//! tick. Any regeneration clears the pending transition, so a delayed action
//! can never fire against a level it was not scheduled for.

use super::level::{self, LevelLayout};
use super::state::{
    Coin, Enemy, GameEvent, GamePhase, GameState, PendingTransition, TransitionKind,
};
use crate::consts::*;

impl GameState {
    /// Build a fresh layout for the current level and load it. With no lives
    /// left this starts a new run instead.
    pub fn regenerate_level(&mut self) {
        if self.lives == 0 {
            log::info!("No lives left, starting a new run");
            self.reset_run();
        }
        let layout = level::generate(self.level, &self.generator, &mut self.rng);
        self.load_layout(layout);
    }

    /// Replace every entity container with the contents of `layout` and put
    /// the player and camera back at the start
    pub fn load_layout(&mut self, layout: LevelLayout) {
        self.cols = layout.cols;
        self.rows = layout.rows;
        self.tiles = layout.tiles();
        self.coins = layout
            .coins
            .iter()
            .map(|&(col, row)| Coin::in_cell(col, row))
            .collect();
        self.flag = layout.flag_entity();
        let rng = &mut self.rng;
        self.enemies = layout
            .enemy_spawns
            .iter()
            .map(|spawn| Enemy::spawn(spawn, &mut *rng))
            .collect();

        self.player.respawn();
        self.camera.reset();
        self.pending = None;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelStarted { level: self.level });
    }

    /// Start over from level 1 with a fresh score and full lives
    pub fn restart_level(&mut self) {
        log::info!("Restarting from level 1 (final score {})", self.score);
        self.reset_run();
        self.regenerate_level();
    }

    /// Advance to the next level, wrapping to a fresh run after the last one.
    /// A game that is already over restarts from level 1.
    pub fn next_level(&mut self) {
        if self.lives == 0 {
            log::info!("No lives left, starting a new run");
            self.reset_run();
        } else if self.level >= MAX_LEVEL {
            log::info!("All {} levels cleared with score {}", MAX_LEVEL, self.score);
            self.reset_run();
        } else {
            self.level += 1;
        }
        self.regenerate_level();
    }

    /// Damage the player: lose a life, then respawn or end the game after a
    /// delay. Ignored unless the player is alive and playing.
    pub fn hurt_player(&mut self) {
        if !self.player.alive || self.phase != GamePhase::Playing {
            return;
        }
        self.player.alive = false;
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::PlayerHurt);

        if self.lives == 0 {
            log::info!("Game over on level {} with score {}", self.level, self.score);
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver);
            self.schedule(TransitionKind::Restart, GAME_OVER_DELAY);
        } else {
            log::debug!("Player hurt, {} lives left", self.lives);
            self.phase = GamePhase::PlayerHurt;
            self.schedule(TransitionKind::Respawn, RESPAWN_DELAY);
        }
    }

    /// Flag reached: freeze the player and advance after a delay
    pub fn complete_level(&mut self) {
        if !self.player.alive || self.phase != GamePhase::Playing {
            return;
        }
        log::info!("Level {} complete, score {}", self.level, self.score);
        self.player.alive = false;
        self.phase = GamePhase::LevelComplete;
        self.events.push(GameEvent::LevelComplete);
        self.schedule(TransitionKind::NextLevel, LEVEL_COMPLETE_DELAY);
    }

    /// Put the player back at the start of the current level
    pub fn respawn_player(&mut self) {
        self.player.respawn();
        self.phase = GamePhase::Playing;
    }

    fn reset_run(&mut self) {
        self.level = 1;
        self.score = 0;
        self.lives = START_LIVES;
    }

    fn schedule(&mut self, kind: TransitionKind, delay: f32) {
        self.pending = Some(PendingTransition {
            kind,
            remaining: delay,
        });
    }

    /// Count down the pending transition and run it when it expires
    pub fn advance_transition(&mut self, dt: f32) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        pending.remaining -= dt;
        if pending.remaining > 0.0 {
            return;
        }
        let kind = pending.kind;
        self.pending = None;
        match kind {
            TransitionKind::Respawn => self.respawn_player(),
            TransitionKind::NextLevel => self.next_level(),
            TransitionKind::Restart => self.restart_level(),
        }
    }
}
