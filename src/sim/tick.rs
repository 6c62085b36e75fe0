//! Fixed timestep simulation tick
//!
//! One call advances the world by `dt`: player physics, coins, enemies,
//! terminal conditions (flag, fall-off), pending transitions, then camera.

use serde::{Deserialize, Serialize};

use super::collision::{Contact, classify_contact, resolve_horizontal, resolve_vertical};
use super::state::{Coin, GameEvent, GamePhase, GameState, TileKind};
use crate::consts::*;

/// Input state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Held, not edge-triggered
    pub jump: bool,
}

impl TickInput {
    /// -1, 0 or 1
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::Loading {
        state.regenerate_level();
    }

    state.time_ticks += 1;

    if state.player.alive && state.phase == GamePhase::Playing {
        step_player(state, input, dt);

        if state.player.aabb.top() > state.fall_off_y() {
            log::debug!("Player fell out of the world");
            state.events.push(GameEvent::FellOff);
            state.hurt_player();
        }
    }

    step_coins(state, dt);
    step_enemies(state, dt);

    if state.player.alive
        && state
            .flag
            .as_ref()
            .is_some_and(|flag| flag.aabb.overlaps(&state.player.aabb))
    {
        state.complete_level();
    }

    state.advance_transition(dt);

    let focus = state.player.aabb.center();
    let world = state.world_size();
    state.camera.follow(focus, world, dt);
}

/// Player movement and tile collisions
fn step_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let world_width = state.world_size().x;
    let GameState {
        player,
        tiles,
        coins,
        events,
        ..
    } = state;

    player.prev_bottom = player.aabb.bottom();

    // Coyote window refreshes on the ground, drains in the air
    if player.grounded {
        player.coyote = COYOTE_TIME;
    } else {
        player.coyote = (player.coyote - dt).max(0.0);
    }

    // Horizontal: accelerate toward input, exponential friction without it
    let dir = input.horizontal();
    if dir != 0.0 {
        player.vel.x += dir * RUN_ACCEL * dt;
    } else {
        player.vel.x *= FRICTION.powf(60.0 * dt);
    }
    player.vel.x = player.vel.x.clamp(-RUN_MAX_SPEED, RUN_MAX_SPEED);

    // Vertical: heavier gravity while rising with jump released
    let gravity = if player.vel.y < 0.0 && !input.jump {
        GRAVITY * JUMP_RELEASE_GRAVITY
    } else {
        GRAVITY
    };
    player.vel.y = (player.vel.y + gravity * dt).min(MAX_FALL_SPEED);

    if input.jump && player.coyote > 0.0 {
        player.vel.y = -JUMP_POWER;
        player.coyote = 0.0;
        player.grounded = false;
        events.push(GameEvent::Jump);
    }

    // X axis
    player.aabb.pos.x += player.vel.x * dt;
    resolve_horizontal(&mut player.aabb, &mut player.vel.x, tiles);
    let max_x = (world_width - player.aabb.size.x).max(0.0);
    if player.aabb.pos.x < 0.0 || player.aabb.pos.x > max_x {
        player.aabb.pos.x = player.aabb.pos.x.clamp(0.0, max_x);
        player.vel.x = 0.0;
    }

    // Y axis
    player.aabb.pos.y += player.vel.y * dt;
    let hit = resolve_vertical(&mut player.aabb, &mut player.vel.y, player.prev_bottom, tiles);
    player.grounded = hit.landed;

    if let Some(index) = hit.ceiling {
        let tile = &mut tiles[index];
        if tile.kind == TileKind::QuestionBlock {
            log::debug!("Question block bumped at ({}, {})", tile.col, tile.row);
            tile.kind = TileKind::Ground;
            coins.push(Coin::popped_from(&tile.aabb));
            events.push(GameEvent::BlockBumped);
        }
    }
}

/// Coin bounce and pickup
fn step_coins(state: &mut GameState, dt: f32) {
    let GameState {
        player,
        coins,
        score,
        events,
        ..
    } = state;

    for coin in coins.iter_mut().filter(|c| !c.collected) {
        coin.update_bounce(dt);
        if player.alive && coin.aabb.overlaps(&player.aabb) {
            coin.collected = true;
            *score += COIN_SCORE;
            events.push(GameEvent::CoinCollected);
            log::debug!("Coin collected, score {}", score);
        }
    }
}

/// Enemy movement and player contact
fn step_enemies(state: &mut GameState, dt: f32) {
    let world_width = state.world_size().x;
    let can_touch = state.player.alive && state.phase == GamePhase::Playing;
    let mut side_hit = false;

    {
        let GameState {
            player,
            enemies,
            tiles,
            rng,
            score,
            events,
            ..
        } = state;

        for enemy in enemies.iter_mut().filter(|e| e.alive) {
            enemy.update(dt, tiles, world_width, rng);

            if !can_touch || side_hit {
                continue;
            }
            match classify_contact(&player.aabb, player.vel.y, player.prev_bottom, &enemy.aabb) {
                Some(Contact::Stomp) => {
                    enemy.alive = false;
                    player.vel.y = -JUMP_POWER * STOMP_BOUNCE;
                    *score += STOMP_SCORE;
                    events.push(GameEvent::Stomp);
                    log::debug!("Stomped {:?}, score {}", enemy.kind, score);
                }
                Some(Contact::SideHit) => side_hit = true,
                None => {}
            }
        }
    }

    if side_hit {
        state.hurt_player();
    }
}
