//! Browser bridge
//!
//! Exposes a [`Runner`] to JavaScript. The page owns the canvas, keyboard
//! listeners and requestAnimationFrame loop; it pushes input flags in, calls
//! `frame` with the elapsed seconds, and draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::runner::Runner;
use crate::settings::Settings;
use crate::sim::{GameState, TickInput};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Tile Hopper starting...");
}

fn to_js(e: serde_json::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Game instance handed to the page
#[wasm_bindgen]
pub struct WebGame {
    runner: Runner,
}

#[wasm_bindgen]
impl WebGame {
    /// New session with a random seed
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let state = GameState::unseeded();
        log::info!("Session started with seed {}", state.seed);
        WebGame {
            runner: Runner::new(state),
        }
    }

    /// New session with a fixed seed and viewport
    pub fn with_seed(seed: u32, viewport_width: f32, viewport_height: f32) -> WebGame {
        let settings = Settings {
            seed: Some(seed as u64),
            viewport_width,
            viewport_height,
            ..Default::default()
        }
        .sanitized();
        WebGame {
            runner: Runner::from_settings(&settings),
        }
    }

    pub fn set_input(&mut self, left: bool, right: bool, jump: bool) {
        self.runner.set_input(TickInput { left, right, jump });
    }

    /// Advance by `dt` seconds of wall time; returns fixed steps run
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.runner.frame(dt)
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.runner.snapshot()).map_err(to_js)
    }

    pub fn hud_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.runner.hud()).map_err(to_js)
    }

    /// Narrative banner for the current phase, empty while playing
    pub fn banner(&self) -> String {
        self.runner.hud().banner().unwrap_or_default().to_string()
    }

    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.runner.drain_events()).map_err(to_js)
    }

    pub fn regenerate_level(&mut self) {
        self.runner.regenerate_level();
    }

    pub fn restart_level(&mut self) {
        self.runner.restart_level();
    }

    pub fn next_level(&mut self) {
        self.runner.next_level();
        log::info!("Skipped to level {}", self.runner.hud().level);
    }

    pub fn hurt_player(&mut self) {
        self.runner.hurt_player();
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
