//! Session settings
//!
//! Loaded from an optional JSON file by the native demo. Missing fields take
//! their defaults, and a missing or unreadable file falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

pub use crate::sim::level::GeneratorConfig;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === View ===
    /// Camera width in world units
    pub viewport_width: f32,
    /// Camera height in world units
    pub viewport_height: f32,

    // === Session ===
    /// Fixed seed for reproducible levels; random when absent
    pub seed: Option<u64>,
    /// Simulated seconds the headless demo runs for
    pub demo_seconds: f32,
    /// Let the autopilot drive the player in the headless demo
    pub autopilot: bool,

    // === Diagnostics ===
    /// Log filter used when RUST_LOG is unset
    pub log_level: String,

    // === Level generation ===
    pub generator: GeneratorConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            seed: None,
            demo_seconds: 30.0,
            autopilot: true,

            log_level: "info".to_string(),

            generator: GeneratorConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings, {} unusable: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Read and parse a JSON settings file
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Parse settings and clamp out-of-range values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Replace nonsense values with something playable
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0) {
            self.viewport_width = defaults.viewport_width;
        }
        if !(self.viewport_height.is_finite() && self.viewport_height > 0.0) {
            self.viewport_height = defaults.viewport_height;
        }
        if !(self.demo_seconds.is_finite() && self.demo_seconds >= 0.0) {
            self.demo_seconds = defaults.demo_seconds;
        }
        self.generator = self.generator.sanitized();
        self
    }

    /// Parsed log filter, `Info` when the string is unrecognized
    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.viewport_width, VIEWPORT_WIDTH);
        assert_eq!(settings.generator, GeneratorConfig::default());
    }

    #[test]
    fn test_nested_generator_fields() {
        let settings = Settings::from_json(r#"{ "generator": { "gap_chance": 0.0 } }"#).unwrap();
        assert_eq!(settings.generator.gap_chance, 0.0);
        assert_eq!(
            settings.generator.coin_tile_chance,
            GeneratorConfig::default().coin_tile_chance
        );
    }

    #[test]
    fn test_bad_values_are_sanitized() {
        let settings =
            Settings::from_json(r#"{ "viewport_width": -5.0, "demo_seconds": -1.0 }"#).unwrap();
        assert_eq!(settings.viewport_width, VIEWPORT_WIDTH);
        assert_eq!(settings.demo_seconds, Settings::default().demo_seconds);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_read_reports_errors() {
        assert!(Settings::read(Path::new("/nonexistent/tile-hopper/settings.json")).is_err());

        let path = std::env::temp_dir().join(format!("tile-hopper-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = Settings::read(&path);
        let _ = std::fs::remove_file(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/tile-hopper/settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("tile-hopper-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(7),
            autopilot: false,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_log_filter() {
        let mut settings = Settings::default();
        assert_eq!(settings.log_filter(), log::LevelFilter::Info);
        settings.log_level = "debug".to_string();
        assert_eq!(settings.log_filter(), log::LevelFilter::Debug);
        settings.log_level = "chatty".to_string();
        assert_eq!(settings.log_filter(), log::LevelFilter::Info);
    }
}
