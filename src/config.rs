//! Game configuration
//!
//! Owned by the host and passed to the single top-level constructor
//! ([`RunSession::new`](crate::sim::RunSession::new)). Persisted as JSON: in
//! LocalStorage on web, in a file on native.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A single background strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Asset key the host draws for this strip
    pub key: String,
    /// Fraction of run speed this layer scrolls at (0 = static, 1 = ground)
    pub speed_factor: f32,
    /// Width of one segment
    pub width: f32,
    /// Center of the middle segment at reset
    pub anchor: f32,
    /// Vertical placement, passed through to the host untouched
    pub y: f32,
}

impl LayerConfig {
    pub fn new(key: &str, speed_factor: f32, y: f32) -> Self {
        Self {
            key: key.to_string(),
            speed_factor,
            width: VIEWPORT_WIDTH,
            anchor: VIEWPORT_WIDTH / 2.0,
            y,
        }
    }
}

/// Day/night cycle timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayNightConfig {
    /// Full cycle length
    pub cycle_ms: u64,
    /// Share of the cycle before night begins, in (0, 1)
    pub day_fraction: f32,
    /// Length of the dusk and dawn ramps
    pub transition_ms: u64,
}

impl Default for DayNightConfig {
    fn default() -> Self {
        Self {
            cycle_ms: DAY_CYCLE_MS,
            day_fraction: DAY_FRACTION,
            transition_ms: TRANSITION_MS,
        }
    }
}

/// Obstacle scheduling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    /// RNG seed; the same seed replays the same obstacle schedule
    pub seed: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: SPAWN_DELAY_MIN_MS,
            max_delay_ms: SPAWN_DELAY_MAX_MS,
            seed: 0x00D1_50F0,
        }
    }
}

/// Top-level game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Viewport ===
    /// Field width; obstacles spawn at this x
    pub viewport_width: f32,
    /// Field height (host layout only)
    pub viewport_height: f32,

    // === Physics ===
    /// Player gravity used by the headless host (units/s²)
    pub gravity: f32,
    /// Upward velocity emitted on jump
    pub jump_impulse: f32,
    /// Ask the host to draw physics bodies
    pub physics_debug: bool,

    // === Pace ===
    /// Run speed at session start
    pub initial_speed: f32,
    /// Speed added at each score milestone
    pub speed_increment: f32,
    /// Score points between speed increases
    pub score_milestone: u32,
    /// Time per score point
    pub score_interval_ms: u64,

    // === World ===
    pub day_night: DayNightConfig,
    pub spawn: SpawnConfig,
    /// Background strips, farthest first
    pub layers: Vec<LayerConfig>,

    // === Leaderboard ===
    /// Base URL of the leaderboard service (`/score`, `/scores`)
    pub leaderboard_url: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            gravity: PLAYER_GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            physics_debug: false,

            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
            score_milestone: SCORE_MILESTONE,
            score_interval_ms: SCORE_INTERVAL_MS,

            day_night: DayNightConfig::default(),
            spawn: SpawnConfig::default(),
            layers: vec![
                LayerConfig::new("mountains", 0.2, 470.0),
                LayerConfig::new("clouds", 0.4, 200.0),
                LayerConfig::new("bushes", 0.6, 520.0),
                LayerConfig::new("ground", 1.0, 550.0),
            ],

            leaderboard_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

impl GameConfig {
    /// Clamp every option into its legal range.
    ///
    /// Simulation code assumes a validated config and has no error paths of
    /// its own, so anything loaded from storage goes through here first.
    pub fn validate(mut self) -> Self {
        let defaults = Self::default();

        if !self.viewport_width.is_finite() || self.viewport_width <= 0.0 {
            self.viewport_width = defaults.viewport_width;
        }
        if !self.initial_speed.is_finite() || self.initial_speed <= 0.0 {
            self.initial_speed = defaults.initial_speed;
        }
        if !self.speed_increment.is_finite() {
            self.speed_increment = defaults.speed_increment;
        }
        self.speed_increment = self.speed_increment.max(0.0);
        self.score_milestone = self.score_milestone.max(1);
        self.score_interval_ms = self.score_interval_ms.max(1);

        let dn = &mut self.day_night;
        dn.cycle_ms = dn.cycle_ms.max(1);
        if dn.day_fraction.is_nan() || dn.day_fraction <= 0.0 || dn.day_fraction >= 1.0 {
            dn.day_fraction = DAY_FRACTION;
        }
        // Dusk must fit inside the day and dawn inside the night
        let day_end = (dn.cycle_ms as f64 * dn.day_fraction as f64).round() as u64;
        let night_len = dn.cycle_ms - day_end;
        let max_span = day_end.min(night_len).saturating_sub(1).max(1);
        dn.transition_ms = dn.transition_ms.clamp(1, max_span);

        let sp = &mut self.spawn;
        sp.min_delay_ms = sp.min_delay_ms.max(1);
        if sp.max_delay_ms < sp.min_delay_ms {
            sp.max_delay_ms = sp.min_delay_ms;
        }

        self.layers
            .retain(|l| l.width.is_finite() && l.width > 0.0 && l.anchor.is_finite());
        for layer in &mut self.layers {
            if layer.speed_factor.is_nan() {
                layer.speed_factor = 0.0;
            }
            layer.speed_factor = layer.speed_factor.clamp(0.0, 1.0);
        }
        if self.layers.is_empty() {
            self.layers = defaults.layers;
        }

        self
    }

    /// Parse a JSON config, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<GameConfig>(json) {
            Ok(config) => config.validate(),
            Err(e) => {
                log::warn!("Ignoring malformed config: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dino_run_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded config from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Load config from a JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded config from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::info!("Using default config ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.initial_speed, 200.0);
        assert_eq!(config.speed_increment, 20.0);
        assert_eq!(config.score_milestone, 100);
        assert_eq!(config.layers.len(), 4);
        assert_eq!(config.layers[3].speed_factor, 1.0);
        assert!(!config.physics_debug);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{"initial_speed": 300.0, "physics_debug": true}"#);
        assert_eq!(config.initial_speed, 300.0);
        assert!(config.physics_debug);
        assert_eq!(config.day_night.cycle_ms, DAY_CYCLE_MS);
    }

    #[test]
    fn test_partial_nested_json() {
        let config = GameConfig::from_json(r#"{"day_night": {"cycle_ms": 60000}}"#);
        assert_eq!(config.day_night.cycle_ms, 60_000);
        assert_eq!(config.day_night.transition_ms, TRANSITION_MS);
    }

    #[test]
    fn test_malformed_json_uses_defaults() {
        let config = GameConfig::from_json("{not json");
        assert_eq!(config.initial_speed, INITIAL_SPEED);
    }

    #[test]
    fn test_validate_clamps_ranges() {
        let mut config = GameConfig::default();
        config.initial_speed = -5.0;
        config.day_night.day_fraction = 1.5;
        config.day_night.transition_ms = 1_000_000;
        config.spawn.max_delay_ms = 10;
        config.layers[0].speed_factor = 3.0;
        config.score_milestone = 0;

        let config = config.validate();
        assert_eq!(config.initial_speed, INITIAL_SPEED);
        assert_eq!(config.day_night.day_fraction, DAY_FRACTION);
        assert!(config.day_night.transition_ms < 9_000);
        assert_eq!(config.spawn.max_delay_ms, config.spawn.min_delay_ms);
        assert_eq!(config.layers[0].speed_factor, 1.0);
        assert_eq!(config.score_milestone, 1);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut config = GameConfig::default();
        config.initial_speed = f32::INFINITY;
        config.speed_increment = f32::NAN;
        config.layers[0].speed_factor = f32::NAN;
        config.layers[1].width = f32::INFINITY;

        let config = config.validate();
        assert_eq!(config.initial_speed, INITIAL_SPEED);
        assert_eq!(config.speed_increment, SPEED_INCREMENT);
        assert_eq!(config.layers.len(), 3);
        assert_eq!(config.layers[0].speed_factor, 0.0);
    }

    #[test]
    fn test_extreme_but_finite_speed_is_kept() {
        let config = GameConfig::from_json(r#"{"initial_speed": 1e13}"#);
        assert_eq!(config.initial_speed, 1e13);
    }
}
