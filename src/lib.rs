//! Dino Run - An endless runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (run state, parallax, day/night clock, spawner)
//! - `host`: Headless arcade host (player body, gravity, obstacle overlap)
//! - `leaderboard`: Score records, name entry and best-effort score reporting
//! - `platform`: Browser/native platform abstraction (time, storage)
//! - `scene`: Screen flow and the game-over dialog
//! - `config`: Game configuration with documented defaults

pub mod config;
pub mod error;
pub mod host;
pub mod leaderboard;
pub mod platform;
pub mod scene;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::GameConfig;
pub use leaderboard::{ScoreRecord, ScoreReporter};
pub use sim::{GamePhase, RunSession, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (100 Hz)
    pub const SIM_DT_MS: u64 = 10;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = SIM_DT_MS as f32 / 1000.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Run speed at session start (units/s)
    pub const INITIAL_SPEED: f32 = 200.0;
    /// Speed added at every score milestone
    pub const SPEED_INCREMENT: f32 = 20.0;
    /// Score interval between speed increases
    pub const SCORE_MILESTONE: u32 = 100;
    /// Wall-clock time per score point
    pub const SCORE_INTERVAL_MS: u64 = 100;

    /// Upward velocity applied on jump
    pub const JUMP_IMPULSE: f32 = 500.0;
    /// Player gravity (units/s²)
    pub const PLAYER_GRAVITY: f32 = 800.0;

    /// Obstacles are culled once they pass this x position
    pub const OBSTACLE_CULL_X: f32 = -50.0;
    /// Obstacle spawn delay bounds (inclusive)
    pub const SPAWN_DELAY_MIN_MS: u64 = 1500;
    pub const SPAWN_DELAY_MAX_MS: u64 = 3000;

    /// Day/night cycle defaults
    pub const DAY_CYCLE_MS: u64 = 30_000;
    pub const DAY_FRACTION: f32 = 0.7;
    pub const TRANSITION_MS: u64 = 5_000;

    /// Player names are truncated to this many characters
    pub const MAX_NAME_LEN: usize = 15;
    /// Name used when the player leaves the field empty
    pub const DEFAULT_NAME: &str = "Anonymous";
    /// Rows shown on the leaderboard screen
    pub const LEADERBOARD_ROWS: usize = 10;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Convert a millisecond duration to whole simulation ticks (rounded up)
#[inline]
pub fn ms_to_ticks(ms: u64) -> u64 {
    ms.div_ceil(consts::SIM_DT_MS)
}
