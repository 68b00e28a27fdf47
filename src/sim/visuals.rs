//! Render-facing snapshot of a run
//!
//! All day/night styling is derived from the clock's blend here; nothing
//! else keeps its own day/night flag.

use serde::Serialize;

use super::clock::DayPhase;
use super::state::{GamePhase, RunSession};
use crate::lerp;

/// Obstacle tint at full day (no tint)
pub const DAY_TINT: u32 = 0xFFFFFF;
/// Obstacle tint at full night
pub const NIGHT_TINT: u32 = 0x6670A8;
/// Player tint after a crash
pub const CRASH_TINT: u32 = 0xFF0000;

/// Opacities and tints for the sky and world
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NightVisuals {
    pub blend: f32,
    /// Night sky drawn over the day sky
    pub night_sky_alpha: f32,
    /// Stars only show in the darker half of the ramp
    pub stars_alpha: f32,
    pub sun_alpha: f32,
    pub moon_alpha: f32,
    /// Night variant of each parallax layer
    pub layer_night_alpha: f32,
    pub obstacle_tint: u32,
}

impl NightVisuals {
    pub fn from_blend(blend: f32) -> Self {
        let blend = blend.clamp(0.0, 1.0);
        Self {
            blend,
            night_sky_alpha: blend,
            stars_alpha: ((blend - 0.5) * 2.0).clamp(0.0, 1.0),
            sun_alpha: 1.0 - blend,
            moon_alpha: blend,
            layer_night_alpha: blend,
            obstacle_tint: lerp_rgb(DAY_TINT, NIGHT_TINT, blend),
        }
    }
}

/// Per-channel interpolation of two 0xRRGGBB colors
pub fn lerp_rgb(from: u32, to: u32, t: f32) -> u32 {
    let channel = |shift: u32| {
        let a = ((from >> shift) & 0xFF) as f32;
        let b = ((to >> shift) & 0xFF) as f32;
        (lerp(a, b, t).round() as u32).min(0xFF) << shift
    };
    channel(16) | channel(8) | channel(0)
}

#[derive(Debug, Clone, Serialize)]
pub struct LayerView {
    pub key: String,
    pub y: f32,
    pub width: f32,
    pub segments: [f32; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub session_id: u64,
    pub score: u32,
    pub speed: f32,
    pub game_over: bool,
    pub sky: DayPhase,
    pub visuals: NightVisuals,
    pub player_tint: Option<u32>,
    pub layers: Vec<LayerView>,
    pub obstacles: Vec<ObstacleView>,
    pub physics_debug: bool,
}

impl FrameView {
    pub fn capture(session: &RunSession) -> Self {
        let game_over = session.phase == GamePhase::Over;
        Self {
            session_id: session.session_id,
            score: session.score,
            speed: session.speed,
            game_over,
            sky: session.clock.last_phase(),
            visuals: NightVisuals::from_blend(session.night_blend()),
            player_tint: game_over.then_some(CRASH_TINT),
            layers: session
                .parallax
                .layers
                .iter()
                .map(|l| LayerView {
                    key: l.key.clone(),
                    y: l.y,
                    width: l.width,
                    segments: l.segments,
                })
                .collect(),
            obstacles: session
                .obstacles
                .iter()
                .map(|o| ObstacleView { id: o.id, x: o.x })
                .collect(),
            physics_debug: session.config.physics_debug,
        }
    }
}
