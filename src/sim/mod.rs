//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, physics or platform dependencies

pub mod clock;
pub mod parallax;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod visuals;

pub use clock::{DayNightClock, DayPhase};
pub use parallax::{ParallaxField, ParallaxLayer};
pub use spawner::ObstacleSpawner;
pub use state::{GameEvent, GamePhase, Obstacle, RunSession};
pub use tick::{TickInput, tick};
pub use visuals::{FrameView, NightVisuals};
