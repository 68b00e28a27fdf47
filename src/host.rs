//! Headless arcade host
//!
//! A minimal stand-in for the browser engine: integrates the player's
//! gravity, applies jump impulses from the simulation, and reports
//! player/obstacle overlaps back as the collision signal.

use glam::Vec2;

use crate::config::GameConfig;
use crate::consts::SIM_DT;
use crate::sim::{GameEvent, Obstacle, RunSession, TickInput, tick};

/// Player sprite size
pub const PLAYER_SIZE: Vec2 = Vec2::new(60.0, 60.0);
/// Player's fixed horizontal position
pub const PLAYER_X: f32 = 100.0;
/// Obstacle sprite size
pub const OBSTACLE_SIZE: Vec2 = Vec2::new(50.0, 80.0);
/// Top of the ground (y grows downward)
pub const GROUND_Y: f32 = 500.0;

/// Axis-aligned box, `min` top-left and `max` bottom-right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box anchored at the bottom center (sprite origin 0.5, 1)
    pub fn from_foot(foot: Vec2, size: Vec2) -> Self {
        Self {
            min: Vec2::new(foot.x - size.x / 2.0, foot.y - size.y),
            max: Vec2::new(foot.x + size.x / 2.0, foot.y),
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Player physics body
#[derive(Debug, Clone)]
pub struct PlayerBody {
    /// Bottom-center position
    pub foot: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    pub grounded: bool,
}

impl PlayerBody {
    pub fn new(gravity: f32) -> Self {
        Self {
            foot: Vec2::new(PLAYER_X, GROUND_Y),
            vel: Vec2::ZERO,
            gravity,
            grounded: true,
        }
    }

    /// Apply an upward impulse
    pub fn jump(&mut self, impulse: f32) {
        self.vel.y = -impulse;
        self.grounded = false;
    }

    /// Semi-implicit Euler step with ground contact
    pub fn integrate(&mut self, dt: f32) {
        self.vel.y += self.gravity * dt;
        self.foot += self.vel * dt;
        if self.foot.y >= GROUND_Y {
            self.foot.y = GROUND_Y;
            self.vel.y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_foot(self.foot, PLAYER_SIZE)
    }

    /// Height above the ground
    pub fn altitude(&self) -> f32 {
        GROUND_Y - self.foot.y
    }
}

pub fn obstacle_bounds(obstacle: &Obstacle) -> Aabb {
    Aabb::from_foot(Vec2::new(obstacle.x, GROUND_Y), OBSTACLE_SIZE)
}

/// A session plus the physics the browser engine would normally supply
pub struct HeadlessHost {
    pub session: RunSession,
    pub player: PlayerBody,
    /// Overlap found by the last physics step, delivered on the next tick
    collided: bool,
}

impl HeadlessHost {
    pub fn new(config: GameConfig) -> Self {
        let gravity = config.gravity;
        Self {
            session: RunSession::new(config),
            player: PlayerBody::new(gravity),
            collided: false,
        }
    }

    /// One fixed step: simulation tick, then physics. Returns the tick's events.
    pub fn step(&mut self, jump_held: bool) -> Vec<GameEvent> {
        let input = TickInput {
            jump_held,
            grounded: self.player.grounded,
            collided: self.collided,
        };
        self.collided = false;
        tick(&mut self.session, &input);

        let events = self.session.drain_events();
        for event in &events {
            match event {
                GameEvent::Jumped { impulse } => self.player.jump(*impulse),
                GameEvent::RunStarted { .. } => {
                    self.player = PlayerBody::new(self.player.gravity);
                }
                _ => {}
            }
        }

        // Physics pauses on game over
        if self.session.is_running() {
            self.player.integrate(SIM_DT);
            let bounds = self.player.bounds();
            self.collided = self
                .session
                .obstacles
                .iter()
                .any(|o| bounds.overlaps(&obstacle_bounds(o)));
        }

        events
    }

    /// Nearest obstacle still ahead of the player, as a gap in units
    pub fn next_obstacle_gap(&self) -> Option<f32> {
        let front = self.player.bounds().max.x;
        self.session
            .obstacles
            .iter()
            .map(|o| obstacle_bounds(o).min.x - front)
            .filter(|gap| *gap >= 0.0)
            .min_by(|a, b| a.total_cmp(b))
    }
}
