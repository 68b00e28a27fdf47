//! Run state and core simulation types
//!
//! Everything the tick loop mutates lives in [`RunSession`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{DayNightClock, DayPhase};
use super::parallax::ParallaxField;
use super::spawner::ObstacleSpawner;
use crate::config::GameConfig;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player hit an obstacle; waiting for a jump to restart
    Over,
}

/// An obstacle sliding toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Horizontal position (left edge of the field is 0)
    pub x: f32,
    /// Horizontal velocity, fixed at spawn time (negative)
    pub velocity: f32,
}

/// Notifications for the host, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh run began (initial start or restart)
    RunStarted { session_id: u64 },
    /// Apply this upward velocity to the player body
    Jumped { impulse: f32 },
    ObstacleSpawned { id: u32, x: f32, velocity: f32 },
    ObstacleCulled { id: u32 },
    /// Run speed crossed a score milestone
    SpeedUp { speed: f32 },
    /// Sky label changed
    SkyChanged { phase: DayPhase },
    /// The run ended; emitted exactly once per session
    RunFinished { session_id: u64, score: u32 },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Values drawn so far
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete state of one play-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSession {
    pub config: GameConfig,
    /// Incremented on every restart; tags score submissions
    pub session_id: u64,
    pub score: u32,
    /// Current run speed (units/s)
    pub speed: f32,
    pub phase: GamePhase,
    /// Ticks simulated while running
    pub elapsed_ticks: u64,
    /// Running time not yet converted into score
    pub score_timer_ms: u64,
    pub parallax: ParallaxField,
    pub clock: DayNightClock,
    pub spawner: ObstacleSpawner,
    /// Active obstacles (sorted by id)
    pub obstacles: Vec<Obstacle>,
    /// Jump state from the previous tick, for edge detection
    pub jump_was_held: bool,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl RunSession {
    /// Create a running session from a host-owned config
    pub fn new(config: GameConfig) -> Self {
        let config = config.validate();
        let mut session = Self {
            session_id: 1,
            score: 0,
            speed: config.initial_speed,
            phase: GamePhase::Running,
            elapsed_ticks: 0,
            score_timer_ms: 0,
            parallax: ParallaxField::new(&config.layers, config.initial_speed),
            clock: DayNightClock::new(&config.day_night),
            spawner: ObstacleSpawner::new(&config.spawn),
            obstacles: Vec::new(),
            jump_was_held: false,
            events: Vec::new(),
            next_id: 1,
            config,
        };
        session.events.push(GameEvent::RunStarted {
            session_id: session.session_id,
        });
        log::info!("Run {} started", session.session_id);
        session
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Night blend for the current sky
    pub fn night_blend(&self) -> f32 {
        self.clock.night_blend()
    }

    /// Place a new obstacle at the right edge moving at the current speed
    pub fn spawn_obstacle(&mut self) {
        let id = self.next_entity_id();
        let obstacle = Obstacle {
            id,
            x: self.config.viewport_width,
            velocity: -self.speed,
        };
        log::debug!("Spawned obstacle {} at speed {}", id, self.speed);
        self.events.push(GameEvent::ObstacleSpawned {
            id,
            x: obstacle.x,
            velocity: obstacle.velocity,
        });
        self.obstacles.push(obstacle);
    }

    /// Running → Over. Ignored if the run is already over.
    pub fn end_run(&mut self) {
        if self.phase == GamePhase::Over {
            return;
        }
        self.phase = GamePhase::Over;
        self.spawner.cancel();
        log::info!(
            "Run {} over: score {} at speed {}",
            self.session_id,
            self.score,
            self.speed
        );
        self.events.push(GameEvent::RunFinished {
            session_id: self.session_id,
            score: self.score,
        });
    }

    /// Over → Running with a clean slate
    pub fn restart(&mut self) {
        self.session_id += 1;
        self.score = 0;
        self.speed = self.config.initial_speed;
        self.phase = GamePhase::Running;
        self.elapsed_ticks = 0;
        self.score_timer_ms = 0;
        self.obstacles.clear();

        self.parallax.set_speed(self.speed);
        self.parallax.reset();
        self.clock.reset();
        self.spawner.reset();

        log::info!("Run {} started", self.session_id);
        self.events.push(GameEvent::RunStarted {
            session_id: self.session_id,
        });
    }

    /// Add one score point, ramping speed at milestones
    pub fn add_point(&mut self) {
        self.score += 1;
        if self.score.is_multiple_of(self.config.score_milestone) {
            self.speed += self.config.speed_increment;
            self.parallax.set_speed(self.speed);
            log::info!("Score {}: speed up to {}", self.score, self.speed);
            self.events.push(GameEvent::SpeedUp { speed: self.speed });
        }
    }

    /// Remove obstacles that have left the field
    pub fn cull_obstacles(&mut self, threshold: f32) {
        let events = &mut self.events;
        self.obstacles.retain(|o| {
            let keep = o.x >= threshold;
            if !keep {
                events.push(GameEvent::ObstacleCulled { id: o.id });
            }
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let mut s = RunSession::new(GameConfig::default());
        assert_eq!(s.phase, GamePhase::Running);
        assert_eq!(s.score, 0);
        assert_eq!(s.speed, 200.0);
        assert_eq!(s.drain_events(), vec![GameEvent::RunStarted { session_id: 1 }]);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_end_run_emits_once() {
        let mut s = RunSession::new(GameConfig::default());
        s.drain_events();
        s.score = 42;
        s.end_run();
        s.end_run();
        let finished: Vec<_> = s
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::RunFinished { .. }))
            .collect();
        assert_eq!(
            finished,
            vec![GameEvent::RunFinished {
                session_id: 1,
                score: 42
            }]
        );
        assert_eq!(s.spawner.pending_ms(), None);
    }

    #[test]
    fn test_milestone_speedup() {
        let mut s = RunSession::new(GameConfig::default());
        for _ in 0..99 {
            s.add_point();
        }
        assert_eq!(s.speed, 200.0);
        s.add_point();
        assert_eq!(s.speed, 220.0);
        assert_eq!(s.parallax.layers[3].speed, 220.0);
    }

    #[test]
    fn test_cull_obstacles() {
        let mut s = RunSession::new(GameConfig::default());
        s.spawn_obstacle();
        s.spawn_obstacle();
        s.obstacles[0].x = -51.0;
        s.obstacles[1].x = -49.0;
        s.drain_events();
        s.cull_obstacles(-50.0);
        assert_eq!(s.obstacles.len(), 1);
        assert_eq!(s.drain_events(), vec![GameEvent::ObstacleCulled { id: 1 }]);
    }
}
