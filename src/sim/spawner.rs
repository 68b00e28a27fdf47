//! Obstacle scheduling
//!
//! A one-shot timer that re-arms itself with a fresh random delay every time
//! it fires.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::RngState;
use crate::config::SpawnConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "SpawnerSnapshot")]
pub struct ObstacleSpawner {
    min_delay_ms: u64,
    max_delay_ms: u64,
    /// Time left before the next fire; `None` when cancelled
    pending_ms: Option<u64>,
    rng_state: RngState,
    #[serde(skip_serializing)]
    rng: Pcg32,
}

/// Serialized form; the generator is rebuilt from the seed on load
#[derive(Deserialize)]
struct SpawnerSnapshot {
    min_delay_ms: u64,
    max_delay_ms: u64,
    pending_ms: Option<u64>,
    rng_state: RngState,
}

impl From<SpawnerSnapshot> for ObstacleSpawner {
    fn from(snapshot: SpawnerSnapshot) -> Self {
        let mut rng = snapshot.rng_state.to_rng();
        // Every draw used this range, so replaying them restores the stream position
        for _ in 0..snapshot.rng_state.draws {
            rng.random_range(snapshot.min_delay_ms..=snapshot.max_delay_ms);
        }
        Self {
            min_delay_ms: snapshot.min_delay_ms,
            max_delay_ms: snapshot.max_delay_ms,
            pending_ms: snapshot.pending_ms,
            rng_state: snapshot.rng_state,
            rng,
        }
    }
}

impl ObstacleSpawner {
    pub fn new(config: &SpawnConfig) -> Self {
        let rng_state = RngState::new(config.seed);
        let mut spawner = Self {
            min_delay_ms: config.min_delay_ms,
            max_delay_ms: config.max_delay_ms.max(config.min_delay_ms),
            pending_ms: None,
            rng: rng_state.to_rng(),
            rng_state,
        };
        spawner.schedule();
        spawner
    }

    /// Arm the timer with a delay drawn uniformly from the configured range
    fn schedule(&mut self) {
        let delay = self.rng.random_range(self.min_delay_ms..=self.max_delay_ms);
        self.rng_state.draws += 1;
        self.pending_ms = Some(delay);
    }

    /// Drop any pending fire and schedule a fresh one
    pub fn reset(&mut self) {
        self.pending_ms = None;
        self.schedule();
    }

    /// Cancel without rescheduling
    pub fn cancel(&mut self) {
        self.pending_ms = None;
    }

    pub fn pending_ms(&self) -> Option<u64> {
        self.pending_ms
    }

    /// Advance the timer. Returns true if an obstacle should spawn this step.
    ///
    /// Time past the due point counts toward the next delay. The caller only
    /// advances the spawner while the run is live, so a game over freezes the
    /// timer.
    pub fn advance(&mut self, dt_ms: u64) -> bool {
        let Some(left) = self.pending_ms else {
            return false;
        };
        if left > dt_ms {
            self.pending_ms = Some(left - dt_ms);
            false
        } else {
            let overshoot = dt_ms - left;
            self.schedule();
            self.pending_ms = self.pending_ms.map(|d| d.saturating_sub(overshoot).max(1));
            true
        }
    }
}
