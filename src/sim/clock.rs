//! Day/night cycle
//!
//! The blend factor is a pure function of the position inside the cycle:
//!
//! ```text
//! 0 ........ dusk_start ---- day_end ======== night_end ---- cycle
//!    day        ramp 0→1         night          ramp 1→0
//! ```
//!
//! The label lags each ramp's midpoint so it never flickers at a boundary.

use serde::{Deserialize, Serialize};

use crate::config::DayNightConfig;

/// Reported sky phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayPhase {
    Day,
    Dusk,
    Night,
    Dawn,
}

impl DayPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayPhase::Day => "Day",
            DayPhase::Dusk => "Dusk",
            DayPhase::Night => "Night",
            DayPhase::Dawn => "Dawn",
        }
    }
}

/// Time-driven day/night clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayNightClock {
    cycle_elapsed_ms: u64,
    cycle_ms: u64,
    day_end_ms: u64,
    transition_ms: u64,
    /// Last label handed out by `advance`, only used to suppress repeats
    last_phase: DayPhase,
}

impl DayNightClock {
    pub fn new(config: &DayNightConfig) -> Self {
        let cycle_ms = config.cycle_ms.max(1);
        let day_end_ms = (cycle_ms as f64 * config.day_fraction as f64).round() as u64;
        Self {
            cycle_elapsed_ms: 0,
            cycle_ms,
            day_end_ms,
            transition_ms: config.transition_ms.max(1),
            last_phase: DayPhase::Day,
        }
    }

    /// Position inside the current cycle, in `[0, cycle_ms)`
    pub fn cycle_elapsed_ms(&self) -> u64 {
        self.cycle_elapsed_ms
    }

    pub fn cycle_ms(&self) -> u64 {
        self.cycle_ms
    }

    /// Last label reported by [`advance`](Self::advance)
    pub fn last_phase(&self) -> DayPhase {
        self.last_phase
    }

    /// Back to the start of the day
    pub fn reset(&mut self) {
        self.cycle_elapsed_ms = 0;
        self.last_phase = DayPhase::Day;
    }

    /// Jump to an arbitrary point (wrapped into the cycle)
    pub fn set_elapsed(&mut self, elapsed_ms: u64) {
        self.cycle_elapsed_ms = elapsed_ms % self.cycle_ms;
    }

    /// Move the clock forward, returning the new label if it changed
    pub fn advance(&mut self, dt_ms: u64) -> Option<DayPhase> {
        self.cycle_elapsed_ms = (self.cycle_elapsed_ms + dt_ms) % self.cycle_ms;
        let phase = self.phase();
        if phase != self.last_phase {
            log::debug!(
                "Sky phase {} -> {} at {}ms",
                self.last_phase.as_str(),
                phase.as_str(),
                self.cycle_elapsed_ms
            );
            self.last_phase = phase;
            Some(phase)
        } else {
            None
        }
    }

    /// Night blend at the current position
    pub fn night_blend(&self) -> f32 {
        self.blend_at(self.cycle_elapsed_ms)
    }

    /// Label at the current position
    pub fn phase(&self) -> DayPhase {
        self.phase_at(self.cycle_elapsed_ms)
    }

    fn night_end_ms(&self) -> u64 {
        self.cycle_ms.saturating_sub(self.transition_ms)
    }

    fn dusk_start_ms(&self) -> u64 {
        self.day_end_ms.saturating_sub(self.transition_ms)
    }

    /// Night blend in `[0, 1]` for any elapsed time (wrapped into the cycle)
    pub fn blend_at(&self, elapsed_ms: u64) -> f32 {
        let t = elapsed_ms % self.cycle_ms;
        let span = self.transition_ms as f32;

        if t >= self.night_end_ms() {
            1.0 - (t - self.night_end_ms()) as f32 / span
        } else if t >= self.day_end_ms {
            1.0
        } else if t >= self.dusk_start_ms() {
            (t - self.dusk_start_ms()) as f32 / span
        } else {
            0.0
        }
    }

    /// Label for any elapsed time (wrapped into the cycle)
    pub fn phase_at(&self, elapsed_ms: u64) -> DayPhase {
        let t = elapsed_ms % self.cycle_ms;
        let half = self.transition_ms as f32 * 0.5;

        if t >= self.night_end_ms() {
            if (t - self.night_end_ms()) as f32 > half {
                DayPhase::Dawn
            } else {
                DayPhase::Night
            }
        } else if t >= self.day_end_ms {
            DayPhase::Night
        } else if t >= self.dusk_start_ms() && (t - self.dusk_start_ms()) as f32 > half {
            DayPhase::Dusk
        } else {
            DayPhase::Day
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn clock() -> DayNightClock {
        DayNightClock::new(&DayNightConfig {
            cycle_ms: 30_000,
            day_fraction: 0.7,
            transition_ms: 5_000,
        })
    }

    #[test]
    fn test_blend_boundaries() {
        let c = clock();
        assert_eq!(c.blend_at(0), 0.0);
        assert_eq!(c.blend_at(15_999), 0.0);
        assert_eq!(c.blend_at(16_000), 0.0);
        assert_eq!(c.blend_at(21_000), 1.0);
        assert_eq!(c.blend_at(24_999), 1.0);
        assert_eq!(c.blend_at(25_000), 1.0);
        assert!((c.blend_at(27_500) - 0.5).abs() < 1e-6);
        assert!(c.blend_at(29_999) < 0.001);
        // Wraps back into full day
        assert_eq!(c.blend_at(30_000), 0.0);
    }

    #[test]
    fn test_mid_dusk_scenario() {
        let c = clock();
        assert!((c.blend_at(20_000) - 0.8).abs() < 1e-6);
        assert_eq!(c.phase_at(20_000), DayPhase::Dusk);
        assert_eq!(c.blend_at(21_500), 1.0);
        assert_eq!(c.phase_at(21_500), DayPhase::Night);
    }

    #[test]
    fn test_label_waits_for_ramp_midpoint() {
        let c = clock();
        // Dusk ramp starts at 16s but the label only flips past 18.5s
        assert_eq!(c.phase_at(16_000), DayPhase::Day);
        assert_eq!(c.phase_at(18_500), DayPhase::Day);
        assert_eq!(c.phase_at(18_510), DayPhase::Dusk);
        // Dawn ramp starts at 25s, label flips past 27.5s
        assert_eq!(c.phase_at(25_000), DayPhase::Night);
        assert_eq!(c.phase_at(27_500), DayPhase::Night);
        assert_eq!(c.phase_at(27_510), DayPhase::Dawn);
        assert_eq!(c.phase_at(0), DayPhase::Day);
    }

    #[test]
    fn test_advance_reports_changes_once() {
        let mut c = clock();
        let mut changes = Vec::new();
        for _ in 0..3_000 {
            if let Some(phase) = c.advance(10) {
                changes.push(phase);
            }
        }
        assert_eq!(
            changes,
            vec![DayPhase::Dusk, DayPhase::Night, DayPhase::Dawn, DayPhase::Day]
        );
        assert_eq!(c.cycle_elapsed_ms(), 0);
    }

    #[test]
    fn test_reset() {
        let mut c = clock();
        c.advance(22_000);
        assert_eq!(c.last_phase(), DayPhase::Night);
        c.reset();
        assert_eq!(c.cycle_elapsed_ms(), 0);
        assert_eq!(c.last_phase(), DayPhase::Day);
        assert_eq!(c.night_blend(), 0.0);
    }

    proptest! {
        #[test]
        fn blend_is_continuous(t in 0u64..60_000) {
            let c = clock();
            let a = c.blend_at(t);
            let b = c.blend_at(t + 1);
            prop_assert!((0.0..=1.0).contains(&a));
            // One millisecond moves the blend by at most 1/5000
            prop_assert!((a - b).abs() <= 1.0 / 5_000.0 + 1e-6);
        }
    }
}
