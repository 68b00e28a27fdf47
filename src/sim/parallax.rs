//! Looping parallax background
//!
//! Each layer is three copies of the same strip laid side by side. Two copies
//! are not enough: a fast layer can scroll a whole segment between relocation
//! checks and open a gap on the right edge.

use serde::{Deserialize, Serialize};

use crate::config::LayerConfig;

/// Segments per layer
pub const SEGMENTS: usize = 3;

/// One looping background strip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallaxLayer {
    pub key: String,
    /// Share of run speed, in `[0, 1]`
    pub speed_factor: f32,
    pub width: f32,
    pub anchor: f32,
    pub y: f32,
    /// Current scroll speed (factor × run speed)
    pub speed: f32,
    /// Segment centers, in creation order (not sorted)
    pub segments: [f32; SEGMENTS],
}

impl ParallaxLayer {
    pub fn new(config: &LayerConfig, run_speed: f32) -> Self {
        let mut layer = Self {
            key: config.key.clone(),
            speed_factor: config.speed_factor,
            width: config.width,
            anchor: config.anchor,
            y: config.y,
            speed: config.speed_factor * run_speed,
            segments: [0.0; SEGMENTS],
        };
        layer.reset();
        layer
    }

    /// Canonical layout: anchor - width, anchor, anchor + width
    pub fn reset(&mut self) {
        self.segments = [self.anchor - self.width, self.anchor, self.anchor + self.width];
    }

    /// Scroll left by `speed * dt` and wrap segments that left the screen
    pub fn advance(&mut self, dt: f32) {
        let period = self.width * SEGMENTS as f32;
        // Whole periods leave the tiling unchanged
        let shift = (self.speed * dt).rem_euclid(period);
        if !shift.is_finite() {
            return;
        }
        for x in &mut self.segments {
            *x -= shift;
        }

        // After a shift under one period, one hop per segment is enough
        for x in &mut self.segments {
            if *x < -self.width {
                *x += period;
            }
        }
    }

    /// Segment positions sorted left to right
    pub fn sorted_segments(&self) -> [f32; SEGMENTS] {
        let mut sorted = self.segments;
        sorted.sort_by(f32::total_cmp);
        sorted
    }
}

/// All background layers, farthest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParallaxField {
    pub layers: Vec<ParallaxLayer>,
}

impl ParallaxField {
    pub fn new(configs: &[LayerConfig], run_speed: f32) -> Self {
        Self {
            layers: configs
                .iter()
                .map(|c| ParallaxLayer::new(c, run_speed))
                .collect(),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        for layer in &mut self.layers {
            layer.advance(dt);
        }
    }

    /// Re-derive every layer's speed from a new run speed
    pub fn set_speed(&mut self, run_speed: f32) {
        for layer in &mut self.layers {
            layer.speed = layer.speed_factor * run_speed;
        }
    }

    pub fn reset(&mut self) {
        for layer in &mut self.layers {
            layer.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn layer(speed_factor: f32) -> ParallaxLayer {
        ParallaxLayer::new(&LayerConfig::new("test", speed_factor, 0.0), 200.0)
    }

    fn assert_tiled(layer: &ParallaxLayer) {
        let s = layer.sorted_segments();
        for pair in s.windows(2) {
            assert!(
                ((pair[1] - pair[0]) - layer.width).abs() < 0.01,
                "gap in {:?}",
                s
            );
        }
        assert!(s[0] >= -layer.width);
    }

    #[test]
    fn test_canonical_layout() {
        let l = layer(1.0);
        assert_eq!(l.segments, [-400.0, 400.0, 1200.0]);
        assert_eq!(l.speed, 200.0);
    }

    #[test]
    fn test_wrap_moves_leftmost_to_right() {
        let mut l = layer(1.0);
        // 2.1s at 200/s = 420 units: leftmost reaches -820 and wraps
        for _ in 0..210 {
            l.advance(0.01);
        }
        let s = l.sorted_segments();
        assert!((s[0] - -20.0).abs() < 0.1);
        assert!((s[2] - 1580.0).abs() < 0.1);
        assert_tiled(&l);
    }

    #[test]
    fn test_huge_step_keeps_tiling() {
        let mut l = layer(1.0);
        l.advance(30.0);
        assert_tiled(&l);
    }

    #[test]
    fn test_field_speed_and_reset() {
        let configs = crate::config::GameConfig::default().layers;
        let mut field = ParallaxField::new(&configs, 200.0);
        assert_eq!(field.layers[0].speed, 40.0);

        field.set_speed(220.0);
        assert!((field.layers[0].speed - 44.0).abs() < 1e-4);
        assert_eq!(field.layers[3].speed, 220.0);

        field.advance(1.5);
        field.reset();
        for l in &field.layers {
            assert_eq!(l.segments, [l.anchor - l.width, l.anchor, l.anchor + l.width]);
        }
    }

    #[test]
    fn test_static_layer_never_moves() {
        let mut l = layer(0.0);
        l.advance(10.0);
        assert_eq!(l.segments, [-400.0, 400.0, 1200.0]);
    }

    #[test]
    fn test_extreme_speed_terminates() {
        let mut l = ParallaxLayer::new(&LayerConfig::new("fast", 1.0, 0.0), 1e13);
        for _ in 0..10 {
            l.advance(0.01);
            assert_tiled(&l);
        }
    }

    #[test]
    fn test_nan_speed_leaves_layer_alone() {
        let mut l = layer(1.0);
        l.speed_factor = f32::NAN;
        l.speed = f32::NAN;
        l.advance(0.01);
        assert_eq!(l.segments, [-400.0, 400.0, 1200.0]);
    }

    proptest! {
        #[test]
        fn segments_always_tile(
            factor in 0.0f32..=1.0,
            speed in 100.0f32..2000.0,
            steps in proptest::collection::vec(0.001f32..0.1, 1..200),
        ) {
            let mut l = ParallaxLayer::new(&LayerConfig::new("p", factor, 0.0), speed);
            for dt in steps {
                l.advance(dt);
                let s = l.sorted_segments();
                prop_assert!(((s[1] - s[0]) - l.width).abs() < 0.05);
                prop_assert!(((s[2] - s[1]) - l.width).abs() < 0.05);
                prop_assert!(s[0] >= -l.width);
            }
        }
    }
}
