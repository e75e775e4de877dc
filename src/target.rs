use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::coords::Point;
use crate::pattern::MotionPattern;

/// Spawn range for the target's initial x position (px)
pub const SPAWN_X: (f64, f64) = (200.0, 1800.0);
/// Spawn range for the target's initial y position (px)
pub const SPAWN_Y: (f64, f64) = (200.0, 1400.0);

/// Target velocity in px/s, screen convention
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub sx: f64,
    pub sy: f64,
}

impl Velocity {
    pub fn new(sx: f64, sy: f64) -> Self {
        Self { sx, sy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub initial_position: Point,
    pub velocity: Velocity,
    pub pattern: MotionPattern,
}

impl Target {
    pub fn new(initial_position: Point, velocity: Velocity, pattern: MotionPattern) -> Self {
        Self {
            initial_position,
            velocity,
            pattern,
        }
    }

    /// Linear extrapolation of the target position after `secs`
    pub fn position_after(&self, secs: f64) -> Point {
        Point {
            x: self.initial_position.x + self.velocity.sx * secs,
            y: self.initial_position.y + self.velocity.sy * secs,
        }
    }
}

/// Draws practice targets from the motion pattern catalog
#[derive(Debug)]
pub struct TargetGenerator<R: Rng> {
    rng: R,
}

impl TargetGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TargetGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self) -> Target {
        let x0 = self.rng.gen_range(SPAWN_X.0..=SPAWN_X.1);
        let y0 = self.rng.gen_range(SPAWN_Y.0..=SPAWN_Y.1);

        // every pattern has equal weight, whatever its degrees of freedom
        let pattern = MotionPattern::ALL[self.rng.gen_range(0..MotionPattern::ALL.len())];

        let sx = self.draw_axis(pattern.x_range());
        let sy = self.draw_axis(pattern.y_range());

        let target = Target::new(Point::new(x0, y0), Velocity::new(sx, sy), pattern);
        log::info!(
            "generated {} target at ({:.1}, {:.1}) moving ({:.1}, {:.1}) px/s",
            pattern,
            x0,
            y0,
            sx,
            sy
        );
        target
    }

    fn draw_axis(&mut self, range: Option<(f64, f64)>) -> f64 {
        match range {
            Some((lo, hi)) => self.rng.gen_range(lo..=hi),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn in_range(v: f64, (lo, hi): (f64, f64)) -> bool {
        v >= lo && v <= hi
    }

    #[test]
    fn position_after_extrapolates_linearly() {
        let t = Target::new(
            Point::new(500.0, 500.0),
            Velocity::new(200.0, -75.0),
            MotionPattern::UpRight,
        );
        assert_eq!(t.position_after(0.25), Point::new(550.0, 481.25));
        assert_eq!(t.position_after(0.0), t.initial_position);
    }

    #[test]
    fn generated_targets_stay_within_catalog_ranges() {
        let mut gen = TargetGenerator::seeded(7);
        for _ in 0..500 {
            let t = gen.generate();
            assert!(in_range(t.initial_position.x, SPAWN_X));
            assert!(in_range(t.initial_position.y, SPAWN_Y));

            match t.pattern.x_range() {
                Some(range) => assert!(in_range(t.velocity.sx, range)),
                None => assert_eq!(t.velocity.sx, 0.0),
            }
            match t.pattern.y_range() {
                Some(range) => assert!(in_range(t.velocity.sy, range)),
                None => assert_eq!(t.velocity.sy, 0.0),
            }
        }
    }

    #[test]
    fn every_pattern_is_eventually_drawn() {
        let mut gen = TargetGenerator::seeded(42);
        let seen: HashSet<MotionPattern> = (0..1000).map(|_| gen.generate().pattern).collect();
        assert_eq!(seen.len(), MotionPattern::ALL.len());
    }

    #[test]
    fn same_seed_replays_same_targets() {
        let mut a = TargetGenerator::seeded(1234);
        let mut b = TargetGenerator::seeded(1234);
        for _ in 0..20 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn pattern_selection_is_roughly_uniform() {
        let mut gen = TargetGenerator::seeded(99);
        let draws = 9000;
        let stationary = (0..draws)
            .filter(|_| gen.generate().pattern == MotionPattern::Stationary)
            .count();
        // expected 1000; generous bounds keep the test stable
        assert!(stationary > 800 && stationary < 1200, "got {stationary}");
    }
}
