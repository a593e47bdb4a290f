//! Control points for quadratic connectors.

use rand::{Rng, SeedableRng, rngs::StdRng};

use stackmap_core::geometry::Point;

use crate::config::CurveConfig;

/// Produces the control point of each connector.
///
/// The control point sits `lift` above the midpoint and is shifted
/// horizontally by a random offset in `[-jitter / 2, jitter / 2]`, which
/// visually separates overlapping connectors. With a seed the sequence of
/// offsets is reproducible.
pub(super) struct ControlPoints {
    lift: f32,
    jitter: f32,
    rng: StdRng,
}

impl ControlPoints {
    pub(super) fn new(config: &CurveConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            lift: config.lift(),
            jitter: config.jitter(),
            rng,
        }
    }

    pub(super) fn control_for(&mut self, mid: Point) -> Point {
        let half = self.jitter / 2.0;
        let offset = if half > 0.0 {
            self.rng.random_range(-half..=half)
        } else {
            0.0
        };
        Point::new(mid.x() + offset, mid.y() - self.lift)
    }
}
