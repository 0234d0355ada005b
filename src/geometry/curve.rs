//! Cubic Bézier curves and their flattening into polylines.

use super::point::Point;
use super::polyline::Polyline;

/// Interior samples taken by [`CubicBezier::flatten`].
pub const INTERIOR_SAMPLES: usize = 5;

/// A cubic Bézier curve given by four control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        CubicBezier { p0, p1, p2, p3 }
    }

    /// Evaluate with the Bernstein weights
    /// `(1-t)³·P0 + 3t(1-t)²·P1 + 3t²(1-t)·P2 + t³·P3`.
    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let w0 = mt * mt * mt;
        let w1 = 3.0 * t * mt * mt;
        let w2 = 3.0 * t * t * mt;
        let w3 = t * t * t;
        let v = self.p0.to_vec() * w0
            + self.p1.to_vec() * w1
            + self.p2.to_vec() * w2
            + self.p3.to_vec() * w3;
        v.into()
    }

    /// Approximate with [`INTERIOR_SAMPLES`] interior points plus the exact
    /// end points.
    pub fn flatten(&self) -> Polyline {
        self.flatten_with(INTERIOR_SAMPLES)
    }

    /// Approximate with `interior` uniformly spaced samples between the end
    /// points. The first and last points are exactly `p0` and `p3`.
    pub fn flatten_with(&self, interior: usize) -> Polyline {
        let steps = interior + 1;
        let mut points = Vec::with_capacity(interior + 2);
        points.push(self.p0);
        for i in 1..steps {
            points.push(self.point_at(i as f64 / steps as f64));
        }
        points.push(self.p3);
        Polyline::open(points)
    }
}
