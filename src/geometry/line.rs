//! Two-point line segments: intersection and rectangle clipping.

use std::fmt;

use glam::DVec2;

use super::point::Point;
use super::polyline::Outline;
use super::range::{Intersection, Range};
use super::rectangle::Rectangle;

/// A segment from `start` to `end`. May be collapsed to a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    points: [Point; 2],
}

impl Line {
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Line { points: [start, end] }
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.points[0]
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.points[1]
    }

    /// `end - start`
    #[inline]
    pub fn delta(&self) -> DVec2 {
        self.end().to_vec() - self.start().to_vec()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.start().midpoint(self.end())
    }

    /// Point at parameter `t`; exact at `t = 0` and `t = 1`.
    pub fn point_at(&self, t: f64) -> Point {
        if t == 0.0 {
            self.start()
        } else if t == 1.0 {
            self.end()
        } else {
            self.start().lerp(self.end(), t)
        }
    }

    /// Collapsed to a single point.
    #[inline]
    pub fn is_point(&self) -> bool {
        self.start() == self.end()
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.start().y() == self.end().y()
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.start().x() == self.end().x()
    }

    pub fn horizontal_range(&self) -> Range {
        Range::new(self.start().x(), self.end().x())
    }

    pub fn vertical_range(&self) -> Range {
        Range::new(self.start().y(), self.end().y())
    }

    pub fn reversed(&self) -> Line {
        Line::new(self.end(), self.start())
    }

    /// Classify a point against this (non-collapsed) segment.
    fn locate(&self, point: Point) -> Intersection {
        let d = self.delta();
        let r = point.to_vec() - self.start().to_vec();
        if r.perp_dot(d) != 0.0 {
            return Intersection::None;
        }
        Intersection::of_parameter(r.dot(d) / d.length_squared())
    }

    /// Classify how this segment meets `other`.
    ///
    /// Touching at an endpoint of either segment is `Edge`; crossing through
    /// both interiors is `Body`. Collapsed segments are handled as points.
    pub fn intersect(&self, other: &Line) -> Intersection {
        match (self.is_point(), other.is_point()) {
            (true, true) => {
                return if self.start() == other.start() {
                    Intersection::Body
                } else {
                    Intersection::None
                };
            }
            (true, false) => return other.locate(self.start()),
            (false, true) => return self.locate(other.start()),
            (false, false) => {}
        }

        let bounds = self.horizontal_range().intersect(&other.horizontal_range())
            & self.vertical_range().intersect(&other.vertical_range());
        if bounds.is_none() {
            return Intersection::None;
        }

        let d1 = self.delta();
        let d2 = other.delta();
        let r = other.start().to_vec() - self.start().to_vec();
        let denom = d1.perp_dot(d2);
        if denom == 0.0 {
            // Parallel: only colinear segments can meet, and then the axis
            // overlap already says how.
            return if r.perp_dot(d1) == 0.0 {
                bounds
            } else {
                Intersection::None
            };
        }

        let mut t = r.perp_dot(d2) / denom;
        let mut u = r.perp_dot(d1) / denom;
        // Non-parallel segments meet at most once, so a shared endpoint is
        // the crossing and pins both parameters exactly.
        for (at, p) in [(0.0, self.start()), (1.0, self.end())] {
            for (bu, q) in [(0.0, other.start()), (1.0, other.end())] {
                if p == q {
                    t = at;
                    u = bu;
                }
            }
        }
        Intersection::of_parameter(t) & Intersection::of_parameter(u)
    }

    /// Strongest intersection with any segment of `outline`.
    pub fn intersect_outline<O: Outline + ?Sized>(&self, outline: &O) -> Intersection {
        let mut result = Intersection::None;
        for line in outline.lines() {
            result = result | self.intersect(&line);
            if result == Intersection::Body {
                break;
            }
        }
        result
    }

    /// The part of this segment inside `rect`, if any.
    ///
    /// The four parameters where the segment's carrier crosses the
    /// rectangle's boundary lines are sorted and the middle two, clamped to
    /// `[0, 1]`, bound the clipped piece. An axis the segment doesn't move
    /// along contributes `±∞`.
    pub fn overlap(&self, rect: &Rectangle) -> Option<Line> {
        if self.is_point() {
            return rect.contains(self.start()).is_some().then_some(*self);
        }

        let s = self.start();
        let d = self.delta();
        let (tx0, tx1) = boundary_parameters(s.x(), d.x, rect.left(), rect.right());
        let (ty0, ty1) = boundary_parameters(s.y(), d.y, rect.bottom(), rect.top());

        let mut ts = [tx0, tx1, ty0, ty1];
        ts.sort_by(f64::total_cmp);
        let (enter, exit) = (ts[1], ts[2]);
        if exit < 0.0 || enter > 1.0 {
            return None;
        }

        let clipped = Line::new(
            self.point_at(enter.clamp(0.0, 1.0)),
            self.point_at(exit.clamp(0.0, 1.0)),
        );
        // Sorting alone can't tell a miss from a hit when the per-axis
        // intervals are disjoint.
        if rect.contains(clipped.midpoint()).is_none() {
            return None;
        }
        Some(clipped)
    }
}

/// Parameters where `origin + t * delta` reaches `lo` and `hi`.
fn boundary_parameters(origin: f64, delta: f64, lo: f64, hi: f64) -> (f64, f64) {
    if delta == 0.0 {
        (f64::NEG_INFINITY, f64::INFINITY)
    } else {
        ((lo - origin) / delta, (hi - origin) / delta)
    }
}

impl Outline for Line {
    fn points(&self) -> &[Point] {
        &self.points
    }

    fn is_closed(&self) -> bool {
        false
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start(), self.end())
    }
}
