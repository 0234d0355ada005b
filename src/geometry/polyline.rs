//! Point sequences: open polylines and closed polygons.

use super::line::Line;
use super::point::Point;
use super::rectangle::Rectangle;
use super::transform::Transform;

/// Common behavior for everything made of an ordered run of points.
///
/// `Line`, `Polyline`, `Polygon` and `Rectangle` all derive their segments
/// from their points and closing flag.
pub trait Outline {
    /// The points in order.
    fn points(&self) -> &[Point];

    /// Whether an implicit segment joins the last point back to the first.
    fn is_closed(&self) -> bool;

    /// Constituent segments. Empty below two points.
    fn lines(&self) -> Vec<Line> {
        let points = self.points();
        if points.len() < 2 {
            return Vec::new();
        }
        let mut lines: Vec<Line> = points.windows(2).map(|w| Line::new(w[0], w[1])).collect();
        if self.is_closed() {
            lines.push(Line::new(points[points.len() - 1], points[0]));
        }
        lines
    }

    /// Total edge length.
    fn length(&self) -> f64 {
        self.lines().iter().map(Line::length).sum()
    }

    /// Smallest axis-aligned rectangle holding every point.
    fn bounds(&self) -> Option<Rectangle> {
        Rectangle::bounding(self.points().iter().copied())
    }
}

/// Ordered points, optionally closed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    points: Vec<Point>,
    closed: bool,
}

impl Polyline {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Polyline { points, closed }
    }

    /// An open polyline.
    pub fn open(points: Vec<Point>) -> Self {
        Self::new(points, false)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Map every point through `transform`.
    pub fn transformed(&self, transform: &Transform) -> Polyline {
        transform.apply_polyline(self)
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl Outline for Polyline {
    fn points(&self) -> &[Point] {
        &self.points
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl FromIterator<Point> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Polyline::open(iter.into_iter().collect())
    }
}

/// A closed polyline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon(Polyline);

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Polygon(Polyline::new(points, true))
    }

    pub fn as_polyline(&self) -> &Polyline {
        &self.0
    }

    pub fn into_polyline(self) -> Polyline {
        self.0
    }
}

impl Outline for Polygon {
    fn points(&self) -> &[Point] {
        self.0.points()
    }

    fn is_closed(&self) -> bool {
        true
    }
}

impl From<Polygon> for Polyline {
    fn from(polygon: Polygon) -> Self {
        polygon.0
    }
}
