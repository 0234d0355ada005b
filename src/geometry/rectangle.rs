//! Axis-aligned rectangles.

use std::borrow::Borrow;
use std::fmt;

use super::line::Line;
use super::point::Point;
use super::polyline::{Outline, Polygon};
use super::range::{Intersection, Range};

/// An axis-aligned box.
///
/// Corners are stored in the order lower-left, upper-left, upper-right,
/// lower-right, so the outline walks left edge, top edge, right edge,
/// bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    points: [Point; 4],
}

impl Rectangle {
    /// Build from two opposite corners. Coordinates are normalized, so any
    /// pair of opposite corners works.
    pub fn new(lower_left: Point, upper_right: Point) -> Self {
        let left = lower_left.x().min(upper_right.x());
        let right = lower_left.x().max(upper_right.x());
        let bottom = lower_left.y().min(upper_right.y());
        let top = lower_left.y().max(upper_right.y());
        Self::from_bounds(left, bottom, right, top)
    }

    fn from_bounds(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Rectangle {
            points: [
                Point::new(left, bottom),
                Point::new(left, top),
                Point::new(right, top),
                Point::new(right, bottom),
            ],
        }
    }

    /// Smallest rectangle holding every point, or `None` for no points.
    pub fn bounding<I>(points: I) -> Option<Rectangle>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut left, mut bottom, mut right, mut top) = (first.x(), first.y(), first.x(), first.y());
        for p in points {
            left = left.min(p.x());
            right = right.max(p.x());
            bottom = bottom.min(p.y());
            top = top.max(p.y());
        }
        Some(Self::from_bounds(left, bottom, right, top))
    }

    /// Common area of all rectangles.
    ///
    /// `None` when nothing is given or when the tightened bounds leave no
    /// area (rectangles that merely touch have no intersection here).
    pub fn intersection_of_many<I, R>(rects: I) -> Option<Rectangle>
    where
        I: IntoIterator<Item = R>,
        R: Borrow<Rectangle>,
    {
        let mut rects = rects.into_iter();
        let first = *rects.next()?.borrow();
        let (mut left, mut bottom, mut right, mut top) =
            (first.left(), first.bottom(), first.right(), first.top());
        for rect in rects {
            let rect = rect.borrow();
            left = left.max(rect.left());
            right = right.min(rect.right());
            bottom = bottom.max(rect.bottom());
            top = top.min(rect.top());
        }
        if left >= right || bottom >= top {
            return None;
        }
        Some(Self::from_bounds(left, bottom, right, top))
    }

    #[inline]
    pub fn lower_left(&self) -> Point {
        self.points[0]
    }

    #[inline]
    pub fn upper_left(&self) -> Point {
        self.points[1]
    }

    #[inline]
    pub fn upper_right(&self) -> Point {
        self.points[2]
    }

    #[inline]
    pub fn lower_right(&self) -> Point {
        self.points[3]
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.lower_left().x()
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.upper_right().x()
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.lower_left().y()
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.upper_right().y()
    }

    pub fn width(&self) -> f64 {
        self.right() - self.left()
    }

    pub fn height(&self) -> f64 {
        self.top() - self.bottom()
    }

    pub fn center(&self) -> Point {
        self.lower_left().midpoint(self.upper_right())
    }

    pub fn left_edge(&self) -> Line {
        Line::new(self.lower_left(), self.upper_left())
    }

    pub fn top_edge(&self) -> Line {
        Line::new(self.upper_left(), self.upper_right())
    }

    pub fn right_edge(&self) -> Line {
        Line::new(self.upper_right(), self.lower_right())
    }

    pub fn bottom_edge(&self) -> Line {
        Line::new(self.lower_right(), self.lower_left())
    }

    pub fn horizontal_range(&self) -> Range {
        Range::new(self.left(), self.right())
    }

    pub fn vertical_range(&self) -> Range {
        Range::new(self.bottom(), self.top())
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Self::from_bounds(
            self.left().min(other.left()),
            self.bottom().min(other.bottom()),
            self.right().max(other.right()),
            self.top().max(other.top()),
        )
    }

    pub fn as_polygon(&self) -> Polygon {
        Polygon::new(self.points.to_vec())
    }

    /// Point on the boundary is `Edge`, strictly inside is `Body`.
    pub fn contains(&self, point: Point) -> Intersection {
        self.horizontal_range().intersect_point(point.x())
            & self.vertical_range().intersect_point(point.y())
    }

    /// Classify how `line` meets this rectangle.
    pub fn intersect_line(&self, line: &Line) -> Intersection {
        if line.is_point() {
            return self.contains(line.start());
        }
        if line.is_horizontal() {
            return self.vertical_range().intersect_point(line.start().y())
                & self.horizontal_range().intersect(&line.horizontal_range());
        }
        if line.is_vertical() {
            return self.horizontal_range().intersect_point(line.start().x())
                & self.vertical_range().intersect(&line.vertical_range());
        }

        let bounds = self.horizontal_range().intersect(&line.horizontal_range())
            & self.vertical_range().intersect(&line.vertical_range());
        if bounds.is_none() {
            return Intersection::None;
        }

        // Parameter spans during which the carrier line is between the
        // left/right and bottom/top boundaries. The segment meets the
        // rectangle where both spans and [0, 1] share a value.
        let s = line.start();
        let d = line.delta();
        let across = Range::new((self.left() - s.x()) / d.x, (self.right() - s.x()) / d.x);
        let along = Range::new((self.bottom() - s.y()) / d.y, (self.top() - s.y()) / d.y);
        let segment = Range::new(0.0, 1.0);

        across.intersect(&segment) & along.intersect(&segment) & across.intersect(&along)
    }

    /// Both axis ranges must meet.
    pub fn intersect(&self, other: &Rectangle) -> Intersection {
        self.horizontal_range().intersect(&other.horizontal_range())
            & self.vertical_range().intersect(&other.vertical_range())
    }
}

impl Outline for Rectangle {
    fn points(&self) -> &[Point] {
        &self.points
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn bounds(&self) -> Option<Rectangle> {
        Some(*self)
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.lower_left(), self.upper_right())
    }
}
