//! 2×3 affine transforms.

use std::fmt;

use glam::{DAffine2, dvec2};

use crate::errors::GeometryError;

use super::line::Line;
use super::point::Point;
use super::polyline::{Outline, Polygon, Polyline};
use super::rectangle::Rectangle;

/// Affine map `(x, y) → (xx·x + xy·y + xz, yx·x + yy·y + yz)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(DAffine2);

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform(DAffine2::IDENTITY);

    /// Build from the matrix rows `[xx xy xz]` and `[yx yy yz]`.
    pub fn new(xx: f64, xy: f64, xz: f64, yx: f64, yy: f64, yz: f64) -> Self {
        Transform(DAffine2::from_cols_array(&[xx, yx, xy, yy, xz, yz]))
    }

    /// Build from six operands in content-stream order `[a b c d e f]`,
    /// i.e. `[xx yx xy yy xz yz]`.
    pub fn from_operands(operands: &[f64]) -> Result<Self, GeometryError> {
        let array: &[f64; 6] = operands
            .try_into()
            .map_err(|_| GeometryError::MalformedTransform { len: operands.len() })?;
        Ok(Transform(DAffine2::from_cols_array(array)))
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Transform(DAffine2::from_translation(dvec2(dx, dy)))
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Transform(DAffine2::from_scale(dvec2(sx, sy)))
    }

    #[inline]
    pub fn xx(&self) -> f64 {
        self.0.matrix2.x_axis.x
    }

    #[inline]
    pub fn xy(&self) -> f64 {
        self.0.matrix2.y_axis.x
    }

    #[inline]
    pub fn xz(&self) -> f64 {
        self.0.translation.x
    }

    #[inline]
    pub fn yx(&self) -> f64 {
        self.0.matrix2.x_axis.y
    }

    #[inline]
    pub fn yy(&self) -> f64 {
        self.0.matrix2.y_axis.y
    }

    #[inline]
    pub fn yz(&self) -> f64 {
        self.0.translation.y
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform::IDENTITY
    }

    pub fn determinant(&self) -> f64 {
        self.0.matrix2.determinant()
    }

    /// `self` followed by `next`.
    pub fn then(&self, next: &Transform) -> Transform {
        Transform(next.0 * self.0)
    }

    /// Full inverse, or `None` for a singular matrix.
    pub fn inverse(&self) -> Option<Transform> {
        if self.determinant() == 0.0 {
            return None;
        }
        Some(Transform(self.0.inverse()))
    }

    /// The translation with its sign flipped, linear part dropped.
    ///
    /// Undoes a pure translation exactly.
    pub fn translation_inverse(&self) -> Transform {
        Transform::translation(-self.xz(), -self.yz())
    }

    /// This transform with the translation removed.
    pub fn linear_part(&self) -> Transform {
        Transform(DAffine2::from_mat2(self.0.matrix2))
    }

    pub fn apply(&self, point: Point) -> Point {
        self.0.transform_point2(point.to_vec()).into()
    }

    pub fn apply_line(&self, line: &Line) -> Line {
        Line::new(self.apply(line.start()), self.apply(line.end()))
    }

    /// Keeps the closing flag.
    pub fn apply_polyline(&self, polyline: &Polyline) -> Polyline {
        Polyline::new(
            polyline.points().iter().map(|&p| self.apply(p)).collect(),
            polyline.is_closed(),
        )
    }

    /// A rotated or sheared rectangle is no longer axis aligned, so the
    /// result is a general polygon.
    pub fn apply_rectangle(&self, rect: &Rectangle) -> Polygon {
        Polygon::new(rect.points().iter().map(|&p| self.apply(p)).collect())
    }
}

impl TryFrom<&[f64]> for Transform {
    type Error = GeometryError;

    fn try_from(operands: &[f64]) -> Result<Self, Self::Error> {
        Transform::from_operands(operands)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {} {} {} {}]",
            self.xx(),
            self.yx(),
            self.xy(),
            self.yy(),
            self.xz(),
            self.yz()
        )
    }
}
