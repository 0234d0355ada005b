//! Geometry kernel
//!
//! This module is organized into submodules:
//! - `range`: closed intervals and the `Intersection` tri-state
//! - `point`: immutable coordinates
//! - `polyline`: the `Outline` trait, `Polyline` and `Polygon`
//! - `line`: segment intersection and rectangle clipping
//! - `rectangle`: axis-aligned boxes
//! - `transform`: 2×3 affine maps
//! - `curve`: cubic Bézier flattening
//!
//! Everything here is plain data and pure functions.

pub mod curve;
pub mod line;
pub mod point;
pub mod polyline;
pub mod range;
pub mod rectangle;
pub mod transform;

pub use curve::{CubicBezier, INTERIOR_SAMPLES};
pub use line::Line;
pub use point::Point;
pub use polyline::{Outline, Polygon, Polyline};
pub use range::{Intersection, Range};
pub use rectangle::Rectangle;
pub use transform::Transform;
