//! Graphic nodes: painted paths and placed bitmaps.

use enum_dispatch::enum_dispatch;

use crate::errors::GeometryError;
use crate::geometry::{CubicBezier, Line, Outline, Point, Polygon, Rectangle, Transform};

use super::event::{ImageEvent, PathEvent};

/// Common behavior for everything on a page that isn't text
#[enum_dispatch]
pub trait GraphicNode {
    /// Local → page transform
    fn transform(&self) -> &Transform;

    /// Segments in local space
    fn local_outline(&self) -> Vec<Line>;

    /// Short name used in page dumps
    fn kind(&self) -> &'static str;

    /// Segments in page space
    fn page_outline(&self) -> Vec<Line> {
        let transform = self.transform();
        self.local_outline()
            .iter()
            .map(|line| transform.apply_line(line))
            .collect()
    }

    /// Page-space bounding box, `None` when there is nothing to draw
    fn bounds(&self) -> Option<Rectangle> {
        Rectangle::bounding(
            self.page_outline()
                .iter()
                .flat_map(|line| [line.start(), line.end()]),
        )
    }
}

/// A graphic on the page.
#[enum_dispatch(GraphicNode)]
#[derive(Debug, Clone, PartialEq)]
pub enum Graphic {
    Bitmap(Bitmap),
    Path(PathGraphic),
}

// ============================================================================
// Bitmaps
// ============================================================================

/// A placed image. Its local space is the unit square.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub resource: String,
    pub anchor: Point,
    pub outline: Polygon,
    pub transform: Transform,
}

impl Bitmap {
    pub fn unit_square() -> Rectangle {
        Rectangle::new(Point::ORIGIN, Point::new(1.0, 1.0))
    }

    pub fn from_event(event: &ImageEvent) -> Self {
        Bitmap {
            resource: event.resource.clone(),
            anchor: event.anchor,
            outline: event.transform.apply_rectangle(&Self::unit_square()),
            transform: event.transform,
        }
    }
}

impl GraphicNode for Bitmap {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn local_outline(&self) -> Vec<Line> {
        Self::unit_square().lines()
    }

    fn kind(&self) -> &'static str {
        "bitmap"
    }

    fn page_outline(&self) -> Vec<Line> {
        self.outline.lines()
    }
}

// ============================================================================
// Paths
// ============================================================================

/// A vector path flattened into straight segments.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGraphic {
    pub segments: Vec<Line>,
    pub transform: Transform,
}

impl PathGraphic {
    /// Flatten every subpath. Curves become [`CubicBezier::flatten`]
    /// polylines; closed subpaths get a closing segment unless they already
    /// end where they started.
    pub fn from_event(event: &PathEvent) -> Result<Self, GeometryError> {
        let mut segments = Vec::new();
        for subpath in &event.subpaths {
            let mut current = subpath.start;
            for step in &subpath.steps {
                match *step.points.as_slice() {
                    [end] => {
                        segments.push(Line::new(current, end));
                        current = end;
                    }
                    [c1, c2, end] => {
                        segments.extend(CubicBezier::new(current, c1, c2, end).flatten().lines());
                        current = end;
                    }
                    _ => {
                        return Err(GeometryError::UnsupportedSegment {
                            points: step.points.len(),
                        });
                    }
                }
            }
            if subpath.closed && current != subpath.start {
                segments.push(Line::new(current, subpath.start));
            }
        }
        Ok(PathGraphic {
            segments,
            transform: event.transform,
        })
    }
}

impl GraphicNode for PathGraphic {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn local_outline(&self) -> Vec<Line> {
        self.segments.clone()
    }

    fn kind(&self) -> &'static str {
        "path"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::INTERIOR_SAMPLES;
    use crate::layout::event::{PathStep, Subpath};

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn closed_square_path() {
        let event = PathEvent {
            subpaths: vec![
                Subpath::new(pt(0.0, 0.0))
                    .line_to(pt(1.0, 0.0))
                    .line_to(pt(1.0, 1.0))
                    .line_to(pt(0.0, 1.0))
                    .close(),
            ],
            transform: Transform::scaling(10.0, 10.0),
        };
        let graphic = Graphic::from(PathGraphic::from_event(&event).unwrap());
        assert_eq!(graphic.kind(), "path");
        assert_eq!(graphic.local_outline().len(), 4);
        assert_eq!(graphic.bounds(), Some(Rectangle::new(pt(0.0, 0.0), pt(10.0, 10.0))));
    }

    #[test]
    fn already_closed_subpath_gets_no_extra_segment() {
        let event = PathEvent {
            subpaths: vec![
                Subpath::new(pt(0.0, 0.0))
                    .line_to(pt(1.0, 0.0))
                    .line_to(pt(0.0, 0.0))
                    .close(),
            ],
            transform: Transform::IDENTITY,
        };
        assert_eq!(PathGraphic::from_event(&event).unwrap().segments.len(), 2);
    }

    #[test]
    fn curves_are_flattened() {
        let event = PathEvent {
            subpaths: vec![
                Subpath::new(pt(0.0, 0.0)).curve_to(pt(0.0, 1.0), pt(1.0, 1.0), pt(1.0, 0.0)),
            ],
            transform: Transform::IDENTITY,
        };
        let path = PathGraphic::from_event(&event).unwrap();
        assert_eq!(path.segments.len(), INTERIOR_SAMPLES + 1);
        assert_eq!(path.segments[0].start(), pt(0.0, 0.0));
        assert_eq!(path.segments[INTERIOR_SAMPLES].end(), pt(1.0, 0.0));
    }

    #[test]
    fn unsupported_step_is_an_error() {
        let mut subpath = Subpath::new(pt(0.0, 0.0));
        subpath.steps.push(PathStep {
            points: vec![pt(1.0, 1.0), pt(2.0, 2.0)],
        });
        let event = PathEvent {
            subpaths: vec![subpath],
            transform: Transform::IDENTITY,
        };
        assert_eq!(
            PathGraphic::from_event(&event),
            Err(GeometryError::UnsupportedSegment { points: 2 })
        );
    }

    #[test]
    fn bitmap_outline_is_transformed_unit_square() {
        let event = ImageEvent {
            resource: "Im1".into(),
            anchor: pt(10.0, 20.0),
            transform: Transform::from_operands(&[100.0, 0.0, 0.0, 50.0, 10.0, 20.0]).unwrap(),
        };
        let graphic = Graphic::from(Bitmap::from_event(&event));
        assert_eq!(graphic.kind(), "bitmap");
        assert_eq!(graphic.bounds(), Some(Rectangle::new(pt(10.0, 20.0), pt(110.0, 70.0))));
        assert_eq!(graphic.page_outline().len(), 4);
        match graphic {
            Graphic::Bitmap(bitmap) => {
                assert_eq!(bitmap.resource, "Im1");
                assert_eq!(bitmap.outline.points()[2], pt(110.0, 70.0));
            }
            Graphic::Path(_) => panic!("expected a bitmap"),
        }
    }
}
