//! Render events as emitted by a content-stream decoder, in content order.

use crate::geometry::{Line, Point, Transform};

use super::style::StyleSpec;

/// One decoded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    /// Start of a text object.
    BeginText,
    /// A positioned glyph.
    Glyph(GlyphEvent),
    /// A painted vector path.
    Path(PathEvent),
    /// A painted image.
    Image(ImageEvent),
}

/// A glyph with its three horizontal-ish edges in page space.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphEvent {
    pub value: char,
    pub baseline: Line,
    pub ascent: Line,
    pub descent: Line,
    pub style: StyleSpec,
}

impl GlyphEvent {
    pub fn new(value: char, baseline: Line, ascent: Line, descent: Line, style: StyleSpec) -> Self {
        GlyphEvent {
            value,
            baseline,
            ascent,
            descent,
            style,
        }
    }

    /// Upright glyph spanning `x0..x1` with its edges at the given heights.
    pub fn upright(
        value: char,
        (x0, x1): (f64, f64),
        descent: f64,
        baseline: f64,
        ascent: f64,
        style: StyleSpec,
    ) -> Self {
        let edge = |y: f64| Line::new(Point::new(x0, y), Point::new(x1, y));
        GlyphEvent::new(value, edge(baseline), edge(ascent), edge(descent), style)
    }
}

impl From<GlyphEvent> for RenderEvent {
    fn from(glyph: GlyphEvent) -> Self {
        RenderEvent::Glyph(glyph)
    }
}

/// One drawing step from the current point.
///
/// A single control point is a straight line to it; three are a cubic
/// Bézier ending at the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    pub points: Vec<Point>,
}

impl PathStep {
    pub fn line_to(end: Point) -> Self {
        PathStep { points: vec![end] }
    }

    pub fn curve_to(c1: Point, c2: Point, end: Point) -> Self {
        PathStep {
            points: vec![c1, c2, end],
        }
    }
}

/// A connected run of steps starting at `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    pub start: Point,
    pub steps: Vec<PathStep>,
    pub closed: bool,
}

impl Subpath {
    pub fn new(start: Point) -> Self {
        Subpath {
            start,
            steps: Vec::new(),
            closed: false,
        }
    }

    pub fn line_to(mut self, end: Point) -> Self {
        self.steps.push(PathStep::line_to(end));
        self
    }

    pub fn curve_to(mut self, c1: Point, c2: Point, end: Point) -> Self {
        self.steps.push(PathStep::curve_to(c1, c2, end));
        self
    }

    pub fn close(mut self) -> Self {
        self.closed = true;
        self
    }
}

/// Subpaths in local space plus the transform placing them on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEvent {
    pub subpaths: Vec<Subpath>,
    pub transform: Transform,
}

impl From<PathEvent> for RenderEvent {
    fn from(path: PathEvent) -> Self {
        RenderEvent::Path(path)
    }
}

/// An image resource painted into the unit square mapped by `transform`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEvent {
    pub resource: String,
    pub anchor: Point,
    pub transform: Transform,
}

impl From<ImageEvent> for RenderEvent {
    fn from(image: ImageEvent) -> Self {
        RenderEvent::Image(image)
    }
}
