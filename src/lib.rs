//! Page layout reconstruction.
//!
//! A content-stream decoder emits positioned glyphs, painted paths and
//! images in drawing order. [`LayoutEngine`] folds that stream into a
//! [`Page`]: text lines made of same-style segments of characters, plus the
//! page's graphics. Every grouping decision goes through the [`geometry`]
//! kernel.
//!
//! Event streams can also be written down as render traces (see [`trace`]):
//!
//! ```
//! let page = pagelines::reconstruct_trace("hello", r#"
//!     style body { font "F1" height 10 }
//!     glyph "h" from 0 to 6 descent -2 base 0 ascent 8 style body
//!     glyph "i" from 6 to 9 descent -2 base 0 ascent 8 style body
//! "#).unwrap();
//! assert_eq!(page.text(), "hi");
//! ```

use pest_derive::Parser;

pub mod errors;
pub mod geometry;
pub mod layout;
mod log;
pub mod trace;

pub use errors::{GeometryError, LayoutError, TraceError};
pub use geometry::{Intersection, Line, Point, Polygon, Polyline, Range, Rectangle, Transform};
pub use layout::{
    ContinuationRule, Graphic, LayoutEngine, LayoutOptions, Page, RenderEvent, Segment, TextLine, reconstruct,
};
pub use trace::parse_trace;

#[derive(Parser)]
#[grammar = "trace.pest"]
pub struct TraceParser;

/// Parse a render trace and reconstruct its page with default options.
///
/// Returns the page on success, or a report with diagnostics.
pub fn reconstruct_trace(name: &str, source: &str) -> Result<Page, miette::Report> {
    reconstruct_trace_with(&LayoutEngine::default(), name, source)
}

/// [`reconstruct_trace`] with a configured engine.
pub fn reconstruct_trace_with(engine: &LayoutEngine, name: &str, source: &str) -> Result<Page, miette::Report> {
    let events = parse_trace(name, source)?;
    Ok(engine.reconstruct(events)?)
}
