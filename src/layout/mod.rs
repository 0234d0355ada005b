//! Layout reconstruction
//!
//! - `event`: render events as a content-stream decoder emits them
//! - `style`: glyph styles and paint resolution
//! - `node`: the page tree (`Page`, `TextLine`, `Segment`, `Character`)
//! - `graphic`: painted paths and placed bitmaps
//! - `engine`: the fold that turns events into a page

pub mod engine;
pub mod event;
pub mod graphic;
pub mod node;
pub mod style;

pub use engine::{ContinuationRule, DEFAULT_LINE_BREAKS, LayoutEngine, LayoutOptions, LayoutState, reconstruct};
pub use event::{GlyphEvent, ImageEvent, PathEvent, PathStep, RenderEvent, Subpath};
pub use graphic::{Bitmap, Graphic, GraphicNode, PathGraphic};
pub use node::{Character, Page, Segment, TextLine};
pub use style::{Color, FontId, GlyphStyle, StyleSpec};
