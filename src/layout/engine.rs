//! Layout reconstruction: an ordered render-event stream in, a page tree out.
//!
//! The only state carried between events is the cursor into the tree (is a
//! line open, which segment style is open). It lives in [`LayoutState`],
//! which is threaded through a fold over the events, so every page gets its
//! own state and nothing is shared between pages.

use std::sync::Arc;

use crate::errors::{GeometryError, LayoutError};
use crate::geometry::{Intersection, Line};
use crate::log::{debug, trace, warn};

use super::event::{GlyphEvent, RenderEvent};
use super::graphic::{Bitmap, PathGraphic};
use super::node::{Character, Page, TextLine};
use super::style::GlyphStyle;

/// Characters that end the line and segment right after being appended.
pub const DEFAULT_LINE_BREAKS: [char; 3] = ['\n', '\r', '\t'];

/// How to decide whether a glyph continues the open line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ContinuationRule {
    /// Each glyph's vertical extent must strictly contain the other's
    /// vertical center.
    #[default]
    Midpoint,
    /// The next glyph's center must lie within `tolerance × height` of the
    /// last glyph's centerline (the line halfway between its ascent and
    /// descent edges).
    Centerline { tolerance: f64 },
}

impl ContinuationRule {
    /// Whether `next` continues a line that ends with `last`.
    pub fn continues(&self, last: &Character, next: &Character) -> bool {
        match *self {
            ContinuationRule::Midpoint => {
                let overlap = next.vertical_range().intersect_point(last.center().y())
                    | last.vertical_range().intersect_point(next.center().y());
                overlap == Intersection::Body
            }
            ContinuationRule::Centerline { tolerance } => {
                let axis = Line::new(
                    last.descent().start().midpoint(last.ascent().start()),
                    last.descent().end().midpoint(last.ascent().end()),
                );
                let center = next.center();
                let distance = if axis.is_point() {
                    (center.y() - axis.start().y()).abs()
                } else {
                    (center.to_vec() - axis.start().to_vec())
                        .perp_dot(axis.delta())
                        .abs()
                        / axis.length()
                };
                distance <= tolerance * last.height()
            }
        }
    }
}

/// Knobs for [`LayoutEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub continuation: ContinuationRule,
    pub line_breaks: Vec<char>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            continuation: ContinuationRule::default(),
            line_breaks: DEFAULT_LINE_BREAKS.to_vec(),
        }
    }
}

impl LayoutOptions {
    pub fn with_continuation(mut self, rule: ContinuationRule) -> Self {
        self.continuation = rule;
        self
    }

    pub fn with_line_breaks(mut self, breaks: impl IntoIterator<Item = char>) -> Self {
        self.line_breaks = breaks.into_iter().collect();
        self
    }

    pub fn is_line_break(&self, value: char) -> bool {
        self.line_breaks.contains(&value)
    }
}

/// A page under construction plus the cursor into it.
#[derive(Debug, Default)]
pub struct LayoutState {
    page: Page,
    line_open: bool,
    /// Style of the open segment, `None` when no segment is open.
    segment: Option<Arc<GlyphStyle>>,
    next_index: usize,
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree built so far.
    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn is_line_open(&self) -> bool {
        self.line_open
    }

    pub fn is_segment_open(&self) -> bool {
        self.segment.is_some()
    }

    /// Number of events consumed.
    pub fn events_seen(&self) -> usize {
        self.next_index
    }

    /// Consume one event. A geometry error aborts the page.
    pub fn apply(mut self, event: RenderEvent, options: &LayoutOptions) -> Result<Self, LayoutError> {
        let index = self.next_index;
        self.next_index += 1;
        match self.step(event, options) {
            Ok(()) => Ok(self),
            Err(source) => {
                warn!(index, error = %source, "aborting page");
                Err(LayoutError::Event { index, source })
            }
        }
    }

    /// Freeze the tree.
    pub fn finish(self) -> Page {
        debug!(
            lines = self.page.lines().len(),
            graphics = self.page.graphics().len(),
            "page reconstructed"
        );
        self.page
    }

    fn step(&mut self, event: RenderEvent, options: &LayoutOptions) -> Result<(), GeometryError> {
        match event {
            RenderEvent::BeginText => {
                // Only the line is closed here; the segment cursor is left as is.
                self.line_open = false;
                trace!("begin text");
            }
            RenderEvent::Glyph(glyph) => self.place_glyph(glyph, options)?,
            RenderEvent::Path(path) => {
                let graphic = PathGraphic::from_event(&path)?;
                trace!(segments = graphic.segments.len(), "path");
                self.page.push_graphic(graphic.into());
            }
            RenderEvent::Image(image) => {
                trace!(resource = %image.resource, "image");
                self.page.push_graphic(Bitmap::from_event(&image).into());
            }
        }
        Ok(())
    }

    fn place_glyph(&mut self, glyph: GlyphEvent, options: &LayoutOptions) -> Result<(), GeometryError> {
        let value = glyph.value;
        let resolved = glyph.style.resolve()?;

        if self.segment.as_deref().is_some_and(|open| *open != resolved) {
            self.segment = None;
        }
        let style = match &self.segment {
            Some(open) => Arc::clone(open),
            None => Arc::new(resolved),
        };

        let character = Character::new(
            value,
            glyph.descent,
            glyph.baseline,
            glyph.ascent,
            Arc::clone(&style),
        );

        let continues = self.line_open
            && self
                .page
                .last_line()
                .and_then(TextLine::last_character)
                .is_none_or(|last| options.continuation.continues(last, &character));
        if !continues {
            self.segment = None;
            debug!(line = self.page.lines().len(), ?value, "opening line");
        }

        let fresh_segment = self.segment.is_none();
        if fresh_segment {
            debug!(style = %style, ?value, "opening segment");
        }
        self.page
            .open_line(!continues)
            .open_segment(&style, fresh_segment)
            .push(character);
        self.line_open = true;
        self.segment = Some(style);

        if options.is_line_break(value) {
            self.line_open = false;
            self.segment = None;
        }
        Ok(())
    }
}

/// Reconstructs pages from render events.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        LayoutEngine { options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Consume one page's events in order.
    pub fn reconstruct<I>(&self, events: I) -> Result<Page, LayoutError>
    where
        I: IntoIterator<Item = RenderEvent>,
    {
        events
            .into_iter()
            .try_fold(LayoutState::new(), |state, event| state.apply(event, &self.options))
            .map(LayoutState::finish)
    }
}

/// [`LayoutEngine::reconstruct`] with default options.
pub fn reconstruct<I>(events: I) -> Result<Page, LayoutError>
where
    I: IntoIterator<Item = RenderEvent>,
{
    LayoutEngine::default().reconstruct(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Transform};
    use crate::layout::event::{ImageEvent, PathEvent, PathStep, Subpath};
    use crate::layout::style::{FontId, StyleSpec};

    fn style(font: &str) -> StyleSpec {
        StyleSpec::new(FontId::new(font), 10.0)
    }

    /// 6 wide, descent 2 below and ascent 8 above `base`.
    fn glyph(value: char, x: f64, base: f64, font: &str) -> RenderEvent {
        GlyphEvent::upright(value, (x, x + 6.0), base - 2.0, base, base + 8.0, style(font)).into()
    }

    fn word(text: &str, x: f64, base: f64, font: &str) -> Vec<RenderEvent> {
        text.chars()
            .enumerate()
            .map(|(i, c)| glyph(c, x + 6.0 * i as f64, base, font))
            .collect()
    }

    fn segment_texts(page: &Page) -> Vec<Vec<String>> {
        page.lines()
            .iter()
            .map(|l| l.segments().iter().map(|s| s.text()).collect())
            .collect()
    }

    // ==================== grouping ====================

    #[test]
    fn same_style_same_height_is_one_segment() {
        let page = reconstruct(word("Hello", 0.0, 0.0, "F1")).unwrap();
        assert_eq!(segment_texts(&page), vec![vec!["Hello"]]);
    }

    #[test]
    fn slight_baseline_drift_still_continues() {
        let mut events = word("ab", 0.0, 0.0, "F1");
        events.extend(word("cd", 12.0, 1.5, "F1"));
        let page = reconstruct(events).unwrap();
        assert_eq!(segment_texts(&page), vec![vec!["abcd"]]);
    }

    #[test]
    fn style_change_opens_segment_on_same_line() {
        let mut events = word("bold", 0.0, 0.0, "F2");
        events.extend(word("text", 24.0, 0.0, "F1"));
        let page = reconstruct(events).unwrap();
        assert_eq!(segment_texts(&page), vec![vec!["bold", "text"]]);
        assert_eq!(page.lines()[0].segments()[1].style().font, FontId::new("F1"));
    }

    #[test]
    fn returning_to_a_style_opens_another_segment() {
        let mut events = word("a", 0.0, 0.0, "F1");
        events.extend(word("b", 6.0, 0.0, "F2"));
        events.extend(word("c", 12.0, 0.0, "F1"));
        let page = reconstruct(events).unwrap();
        assert_eq!(segment_texts(&page), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn vertical_jump_opens_line() {
        let mut events = word("top", 0.0, 100.0, "F1");
        events.extend(word("low", 0.0, 80.0, "F1"));
        let page = reconstruct(events).unwrap();
        assert_eq!(segment_texts(&page), vec![vec!["top"], vec!["low"]]);
        assert_eq!(page.text(), "top\nlow");
    }

    #[test]
    fn touching_midpoints_are_not_enough() {
        // Next box spans [3, 13]: the last glyph's center (3) sits on its
        // edge and its own center (8) on the last glyph's top edge.
        let events = vec![glyph('a', 0.0, 0.0, "F1"), glyph('b', 6.0, 5.0, "F1")];
        let page = reconstruct(events).unwrap();
        assert_eq!(page.lines().len(), 2);
    }

    #[test]
    fn newline_forces_fresh_line_and_segment() {
        let events = vec![
            glyph('a', 0.0, 0.0, "F1"),
            glyph('\n', 6.0, 0.0, "F1"),
            glyph('b', 12.0, 0.0, "F1"),
        ];
        let page = reconstruct(events).unwrap();
        assert_eq!(segment_texts(&page), vec![vec!["a\n"], vec!["b"]]);
    }

    #[test]
    fn tab_and_carriage_return_also_break() {
        let events = vec![
            glyph('a', 0.0, 0.0, "F1"),
            glyph('\t', 6.0, 0.0, "F1"),
            glyph('b', 12.0, 0.0, "F1"),
            glyph('\r', 18.0, 0.0, "F1"),
            glyph('c', 24.0, 0.0, "F1"),
        ];
        let page = reconstruct(events).unwrap();
        assert_eq!(page.lines().len(), 3);
    }

    #[test]
    fn custom_line_breaks() {
        let engine = LayoutEngine::new(LayoutOptions::default().with_line_breaks(['|']));
        let events = vec![
            glyph('a', 0.0, 0.0, "F1"),
            glyph('\n', 6.0, 0.0, "F1"),
            glyph('|', 12.0, 0.0, "F1"),
            glyph('b', 18.0, 0.0, "F1"),
        ];
        let page = engine.reconstruct(events).unwrap();
        assert_eq!(page.text(), "a\n|\nb");
        assert_eq!(page.lines().len(), 2);
    }

    // ==================== cursor state ====================

    #[test]
    fn begin_text_closes_line_but_not_segment() {
        let options = LayoutOptions::default();
        let state = LayoutState::new()
            .apply(glyph('a', 0.0, 0.0, "F1"), &options)
            .unwrap()
            .apply(RenderEvent::BeginText, &options)
            .unwrap();
        assert!(!state.is_line_open());
        assert!(state.is_segment_open());

        let state = state.apply(glyph('b', 6.0, 0.0, "F1"), &options).unwrap();
        assert_eq!(state.events_seen(), 3);
        assert_eq!(segment_texts(state.page()), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn graphics_do_not_touch_text_state() {
        let path = PathEvent {
            subpaths: vec![Subpath::new(Point::new(0.0, 0.0)).line_to(Point::new(100.0, 0.0))],
            transform: Transform::IDENTITY,
        };
        let image = ImageEvent {
            resource: "Im0".into(),
            anchor: Point::ORIGIN,
            transform: Transform::scaling(20.0, 20.0),
        };
        let events = vec![
            glyph('a', 0.0, 0.0, "F1"),
            path.into(),
            image.into(),
            glyph('b', 6.0, 0.0, "F1"),
        ];
        let page = reconstruct(events).unwrap();
        assert_eq!(segment_texts(&page), vec![vec!["ab"]]);
        assert_eq!(page.graphics().len(), 2);
    }

    #[test]
    fn empty_stream_is_empty_page() {
        let page = reconstruct(Vec::new()).unwrap();
        assert!(page.lines().is_empty());
        assert!(page.graphics().is_empty());
    }

    // ==================== continuation rules ====================

    #[test]
    fn centerline_rule_tolerates_raised_glyph() {
        // Raised glyph box spans [4, 14]: neither center is inside the other
        // box, but its center is 6 above the last glyph's centerline.
        let events = vec![glyph('x', 0.0, 0.0, "F1"), glyph('2', 6.0, 6.0, "F1")];
        let midpoint = reconstruct(events.clone()).unwrap();
        assert_eq!(midpoint.lines().len(), 2);

        let lenient = LayoutEngine::new(
            LayoutOptions::default().with_continuation(ContinuationRule::Centerline { tolerance: 0.7 }),
        );
        assert_eq!(lenient.reconstruct(events.clone()).unwrap().lines().len(), 1);

        let strict = LayoutEngine::new(
            LayoutOptions::default().with_continuation(ContinuationRule::Centerline { tolerance: 0.5 }),
        );
        assert_eq!(strict.reconstruct(events).unwrap().lines().len(), 2);
    }

    // ==================== errors ====================

    #[test]
    fn unsupported_color_aborts_page() {
        let bad = GlyphEvent::upright('b', (6.0, 12.0), -2.0, 0.0, 8.0, style("F1").with_fill(vec![0.0, 0.0]));
        let events = vec![glyph('a', 0.0, 0.0, "F1"), bad.into(), glyph('c', 12.0, 0.0, "F1")];
        let err = reconstruct(events).unwrap_err();
        assert_eq!(err.event_index(), 1);
        assert_eq!(err.geometry(), &GeometryError::UnsupportedColor { channels: 2 });
    }

    #[test]
    fn unsupported_path_step_aborts_page() {
        let mut subpath = Subpath::new(Point::ORIGIN);
        subpath.steps.push(PathStep { points: Vec::new() });
        let path = PathEvent {
            subpaths: vec![subpath],
            transform: Transform::IDENTITY,
        };
        let err = reconstruct(vec![RenderEvent::BeginText, path.into()]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Event {
                index: 1,
                source: GeometryError::UnsupportedSegment { points: 0 },
            }
        );
    }
}
