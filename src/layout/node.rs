//! The reconstructed page tree: lines of segments of characters.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::geometry::{Line, Point, Range, Rectangle};

use super::graphic::{Graphic, GraphicNode};
use super::style::GlyphStyle;

/// A placed glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    value: char,
    descent: Line,
    baseline: Line,
    ascent: Line,
    style: Arc<GlyphStyle>,
    bounds: Rectangle,
}

impl Character {
    /// The bounding box covers the end points of all three edges.
    pub fn new(value: char, descent: Line, baseline: Line, ascent: Line, style: Arc<GlyphStyle>) -> Self {
        let bounds = line_box(&descent)
            .union(&line_box(&baseline))
            .union(&line_box(&ascent));
        Character {
            value,
            descent,
            baseline,
            ascent,
            style,
            bounds,
        }
    }

    pub fn value(&self) -> char {
        self.value
    }

    pub fn descent(&self) -> &Line {
        &self.descent
    }

    pub fn baseline(&self) -> &Line {
        &self.baseline
    }

    pub fn ascent(&self) -> &Line {
        &self.ascent
    }

    pub fn style(&self) -> &GlyphStyle {
        &self.style
    }

    pub fn bounds(&self) -> &Rectangle {
        &self.bounds
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn vertical_range(&self) -> Range {
        self.bounds.vertical_range()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }
}

fn line_box(line: &Line) -> Rectangle {
    Rectangle::new(line.start(), line.end())
}

fn union_all<'a>(boxes: impl Iterator<Item = &'a Rectangle>) -> Option<Rectangle> {
    boxes.fold(None, |acc: Option<Rectangle>, b| {
        Some(acc.map_or(*b, |acc| acc.union(b)))
    })
}

/// A run of characters on one line sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    style: Arc<GlyphStyle>,
    characters: Vec<Character>,
}

impl Segment {
    pub(crate) fn new(style: Arc<GlyphStyle>) -> Self {
        Segment {
            style,
            characters: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, character: Character) {
        self.characters.push(character);
    }

    pub fn style(&self) -> &GlyphStyle {
        &self.style
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn text(&self) -> String {
        self.characters.iter().map(Character::value).collect()
    }

    pub fn bounds(&self) -> Option<Rectangle> {
        union_all(self.characters.iter().map(Character::bounds))
    }
}

/// Vertically continuous run of segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLine {
    segments: Vec<Segment>,
}

impl TextLine {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Last character of the last segment, if that segment has any.
    pub fn last_character(&self) -> Option<&Character> {
        self.segments.last()?.characters.last()
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.segments.iter().flat_map(|s| s.characters.iter())
    }

    pub fn text(&self) -> String {
        self.characters().map(Character::value).collect()
    }

    pub fn bounds(&self) -> Option<Rectangle> {
        union_all(self.characters().map(Character::bounds))
    }

    /// The segment glyphs are currently appended to, opening one if asked.
    pub(crate) fn open_segment(&mut self, style: &Arc<GlyphStyle>, fresh: bool) -> &mut Segment {
        if fresh || self.segments.is_empty() {
            self.segments.push(Segment::new(Arc::clone(style)));
        }
        let last = self.segments.len() - 1;
        &mut self.segments[last]
    }
}

/// Everything reconstructed from one page's event stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    lines: Vec<TextLine>,
    graphics: Vec<Graphic>,
}

impl Page {
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn graphics(&self) -> &[Graphic] {
        &self.graphics
    }

    pub fn character_count(&self) -> usize {
        self.lines.iter().map(|l| l.characters().count()).sum()
    }

    /// Line texts joined with newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(TextLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Stable human-readable dump of the tree.
    ///
    /// ```text
    /// line 0 [(0, -2) (12, 8)]
    ///   F1@10 "He"
    ///   F2@10 "llo"
    /// path 4 segments [(0, 0) (10, 10)]
    /// bitmap Im1 [(10, 20) (110, 70)]
    /// ```
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            let _ = write!(out, "line {i}");
            if let Some(bounds) = line.bounds() {
                let _ = write!(out, " {bounds}");
            }
            out.push('\n');
            for segment in &line.segments {
                let _ = writeln!(out, "  {} {:?}", segment.style(), segment.text());
            }
        }
        for graphic in &self.graphics {
            let _ = write!(out, "{}", graphic.kind());
            match graphic {
                Graphic::Path(path) => {
                    let _ = write!(out, " {} segments", path.segments.len());
                }
                Graphic::Bitmap(bitmap) => {
                    let _ = write!(out, " {}", bitmap.resource);
                }
            }
            if let Some(bounds) = graphic.bounds() {
                let _ = write!(out, " {bounds}");
            }
            out.push('\n');
        }
        out
    }

    /// The line glyphs are currently appended to, opening one if asked.
    pub(crate) fn open_line(&mut self, fresh: bool) -> &mut TextLine {
        if fresh || self.lines.is_empty() {
            self.lines.push(TextLine::default());
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    pub(crate) fn last_line(&self) -> Option<&TextLine> {
        self.lines.last()
    }

    pub(crate) fn push_graphic(&mut self, graphic: Graphic) {
        self.graphics.push(graphic);
    }
}
