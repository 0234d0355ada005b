//! Render traces: a plain-text form of one page's event stream.
//!
//! ```text
//! style body { font "F1" height 10 fill [0] }
//! begin_text
//! glyph "H" from 0 to 6 descent -2 base 0 ascent 8 style body
//! path [1 0 0 1 0 0] { move (0 0) to (10 0) to (1 1) (2 2) (3 3) close }
//! image "Im1" at (0 0) [100 0 0 50 10 20]
//! ```
//!
//! Glyph edges are horizontal lines spanning `from..to`. Transforms are
//! written in PDF operand order `[xx yx xy yy xz yz]`. A style that leaves
//! out its font uses its own name; the other properties default to height
//! 10, black paints and unit stroke width. Paints are not checked here, so a
//! trace can describe a stream the engine rejects.

use std::collections::HashMap;

use miette::SourceSpan;
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;

use crate::errors::{SourceContext, TraceError};
use crate::geometry::{Point, Transform};
use crate::layout::{FontId, GlyphEvent, ImageEvent, PathEvent, PathStep, RenderEvent, StyleSpec, Subpath};
use crate::log::{debug, trace};
use crate::{Rule, TraceParser};

/// Parse a whole trace into the events it describes, in order.
pub fn parse_trace(name: &str, source: &str) -> Result<Vec<RenderEvent>, TraceError> {
    let ctx = SourceContext::new(name, source);
    let mut pairs = TraceParser::parse(Rule::trace, source).map_err(|e| {
        let span: SourceSpan = match e.location {
            InputLocation::Pos(pos) => (pos, 0).into(),
            InputLocation::Span((start, end)) => (start, end - start).into(),
        };
        TraceError::Syntax {
            message: e.variant.message().into_owned(),
            src: ctx.named_source(),
            span,
        }
    })?;

    let mut reader = TraceReader {
        ctx: &ctx,
        styles: HashMap::new(),
    };
    let mut events = Vec::new();
    let Some(root) = pairs.next() else {
        return Ok(events);
    };
    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::style_def => reader.define_style(pair)?,
            Rule::begin_text => events.push(RenderEvent::BeginText),
            Rule::glyph => events.push(reader.glyph(pair)?.into()),
            Rule::path => events.push(reader.path(pair)?.into()),
            Rule::image => events.push(reader.image(pair)?.into()),
            Rule::EOI => {}
            rule => return Err(reader.syntax(&pair, format!("unexpected {rule:?}"))),
        }
    }
    debug!(name, events = events.len(), styles = reader.styles.len(), "trace parsed");
    Ok(events)
}

struct TraceReader<'a> {
    ctx: &'a SourceContext,
    styles: HashMap<String, StyleSpec>,
}

fn span_of(pair: &Pair<Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

impl TraceReader<'_> {
    fn syntax(&self, pair: &Pair<Rule>, message: impl Into<String>) -> TraceError {
        TraceError::Syntax {
            message: message.into(),
            src: self.ctx.named_source(),
            span: span_of(pair),
        }
    }

    fn define_style(&mut self, pair: Pair<Rule>) -> Result<(), TraceError> {
        let mut inner = pair.clone().into_inner();
        let Some(name) = inner.next() else {
            return Err(self.syntax(&pair, "style without a name"));
        };
        let name = name.as_str().to_string();
        let mut spec = StyleSpec::new(FontId::new(name.as_str()), 10.0);
        for prop in inner {
            let Some(value) = prop.clone().into_inner().next() else {
                return Err(self.syntax(&prop, "style property without a value"));
            };
            match prop.as_rule() {
                Rule::font_prop => spec.font = FontId::new(self.string(&value)?),
                Rule::height_prop => spec.height = self.number(&value)?,
                Rule::fill_prop => spec.fill = self.numbers(value)?,
                Rule::stroke_prop => spec.stroke = self.numbers(value)?,
                Rule::width_prop => spec.stroke_width = self.number(&value)?,
                rule => return Err(self.syntax(&prop, format!("unexpected {rule:?}"))),
            }
        }
        trace!(name = %name, font = %spec.font, "style defined");
        self.styles.insert(name, spec);
        Ok(())
    }

    fn glyph(&self, pair: Pair<Rule>) -> Result<GlyphEvent, TraceError> {
        let parts: Vec<_> = pair.clone().into_inner().collect();
        let [text, from, to, descent, base, ascent, style] = parts.as_slice() else {
            return Err(self.syntax(&pair, "malformed glyph"));
        };

        let value = self.string(text)?;
        let mut chars = value.chars();
        let (Some(value), None) = (chars.next(), chars.next()) else {
            return Err(TraceError::InvalidGlyph {
                src: self.ctx.named_source(),
                span: span_of(text),
                count: value.chars().count(),
            });
        };

        Ok(GlyphEvent::upright(
            value,
            (self.number(from)?, self.number(to)?),
            self.number(descent)?,
            self.number(base)?,
            self.number(ascent)?,
            self.style(style)?.clone(),
        ))
    }

    fn path(&self, pair: Pair<Rule>) -> Result<PathEvent, TraceError> {
        let mut inner = pair.clone().into_inner();
        let Some(transform) = inner.next() else {
            return Err(self.syntax(&pair, "path without a transform"));
        };
        let transform = self.transform(transform)?;
        let subpaths = inner.map(|subpath| self.subpath(subpath)).collect::<Result<_, _>>()?;
        Ok(PathEvent { subpaths, transform })
    }

    fn subpath(&self, pair: Pair<Rule>) -> Result<Subpath, TraceError> {
        let mut inner = pair.clone().into_inner();
        let Some(start) = inner.next() else {
            return Err(self.syntax(&pair, "subpath without a start point"));
        };
        let mut subpath = Subpath::new(self.point(&start)?);
        for part in inner {
            match part.as_rule() {
                Rule::step => {
                    let points = part
                        .into_inner()
                        .map(|point| self.point(&point))
                        .collect::<Result<_, _>>()?;
                    subpath.steps.push(PathStep { points });
                }
                Rule::close => subpath.closed = true,
                rule => return Err(self.syntax(&part, format!("unexpected {rule:?}"))),
            }
        }
        Ok(subpath)
    }

    fn image(&self, pair: Pair<Rule>) -> Result<ImageEvent, TraceError> {
        let parts: Vec<_> = pair.clone().into_inner().collect();
        let [resource, anchor, transform] = parts.as_slice() else {
            return Err(self.syntax(&pair, "malformed image"));
        };
        Ok(ImageEvent {
            resource: self.string(resource)?,
            anchor: self.point(anchor)?,
            transform: self.transform(transform.clone())?,
        })
    }

    fn style(&self, pair: &Pair<Rule>) -> Result<&StyleSpec, TraceError> {
        let name = pair.as_str();
        self.styles.get(name).ok_or_else(|| TraceError::UndefinedStyle {
            name: name.to_string(),
            src: self.ctx.named_source(),
            span: span_of(pair),
            suggestion: self.suggest_style(name),
        })
    }

    fn suggest_style(&self, name: &str) -> Option<String> {
        if let Some(close) = self.styles.keys().find(|k| k.eq_ignore_ascii_case(name)) {
            return Some(format!("did you mean `{close}`?"));
        }
        if self.styles.is_empty() {
            return Some("define it first with `style NAME { ... }`".to_string());
        }
        let mut known: Vec<_> = self.styles.keys().map(String::as_str).collect();
        known.sort_unstable();
        Some(format!("defined styles: {}", known.join(", ")))
    }

    fn transform(&self, pair: Pair<Rule>) -> Result<Transform, TraceError> {
        let span = span_of(&pair);
        let operands = self.numbers(pair)?;
        Transform::from_operands(&operands).map_err(|source| TraceError::Transform {
            source,
            src: self.ctx.named_source(),
            span,
        })
    }

    fn point(&self, pair: &Pair<Rule>) -> Result<Point, TraceError> {
        let parts: Vec<_> = pair.clone().into_inner().collect();
        let [x, y] = parts.as_slice() else {
            return Err(self.syntax(pair, "a point has two coordinates"));
        };
        Ok(Point::new(self.number(x)?, self.number(y)?))
    }

    fn numbers(&self, pair: Pair<Rule>) -> Result<Vec<f64>, TraceError> {
        pair.into_inner().map(|n| self.number(&n)).collect()
    }

    /// Finite numbers only.
    fn number(&self, pair: &Pair<Rule>) -> Result<f64, TraceError> {
        let text = pair.as_str();
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(TraceError::InvalidNumber {
                text: text.to_string(),
                src: self.ctx.named_source(),
                span: span_of(pair),
            }),
        }
    }

    fn string(&self, pair: &Pair<Rule>) -> Result<String, TraceError> {
        let raw = pair.as_str();
        let Some(body) = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) else {
            return Err(self.syntax(pair, "unterminated string"));
        };
        let mut out = String::with_capacity(body.len());
        let mut chars = body.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                other => {
                    let shown = other.map(String::from).unwrap_or_default();
                    return Err(self.syntax(pair, format!("unknown escape `\\{shown}`")));
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GeometryError;

    const SAMPLE: &str = r#"
        # two glyphs and a box
        style body { font "F1" height 10 fill [0] stroke [0] width 1 }
        begin_text
        glyph "H" from 0 to 6 descent -2 base 0 ascent 8 style body
        glyph "\n" from 6 to 9 descent -2 base 0 ascent 8 style body
        path [1 0 0 1 0 0] { move (0 0) to (10 0) to (1 1) (2 2) (3 3) close }
        image "Im1" at (0 0) [100 0 0 50 10 20]
    "#;

    #[test]
    fn sample_trace() {
        let events = parse_trace("sample", SAMPLE).unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], RenderEvent::BeginText);

        let RenderEvent::Glyph(h) = &events[1] else {
            panic!("expected a glyph, got {:?}", events[1]);
        };
        assert_eq!(h.value, 'H');
        assert_eq!(h.style.font, FontId::new("F1"));
        assert_eq!(h.descent.start(), Point::new(0.0, -2.0));
        assert_eq!(h.ascent.end(), Point::new(6.0, 8.0));

        let RenderEvent::Glyph(newline) = &events[2] else {
            panic!("expected a glyph, got {:?}", events[2]);
        };
        assert_eq!(newline.value, '\n');

        let RenderEvent::Path(path) = &events[3] else {
            panic!("expected a path, got {:?}", events[3]);
        };
        assert!(path.transform.is_identity());
        assert_eq!(path.subpaths.len(), 1);
        assert!(path.subpaths[0].closed);
        assert_eq!(path.subpaths[0].steps[1].points.len(), 3);

        let RenderEvent::Image(image) = &events[4] else {
            panic!("expected an image, got {:?}", events[4]);
        };
        assert_eq!(image.resource, "Im1");
        assert_eq!(image.transform.xx(), 100.0);
        assert_eq!(image.transform.yy(), 50.0);
        assert_eq!(image.transform.apply(Point::ORIGIN), Point::new(10.0, 20.0));
    }

    #[test]
    fn style_defaults_and_redefinition() {
        let source = r#"
            style plain { }
            glyph "a" from 0 to 1 descent 0 base 0 ascent 1 style plain
            style plain { font "F9" height 12 }
            glyph "b" from 1 to 2 descent 0 base 0 ascent 1 style plain
        "#;
        let events = parse_trace("defaults", source).unwrap();
        let styles: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Glyph(g) => Some((g.style.font.to_string(), g.style.height)),
                _ => None,
            })
            .collect();
        assert_eq!(styles, vec![("plain".to_string(), 10.0), ("F9".to_string(), 12.0)]);
    }

    #[test]
    fn escapes() {
        let source = r#"
            style s { }
            glyph "\"" from 0 to 1 descent 0 base 0 ascent 1 style s
            glyph "\\" from 0 to 1 descent 0 base 0 ascent 1 style s
            glyph "\t" from 0 to 1 descent 0 base 0 ascent 1 style s
        "#;
        let values: Vec<_> = parse_trace("escapes", source)
            .unwrap()
            .into_iter()
            .filter_map(|e| match e {
                RenderEvent::Glyph(g) => Some(g.value),
                _ => None,
            })
            .collect();
        assert_eq!(values, vec!['"', '\\', '\t']);
    }

    #[test]
    fn empty_trace() {
        assert!(parse_trace("empty", "  # nothing\n").unwrap().is_empty());
    }

    // ==================== errors ====================

    #[test]
    fn syntax_error_has_span() {
        let err = parse_trace("bad", "begin_text\nglyph oops").unwrap_err();
        match err {
            TraceError::Syntax { span, .. } => assert!(span.offset() > "begin_text".len()),
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn undefined_style_suggests_close_name() {
        let source = "style Body { }\nglyph \"a\" from 0 to 1 descent 0 base 0 ascent 1 style body";
        match parse_trace("style", source).unwrap_err() {
            TraceError::UndefinedStyle { name, suggestion, .. } => {
                assert_eq!(name, "body");
                assert_eq!(suggestion.as_deref(), Some("did you mean `Body`?"));
            }
            other => panic!("expected an undefined style, got {other:?}"),
        }
    }

    #[test]
    fn glyph_must_be_one_character() {
        let source = "style s { }\nglyph \"ab\" from 0 to 1 descent 0 base 0 ascent 1 style s";
        match parse_trace("glyph", source).unwrap_err() {
            TraceError::InvalidGlyph { count, .. } => assert_eq!(count, 2),
            other => panic!("expected an invalid glyph, got {other:?}"),
        }
    }

    #[test]
    fn short_transform() {
        match parse_trace("transform", "image \"Im0\" at (0 0) [1 0 0 1]").unwrap_err() {
            TraceError::Transform { source, .. } => {
                assert_eq!(source, GeometryError::MalformedTransform { len: 4 });
            }
            other => panic!("expected a transform error, got {other:?}"),
        }
    }

    #[test]
    fn overflowing_number() {
        match parse_trace("number", "image \"Im0\" at (1e999 0) [1 0 0 1 0 0]").unwrap_err() {
            TraceError::InvalidNumber { text, .. } => assert_eq!(text, "1e999"),
            other => panic!("expected an invalid number, got {other:?}"),
        }
    }

    #[test]
    fn nameless_style_is_rejected() {
        let source = "begin_text";
        let ctx = SourceContext::new("nameless", source);
        let mut reader = TraceReader {
            ctx: &ctx,
            styles: HashMap::new(),
        };
        let pair = TraceParser::parse(Rule::begin_text, source).unwrap().next().unwrap();
        match reader.define_style(pair).unwrap_err() {
            TraceError::Syntax { message, span, .. } => {
                assert_eq!(message, "style without a name");
                assert_eq!(span.len(), source.len());
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
        assert!(reader.styles.is_empty());
    }

    #[test]
    fn unknown_escape() {
        let err = parse_trace("escape", "image \"a\\q\" at (0 0) [1 0 0 1 0 0]").unwrap_err();
        assert!(matches!(err, TraceError::Syntax { message, .. } if message.contains("\\q")));
    }
}
