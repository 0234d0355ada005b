//! Glyph styles and paint colors.
//!
//! Styles arrive with raw paint components; resolving them into [`Color`]s
//! is where unsupported color spaces are caught.

use std::fmt;

use crate::errors::GeometryError;

/// An RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    pub const fn gray(level: f64) -> Self {
        Color { r: level, g: level, b: level }
    }

    /// Naive CMYK → RGB, `channel = (1 - c)(1 - k)`.
    pub fn cmyk(c: f64, m: f64, y: f64, k: f64) -> Self {
        Color {
            r: (1.0 - c) * (1.0 - k),
            g: (1.0 - m) * (1.0 - k),
            b: (1.0 - y) * (1.0 - k),
        }
    }

    /// Interpret paint components by count: gray, RGB or CMYK.
    pub fn from_components(components: &[f64]) -> Result<Color, GeometryError> {
        match *components {
            [level] => Ok(Color::gray(level)),
            [r, g, b] => Ok(Color::rgb(r, g, b)),
            [c, m, y, k] => Ok(Color::cmyk(c, m, y, k)),
            _ => Err(GeometryError::UnsupportedColor {
                channels: components.len(),
            }),
        }
    }

    /// `rgb(r,g,b)` with 0–255 channels.
    pub fn to_rgb_string(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgb({},{},{})", channel(self.r), channel(self.g), channel(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rgb_string())
    }
}

/// Font identity as named by the decoder (resource name or base font).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontId(String);

impl FontId {
    pub fn new(name: impl Into<String>) -> Self {
        FontId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Style as delivered with a glyph event, paints still unresolved.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSpec {
    pub font: FontId,
    pub height: f64,
    pub fill: Vec<f64>,
    pub stroke: Vec<f64>,
    pub stroke_width: f64,
}

impl StyleSpec {
    /// Black fill and stroke, unit stroke width.
    pub fn new(font: FontId, height: f64) -> Self {
        StyleSpec {
            font,
            height,
            fill: vec![0.0],
            stroke: vec![0.0],
            stroke_width: 1.0,
        }
    }

    pub fn with_fill(mut self, components: Vec<f64>) -> Self {
        self.fill = components;
        self
    }

    pub fn with_stroke(mut self, components: Vec<f64>) -> Self {
        self.stroke = components;
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn resolve(&self) -> Result<GlyphStyle, GeometryError> {
        Ok(GlyphStyle {
            font: self.font.clone(),
            height: self.height,
            fill: Color::from_components(&self.fill)?,
            stroke: Color::from_components(&self.stroke)?,
            stroke_width: self.stroke_width,
        })
    }
}

/// Resolved glyph style. Two glyphs belong to the same segment only if
/// their styles are equal field by field.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphStyle {
    pub font: FontId,
    pub height: f64,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
}

impl fmt::Display for GlyphStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.font, self.height)?;
        if self.fill != Color::BLACK {
            write!(f, " fill {}", self.fill)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_by_channel_count() {
        assert_eq!(Color::from_components(&[0.5]), Ok(Color::gray(0.5)));
        assert_eq!(Color::from_components(&[1.0, 0.0, 0.0]), Ok(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(Color::from_components(&[0.0, 0.0, 0.0, 1.0]), Ok(Color::BLACK));
        assert_eq!(Color::from_components(&[0.0, 1.0, 1.0, 0.0]), Ok(Color::rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn unsupported_channel_counts() {
        for components in [&[][..], &[0.0, 1.0][..], &[0.0; 5][..]] {
            assert_eq!(
                Color::from_components(components),
                Err(GeometryError::UnsupportedColor {
                    channels: components.len()
                })
            );
        }
    }

    #[test]
    fn rgb_string() {
        assert_eq!(Color::rgb(1.0, 0.5, 0.0).to_rgb_string(), "rgb(255,128,0)");
        assert_eq!(Color::WHITE.to_string(), "rgb(255,255,255)");
    }

    #[test]
    fn resolve_checks_both_paints() {
        let spec = StyleSpec::new(FontId::new("F1"), 10.0);
        let style = spec.resolve().unwrap();
        assert_eq!(style.fill, Color::BLACK);
        assert_eq!(style.to_string(), "F1@10");

        let bad_stroke = spec.clone().with_stroke(vec![0.0, 0.0]);
        assert_eq!(
            bad_stroke.resolve(),
            Err(GeometryError::UnsupportedColor { channels: 2 })
        );
    }

    #[test]
    fn styles_compare_every_field() {
        let base = StyleSpec::new(FontId::new("F1"), 10.0).resolve().unwrap();
        let wider = StyleSpec::new(FontId::new("F1"), 10.0)
            .with_stroke_width(2.0)
            .resolve()
            .unwrap();
        let red = StyleSpec::new(FontId::new("F1"), 10.0)
            .with_fill(vec![1.0, 0.0, 0.0])
            .resolve()
            .unwrap();
        assert_ne!(base, wider);
        assert_ne!(base, red);
        assert_eq!(red.to_string(), "F1@10 fill rgb(255,0,0)");
        assert_eq!(base, StyleSpec::new(FontId::new("F1"), 10.0).resolve().unwrap());
    }
}
