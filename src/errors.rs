//! Error types with rich diagnostics using miette
//!
//! Geometry and layout errors are plain values; trace errors carry source
//! spans for readable reports.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<trace>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Geometry Errors
// ============================================================================

/// An input broke an assumption the geometry depends on.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("unsupported color with {channels} channels")]
    #[diagnostic(
        code(pagelines::geometry::unsupported_color),
        help("colors must have 1 (gray), 3 (RGB) or 4 (CMYK) components")
    )]
    UnsupportedColor { channels: usize },

    #[error("unsupported path segment with {points} control points")]
    #[diagnostic(
        code(pagelines::geometry::unsupported_segment),
        help("a path step is a line (1 point) or a cubic curve (3 points)")
    )]
    UnsupportedSegment { points: usize },

    #[error("malformed transform with {len} elements")]
    #[diagnostic(
        code(pagelines::geometry::malformed_transform),
        help("an affine transform has exactly 6 elements")
    )]
    MalformedTransform { len: usize },
}

// ============================================================================
// Layout Errors
// ============================================================================

/// Reconstruction of a page was aborted.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("render event {index} could not be placed")]
    #[diagnostic(code(pagelines::layout::event))]
    Event {
        index: usize,
        #[source]
        #[diagnostic_source]
        source: GeometryError,
    },
}

impl LayoutError {
    /// The geometry error behind the failure.
    pub fn geometry(&self) -> &GeometryError {
        match self {
            LayoutError::Event { source, .. } => source,
        }
    }

    /// Position of the offending event in the stream.
    pub fn event_index(&self) -> usize {
        match self {
            LayoutError::Event { index, .. } => *index,
        }
    }
}

// ============================================================================
// Trace Errors
// ============================================================================

/// Errors that occur while reading a render trace
#[derive(Error, Diagnostic, Debug)]
pub enum TraceError {
    #[error("syntax error: {message}")]
    #[diagnostic(code(pagelines::trace::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number: {text}")]
    #[diagnostic(code(pagelines::trace::invalid_number))]
    InvalidNumber {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a number")]
        span: SourceSpan,
    },

    #[error("a glyph must be exactly one character")]
    #[diagnostic(code(pagelines::trace::invalid_glyph))]
    InvalidGlyph {
        #[source_code]
        src: NamedSource<String>,
        #[label("{count} characters")]
        span: SourceSpan,
        count: usize,
    },

    #[error("undefined style: {name}")]
    #[diagnostic(code(pagelines::trace::undefined_style))]
    UndefinedStyle {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not defined")]
        span: SourceSpan,
        #[help]
        suggestion: Option<String>,
    },

    #[error("invalid transform")]
    #[diagnostic(code(pagelines::trace::transform))]
    Transform {
        #[source]
        #[diagnostic_source]
        source: GeometryError,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}
