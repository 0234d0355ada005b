//! Closed scalar intervals and the three-valued intersection result.

use std::fmt;
use std::ops::{BitAnd, BitOr};

/// How two geometric things meet.
///
/// The variants are ordered `None < Edge < Body`, so combining across axes is
/// a min/max: [`Intersection::and`] keeps the weaker classification (both axes
/// must intersect) and [`Intersection::or`] keeps the stronger (either axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Intersection {
    /// No common point.
    #[default]
    None,
    /// Touching only at a boundary point.
    Edge,
    /// Sharing interior points.
    Body,
}

impl Intersection {
    /// Weakest-wins combination.
    #[inline]
    pub fn and(self, other: Intersection) -> Intersection {
        self.min(other)
    }

    /// Strongest-wins combination.
    #[inline]
    pub fn or(self, other: Intersection) -> Intersection {
        self.max(other)
    }

    /// True for `Edge` and `Body`.
    #[inline]
    pub fn is_some(self) -> bool {
        self != Intersection::None
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Intersection::None
    }

    /// Legacy flag encoding: `None = 0b00`, `Edge = 0b01`, `Body = 0b11`.
    ///
    /// The body bit never appears without the edge bit.
    pub const fn bits(self) -> u8 {
        match self {
            Intersection::None => 0b00,
            Intersection::Edge => 0b01,
            Intersection::Body => 0b11,
        }
    }

    /// Decode the flag encoding. `0b10` (body without edge) is rejected.
    pub const fn from_bits(bits: u8) -> Option<Intersection> {
        match bits {
            0b00 => Some(Intersection::None),
            0b01 => Some(Intersection::Edge),
            0b11 => Some(Intersection::Body),
            _ => None,
        }
    }

    /// Classify a line parameter against the unit interval.
    pub(crate) fn of_parameter(t: f64) -> Intersection {
        if !(0.0..=1.0).contains(&t) {
            Intersection::None
        } else if t == 0.0 || t == 1.0 {
            Intersection::Edge
        } else {
            Intersection::Body
        }
    }
}

impl BitAnd for Intersection {
    type Output = Intersection;
    fn bitand(self, rhs: Intersection) -> Intersection {
        self.and(rhs)
    }
}

impl BitOr for Intersection {
    type Output = Intersection;
    fn bitor(self, rhs: Intersection) -> Intersection {
        self.or(rhs)
    }
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intersection::None => write!(f, "none"),
            Intersection::Edge => write!(f, "edge"),
            Intersection::Body => write!(f, "body"),
        }
    }
}

/// Closed interval `[lower, upper]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    lower: f64,
    upper: f64,
}

impl Range {
    /// Build a range from two bounds in either order.
    #[inline]
    pub fn new(a: f64, b: f64) -> Self {
        Range {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    #[inline]
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// A range whose bounds coincide.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.lower == self.upper
    }

    /// Classify a value: outside, on a bound, or strictly inside.
    pub fn intersect_point(&self, value: f64) -> Intersection {
        if value < self.lower || value > self.upper {
            Intersection::None
        } else if value == self.lower || value == self.upper {
            Intersection::Edge
        } else {
            Intersection::Body
        }
    }

    /// Classify the overlap with another range.
    ///
    /// Ranges sharing a single point that is a bound of both only touch
    /// (`Edge`). A degenerate range strictly inside the other, or two
    /// identical degenerate ranges, count as `Body`.
    pub fn intersect(&self, other: &Range) -> Intersection {
        let lo = self.lower.max(other.lower);
        let hi = self.upper.min(other.upper);
        if lo > hi {
            return Intersection::None;
        }
        if lo < hi {
            return Intersection::Body;
        }
        if self.is_degenerate() && other.is_degenerate() {
            return Intersection::Body;
        }
        self.intersect_point(lo).or(other.intersect_point(lo))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
