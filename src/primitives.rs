//! Core primitive types for Velum.
//!
//! These types are used throughout the library for geometry and color.
//! `Rect` is edge-based (left/top/right/bottom) rather than origin+size
//! because that is the form the text-geometry collaborator reports and the
//! form the hit-test contract is stated in.

use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// A point in 2D space.
///
/// Used both for document coordinates (selection anchors, extracted
/// rectangles) and overlay-local coordinates; an offset subtraction converts
/// between the two.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// An axis-aligned rectangle in document coordinates, stored as its four
/// edges.
///
/// Rectangles arrive from the text-geometry collaborator and are accepted as
/// given: a rect with `right < left` is kept verbatim (it simply never
/// contains anything and derives a degenerate polygon). There is no
/// validation layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Whether this rect spans no horizontal distance.
    ///
    /// Collapsed selection ranges report zero-width rects; these produce
    /// empty polygons and are never rendered or hit.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0
    }

    /// Check if a point is inside this rectangle, bounds inclusive.
    ///
    /// Inclusive on all four edges: a tap exactly on a highlight border
    /// still counts as a hit.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }

    /// Grow the rectangle outward by `d` on every side.
    #[inline]
    pub fn expand(&self, d: f32) -> Self {
        Self {
            left: self.left - d,
            top: self.top - d,
            right: self.right + d,
            bottom: self.bottom + d,
        }
    }

    /// Translate this rectangle by an offset.
    #[inline]
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            left: self.left + offset.x,
            top: self.top + offset.y,
            right: self.right + offset.x,
            bottom: self.bottom + offset.y,
        }
    }
}

/// RGBA color with components in 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Default highlight fill (pale yellow, `#FEFFCA`).
    pub const DEFAULT_HIGHLIGHT: Self = Self {
        r: 0xFE as f32 / 255.0,
        g: 0xFF as f32 / 255.0,
        b: 0xCA as f32 / 255.0,
        a: 1.0,
    };

    /// Create a color from RGB values (0.0-1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA values (0.0-1.0).
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from RGB values (0-255).
    #[inline]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Return this color with a different alpha value.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse a hex color token: `RRGGBB`, `#RRGGBB`, or `RRGGBBAA`.
    pub fn from_hex(token: &str) -> Result<Self, OverlayError> {
        let digits = token.strip_prefix('#').unwrap_or(token);
        if !digits.is_ascii() {
            return Err(OverlayError::InvalidColor(token.to_string()));
        }
        let byte = |i: usize| -> Result<u8, OverlayError> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| OverlayError::InvalidColor(token.to_string()))
        };
        match digits.len() {
            6 => Ok(Self {
                r: byte(0)? as f32 / 255.0,
                g: byte(2)? as f32 / 255.0,
                b: byte(4)? as f32 / 255.0,
                a: 1.0,
            }),
            8 => Ok(Self {
                r: byte(0)? as f32 / 255.0,
                g: byte(2)? as f32 / 255.0,
                b: byte(4)? as f32 / 255.0,
                a: byte(6)? as f32 / 255.0,
            }),
            _ => Err(OverlayError::InvalidColor(token.to_string())),
        }
    }
}

impl FromStr for Color {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
