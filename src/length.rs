//! Mixed-unit lengths for user-facing options.
//!
//! Padding is configured in whatever unit the host UI speaks (`px`, `rem`,
//! `em`, or a bare number meaning px) and normalized once, at overlay
//! construction, into the canonical px unit that rectangle coordinates use.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// A length in one of the supported units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Length {
    /// Pixels: the canonical unit, same as rectangle coordinates.
    Px(f32),
    /// Multiples of the root font size.
    Rem(f32),
    /// Multiples of the local font size.
    Em(f32),
}

impl Length {
    /// Resolve to px. `font_size` is the px size that `rem`/`em` scale by.
    pub fn resolve(&self, font_size: f32) -> f32 {
        match self {
            Length::Px(v) => *v,
            Length::Rem(v) | Length::Em(v) => v * font_size,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Px(0.0)
    }
}

impl From<f32> for Length {
    fn from(px: f32) -> Self {
        Length::Px(px)
    }
}

impl FromStr for Length {
    type Err = OverlayError;

    /// Parse `"12"`, `"12px"`, `"0.1rem"`, or `"1.5em"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || OverlayError::InvalidLength(s.to_string());
        let (value, unit) = match s.find(|c: char| c.is_ascii_alphabetic()) {
            Some(i) => s.split_at(i),
            None => (s, "px"),
        };
        let value: f32 = value.trim().parse().map_err(|_| invalid())?;
        match unit {
            "px" => Ok(Length::Px(value)),
            "rem" => Ok(Length::Rem(value)),
            "em" => Ok(Length::Em(value)),
            _ => Err(invalid()),
        }
    }
}
