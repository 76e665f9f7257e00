//! Overlay error types.

use thiserror::Error;

/// Errors produced while parsing user-facing option tokens.
///
/// Runtime overlay operations (upsert, remove, render, hit test) never fail;
/// degenerate inputs produce degenerate-but-valid outputs instead. Parsing
/// a length or color token is the only fallible surface of the crate.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("invalid length: {0}")]
    InvalidLength(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),
}
