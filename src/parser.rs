//! Two-line caption contract.
//!
//! The vision model is instructed to answer with exactly two lines separated
//! by a single line break. This module is the machine-checked side of that
//! contract: a raw completion either splits into exactly two segments or the
//! caption is rejected. No trimming or normalization happens beyond what the
//! raw split yields.

use crate::error::{MemeError, Result};

/// A parsed top/bottom caption pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    /// Text drawn along the top edge of the image.
    pub top: String,
    /// Text drawn along the bottom edge of the image.
    pub bottom: String,
}

impl Caption {
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
        }
    }
}

/// Split a raw completion into a [`Caption`].
///
/// # Errors
///
/// Returns [`MemeError::CaptionShape`] unless splitting on `'\n'` yields
/// exactly two segments. A single line is not reused as both top and bottom,
/// and extra lines are not merged — the response format is renegotiated by
/// re-prompting, not patched here.
pub fn parse_caption(raw: &str) -> Result<Caption> {
    let segments: Vec<&str> = raw.split('\n').collect();
    match segments.as_slice() {
        [top, bottom] => Ok(Caption::new(*top, *bottom)),
        _ => Err(MemeError::CaptionShape {
            lines: segments.len(),
        }),
    }
}
