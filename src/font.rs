//! Font loading and measurement.

use crate::error::{MemeError, Result};
use crate::layout::Typeface;
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use std::path::Path;

/// A scalable font loaded from a file, used for both measurement and
/// glyph rasterization.
///
/// Meme-style output assumes a bold, high-impact display typeface, but any
/// font loadable at arbitrary pixel sizes works. There is no fallback
/// substitution: a missing or unparsable file is a hard error.
pub struct CaptionFont {
    font: FontVec,
}

impl CaptionFont {
    /// Load a font from a TTF/OTF file.
    ///
    /// # Errors
    ///
    /// Returns [`MemeError::Font`] if the file cannot be read or is not a
    /// parsable font.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| MemeError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| MemeError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self { font })
    }

    pub(crate) fn inner(&self) -> &FontVec {
        &self.font
    }
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl Typeface for CaptionFont {
    /// Sum of horizontal advances with kerning applied between neighbours.
    fn line_width(&self, text: &str, px: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        let mut width = 0.0f32;
        let mut prev: Option<ab_glyph::GlyphId> = None;

        for c in text.chars() {
            let glyph_id = scaled.glyph_id(c);
            if let Some(prev) = prev {
                width += scaled.kern(prev, glyph_id);
            }
            width += scaled.h_advance(glyph_id);
            prev = Some(glyph_id);
        }

        width
    }

    fn line_height(&self, px: f32) -> f32 {
        self.font.as_scaled(PxScale::from(px)).height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_is_resource_error() {
        let err = CaptionFont::load("definitely/not/a/font.ttf").unwrap_err();
        assert!(err.is_resource());
        assert!(matches!(err, MemeError::Font { .. }));
    }

    #[test]
    fn load_garbage_bytes_is_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.ttf");
        std::fs::write(&path, b"not a font at all").unwrap();
        let err = CaptionFont::load(&path).unwrap_err();
        assert!(matches!(err, MemeError::Font { .. }));
    }

    // Measurement behaviour against a real font (advance scaling, kerning)
    // is covered by the integration tests when MEMEIFY_TEST_FONT is set.
}
