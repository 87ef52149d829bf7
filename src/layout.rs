//! Caption layout: greedy word-wrap with a bounded font-size search.
//!
//! Meme captions should dominate the image, so instead of picking a fixed
//! font size this module searches for the smallest size (on a 2 px ladder
//! starting at the caller's minimum) whose widest wrapped line fills at least
//! 85% of the available width. Wrapping never splits a word, so every line
//! stays within `max_width` unless a single word alone exceeds it.
//!
//! The search walks the ladder upward but is bounded by a cap extrapolated
//! from the width measured at the minimum size, so it always terminates.
//! Degenerate inputs that could never reach the fill threshold (empty or
//! zero-width text) are rejected with [`MemeError::EmptyCaption`] rather than
//! searched forever.

use crate::error::{MemeError, Result};
use tracing::{debug, warn};

/// Fraction of `max_width` the widest line must reach for a size to be
/// accepted. An aesthetic tunable, not a physical constraint.
pub const FILL_THRESHOLD: f32 = 0.85;

/// Vertical gap between stacked caption lines, in pixels.
pub const LINE_GUTTER: f32 = 10.0;

/// Default minimum font size, in pixels.
pub const DEFAULT_MIN_FONT_PX: f32 = 40.0;

/// Font-size search step, in pixels.
const SIZE_STEP: f32 = 2.0;

/// Text measurement seam.
///
/// Real fonts ([`CaptionFont`](crate::font::CaptionFont)) implement this with
/// glyph advances and kerning; tests use deterministic fixed-advance faces.
pub trait Typeface {
    /// Rendered width of `text` on one line at `px` pixels.
    fn line_width(&self, text: &str, px: f32) -> f32;

    /// Rendered height of one line at `px` pixels.
    fn line_height(&self, px: f32) -> f32;
}

/// A wrapped caption with its chosen font size.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Wrapped lines, in reading order.
    pub lines: Vec<String>,
    /// Chosen font size in pixels.
    pub font_px: f32,
    /// Rendered width of the widest line at `font_px`.
    pub widest_px: f32,
}

/// One caption line with its draw origin (left edge x, top edge y).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Greedily wrap `text` into lines of rendered width ≤ `max_width`.
///
/// Words accumulate onto the current line while the running width (each word
/// measured with one trailing space) stays within `max_width`; an overflowing
/// word closes the line and starts the next one. A single word wider than
/// `max_width` gets a line of its own and overflows it.
pub fn wrap_words<F: Typeface>(face: &F, text: &str, px: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_width = 0.0f32;

    for word in text.split_whitespace() {
        let word_width = face.line_width(&format!("{word} "), px);
        if current.is_empty() || current_width + word_width <= max_width {
            current.push(word);
            current_width += word_width;
        } else {
            lines.push(current.join(" "));
            current = vec![word];
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines
}

fn widest_line_px<F: Typeface>(face: &F, lines: &[String], px: f32) -> f32 {
    lines
        .iter()
        .map(|line| face.line_width(line, px))
        .fold(0.0, f32::max)
}

fn layout_at<F: Typeface>(face: &F, text: &str, px: f32, max_width: f32) -> Layout {
    let lines = wrap_words(face, text, px, max_width);
    let widest_px = widest_line_px(face, &lines, px);
    Layout {
        lines,
        font_px: px,
        widest_px,
    }
}

/// Wrap `text` and pick the smallest font size (stepping up from
/// `min_font_px` in 2 px increments) whose widest line reaches
/// [`FILL_THRESHOLD`] × `max_width`.
///
/// # Errors
///
/// Returns [`MemeError::EmptyCaption`] when `text` contains no words or its
/// words have no measurable width — such input can never reach the fill
/// threshold at any size.
pub fn layout_caption<F: Typeface>(
    face: &F,
    text: &str,
    max_width: f32,
    min_font_px: f32,
) -> Result<Layout> {
    if text.split_whitespace().next().is_none() {
        return Err(MemeError::EmptyCaption);
    }

    let threshold = FILL_THRESHOLD * max_width;
    let base = layout_at(face, text, min_font_px, max_width);
    if base.widest_px <= 0.0 {
        return Err(MemeError::EmptyCaption);
    }
    if base.widest_px >= threshold {
        return Ok(base);
    }

    // A single unwrapped line grows linearly with font size, so the size
    // meeting the threshold is near min * threshold / width(min). Doubling
    // that estimate gives a safe cap for the ladder; re-wrapping makes the
    // fill fraction non-monotone in size, so the ladder is walked in order
    // rather than bisected.
    let estimate = min_font_px * threshold / base.widest_px;
    let cap_steps = (((estimate * 2.0 - min_font_px) / SIZE_STEP).ceil() as u32).max(1);

    let mut last = base;
    for k in 1..=cap_steps {
        last = layout_at(face, text, min_font_px + SIZE_STEP * k as f32, max_width);
        if last.widest_px >= threshold {
            debug!(
                font_px = last.font_px,
                lines = last.lines.len(),
                widest_px = last.widest_px,
                "caption layout chosen"
            );
            return Ok(last);
        }
    }

    // The cap was reached without meeting the threshold. Surface it and
    // return the largest bounded layout instead of growing without limit.
    warn!(
        font_px = last.font_px,
        widest_px = last.widest_px,
        threshold, "font-size search hit its cap below the fill threshold"
    );
    Ok(last)
}

/// Position a layout's lines relative to an anchor.
///
/// Lines stack top-to-bottom from the anchor y, each advanced by the line
/// height plus [`LINE_GUTTER`]; each line is centered within `max_width`
/// around the anchor x.
pub fn place_lines<F: Typeface>(
    face: &F,
    layout: &Layout,
    anchor: (f32, f32),
    max_width: f32,
) -> Vec<PlacedLine> {
    let mut y = anchor.1;
    layout
        .lines
        .iter()
        .map(|line| {
            let line_width = face.line_width(line, layout.font_px);
            let placed = PlacedLine {
                text: line.clone(),
                x: (max_width - line_width) / 2.0 + anchor.0,
                y,
            };
            y += face.line_height(layout.font_px) + LINE_GUTTER;
            placed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic face: every char advances 0.6 × size, lines are one
    /// size tall.
    struct FixedAdvance;

    impl Typeface for FixedAdvance {
        fn line_width(&self, text: &str, px: f32) -> f32 {
            text.chars().count() as f32 * px * 0.6
        }

        fn line_height(&self, px: f32) -> f32 {
            px
        }
    }

    /// Reference implementation: the unbounded linear scan the search
    /// replaces, stopped at a generous limit so the test itself terminates.
    fn linear_reference(text: &str, max_width: f32, min_font_px: f32) -> Layout {
        let face = FixedAdvance;
        let mut px = min_font_px;
        loop {
            let layout = layout_at(&face, text, px, max_width);
            if layout.widest_px >= FILL_THRESHOLD * max_width {
                return layout;
            }
            px += 2.0;
            assert!(px < 10_000.0, "linear reference diverged");
        }
    }

    #[test]
    fn wrap_preserves_word_order() {
        let face = FixedAdvance;
        let text = "the quick brown fox jumps over the lazy dog";
        let lines = wrap_words(&face, text, 40.0, 300.0);
        assert!(lines.len() > 1);
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }

    #[test]
    fn wrap_never_splits_a_word() {
        let face = FixedAdvance;
        // 30 chars * 0.6 * 40px = 720 > 300: the word overflows on its own line.
        let text = "short abcdefghijklmnopqrstuvwxyzabcd short";
        let lines = wrap_words(&face, text, 40.0, 300.0);
        assert!(lines.contains(&"abcdefghijklmnopqrstuvwxyzabcd".to_string()));
    }

    #[test]
    fn wrapped_lines_fit_max_width() {
        let face = FixedAdvance;
        let text = "many small words packed in here to wrap a few times over";
        for px in [40.0, 48.0, 60.0] {
            for line in wrap_words(&face, text, px, 400.0) {
                assert!(face.line_width(&line, px) <= 400.0, "line overflowed: {line}");
            }
        }
    }

    #[test]
    fn layout_meets_both_width_bounds() {
        let face = FixedAdvance;
        let max_width = 600.0;
        let layout = layout_caption(&face, "WOW SUCH TEST VERY CAPTION", max_width, 40.0).unwrap();
        assert!(layout.widest_px >= FILL_THRESHOLD * max_width);
        for line in &layout.lines {
            assert!(face.line_width(line, layout.font_px) <= max_width);
        }
    }

    #[test]
    fn layout_matches_linear_reference() {
        let face = FixedAdvance;
        for text in [
            "WOW",
            "SUCH TEST",
            "a somewhat longer caption with several words in it",
            "TWO WORDS",
        ] {
            for max_width in [300.0, 600.0, 950.0] {
                let binary = layout_caption(&face, text, max_width, 40.0).unwrap();
                let linear = linear_reference(text, max_width, 40.0);
                assert_eq!(binary, linear, "divergence for {text:?} at {max_width}");
            }
        }
    }

    #[test]
    fn layout_accepts_min_size_when_already_wide() {
        let face = FixedAdvance;
        // 30 chars at 40px: 720 >= 0.85 * 600, accepted immediately.
        let layout = layout_caption(&face, "abcdefghijklmnopqrstuvwxyzabcd", 600.0, 40.0).unwrap();
        assert_eq!(layout.font_px, 40.0);
        assert_eq!(layout.lines.len(), 1);
    }

    #[test]
    fn layout_rejects_empty_text() {
        let face = FixedAdvance;
        assert!(matches!(
            layout_caption(&face, "", 600.0, 40.0),
            Err(MemeError::EmptyCaption)
        ));
        assert!(matches!(
            layout_caption(&face, "   \t ", 600.0, 40.0),
            Err(MemeError::EmptyCaption)
        ));
    }

    #[test]
    fn layout_rejects_zero_width_text() {
        struct ZeroWidth;
        impl Typeface for ZeroWidth {
            fn line_width(&self, _: &str, _: f32) -> f32 {
                0.0
            }
            fn line_height(&self, px: f32) -> f32 {
                px
            }
        }
        assert!(matches!(
            layout_caption(&ZeroWidth, "ghost", 600.0, 40.0),
            Err(MemeError::EmptyCaption)
        ));
    }

    #[test]
    fn place_lines_centers_and_stacks() {
        let face = FixedAdvance;
        let layout = Layout {
            lines: vec!["ABCD".to_string(), "AB".to_string()],
            font_px: 40.0,
            widest_px: 96.0,
        };
        let placed = place_lines(&face, &layout, (25.0, 5.0), 950.0);
        assert_eq!(placed.len(), 2);

        // "ABCD" is 96px wide: centered at (950 - 96) / 2 + 25.
        assert_eq!(placed[0].x, (950.0 - 96.0) / 2.0 + 25.0);
        assert_eq!(placed[0].y, 5.0);

        // Second line drops by line height (40) + gutter (10).
        assert_eq!(placed[1].x, (950.0 - 48.0) / 2.0 + 25.0);
        assert_eq!(placed[1].y, 55.0);
    }
}
