//! Caption rendering: stroked text drawing, saving, and display.
//!
//! Captions are drawn as filled white glyphs with a black outline so they
//! stay legible over arbitrary image content. The outline is produced by
//! stamping the glyph in black at every offset within the stroke radius
//! before stamping the white fill on top — an edge effect, not a drop
//! shadow.

use crate::error::{MemeError, Result};
use crate::font::CaptionFont;
use crate::layout::{self, PlacedLine};
use crate::parser::Caption;
use ab_glyph::{point, Font, PxScale, ScaleFont};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;
use tracing::info;

/// Stroke radius in pixels.
const STROKE_PX: i32 = 2;

/// Fraction of the image width available to caption text.
const WIDTH_FILL: f32 = 0.95;

/// Top caption anchor offset from the top edge, in pixels.
const TOP_MARGIN_PX: f32 = 5.0;

/// Bottom caption anchor offset from the bottom edge, in pixels.
const BOTTOM_MARGIN_PX: f32 = 100.0;

const FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const STROKE: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Draw both captions onto the image in place.
///
/// The top caption is laid out from a small offset below the top edge, the
/// bottom caption from a fixed margin above the bottom edge; each block is
/// auto-sized to nearly fill 95% of the image width. Dimensions never change
/// and drawing is deterministic.
///
/// # Errors
///
/// [`MemeError::EmptyCaption`] when either caption text is empty or
/// unmeasurable.
pub fn draw_captions(
    image: &mut RgbaImage,
    caption: &Caption,
    font: &CaptionFont,
    min_font_px: f32,
) -> Result<()> {
    let max_width = image.width() as f32 * WIDTH_FILL;
    let anchor_x = image.width() as f32 * (1.0 - WIDTH_FILL) / 2.0;
    let bottom_y = image.height() as f32 - BOTTOM_MARGIN_PX;

    draw_block(
        image,
        font,
        &caption.top,
        (anchor_x, TOP_MARGIN_PX),
        max_width,
        min_font_px,
    )?;
    draw_block(
        image,
        font,
        &caption.bottom,
        (anchor_x, bottom_y),
        max_width,
        min_font_px,
    )?;
    Ok(())
}

fn draw_block(
    image: &mut RgbaImage,
    font: &CaptionFont,
    text: &str,
    anchor: (f32, f32),
    max_width: f32,
    min_font_px: f32,
) -> Result<()> {
    let layout = layout::layout_caption(font, text, max_width, min_font_px)?;
    for line in layout::place_lines(font, &layout, anchor, max_width) {
        draw_line(image, font, &line, layout.font_px);
    }
    Ok(())
}

fn draw_line(image: &mut RgbaImage, font: &CaptionFont, line: &PlacedLine, px: f32) {
    // Outline first so the fill covers its inner half.
    for dy in -STROKE_PX..=STROKE_PX {
        for dx in -STROKE_PX..=STROKE_PX {
            if (dx, dy) == (0, 0) || dx * dx + dy * dy > STROKE_PX * STROKE_PX {
                continue;
            }
            stamp_text(
                image,
                font,
                &line.text,
                line.x + dx as f32,
                line.y + dy as f32,
                px,
                STROKE,
            );
        }
    }
    stamp_text(image, font, &line.text, line.x, line.y, px, FILL);
}

/// Rasterize one line of text with its top-left corner at (`x`, `top_y`).
fn stamp_text(
    image: &mut RgbaImage,
    font: &CaptionFont,
    text: &str,
    x: f32,
    top_y: f32,
    px: f32,
    color: Rgba<u8>,
) {
    let scaled = font.inner().as_scaled(PxScale::from(px));
    let baseline_y = top_y + scaled.ascent();
    let (width, height) = (image.width() as i32, image.height() as i32);

    let mut cursor_x = x;
    let mut prev: Option<ab_glyph::GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            cursor_x += scaled.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(PxScale::from(px), point(cursor_x, baseline_y));
        if let Some(outlined) = font.inner().outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px_x = gx as i32 + bounds.min.x as i32;
                let px_y = gy as i32 + bounds.min.y as i32;
                if px_x >= 0 && px_y >= 0 && px_x < width && px_y < height {
                    let under = *image.get_pixel(px_x as u32, px_y as u32);
                    let blended = composite(under, color, coverage);
                    image.put_pixel(px_x as u32, px_y as u32, blended);
                }
            });
        }

        cursor_x += scaled.h_advance(glyph_id);
        prev = Some(glyph_id);
    }
}

/// Source-over composite of `color` at `coverage` onto `under`.
fn composite(under: Rgba<u8>, color: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let src_a = coverage.clamp(0.0, 1.0) * color[3] as f32 / 255.0;
    if src_a <= 0.0 {
        return under;
    }
    let dst_a = under[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let out = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        channel(color[0], under[0]),
        channel(color[1], under[1]),
        channel(color[2], under[2]),
        (out_a * 255.0).round() as u8,
    ])
}

/// Save the image to `path`, inferring the format from the extension.
///
/// Formats without alpha support (JPEG) get an RGB conversion first so
/// encoding never fails on the pixel mode.
///
/// # Errors
///
/// [`MemeError::Image`] for unrecognized extensions or encoding failures.
pub fn save_image(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;

    if format == ImageFormat::Jpeg {
        let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
        rgb.save(path)?;
    } else {
        image.save(path)?;
    }

    info!(path = %path.display(), "image saved");
    Ok(())
}

/// Write the image to a temporary PNG and open the platform viewer.
///
/// Fire-and-forget: the viewer process is not waited on.
pub fn show_image(image: &RgbaImage) -> Result<()> {
    let path = std::env::temp_dir().join(format!("memeify-{}.png", std::process::id()));
    save_image(image, &path)?;

    #[cfg(target_os = "macos")]
    let mut command = std::process::Command::new("open");
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = std::process::Command::new("xdg-open");

    command.arg(&path).spawn().map_err(|e| MemeError::Io {
        path: path.clone(),
        source: e,
    })?;
    Ok(())
}
