//! The memeify pipeline: caption, parse, fetch, render.

use crate::captioner::request_caption;
use crate::error::Result;
use crate::fetch::fetch_image;
use crate::font::CaptionFont;
use crate::parser::parse_caption;
use crate::render::{draw_captions, save_image, show_image};
use crate::types::{CaptionOptions, OpenAiConfig};
use image::RgbaImage;
use reqwest::Client;
use std::path::PathBuf;

/// Options for one [`memeify`] call.
#[derive(Debug, Clone)]
pub struct MemeOptions {
    /// Path to a scalable font file (a bold display typeface works best).
    pub font_path: PathBuf,
    /// Minimum font size for the layout search.
    pub min_font_px: f32,
    /// Open the finished meme in the platform image viewer.
    pub show: bool,
    /// Persist the finished meme to this path (format from extension).
    pub save_as: Option<PathBuf>,
    /// Caption request options (custom instruction prompt).
    pub caption: CaptionOptions,
}

impl Default for MemeOptions {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("assets/impact.ttf"),
            min_font_px: crate::layout::DEFAULT_MIN_FONT_PX,
            show: false,
            save_as: None,
            caption: CaptionOptions::default(),
        }
    }
}

impl MemeOptions {
    /// Set the font file path.
    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = path.into();
        self
    }

    /// Open the result in a viewer when done.
    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Persist the result to `path` when done.
    pub fn save_as(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_as = Some(path.into());
        self
    }
}

/// Turn the image at `image_url` into a captioned meme.
///
/// When `caption` is `None`, the vision model is asked for one; a supplied
/// caption must be the raw two-line form (`"TOP\nBOTTOM"`) and passes through
/// the same parser, so the two-line contract holds on both paths.
///
/// Returns the composed image; `options` control the optional show/save side
/// effects. One caption request (at most) and one image fetch per call, no
/// retries, no internal concurrency.
///
/// # Errors
///
/// Service-class errors from the caption request or image fetch,
/// [`MemeError::CaptionShape`](crate::MemeError::CaptionShape) when the
/// caption does not split into exactly two lines, and resource-class errors
/// for the font file, image decoding, or persistence.
pub async fn memeify(
    client: &Client,
    config: &OpenAiConfig,
    image_url: &str,
    caption: Option<&str>,
    options: &MemeOptions,
) -> Result<RgbaImage> {
    let raw = match caption {
        Some(raw) => raw.to_string(),
        None => request_caption(client, config, image_url, &options.caption).await?,
    };
    let caption = parse_caption(&raw)?;

    let font = CaptionFont::load(&options.font_path)?;
    let mut image = fetch_image(client, image_url).await?;
    draw_captions(&mut image, &caption, &font, options.min_font_px)?;

    if options.show {
        show_image(&image)?;
    }
    if let Some(path) = &options.save_as {
        save_image(&image, path)?;
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MemeError;

    #[tokio::test]
    async fn supplied_one_line_caption_fails_before_any_network_call() {
        let client = Client::new();
        let config = OpenAiConfig::default();
        // The endpoint is unreachable; a shape error proves the parser ran first.
        let err = memeify(
            &client,
            &config.endpoint("http://127.0.0.1:1"),
            "http://127.0.0.1:1/img.png",
            Some("ONLY ONE LINE"),
            &MemeOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MemeError::CaptionShape { lines: 1 }));
    }

    #[tokio::test]
    async fn missing_font_fails_before_image_fetch() {
        let client = Client::new();
        let config = OpenAiConfig::default().endpoint("http://127.0.0.1:1");
        let options = MemeOptions::default().font_path("no/such/font.ttf");
        let err = memeify(
            &client,
            &config,
            "http://127.0.0.1:1/img.png",
            Some("TOP\nBOTTOM"),
            &options,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MemeError::Font { .. }));
    }
}
