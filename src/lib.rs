//! # memeify
//!
//! Meme captioning toolkit: ask a vision model for a two-line caption and
//! render it onto the image as classic stroked top/bottom text, auto-sized to
//! nearly fill the image width.
//!
//! ## Features
//!
//! - **Vision captioning** against any OpenAI-compatible chat-completion
//!   endpoint, by URL or by local file (embedded as a base64 data URL)
//! - **Two-line caption contract** enforced by a strict parser (exactly one
//!   line break, or a format error)
//! - **Auto-sizing layout** — greedy word-wrap plus a bounded font-size
//!   search that grows the text until it fills at least 85% of the available
//!   width, without ever splitting a word
//! - **Stroked rendering** — white fill with a black outline, legible over
//!   any background; optional save-to-file (with automatic RGB conversion for
//!   alpha-less formats) and open-in-viewer
//! - **Image generation and text moderation** helpers against the same API
//!
//! ## Quick Start
//!
//! ```no_run
//! use memeify::{MemeOptions, OpenAiConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OpenAiConfig::from_env()?;
//!     let client = reqwest::Client::new();
//!
//!     let options = MemeOptions::default()
//!         .font_path("assets/impact.ttf")
//!         .save_as("meme.png");
//!
//!     let meme = memeify::memeify(
//!         &client,
//!         &config,
//!         "https://example.com/cat.jpg",
//!         None, // let the vision model write the caption
//!         &options,
//!     )
//!     .await?;
//!
//!     println!("composed {}x{} meme", meme.width(), meme.height());
//!     Ok(())
//! }
//! ```
//!
//! ## Error classes
//!
//! Every failure surfaces as a [`MemeError`] the caller can branch on:
//! service errors (network/API), format errors (the caption did not split
//! into exactly two lines), and resource errors (font or image assets).
//! Nothing is retried or swallowed inside the pipeline.

pub mod captioner;
pub mod error;
pub mod fetch;
pub mod font;
pub mod generator;
pub mod layout;
pub mod meme;
pub mod moderator;
pub mod parser;
pub mod render;
pub mod types;

// Re-export main types at crate root
pub use captioner::{request_caption, request_caption_file};
pub use error::{MemeError, Result};
pub use fetch::fetch_image;
pub use font::CaptionFont;
pub use generator::generate_image;
pub use layout::{layout_caption, place_lines, Layout, PlacedLine, Typeface};
pub use meme::{memeify, MemeOptions};
pub use moderator::{moderate, Moderation};
pub use parser::{parse_caption, Caption};
pub use render::{draw_captions, save_image, show_image};
pub use types::{CaptionOptions, ImageGenOptions, OpenAiConfig, DEFAULT_MEME_PROMPT};
