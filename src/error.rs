use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by memeify operations.
///
/// Variants fall into three classes that callers can branch on with
/// [`is_service`](MemeError::is_service), [`is_format`](MemeError::is_format)
/// and [`is_resource`](MemeError::is_resource):
///
/// - **service** — the remote API or image host failed (network error or
///   non-success HTTP status)
/// - **format** — the caption text violated the two-line contract
/// - **resource** — a local asset (font file, image data) was missing or
///   unreadable
#[derive(Error, Debug)]
pub enum MemeError {
    /// Network-level request failure with context.
    #[error("{context}: {source}")]
    Service {
        context: String,
        source: reqwest::Error,
    },

    /// The remote service returned a non-success HTTP status.
    #[error("service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response from the service was missing expected fields.
    #[error("invalid response from service: {0}")]
    InvalidResponse(String),

    /// The caption did not split into exactly two lines.
    #[error("unexpected caption shape: expected 2 lines, got {lines}")]
    CaptionShape { lines: usize },

    /// Caption text was empty or had no measurable width.
    ///
    /// Laying out such text can never reach the width-fill threshold, so it
    /// is rejected up front instead of searching forever.
    #[error("caption text is empty or unmeasurable")]
    EmptyCaption,

    /// A font file could not be loaded.
    #[error("failed to load font {}: {reason}", path.display())]
    Font { path: PathBuf, reason: String },

    /// Image decoding or encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem I/O failure with the offending path.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Missing or invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MemeError {
    /// True for failures of the remote service or the network path to it.
    pub fn is_service(&self) -> bool {
        matches!(self, MemeError::Service { .. } | MemeError::Http { .. })
    }

    /// True when the caption text violated the two-line contract.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            MemeError::CaptionShape { .. } | MemeError::EmptyCaption
        )
    }

    /// True when a local asset (font, image data, output path) failed.
    pub fn is_resource(&self) -> bool {
        matches!(
            self,
            MemeError::Font { .. } | MemeError::Image(_) | MemeError::Io { .. }
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, MemeError>;
