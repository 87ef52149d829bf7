//! Remote image fetching.

use crate::error::{MemeError, Result};
use image::RgbaImage;
use reqwest::Client;
use tracing::debug;

/// Fetch an image over HTTP(S) and decode it to RGBA.
///
/// The response body is treated as an arbitrary byte stream; the format is
/// sniffed from the bytes, not from the content-type header.
///
/// # Errors
///
/// - [`MemeError::Service`] / [`MemeError::Http`] for network or HTTP
///   failures (service class)
/// - [`MemeError::Image`] if the bytes do not decode as a supported image
///   (resource class)
pub async fn fetch_image(client: &Client, url: &str) -> Result<RgbaImage> {
    let resp = client.get(url).send().await.map_err(|e| MemeError::Service {
        context: format!("failed to fetch image from {url}"),
        source: e,
    })?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(MemeError::Http { status, body });
    }

    let bytes = resp.bytes().await.map_err(|e| MemeError::Service {
        context: format!("failed to read image body from {url}"),
        source: e,
    })?;

    let image = image::load_from_memory(&bytes)?;
    debug!(
        url,
        width = image.width(),
        height = image.height(),
        "fetched image"
    );
    Ok(image.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_from_unroutable_host_is_service_error() {
        let client = Client::new();
        let err = fetch_image(&client, "http://127.0.0.1:1/nope.png")
            .await
            .unwrap_err();
        assert!(err.is_service());
    }
}
