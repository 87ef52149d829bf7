//! Text-to-image generation.

use crate::error::{MemeError, Result};
use crate::types::{ImageGenOptions, OpenAiConfig};
use reqwest::Client;
use serde_json::json;
use tracing::debug;

/// Generate an image from a text prompt and return its URL.
///
/// The URL is short-lived and hosted by the service; fetch it promptly (for
/// example with [`fetch_image`](crate::fetch::fetch_image)) if the pixels are
/// needed.
///
/// # Errors
///
/// Service-class errors for network or HTTP failures;
/// [`MemeError::InvalidResponse`] when the reply carries no image URL.
pub async fn generate_image(
    client: &Client,
    config: &OpenAiConfig,
    prompt: &str,
    options: &ImageGenOptions,
) -> Result<String> {
    let body = json!({
        "model": options.model.as_deref().unwrap_or("dall-e-3"),
        "prompt": prompt,
        "n": 1,
        "size": options.size,
    });

    let url = format!("{}/v1/images/generations", config.base_url());
    debug!(size = %options.size, "requesting image generation");

    let resp = client
        .post(&url)
        .bearer_auth(&config.api_key)
        .timeout(config.timeout)
        .json(&body)
        .send()
        .await
        .map_err(|e| MemeError::Service {
            context: format!("failed to reach image generation service at {url}"),
            source: e,
        })?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(MemeError::Http { status, body });
    }

    let json: serde_json::Value = resp.json().await.map_err(|e| MemeError::Service {
        context: "failed to read image generation response".to_string(),
        source: e,
    })?;

    json.pointer("/data/0/url")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| MemeError::InvalidResponse("generation result has no image URL".to_string()))
}
