//! Caption requests against a vision-capable chat-completion endpoint.

use crate::error::{MemeError, Result};
use crate::types::{CaptionOptions, OpenAiConfig, DEFAULT_MEME_PROMPT};
use base64::Engine;
use reqwest::Client;
use serde_json::json;
use std::path::Path;
use tracing::debug;

/// Ask the vision model for a raw meme caption for the image at `image_url`.
///
/// The URL must be fetchable by the remote service itself (use
/// [`request_caption_file`] for local images). The instruction prompt is the
/// only thing enforcing the two-line response format; the returned string is
/// the trimmed completion text, validated later by
/// [`parse_caption`](crate::parser::parse_caption).
///
/// One network call, no retry, non-deterministic output.
///
/// # Errors
///
/// Service-class errors for network or HTTP failures;
/// [`MemeError::InvalidResponse`] when the reply carries no message content.
pub async fn request_caption(
    client: &Client,
    config: &OpenAiConfig,
    image_url: &str,
    options: &CaptionOptions,
) -> Result<String> {
    let prompt = options.prompt.as_deref().unwrap_or(DEFAULT_MEME_PROMPT);

    let body = json!({
        "model": config.model,
        "messages": [
            {
                "role": "user",
                "content": [
                    {"type": "text", "text": prompt},
                    {"type": "image_url", "image_url": {"url": image_url}},
                ],
            }
        ],
        "max_tokens": config.max_tokens,
    });

    let url = format!("{}/v1/chat/completions", config.base_url());
    debug!(model = %config.model, "requesting caption");

    let resp = client
        .post(&url)
        .bearer_auth(&config.api_key)
        .timeout(config.timeout)
        .json(&body)
        .send()
        .await
        .map_err(|e| MemeError::Service {
            context: format!("failed to reach captioning service at {url}"),
            source: e,
        })?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(MemeError::Http { status, body });
    }

    let json: serde_json::Value = resp
        .json()
        .await
        .map_err(|e| MemeError::Service {
            context: "failed to read captioning response".to_string(),
            source: e,
        })?;

    let content = json
        .pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            MemeError::InvalidResponse("completion has no message content".to_string())
        })?;

    Ok(content.trim().to_string())
}

/// Caption a local image file by embedding it as a base64 `data:` URL.
///
/// # Errors
///
/// [`MemeError::Io`] if the file cannot be read, [`MemeError::Image`] if its
/// format cannot be recognized, plus everything [`request_caption`] returns.
pub async fn request_caption_file(
    client: &Client,
    config: &OpenAiConfig,
    image_path: &Path,
    options: &CaptionOptions,
) -> Result<String> {
    let data_url = image_data_url(image_path)?;
    request_caption(client, config, &data_url, options).await
}

fn image_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| MemeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let format = image::guess_format(&bytes)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:{};base64,{}", format.to_mime_type(), b64))
}
