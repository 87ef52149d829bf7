//! Text moderation.

use crate::error::{MemeError, Result};
use crate::types::OpenAiConfig;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;

/// Moderation verdict for one block of text.
#[derive(Debug, Clone, Deserialize)]
pub struct Moderation {
    /// True when any category tripped.
    pub flagged: bool,
    /// Per-category verdicts.
    #[serde(default)]
    pub categories: BTreeMap<String, bool>,
    /// Per-category confidence scores.
    #[serde(default)]
    pub category_scores: BTreeMap<String, f64>,
}

impl Moderation {
    /// Names of the categories that tripped, in stable order.
    pub fn flagged_categories(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|(_, &hit)| hit)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Run the moderation model over `text` and return a typed verdict.
///
/// # Errors
///
/// Service-class errors for network or HTTP failures;
/// [`MemeError::InvalidResponse`] when the reply carries no results.
pub async fn moderate(client: &Client, config: &OpenAiConfig, text: &str) -> Result<Moderation> {
    let body = json!({ "input": text });

    let url = format!("{}/v1/moderations", config.base_url());
    let resp = client
        .post(&url)
        .bearer_auth(&config.api_key)
        .timeout(config.timeout)
        .json(&body)
        .send()
        .await
        .map_err(|e| MemeError::Service {
            context: format!("failed to reach moderation service at {url}"),
            source: e,
        })?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(MemeError::Http { status, body });
    }

    let json: serde_json::Value = resp.json().await.map_err(|e| MemeError::Service {
        context: "failed to read moderation response".to_string(),
        source: e,
    })?;

    let result = json
        .pointer("/results/0")
        .cloned()
        .ok_or_else(|| MemeError::InvalidResponse("moderation reply has no results".to_string()))?;

    serde_json::from_value(result)
        .map_err(|e| MemeError::InvalidResponse(format!("malformed moderation result: {e}")))
}
