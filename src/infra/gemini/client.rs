// Gemini `generateContent` client backing the summary collaborator.

use crate::domain::model::{Product, Transaction};
use crate::domain::summary::{analysis_prompt, Summarizer, MARKET_INSIGHT_PROMPT};
use crate::infra::config;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Error bodies are truncated to this many characters before they reach the logs.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate. Empty if the model returned nothing.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("HTTP client: {}", e))?;
        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Builds a client from the environment. `Ok(None)` when no API key is configured.
    pub fn from_env(timeout: Duration) -> anyhow::Result<Option<Self>> {
        let Some(api_key) = config::gemini_api_key() else {
            return Ok(None);
        };
        Self::new(api_key, config::gemini_model(), config::gemini_api_base(), timeout).map(Some)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a single-turn prompt and returns the generated text.
    pub async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            anyhow::bail!("Gemini generateContent failed: {} - {}", status, error_text);
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(parsed.text())
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, product: &Product, history: &[Transaction]) -> anyhow::Result<String> {
        self.generate(&analysis_prompt(product, history)).await
    }

    async fn market_insight(&self) -> anyhow::Result<String> {
        self.generate(MARKET_INSIGHT_PROMPT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_joins_parts_of_first_candidate() {
        let raw = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Authentic. " }, { "text": "Stored cold." }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.text(), "Authentic. Stored cold.");
    }

    #[test]
    fn missing_candidates_yield_empty_text() {
        let parsed: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(parsed.text(), "");
    }
}
