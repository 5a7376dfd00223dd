use super::{BackendConfig, TextBackend};
use crate::error::{GenerationError, Result};
use serde::Deserialize;
use serde_json::json;
use std::time::Instant;
use tracing::debug;

/// Gemini `generateContent` client used for prompt optimization.
pub struct GeminiTextBackend {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl GeminiTextBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        Ok(Self {
            api_key,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            client: config.http_client()?,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url,
            model.trim()
        )
    }
}

#[async_trait::async_trait]
impl TextBackend for GeminiTextBackend {
    async fn complete(&self, model: &str, instruction: &str) -> Result<String> {
        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": instruction}]
            }]
        });

        let start = Instant::now();
        let response = self
            .client
            .post(self.endpoint(model))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| GenerationError::transport(format!("Gemini request failed: {err}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            GenerationError::transport(format!("Read Gemini response failed: {err}"))
        })?;
        if !status.is_success() {
            return Err(GenerationError::transport(format!(
                "Gemini API error: {status} - {body}"
            )));
        }
        debug!(latency_ms = start.elapsed().as_millis() as u64, "gemini completion");

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|err| {
            GenerationError::invalid_response(format!(
                "Invalid Gemini response JSON: {err}; raw: {body}"
            ))
        })?;
        Ok(parsed.text())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiResponse {
    /// Text of the first candidate, parts joined. Empty when there is none.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .map(|parts| {
                parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}
