/// Veo video generation backend
///
/// Talks to the Generative Language REST API: jobs are started with
/// `predictLongRunning` and tracked through the returned operation name.
use super::{BackendConfig, VideoBackend};
use crate::error::{GenerationError, Result};
use crate::operation::{Operation, ResultHandle, VideoRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Veo API backend
pub struct VeoBackend {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl VeoBackend {
    /// Create new Veo backend
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        Ok(Self {
            api_key,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            client: config.http_client()?,
        })
    }

    fn submit_endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:predictLongRunning",
            self.api_url,
            model.trim()
        )
    }

    fn operation_endpoint(&self, name: &str) -> String {
        format!("{}/v1beta/{}", self.api_url, name.trim_start_matches('/'))
    }

    async fn read_operation(response: reqwest::Response) -> Result<Operation> {
        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::transport(format!(
                "Veo API error: {} - {}",
                status,
                response.text().await?
            )));
        }

        let body = response.text().await?;
        let parsed: OperationResponse = serde_json::from_str(&body).map_err(|err| {
            GenerationError::invalid_response(format!(
                "Invalid Veo operation JSON: {err}; raw: {body}"
            ))
        })?;
        Ok(parsed.into_operation())
    }
}

#[async_trait::async_trait]
impl VideoBackend for VeoBackend {
    fn name(&self) -> &str {
        "Veo"
    }

    async fn submit_job(&self, request: &VideoRequest) -> Result<Operation> {
        let payload = PredictRequest {
            instances: vec![PredictInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: PredictParameters {
                aspect_ratio: request.aspect_ratio.clone(),
                sample_count: request.number_of_videos,
            },
        };

        debug!(model = %request.model, "submitting video job");
        let response = self
            .client
            .post(self.submit_endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        Self::read_operation(response).await
    }

    async fn poll_job(&self, operation: &Operation) -> Result<Operation> {
        let response = self
            .client
            .get(self.operation_endpoint(&operation.name))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        Self::read_operation(response).await
    }
}

/// Request body for `predictLongRunning`
#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    aspect_ratio: String,
    sample_count: u32,
}

/// Operation resource as returned by submit and status queries
#[derive(Debug, Deserialize)]
struct OperationResponse {
    name: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    response: Option<OperationResult>,
    #[serde(default)]
    error: Option<OperationStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResult {
    #[serde(default)]
    generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoResponse {
    #[serde(default)]
    generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Deserialize)]
struct GeneratedSample {
    #[serde(default)]
    video: Option<GeneratedVideo>,
}

#[derive(Debug, Deserialize)]
struct GeneratedVideo {
    #[serde(default)]
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OperationStatus {
    #[serde(default)]
    code: Option<i32>,
    #[serde(default)]
    message: Option<String>,
}

impl OperationResponse {
    fn into_operation(self) -> Operation {
        let results = self
            .response
            .and_then(|r| r.generate_video_response)
            .map(|r| {
                r.generated_samples
                    .into_iter()
                    .filter_map(|sample| sample.video.and_then(|v| v.uri))
                    .map(ResultHandle::new)
                    .collect::<Vec<_>>()
            });
        let error = self.error.map(|status| match (status.code, status.message) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (None, Some(message)) => message,
            (Some(code), None) => format!("operation failed with code {code}"),
            (None, None) => "operation failed".to_string(),
        });

        Operation {
            name: self.name,
            done: self.done,
            results,
            error,
        }
    }
}
