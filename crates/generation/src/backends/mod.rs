/// Remote service backends
///
/// Provides a unified interface over the services the gallery talks to:
/// - Veo long-running video generation jobs
/// - Gemini text completion (prompt optimization)
/// - Plain HTTP retrieval of generated assets

pub mod fetch;
pub mod gemini;
pub mod veo;

use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;

pub use fetch::HttpFetcher;
pub use gemini::GeminiTextBackend;
pub use veo::VeoBackend;

use crate::error::{GenerationError, Result};
use crate::materializer::AssetMaterializer;
use crate::operation::{Operation, VideoRequest};
use crate::poller::{JobPoller, PollPolicy};

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_VIDEO_MODEL: &str = "veo-2.0-generate-001";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Long-running video job service
#[async_trait::async_trait]
pub trait VideoBackend: Send + Sync {
    /// Backend name
    fn name(&self) -> &str;

    /// Submit a generation job, returning its operation token
    async fn submit_job(&self, request: &VideoRequest) -> Result<Operation>;

    /// Query the current state of an operation
    async fn poll_job(&self, operation: &Operation) -> Result<Operation>;
}

/// Single-shot text completion service
#[async_trait::async_trait]
pub trait TextBackend: Send + Sync {
    async fn complete(&self, model: &str, instruction: &str) -> Result<String>;
}

/// Binary content retrieval for result handles
#[async_trait::async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes>;
}

/// Backend configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// API key passed through to every service call
    pub api_key: Option<String>,

    /// API base URL
    pub api_url: String,

    /// Model used for video jobs
    pub video_model: String,

    /// Model used for prompt optimization
    pub text_model: String,

    /// Aspect ratio requested for generated videos
    pub aspect_ratio: String,

    /// Videos requested per job
    pub number_of_videos: u32,

    /// Wait between status checks in seconds
    pub poll_interval_secs: u64,

    /// Maximum number of status checks before giving up
    pub max_poll_attempts: Option<u32>,

    /// Overall deadline for one job in seconds
    pub timeout_secs: Option<u64>,

    /// Timeout for each individual HTTP request in seconds
    pub request_timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            aspect_ratio: "16:9".to_string(),
            number_of_videos: 1,
            poll_interval_secs: 10,
            max_poll_attempts: Some(90),
            timeout_secs: None,
            request_timeout_secs: Some(120),
        }
    }
}

impl BackendConfig {
    /// Create new backend config
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// With API endpoint
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// With video model
    pub fn with_video_model(mut self, model: impl Into<String>) -> Self {
        self.video_model = model.into();
        self
    }

    /// With text model
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// With poll interval
    pub fn with_poll_interval(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    /// With poll attempt limit (`None` polls until the deadline, if any)
    pub fn with_max_poll_attempts(mut self, attempts: Option<u32>) -> Self {
        self.max_poll_attempts = attempts;
        self
    }

    /// With overall timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// API key, or a configuration error when it is absent or blank
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GenerationError::configuration("an API key is required"))
    }

    /// Poll policy derived from this configuration
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_secs(self.poll_interval_secs),
            max_attempts: self.max_poll_attempts,
            deadline: self.timeout_secs.map(Duration::from_secs),
        }
    }

    pub(crate) fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }
}

/// Builds the HTTP-backed services from one configuration
pub struct BackendFactory;

impl BackendFactory {
    pub fn video(config: &BackendConfig) -> Result<Arc<dyn VideoBackend>> {
        Ok(Arc::new(VeoBackend::new(config)?))
    }

    pub fn text(config: &BackendConfig) -> Result<Arc<dyn TextBackend>> {
        Ok(Arc::new(GeminiTextBackend::new(config)?))
    }

    pub fn fetcher(config: &BackendConfig) -> Result<Arc<dyn AssetFetcher>> {
        Ok(Arc::new(HttpFetcher::new(config)?))
    }

    /// Job poller over the Veo backend
    pub fn poller(config: &BackendConfig) -> Result<JobPoller> {
        Ok(JobPoller::new(Self::video(config)?, config))
    }

    /// Asset materializer over the HTTP fetcher
    pub fn materializer(config: &BackendConfig) -> Result<AssetMaterializer> {
        let api_key = config.require_api_key()?.to_string();
        Ok(AssetMaterializer::new(Self::fetcher(config)?, api_key))
    }
}
