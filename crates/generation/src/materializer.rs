/// Result handle resolution: download each generated video and encode it for embedding
use crate::backends::AssetFetcher;
use crate::error::{GenerationError, Result};
use crate::operation::ResultHandle;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::debug;

/// MIME type of every generated video
pub const VIDEO_MIME_TYPE: &str = "video/mp4";

/// Base64 payload of one downloaded video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMedia {
    pub mime_type: String,
    pub payload: String,
}

impl EncodedMedia {
    pub fn encode(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: STANDARD.encode(bytes),
        }
    }

    /// Wrap an already encoded payload
    pub fn from_payload(payload: impl Into<String>) -> Self {
        Self {
            mime_type: VIDEO_MIME_TYPE.to_string(),
            payload: payload.into(),
        }
    }

    /// Self-contained `data:` URI for this media
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.payload)
    }
}

/// Download URL for a result handle: the percent-decoded URI with the API key appended.
pub fn resolve_download_url(uri: &str, api_key: &str) -> Result<String> {
    let decoded = urlencoding::decode(uri)
        .map_err(|err| GenerationError::invalid_response(format!("malformed result uri: {err}")))?;
    let separator = if decoded.contains('?') { '&' } else { '?' };
    Ok(format!(
        "{decoded}{separator}key={}",
        urlencoding::encode(api_key)
    ))
}

/// Resolves result handles into embeddable media
#[async_trait::async_trait]
pub trait MediaSource: Send + Sync {
    async fn materialize(&self, handle: &ResultHandle) -> Result<EncodedMedia>;

    /// Resolve every handle concurrently. Output order matches input order;
    /// the first failure fails the whole batch.
    async fn materialize_all(&self, handles: &[ResultHandle]) -> Result<Vec<EncodedMedia>> {
        try_join_all(handles.iter().map(|handle| self.materialize(handle))).await
    }
}

/// Downloads results through an [`AssetFetcher`] and base64-encodes them
pub struct AssetMaterializer {
    fetcher: Arc<dyn AssetFetcher>,
    api_key: String,
}

impl AssetMaterializer {
    pub fn new(fetcher: Arc<dyn AssetFetcher>, api_key: impl Into<String>) -> Self {
        Self {
            fetcher,
            api_key: api_key.into(),
        }
    }
}

#[async_trait::async_trait]
impl MediaSource for AssetMaterializer {
    async fn materialize(&self, handle: &ResultHandle) -> Result<EncodedMedia> {
        let url = resolve_download_url(&handle.uri, &self.api_key)?;
        let bytes = self.fetcher.fetch(&url).await?;
        debug!(size = bytes.len(), "downloaded generated video");

        // Large clips are encoded off the async worker threads.
        tokio::task::spawn_blocking(move || EncodedMedia::encode(VIDEO_MIME_TYPE, &bytes))
            .await
            .map_err(|err| GenerationError::invalid_response(format!("encoding task failed: {err}")))
    }
}
