use super::{AssetFetcher, BackendConfig};
use crate::error::{GenerationError, Result};
use bytes::Bytes;

/// Fetches generated assets over plain HTTP(S)
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Ok(Self {
            client: config.http_client()?,
        })
    }
}

#[async_trait::async_trait]
impl AssetFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Fetch {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        Ok(response.bytes().await?)
    }
}
