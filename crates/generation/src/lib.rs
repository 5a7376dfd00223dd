/// Video generation pipeline
///
/// Submits prompts to a long-running video generation service, waits for the
/// job to finish, and turns each result into embeddable media.

pub mod backends;
pub mod error;
pub mod materializer;
pub mod operation;
pub mod poller;

pub use backends::{
    AssetFetcher, BackendConfig, BackendFactory, GeminiTextBackend, HttpFetcher, TextBackend,
    VeoBackend, VideoBackend,
};
pub use error::{GenerationError, Result};
pub use materializer::{resolve_download_url, AssetMaterializer, EncodedMedia, MediaSource};
pub use operation::{Operation, ResultHandle, VideoRequest};
pub use poller::{JobPoller, PollPolicy, VideoJobs};

/// Re-exported so callers can hand a cancellation hook to the poller without
/// depending on `tokio-util` directly.
pub use tokio_util::sync::CancellationToken;
