/// Long-running job handles exchanged with the video generation service
use serde::{Deserialize, Serialize};

/// Parameters of one video generation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRequest {
    /// Model identifier, e.g. `veo-2.0-generate-001`
    pub model: String,

    /// Text prompt describing the video
    pub prompt: String,

    /// Requested number of output videos
    pub number_of_videos: u32,

    /// Output aspect ratio, e.g. `16:9`
    pub aspect_ratio: String,
}

impl VideoRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            number_of_videos: 1,
            aspect_ratio: "16:9".to_string(),
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.number_of_videos = count;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = aspect_ratio.into();
        self
    }
}

/// Reference to one generated video. The content has to be fetched separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultHandle {
    pub uri: String,
}

impl ResultHandle {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// Opaque operation token returned by submit and refreshed by every poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Server-side operation name used to query status
    pub name: String,

    /// Whether the job has finished (successfully or not)
    pub done: bool,

    /// Result handles, present once the job is done
    pub results: Option<Vec<ResultHandle>>,

    /// Error reported by the service for a finished job
    pub error: Option<String>,
}

impl Operation {
    /// Operation that was accepted but has not finished yet.
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Finished operation carrying result handles.
    pub fn completed(name: impl Into<String>, results: Vec<ResultHandle>) -> Self {
        Self {
            name: name.into(),
            done: true,
            results: Some(results),
            error: None,
        }
    }

    /// Finished operation that failed server-side.
    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: true,
            results: None,
            error: Some(error.into()),
        }
    }
}
