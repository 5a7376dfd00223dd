use generation::EncodedMedia;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gallery entry identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(pub uuid::Uuid);

impl VideoId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a video's content can be loaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaRef {
    /// Hosted clip, used by the seed data
    Remote(String),
    /// Self-contained `data:` URI of a generated clip
    Embedded(String),
}

impl MediaRef {
    pub fn embedded(media: &EncodedMedia) -> Self {
        MediaRef::Embedded(media.data_uri())
    }

    /// Value a player can be pointed at directly
    pub fn as_str(&self) -> &str {
        match self {
            MediaRef::Remote(url) | MediaRef::Embedded(url) => url,
        }
    }
}

/// One video in the gallery.
///
/// Everything except the favorite flag is fixed at creation; editing a prompt
/// produces a new entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    id: VideoId,
    title: String,
    description: String,
    media_ref: MediaRef,
    is_favorite: bool,
}

impl VideoEntry {
    pub fn new(title: impl Into<String>, description: impl Into<String>, media_ref: MediaRef) -> Self {
        Self {
            id: VideoId::new(),
            title: title.into(),
            description: description.into(),
            media_ref,
            is_favorite: false,
        }
    }

    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    pub fn id(&self) -> VideoId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Prompt that produced the video
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn media_ref(&self) -> &MediaRef {
        &self.media_ref
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub(crate) fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.is_favorite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_get_distinct_ids() {
        let a = VideoEntry::new("a", "a", MediaRef::Remote("https://a".into()));
        let b = VideoEntry::new("a", "a", MediaRef::Remote("https://a".into()));
        assert_ne!(a.id(), b.id());
        assert!(!a.is_favorite());
    }

    #[test]
    fn test_embedded_media_ref() {
        let media = EncodedMedia::from_payload("QUJD");
        let media_ref = MediaRef::embedded(&media);
        assert_eq!(media_ref.as_str(), "data:video/mp4;base64,QUJD");
        assert_eq!(MediaRef::Remote("https://a".into()).as_str(), "https://a");
    }
}
