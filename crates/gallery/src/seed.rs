//! Clips the gallery starts with.

use crate::entry::{MediaRef, VideoEntry};

const SAMPLE_BUCKET: &str = "https://storage.googleapis.com/gtv-videos-bucket/sample";

const SEED_CLIPS: [(&str, &str, &str); 4] = [
    (
        "Big Buck Bunny",
        "A giant, gentle rabbit in a sunlit meadow gets even with three mischievous rodents, animated in a soft, colorful 3D style.",
        "BigBuckBunny.mp4",
    ),
    (
        "Elephants Dream",
        "Two figures wander through a vast surreal machine of cables and pipes, cinematic lighting, dreamlike atmosphere.",
        "ElephantsDream.mp4",
    ),
    (
        "For Bigger Blazes",
        "A campfire at dusk, sparks drifting upward against a deep blue sky, slow motion close-up.",
        "ForBiggerBlazes.mp4",
    ),
    (
        "For Bigger Escapes",
        "A drone shot gliding over a turquoise coastline and white cliffs on a bright summer day.",
        "ForBiggerEscapes.mp4",
    ),
];

/// Fresh copies of the seed entries, each with a new id
pub fn seed_entries() -> Vec<VideoEntry> {
    SEED_CLIPS
        .iter()
        .map(|(title, description, file)| {
            VideoEntry::new(
                *title,
                *description,
                MediaRef::Remote(format!("{SAMPLE_BUCKET}/{file}")),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let entries = seed_entries();
        let ids: HashSet<_> = entries.iter().map(|e| e.id()).collect();
        assert_eq!(ids.len(), entries.len());
        assert!(entries.iter().all(|e| !e.is_favorite()));
        assert!(entries
            .iter()
            .all(|e| matches!(e.media_ref(), MediaRef::Remote(url) if url.ends_with(".mp4"))));
    }
}
