use crate::entry::{VideoEntry, VideoId};

/// In-memory video collection plus the current selection.
///
/// Entries are kept newest first. The selection is only an id; the selected
/// entry is always looked up in `entries`, so favorite changes are visible
/// through both without extra bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct GalleryStore {
    entries: Vec<VideoEntry>,
    selected: Option<VideoId>,
}

impl GalleryStore {
    pub fn new(seed: Vec<VideoEntry>) -> Self {
        Self {
            entries: seed,
            selected: None,
        }
    }

    /// Entries in insertion order, newest first
    pub fn entries(&self) -> &[VideoEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: VideoId) -> Option<&VideoEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn insert(&mut self, entry: VideoEntry) {
        debug_assert!(self.get(entry.id()).is_none(), "duplicate video id");
        self.entries.insert(0, entry);
    }

    /// Flip the favorite flag, returning the new value.
    pub fn toggle_favorite(&mut self, id: VideoId) -> Option<bool> {
        self.entries
            .iter_mut()
            .find(|e| e.id() == id)
            .map(VideoEntry::toggle_favorite)
    }

    /// Remove an entry, clearing the selection if it pointed at it.
    pub fn remove(&mut self, id: VideoId) -> Option<VideoEntry> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.entries.remove(index))
    }

    /// Select an entry, or clear the selection with `None`.
    ///
    /// Unknown ids are ignored and reported with `false`.
    pub fn select(&mut self, id: Option<VideoId>) -> bool {
        match id {
            Some(id) if self.get(id).is_none() => false,
            _ => {
                self.selected = id;
                true
            }
        }
    }

    pub fn selected_id(&self) -> Option<VideoId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&VideoEntry> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Display order: favorites first, otherwise insertion order.
    pub fn ordered_view(&self) -> Vec<&VideoEntry> {
        let mut view: Vec<&VideoEntry> = self.entries.iter().collect();
        view.sort_by_key(|e| !e.is_favorite());
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::MediaRef;

    fn entry(title: &str, favorite: bool) -> VideoEntry {
        VideoEntry::new(title, title, MediaRef::Remote(format!("https://v/{title}")))
            .with_favorite(favorite)
    }

    fn titles(view: &[&VideoEntry]) -> Vec<String> {
        view.iter().map(|e| e.title().to_string()).collect()
    }

    #[test]
    fn test_insert_prepends() {
        let mut store = GalleryStore::new(vec![entry("v1", false)]);
        store.insert(entry("v2", false));
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].title(), "v2");
    }

    #[test]
    fn test_ordered_view_is_stable() {
        let store = GalleryStore::new(vec![
            entry("A", false),
            entry("B", true),
            entry("C", false),
        ]);
        assert_eq!(titles(&store.ordered_view()), ["B", "A", "C"]);

        let store = GalleryStore::new(vec![
            entry("A", true),
            entry("B", false),
            entry("C", true),
            entry("D", false),
        ]);
        assert_eq!(titles(&store.ordered_view()), ["A", "C", "B", "D"]);
    }

    #[test]
    fn test_toggle_favorite_visible_through_selection() {
        let a = entry("A", false);
        let id = a.id();
        let mut store = GalleryStore::new(vec![a, entry("B", false)]);
        assert!(store.select(Some(id)));

        assert_eq!(store.toggle_favorite(id), Some(true));
        assert_eq!(store.selected().map(|e| e.is_favorite()), Some(true));
        assert_eq!(store.get(id).map(|e| e.is_favorite()), Some(true));

        assert_eq!(store.toggle_favorite(id), Some(false));
        assert_eq!(store.selected().map(|e| e.is_favorite()), Some(false));
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut store = GalleryStore::new(vec![entry("A", false)]);
        assert_eq!(store.toggle_favorite(VideoId::new()), None);
        assert!(!store.entries()[0].is_favorite());
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let a = entry("A", false);
        let id = a.id();
        let mut store = GalleryStore::new(vec![a, entry("B", false)]);
        store.select(Some(id));

        let removed = store.remove(id).unwrap();
        assert_eq!(removed.title(), "A");
        assert_eq!(store.selected_id(), None);
        assert!(store.selected().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_other_keeps_selection() {
        let a = entry("A", false);
        let b = entry("B", false);
        let (a_id, b_id) = (a.id(), b.id());
        let mut store = GalleryStore::new(vec![a, b]);
        store.select(Some(a_id));

        assert!(store.remove(b_id).is_some());
        assert_eq!(store.selected_id(), Some(a_id));
        assert!(store.remove(b_id).is_none());
    }

    #[test]
    fn test_select_unknown_is_ignored() {
        let a = entry("A", false);
        let id = a.id();
        let mut store = GalleryStore::new(vec![a]);
        store.select(Some(id));

        assert!(!store.select(Some(VideoId::new())));
        assert_eq!(store.selected_id(), Some(id));
        assert!(store.select(None));
        assert_eq!(store.selected_id(), None);
    }
}
