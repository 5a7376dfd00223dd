use crate::entry::VideoEntry;
use crate::i18n::{Localizer, Translations};
use crate::store::GalleryStore;

/// Error surface shown after a failed generation, until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub title: String,
    pub lines: Vec<String>,
}

impl ErrorNotice {
    /// The fixed message every generation failure is reported with
    pub fn generation_failed(t: &Translations) -> Self {
        Self {
            title: t.generation_failed.to_string(),
            lines: vec![
                t.error_paid_tier.to_string(),
                t.error_select_project.to_string(),
            ],
        }
    }
}

/// Everything the gallery screen renders from
#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    pub store: GalleryStore,
    pub localizer: Localizer,
    busy: bool,
    last_error: Option<ErrorNotice>,
}

impl GalleryState {
    pub fn new(seed: Vec<VideoEntry>, localizer: Localizer) -> Self {
        Self {
            store: GalleryStore::new(seed),
            localizer,
            busy: false,
            last_error: None,
        }
    }

    /// True while a generation is in flight; the gallery shows the progress view instead.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_error(&self) -> Option<&ErrorNotice> {
        self.last_error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub(crate) fn begin_generation(&mut self) {
        self.busy = true;
        self.last_error = None;
    }

    pub(crate) fn end_generation(&mut self) {
        self.busy = false;
    }

    pub(crate) fn report_error(&mut self, notice: ErrorNotice) {
        self.last_error = Some(notice);
    }
}
