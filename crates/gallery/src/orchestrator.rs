/// Prompt to gallery entry: submit, wait, download, insert
use crate::config::GalleryConfig;
use crate::entry::{MediaRef, VideoEntry, VideoId};
use crate::optimizer::PromptOptimizer;
use crate::state::{ErrorNotice, GalleryState};
use generation::{
    BackendFactory, CancellationToken, EncodedMedia, GenerationError, MediaSource, VideoJobs,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Characters of the prompt kept in a generated title
pub const TITLE_PROMPT_CHARS: usize = 40;

/// Result of one generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Blank prompt, nothing happened
    Skipped,
    /// Another generation is still running
    Busy,
    /// A new entry was inserted and selected
    Created(VideoId),
    /// The request failed; the error notice is set
    Failed,
    /// Aborted through [`GenerationOrchestrator::cancel_generation`]
    Cancelled,
}

/// First `max_chars` characters of the prompt, with `...` when cut.
pub fn truncate_prompt(prompt: &str, max_chars: usize) -> String {
    match prompt.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &prompt[..cut]),
        None => prompt.to_string(),
    }
}

enum Variant<'a> {
    Fresh,
    Remix(&'a VideoEntry),
}

/// Clears `busy` and the cancellation hook however the generation ends,
/// including when its future is dropped mid-flight.
struct BusyGuard {
    state: Arc<Mutex<GalleryState>>,
    current: Arc<Mutex<Option<CancellationToken>>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        if let Some(token) = self.current.lock().take() {
            token.cancel();
        }
        self.state.lock().end_generation();
    }
}

pub struct GenerationOrchestrator {
    state: Arc<Mutex<GalleryState>>,
    jobs: Arc<dyn VideoJobs>,
    media: Arc<dyn MediaSource>,
    optimizer: PromptOptimizer,
    count: u32,
    current: Arc<Mutex<Option<CancellationToken>>>,
}

impl GenerationOrchestrator {
    pub fn new(
        state: Arc<Mutex<GalleryState>>,
        jobs: Arc<dyn VideoJobs>,
        media: Arc<dyn MediaSource>,
        optimizer: PromptOptimizer,
    ) -> Self {
        Self {
            state,
            jobs,
            media,
            optimizer,
            count: 1,
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Wire up the HTTP services described by `config` around the given state.
    pub fn from_config(
        config: &GalleryConfig,
        state: Arc<Mutex<GalleryState>>,
    ) -> generation::Result<Self> {
        let backend = &config.backend;
        let jobs = Arc::new(BackendFactory::poller(backend)?);
        let media = Arc::new(BackendFactory::materializer(backend)?);
        let optimizer = PromptOptimizer::new(BackendFactory::text(backend)?, &backend.text_model);
        Ok(Self::new(state, jobs, media, optimizer).with_count(backend.number_of_videos))
    }

    /// Videos requested per job. Only the first one becomes an entry.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count.max(1);
        self
    }

    pub fn state(&self) -> Arc<Mutex<GalleryState>> {
        Arc::clone(&self.state)
    }

    /// Generate an unrelated new video from a prompt.
    pub async fn generate_from_prompt(&self, prompt: &str) -> GenerateOutcome {
        self.generate(prompt, Variant::Fresh).await
    }

    /// Generate a new video derived from `source`, keeping its favorite flag.
    pub async fn generate_remix(&self, source: &VideoEntry, prompt: &str) -> GenerateOutcome {
        self.generate(prompt, Variant::Remix(source)).await
    }

    /// Abort the generation in flight, if any.
    pub fn cancel_generation(&self) -> bool {
        match self.current.lock().as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Rewrite a prompt in the current UI language; falls back to the prompt itself.
    pub async fn optimize_prompt(&self, prompt: &str) -> String {
        let language = self.state.lock().localizer.current_language();
        self.optimizer.optimize(prompt, language).await
    }

    async fn generate(&self, prompt: &str, variant: Variant<'_>) -> GenerateOutcome {
        if prompt.trim().is_empty() {
            return GenerateOutcome::Skipped;
        }

        let cancel = CancellationToken::new();
        let _guard = {
            let mut state = self.state.lock();
            if state.is_busy() {
                return GenerateOutcome::Busy;
            }
            state.begin_generation();
            if matches!(variant, Variant::Remix(_)) {
                state.store.select(None);
            }
            *self.current.lock() = Some(cancel.clone());
            BusyGuard {
                state: Arc::clone(&self.state),
                current: Arc::clone(&self.current),
            }
        };

        info!(prompt, "generating video");
        let produced = self.produce(prompt, &cancel).await;
        match produced {
            Ok(media) => {
                let mut state = self.state.lock();
                let t = state.localizer.t();
                let entry = match variant {
                    Variant::Fresh => VideoEntry::new(
                        t.generated_title(&truncate_prompt(prompt, TITLE_PROMPT_CHARS)),
                        prompt,
                        MediaRef::embedded(&media),
                    ),
                    Variant::Remix(source) => VideoEntry::new(
                        t.remix_title(source.title()),
                        prompt,
                        MediaRef::embedded(&media),
                    )
                    .with_favorite(source.is_favorite()),
                };
                let id = entry.id();
                state.store.insert(entry);
                state.store.select(Some(id));
                info!(%id, "generated video added to gallery");
                GenerateOutcome::Created(id)
            }
            Err(GenerationError::Cancelled) => {
                info!("video generation cancelled");
                GenerateOutcome::Cancelled
            }
            Err(err) => {
                error!(error = %err, "video generation failed");
                let mut state = self.state.lock();
                let notice = ErrorNotice::generation_failed(state.localizer.t());
                state.report_error(notice);
                GenerateOutcome::Failed
            }
        }
    }

    async fn produce(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> generation::Result<EncodedMedia> {
        let handles = self.jobs.submit_and_await(prompt, self.count, cancel).await?;
        let first = handles.first().ok_or(GenerationError::EmptyResult)?;
        if handles.len() > 1 {
            debug!(discarded = handles.len() - 1, "keeping only the first generated video");
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(GenerationError::Cancelled),
            media = self.media.materialize(first) => media,
        }
    }
}
