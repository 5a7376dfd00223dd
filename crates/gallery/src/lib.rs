/// Video gallery state and generation workflow
///
/// Holds the in-memory collection of generated videos and drives new
/// generations and remixes through the `generation` pipeline.

pub mod composer;
pub mod config;
pub mod entry;
pub mod i18n;
pub mod logging;
pub mod optimizer;
pub mod orchestrator;
pub mod progress;
pub mod seed;
pub mod state;
pub mod store;

pub use composer::{ComposerAction, PromptComposer};
pub use config::{ConfigError, GalleryConfig};
pub use entry::{MediaRef, VideoEntry, VideoId};
pub use i18n::{Language, Localizer, Translations};
pub use optimizer::{OptimizeFallback, Optimized, PromptOptimizer};
pub use orchestrator::{truncate_prompt, GenerateOutcome, GenerationOrchestrator};
pub use progress::ProgressMessages;
pub use seed::seed_entries;
pub use state::{ErrorNotice, GalleryState};
pub use store::GalleryStore;

use parking_lot::Mutex;
use std::sync::Arc;

/// Seeded gallery state plus an orchestrator wired to the configured services
pub fn bootstrap(
    config: &GalleryConfig,
) -> generation::Result<(Arc<Mutex<GalleryState>>, GenerationOrchestrator)> {
    let state = Arc::new(Mutex::new(GalleryState::new(
        seed_entries(),
        Localizer::new(config.language),
    )));
    let orchestrator = GenerationOrchestrator::from_config(config, Arc::clone(&state))?;
    Ok((state, orchestrator))
}
