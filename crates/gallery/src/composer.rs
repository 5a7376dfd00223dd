/// What the prompt bar should do when the user presses submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerAction {
    /// Nothing to do: blank prompt, or a request is already running
    Ignore,
    /// Rewrite the prompt first; generation waits for the next submit
    Optimize(String),
    Generate(String),
}

/// State of the prompt input bar.
///
/// With optimization enabled, the first submit rewrites the prompt in place so
/// the user can review it; the next submit generates from the rewritten text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptComposer {
    text: String,
    optimization_enabled: bool,
    has_been_optimized: bool,
    processing: bool,
}

impl PromptComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// User edit. An edited prompt no longer counts as optimized.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.has_been_optimized = false;
    }

    pub fn optimization_enabled(&self) -> bool {
        self.optimization_enabled
    }

    /// Toggling optimization in either direction invalidates an earlier rewrite.
    pub fn set_optimization_enabled(&mut self, enabled: bool) {
        self.optimization_enabled = enabled;
        self.has_been_optimized = false;
    }

    pub fn has_been_optimized(&self) -> bool {
        self.has_been_optimized
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Whether the submit control is disabled
    pub fn is_disabled(&self, busy: bool) -> bool {
        busy || self.processing
    }

    pub fn submit(&mut self, busy: bool) -> ComposerAction {
        if self.text.trim().is_empty() || self.is_disabled(busy) {
            return ComposerAction::Ignore;
        }

        self.processing = true;
        if self.optimization_enabled && !self.has_been_optimized {
            ComposerAction::Optimize(self.text.clone())
        } else {
            ComposerAction::Generate(self.text.clone())
        }
    }

    /// Install the rewritten prompt returned for an `Optimize` action.
    pub fn apply_optimized(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.has_been_optimized = true;
        self.processing = false;
    }

    /// A `Generate` action produced a video: start over with an empty prompt.
    pub fn generation_succeeded(&mut self) {
        self.text.clear();
        self.has_been_optimized = false;
        self.processing = false;
    }

    /// Re-enable submit without touching the prompt, e.g. after a failure.
    pub fn finish_processing(&mut self) {
        self.processing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_or_busy_is_ignored() {
        let mut composer = PromptComposer::new();
        composer.set_text("   ");
        assert_eq!(composer.submit(false), ComposerAction::Ignore);

        composer.set_text("a koala DJ");
        assert_eq!(composer.submit(true), ComposerAction::Ignore);
        assert!(!composer.is_processing());
    }

    #[test]
    fn test_generate_without_optimization() {
        let mut composer = PromptComposer::new();
        composer.set_text("a koala DJ");
        assert_eq!(
            composer.submit(false),
            ComposerAction::Generate("a koala DJ".to_string())
        );
        assert!(composer.is_disabled(false));
        assert_eq!(composer.submit(false), ComposerAction::Ignore);

        composer.generation_succeeded();
        assert_eq!(composer.text(), "");
        assert!(!composer.is_disabled(false));
    }

    #[test]
    fn test_optimize_then_generate() {
        let mut composer = PromptComposer::new();
        composer.set_optimization_enabled(true);
        composer.set_text("a koala DJ");

        assert_eq!(
            composer.submit(false),
            ComposerAction::Optimize("a koala DJ".to_string())
        );
        composer.apply_optimized("A koala DJing at dusk, neon forest");
        assert!(composer.has_been_optimized());

        assert_eq!(
            composer.submit(false),
            ComposerAction::Generate("A koala DJing at dusk, neon forest".to_string())
        );
    }

    #[test]
    fn test_editing_requires_new_optimization() {
        let mut composer = PromptComposer::new();
        composer.set_optimization_enabled(true);
        composer.set_text("a koala DJ");
        composer.submit(false);
        composer.apply_optimized("A koala DJing at dusk");

        composer.set_text("A koala DJing at dawn");
        assert!(!composer.has_been_optimized());
        assert!(matches!(composer.submit(false), ComposerAction::Optimize(_)));
    }

    #[test]
    fn test_toggling_optimization_requires_new_rewrite() {
        let mut composer = PromptComposer::new();
        composer.set_optimization_enabled(true);
        composer.set_text("a koala DJ");
        composer.submit(false);
        composer.apply_optimized("A koala DJing at dusk");

        composer.set_optimization_enabled(false);
        composer.set_optimization_enabled(true);
        assert!(!composer.has_been_optimized());
        assert_eq!(
            composer.submit(false),
            ComposerAction::Optimize("A koala DJing at dusk".to_string())
        );
    }

    #[test]
    fn test_failure_keeps_prompt() {
        let mut composer = PromptComposer::new();
        composer.set_text("a koala DJ");
        composer.submit(false);
        composer.finish_processing();
        assert_eq!(composer.text(), "a koala DJ");
        assert!(!composer.is_processing());
    }
}
