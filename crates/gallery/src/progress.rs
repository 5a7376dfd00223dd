use crate::i18n::Translations;
use std::time::Duration;

/// How long each caption stays on screen
pub const ROTATION_INTERVAL: Duration = Duration::from_millis(2500);

/// Rotating captions of the progress view shown while a video is generated
#[derive(Debug, Clone, Copy)]
pub struct ProgressMessages {
    messages: [&'static str; 5],
    subtitle: &'static str,
}

impl ProgressMessages {
    pub fn new(t: &'static Translations) -> Self {
        Self {
            messages: [
                t.creating_remix,
                t.animating_pixels,
                t.composing_shot,
                t.rendering_masterpiece,
                t.take_a_few_moments,
            ],
            subtitle: t.wait_for_vision,
        }
    }

    /// Caption to show `elapsed` after the progress view appeared
    pub fn message_at(&self, elapsed: Duration) -> &'static str {
        let step = elapsed.as_millis() / ROTATION_INTERVAL.as_millis();
        self.messages[(step % self.messages.len() as u128) as usize]
    }

    pub fn subtitle(&self) -> &'static str {
        self.subtitle
    }
}
