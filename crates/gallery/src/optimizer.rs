use crate::i18n::Language;
use generation::TextBackend;
use std::sync::Arc;
use tracing::{info, warn};

/// Why an optimization fell back to the original prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizeFallback {
    Failed(String),
    EmptyResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Optimized {
    pub text: String,
    pub fallback: Option<OptimizeFallback>,
}

/// Instruction asking the text model to make a prompt more cinematic
pub fn optimization_instruction(prompt: &str, language: Language) -> String {
    match language {
        Language::ZhTw => format!(
            "請將以下用於影片生成的提示詞變得更豐富、更有電影感、更詳細。直接回覆優化後的提示詞，不要有任何額外說明。語言：繁體中文。使用者提示詞：「{prompt}」"
        ),
        Language::En => format!(
            "Enhance and expand the following user prompt for a video generation model. Make it more vivid, detailed, and cinematic. Respond ONLY with the new prompt, without any extra explanation. Language: English. User prompt: \"{prompt}\""
        ),
    }
}

/// Rewrites prompts through a text model. Never fails: any problem yields the
/// original prompt.
pub struct PromptOptimizer {
    backend: Arc<dyn TextBackend>,
    model: String,
}

impl PromptOptimizer {
    pub fn new(backend: Arc<dyn TextBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub async fn optimize(&self, prompt: &str, language: Language) -> String {
        self.optimize_detailed(prompt, language).await.text
    }

    pub async fn optimize_detailed(&self, prompt: &str, language: Language) -> Optimized {
        let instruction = optimization_instruction(prompt, language);
        match self.backend.complete(&self.model, &instruction).await {
            Ok(text) if !text.trim().is_empty() => {
                let text = text.trim().to_string();
                info!(optimized = %text, "prompt optimized");
                Optimized {
                    text,
                    fallback: None,
                }
            }
            Ok(_) => {
                warn!("prompt optimization returned no text, keeping original prompt");
                Optimized {
                    text: prompt.to_string(),
                    fallback: Some(OptimizeFallback::EmptyResponse),
                }
            }
            Err(err) => {
                warn!(error = %err, "prompt optimization failed, keeping original prompt");
                Optimized {
                    text: prompt.to_string(),
                    fallback: Some(OptimizeFallback::Failed(err.to_string())),
                }
            }
        }
    }
}
