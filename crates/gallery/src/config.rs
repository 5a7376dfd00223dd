//! Environment-backed runtime configuration.

use crate::i18n::Language;
use generation::BackendConfig;
use std::env;
use thiserror::Error;

const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key set (expected one of GEMINI_API_KEY, API_KEY)")]
    MissingApiKey,

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{0}")]
    UnsupportedLanguage(String),
}

/// Runtime configuration of the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    /// Service endpoints, models and polling limits
    pub backend: BackendConfig,
    /// Initial UI language
    pub language: Language,
}

impl GalleryConfig {
    pub fn new(backend: BackendConfig) -> Self {
        Self {
            backend,
            language: Language::default(),
        }
    }

    /// Parse configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|key| optional_trimmed_env(key, &mut lookup))
            .ok_or(ConfigError::MissingApiKey)?;

        let mut backend = BackendConfig::new(api_key);
        if let Some(url) = optional_trimmed_env("VEO_GALLERY_API_URL", &mut lookup) {
            backend = backend.with_api_url(url);
        }
        if let Some(model) = optional_trimmed_env("VEO_GALLERY_VIDEO_MODEL", &mut lookup) {
            backend = backend.with_video_model(model);
        }
        if let Some(model) = optional_trimmed_env("VEO_GALLERY_TEXT_MODEL", &mut lookup) {
            backend = backend.with_text_model(model);
        }
        if let Some(secs) = parse_optional_u64("VEO_GALLERY_POLL_INTERVAL_SECS", &mut lookup)? {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "VEO_GALLERY_POLL_INTERVAL_SECS",
                    value: secs.to_string(),
                });
            }
            backend = backend.with_poll_interval(secs);
        }
        if let Some(attempts) = parse_optional_u64("VEO_GALLERY_MAX_POLL_ATTEMPTS", &mut lookup)? {
            // 0 lifts the attempt limit.
            let limit = match attempts {
                0 => None,
                n => Some(u32::try_from(n).map_err(|_| ConfigError::InvalidValue {
                    key: "VEO_GALLERY_MAX_POLL_ATTEMPTS",
                    value: n.to_string(),
                })?),
            };
            backend = backend.with_max_poll_attempts(limit);
        }
        if let Some(secs) = parse_optional_u64("VEO_GALLERY_TIMEOUT_SECS", &mut lookup)? {
            backend = backend.with_timeout(secs);
        }

        let language = match optional_trimmed_env("VEO_GALLERY_LANG", &mut lookup) {
            Some(code) => code
                .parse::<Language>()
                .map_err(ConfigError::UnsupportedLanguage)?,
            None => Language::default(),
        };

        Ok(Self { backend, language })
    }
}

fn optional_trimmed_env<F>(key: &str, lookup: &mut F) -> Option<String>
where
    F: FnMut(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_optional_u64<F>(key: &'static str, lookup: &mut F) -> Result<Option<u64>, ConfigError>
where
    F: FnMut(&str) -> Option<String>,
{
    optional_trimmed_env(key, lookup)
        .map(|value| {
            value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue { key, value })
        })
        .transpose()
}
