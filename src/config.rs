use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::i18n::LanguageTag;

/// Default translation root, relative to the working directory.
pub const DEFAULT_SOURCE_PATH: &str = "translations";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root directory of the translation tree
    pub source_path: PathBuf,

    /// Language used when no printer exists for a requested one.
    /// The undefined tag disables fallback.
    pub fallback: LanguageTag,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_PATH)
    }
}

impl Config {
    /// Config without a fallback language.
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            fallback: LanguageTag::undefined(),
        }
    }

    pub fn with_fallback(mut self, fallback: LanguageTag) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn from_env() -> Result<Self> {
        let source_path = std::env::var("PHRASEBOOK_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE_PATH.to_string());

        let fallback = match std::env::var("PHRASEBOOK_FALLBACK") {
            Ok(value) if !value.trim().is_empty() => LanguageTag::parse(value.trim())
                .with_context(|| format!("PHRASEBOOK_FALLBACK `{}` is not a language tag", value))?,
            _ => LanguageTag::undefined(),
        };

        Ok(Self {
            source_path: PathBuf::from(source_path),
            fallback,
        })
    }
}
