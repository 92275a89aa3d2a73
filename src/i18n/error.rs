//! Error types for catalog loading.
//!
//! Every failure during a load is fatal for that load call. Rendering never
//! fails, so nothing here is produced after loading has finished.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use unic_langid::LanguageIdentifierError;

use crate::i18n::LanguageTag;

/// Errors returned by [`I18n::load`](crate::i18n::I18n::load) and the
/// components it drives.
#[derive(Debug, Error)]
pub enum I18nError {
    /// A language name could not be parsed as a language tag.
    #[error("invalid language tag `{name}`")]
    InvalidTag {
        name: String,
        #[source]
        source: LanguageIdentifierError,
    },

    /// The same language tag was registered twice in one load session.
    #[error("language tag `{tag}` already exists")]
    DuplicateTag { tag: LanguageTag },

    /// The configured fallback language has no translation source.
    #[error("fallback language tag `{tag}` doesn't exist")]
    UnknownFallback { tag: LanguageTag },

    /// A translation record failed schema or rule validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A message id was loaded twice for the same language.
    #[error("duplicate id `{id}` for language `{tag}`")]
    DuplicateMessage { tag: LanguageTag, id: String },

    /// A translation source was not valid JSON of the expected shape.
    #[error("cannot decode translations for language `{tag}` from {}", display_path(.path))]
    Decode {
        tag: LanguageTag,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A translation source could not be read.
    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A malformed translation record, with enough context to find it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    pub tag: LanguageTag,
    /// Empty for records that came from an in-memory buffer.
    pub file_path: PathBuf,
    pub message_id: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "validation error in file {} for language {} (id: {}): {}",
            display_path(&self.file_path),
            self.tag,
            self.message_id,
            self.message
        )
    }
}

/// Reasons a `rules` value cannot be compiled into selectors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("`rules` field should be a map")]
    NotAMap,

    #[error("`rules` field should contain at least one case")]
    Empty,

    #[error("invalid argument index `{0}`")]
    InvalidArgumentIndex(String),

    #[error("`rules` must not mix argument-indexed and category entries")]
    MixedShapes,

    #[error("rule `{0}` should be a template string or a map of cases")]
    InvalidEntry(String),
}

fn display_path(path: &std::path::Path) -> String {
    if path.as_os_str().is_empty() {
        "<buffer>".to_string()
    } else {
        path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> LanguageTag {
        LanguageTag::parse("en").unwrap()
    }

    #[test]
    fn test_validation_error_display_with_file() {
        let err = ValidationError {
            tag: english(),
            file_path: PathBuf::from("translations/en/common.json"),
            message_id: "apple".to_string(),
            message: "message id is not set".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "validation error in file translations/en/common.json for language en (id: apple): message id is not set"
        );
    }

    #[test]
    fn test_validation_error_display_for_buffer() {
        let err = ValidationError {
            tag: english(),
            file_path: PathBuf::new(),
            message_id: String::new(),
            message: "message id is not set".to_string(),
        };

        assert!(err.to_string().contains("<buffer>"));
    }

    #[test]
    fn test_validation_error_is_transparent_in_i18n_error() {
        let err = ValidationError {
            tag: english(),
            file_path: PathBuf::new(),
            message_id: "x".to_string(),
            message: "boom".to_string(),
        };
        let expected = err.to_string();

        assert_eq!(I18nError::from(err).to_string(), expected);
    }

    #[test]
    fn test_duplicate_message_display() {
        let err = I18nError::DuplicateMessage {
            tag: english(),
            id: "apple".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate id `apple` for language `en`");
    }

    #[test]
    fn test_rule_error_messages() {
        assert_eq!(RuleError::NotAMap.to_string(), "`rules` field should be a map");
        assert_eq!(
            RuleError::InvalidArgumentIndex("-".to_string()).to_string(),
            "invalid argument index `-`"
        );
    }
}
