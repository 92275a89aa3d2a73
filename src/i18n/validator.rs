//! Translation record validation.
//!
//! A record must carry a non-empty id and exactly one of `message` or `rules`.
//! The checks run in a fixed order and stop at the first failure.

use std::path::Path;

use crate::i18n::{LanguageTag, TranslationRecord, ValidationError};

/// Validator for the translation record schema.
pub struct MessageValidator;

impl MessageValidator {
    /// Validate one record.
    ///
    /// # Arguments
    /// * `tag` - Language the record is being loaded for
    /// * `file_path` - Source file of the record (empty for in-memory buffers)
    /// * `record` - The decoded record
    pub fn validate(
        tag: &LanguageTag,
        file_path: &Path,
        record: &TranslationRecord,
    ) -> Result<(), ValidationError> {
        let problem = if record.id.is_empty() {
            Some("message id is not set")
        } else {
            match (&record.message, &record.rules) {
                (None, None) => Some("`message` or `rules` field should be set"),
                (Some(_), Some(_)) => Some("only one of field `message` or `rules` should be set"),
                _ => None,
            }
        };

        match problem {
            Some(message) => Err(Self::error(tag, file_path, &record.id, message)),
            None => Ok(()),
        }
    }

    /// Build a validation error with full diagnostic context.
    pub fn error(
        tag: &LanguageTag,
        file_path: &Path,
        message_id: &str,
        message: impl Into<String>,
    ) -> ValidationError {
        ValidationError {
            tag: tag.clone(),
            file_path: file_path.to_path_buf(),
            message_id: message_id.to_string(),
            message: message.into(),
        }
    }
}
