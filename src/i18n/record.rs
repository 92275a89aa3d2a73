//! Translation record schema.
//!
//! Sources are JSON, either a bare array of records or an object wrapping the
//! array under `messages`:
//!
//! ```json
//! [
//!   { "id": "apple", "message": "Apple" },
//!   { "id": "apples", "rules": { "one": "%d apple", "other": "%d apples" } }
//! ]
//! ```
//!
//! The `rules` value is decoded straight into [`RawRules`], so the compiler
//! matches on variants instead of inspecting JSON values.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A single translation phrase as written in a source file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TranslationRecord {
    #[serde(default)]
    pub id: String,

    /// Literal text. `text` is accepted for the wrapped source form.
    #[serde(default, alias = "text")]
    pub message: Option<String>,

    #[serde(default)]
    pub rules: Option<RawRules>,
}

/// The `rules` field of a record, in one of its accepted shapes.
///
/// Keys are held in `BTreeMap`s so compilation always visits them in lexical
/// order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawRules {
    /// `{ "one": "...", "plural:few": "..." }`, bound to argument 1.
    Flat(BTreeMap<String, String>),

    /// `{ "2": { "one": "...", "other": "..." } }`, keyed by argument index.
    Indexed(BTreeMap<String, BTreeMap<String, String>>),

    /// Anything else; rejected by the rule compiler with a precise reason.
    Malformed(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct WrappedSource {
    #[serde(default)]
    messages: Vec<TranslationRecord>,
}

/// Decode a translation source into its records, in source order.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<TranslationRecord>, serde_json::Error> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    match bytes.iter().find(|byte| !byte.is_ascii_whitespace()) {
        Some(b'{') => serde_json::from_slice::<WrappedSource>(bytes).map(|source| source.messages),
        _ => serde_json::from_slice(bytes),
    }
}
