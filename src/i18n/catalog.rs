//! Message catalog and the builder that fills it.
//!
//! # Invariants
//!
//! 1. **Single writer, many readers**: all writes go through
//!    [`CatalogHandle`], which serializes them behind one lock. Readers only
//!    take the read side, so lookups after loading never block each other.
//!
//! 2. **One id per language**: a [`CatalogBuilder`] refuses a message id it has
//!    already loaded for its language, across every file of that language.
//!
//! 3. **Fail fast**: the first invalid record aborts the builder's load. Entries
//!    submitted before the failure stay in the catalog; the caller discards the
//!    language with [`CatalogHandle::discard_language`].

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::i18n::record::decode_records;
use crate::i18n::{
    CompiledSelector, I18nError, LanguageTag, MessageValidator, RuleCompiler, TranslationRecord,
};

/// What a message id resolves to in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageEntry {
    /// A template rendered as-is.
    Literal(String),
    /// Plural selectors, tried in submission order.
    Selectors(Vec<CompiledSelector>),
}

/// Messages keyed by language and id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    languages: HashMap<LanguageTag, HashMap<String, MessageEntry>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a literal message, replacing any previous entry for the id.
    pub fn set_string(&mut self, tag: &LanguageTag, id: &str, text: impl Into<String>) {
        self.messages_mut(tag)
            .insert(id.to_string(), MessageEntry::Literal(text.into()));
    }

    /// Add a selector to a message.
    ///
    /// Selectors accumulate, so a message compiled into several selectors keeps
    /// all of them. A literal entry for the id is replaced.
    pub fn set_selector(&mut self, tag: &LanguageTag, id: &str, selector: CompiledSelector) {
        let entry = self
            .messages_mut(tag)
            .entry(id.to_string())
            .or_insert_with(|| MessageEntry::Selectors(Vec::new()));

        match entry {
            MessageEntry::Selectors(selectors) => selectors.push(selector),
            MessageEntry::Literal(_) => *entry = MessageEntry::Selectors(vec![selector]),
        }
    }

    pub fn get(&self, tag: &LanguageTag, id: &str) -> Option<&MessageEntry> {
        self.languages.get(tag).and_then(|messages| messages.get(id))
    }

    /// Drop every message of a language. Returns how many were removed.
    pub fn remove_language(&mut self, tag: &LanguageTag) -> usize {
        self.languages.remove(tag).map_or(0, |messages| messages.len())
    }

    pub fn contains_language(&self, tag: &LanguageTag) -> bool {
        self.languages.contains_key(tag)
    }

    /// Message ids of a language, sorted.
    pub fn message_ids(&self, tag: &LanguageTag) -> Vec<String> {
        let mut ids: Vec<String> = self
            .languages
            .get(tag)
            .map(|messages| messages.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    /// Number of messages in a language.
    pub fn len(&self, tag: &LanguageTag) -> usize {
        self.languages.get(tag).map_or(0, HashMap::len)
    }

    fn messages_mut(&mut self, tag: &LanguageTag) -> &mut HashMap<String, MessageEntry> {
        self.languages.entry(tag.clone()).or_default()
    }
}

/// Shared handle to a [`Catalog`].
///
/// Cloning is cheap; every clone refers to the same catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogHandle {
    inner: Arc<RwLock<Catalog>>,
}

impl CatalogHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_string(&self, tag: &LanguageTag, id: &str, text: impl Into<String>) {
        self.write().set_string(tag, id, text);
    }

    pub fn set_selector(&self, tag: &LanguageTag, id: &str, selector: CompiledSelector) {
        self.write().set_selector(tag, id, selector);
    }

    /// Run `f` against the catalog under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Catalog) -> R) -> R {
        f(&self.read_guard())
    }

    /// Clone the entry for `(tag, id)`.
    pub fn lookup(&self, tag: &LanguageTag, id: &str) -> Option<MessageEntry> {
        self.read(|catalog| catalog.get(tag, id).cloned())
    }

    pub fn contains_language(&self, tag: &LanguageTag) -> bool {
        self.read(|catalog| catalog.contains_language(tag))
    }

    pub fn message_ids(&self, tag: &LanguageTag) -> Vec<String> {
        self.read(|catalog| catalog.message_ids(tag))
    }

    /// Remove a language entirely, e.g. after its load failed.
    pub fn discard_language(&self, tag: &LanguageTag) -> usize {
        self.write().remove_language(tag)
    }

    // A panic while holding the lock cannot leave a half-applied insert, so
    // poisoning is ignored.
    fn read_guard(&self) -> RwLockReadGuard<'_, Catalog> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Loads validated records of one language into a catalog.
#[derive(Debug)]
pub struct CatalogBuilder {
    tag: LanguageTag,
    catalog: CatalogHandle,
    seen: HashSet<String>,
    selectors: usize,
}

impl CatalogBuilder {
    pub fn new(tag: LanguageTag, catalog: CatalogHandle) -> Self {
        Self {
            tag,
            catalog,
            seen: HashSet::new(),
            selectors: 0,
        }
    }

    pub fn tag(&self) -> &LanguageTag {
        &self.tag
    }

    /// Decode a translation source and load its records.
    ///
    /// `file_path` is only used for diagnostics; pass an empty path for
    /// in-memory buffers.
    pub fn load_bytes(&mut self, file_path: &Path, bytes: &[u8]) -> Result<usize, I18nError> {
        let records = decode_records(bytes).map_err(|source| I18nError::Decode {
            tag: self.tag.clone(),
            path: file_path.to_path_buf(),
            source,
        })?;
        self.load(file_path, &records)
    }

    /// Load records in order, stopping at the first failure.
    ///
    /// # Returns
    /// The number of messages loaded by this call.
    pub fn load(
        &mut self,
        file_path: &Path,
        records: &[TranslationRecord],
    ) -> Result<usize, I18nError> {
        for record in records {
            self.load_record(file_path, record)?;
        }

        debug!(
            "Loaded {} messages for {} from {}",
            records.len(),
            self.tag,
            file_path.display()
        );
        Ok(records.len())
    }

    fn load_record(&mut self, file_path: &Path, record: &TranslationRecord) -> Result<(), I18nError> {
        MessageValidator::validate(&self.tag, file_path, record)?;

        if !self.seen.insert(record.id.clone()) {
            return Err(I18nError::DuplicateMessage {
                tag: self.tag.clone(),
                id: record.id.clone(),
            });
        }

        if let Some(text) = &record.message {
            self.catalog.set_string(&self.tag, &record.id, text.as_str());
        } else if let Some(rules) = &record.rules {
            let selectors = RuleCompiler::compile(rules).map_err(|err| {
                MessageValidator::error(&self.tag, file_path, &record.id, err.to_string())
            })?;
            for selector in selectors {
                self.catalog.set_selector(&self.tag, &record.id, selector);
                self.selectors += 1;
            }
        }
        Ok(())
    }

    /// Number of distinct messages loaded so far.
    pub fn message_count(&self) -> usize {
        self.seen.len()
    }

    /// Number of selectors compiled so far.
    pub fn selector_count(&self) -> usize {
        self.selectors
    }
}
