//! Load and lookup metrics.
//!
//! Counters accumulate across every load session of one [`I18n`](crate::i18n::I18n)
//! instance, so a reload adds to them instead of starting over.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one catalog instance.
#[derive(Debug, Default)]
pub struct CatalogMetrics {
    /// Number of languages whose load succeeded
    languages_loaded: AtomicUsize,

    /// Number of languages discarded after a failed load
    languages_failed: AtomicUsize,

    /// Number of source files (or buffers) loaded
    files_loaded: AtomicUsize,

    /// Number of messages submitted to the catalog
    messages_loaded: AtomicUsize,

    /// Number of plural selectors compiled
    selectors_compiled: AtomicUsize,

    /// Number of printer lookups answered by the fallback printer
    fallback_lookups: AtomicUsize,
}

impl CatalogMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a language whose load succeeded.
    pub fn record_language(&self) {
        self.languages_loaded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a language discarded after a failed load.
    pub fn record_language_failure(&self) {
        self.languages_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_file(&self) {
        self.files_loaded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_messages(&self, count: usize) {
        self.messages_loaded.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_selectors(&self, count: usize) {
        self.selectors_compiled.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a printer lookup that fell back.
    pub fn record_fallback_lookup(&self) {
        self.fallback_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn languages_loaded(&self) -> usize {
        self.languages_loaded.load(Ordering::Relaxed)
    }

    pub fn languages_failed(&self) -> usize {
        self.languages_failed.load(Ordering::Relaxed)
    }

    pub fn files_loaded(&self) -> usize {
        self.files_loaded.load(Ordering::Relaxed)
    }

    pub fn messages_loaded(&self) -> usize {
        self.messages_loaded.load(Ordering::Relaxed)
    }

    pub fn selectors_compiled(&self) -> usize {
        self.selectors_compiled.load(Ordering::Relaxed)
    }

    pub fn fallback_lookups(&self) -> usize {
        self.fallback_lookups.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let messages = self.messages_loaded();
        let selectors = self.selectors_compiled();
        let selectors_per_message = if messages > 0 {
            selectors as f64 / messages as f64
        } else {
            0.0
        };

        MetricsReport {
            languages_loaded: self.languages_loaded(),
            languages_failed: self.languages_failed(),
            files_loaded: self.files_loaded(),
            messages_loaded: messages,
            selectors_compiled: selectors,
            selectors_per_message,
            fallback_lookups: self.fallback_lookups(),
        }
    }
}

/// Snapshot of [`CatalogMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub languages_loaded: usize,
    pub languages_failed: usize,
    pub files_loaded: usize,
    pub messages_loaded: usize,
    pub selectors_compiled: usize,

    /// Average number of selectors per loaded message (0 when nothing loaded)
    pub selectors_per_message: f64,

    pub fallback_lookups: usize,
}
