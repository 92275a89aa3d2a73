//! The `I18n` facade: load sessions and printer lookup.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::i18n::source::{LanguageSource, SourceWalker};
use crate::i18n::{
    CatalogBuilder, CatalogHandle, CatalogMetrics, I18nError, LanguageTag, MetricsReport, Printer,
    PrinterRegistry, TagRegistry,
};

/// Translation catalog plus the printers serving it.
///
/// # Example
///
/// ```rust,ignore
/// let mut i18n = I18n::new(Config::new("translations").with_fallback("en".parse()?));
/// i18n.load()?;
///
/// let ru = "ru".parse()?;
/// println!("{}", i18n.printer(&ru).sprintf("apple", &[Arg::Int(5)]));
/// ```
#[derive(Debug)]
pub struct I18n {
    config: Config,
    catalog: CatalogHandle,
    printers: PrinterRegistry,
    metrics: CatalogMetrics,
}

impl I18n {
    pub fn new(config: Config) -> Self {
        Self::with_catalog(config, CatalogHandle::new())
    }

    /// Load into an existing catalog.
    pub fn with_catalog(config: Config, catalog: CatalogHandle) -> Self {
        let printers = PrinterRegistry::new(&config.fallback, catalog.clone());
        Self {
            config,
            catalog,
            printers,
            metrics: CatalogMetrics::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the translation tree under the configured source path.
    ///
    /// # Returns
    /// * `Ok(())` once every discovered language is loaded
    /// * `Err(I18nError)` on the first failure; languages loaded before it stay
    ///   available, the failing one is absent from the catalog
    pub fn load(&mut self) -> Result<(), I18nError> {
        let root = self.config.source_path.clone();
        info!("Loading translations from {}", root.display());

        let mut registry = TagRegistry::new();
        let sources = SourceWalker::discover(&root, &mut registry)?;
        self.load_sources(&registry, sources)
    }

    /// Load one in-memory source per language name.
    pub fn load_buffers<I, N, B>(&mut self, buffers: I) -> Result<(), I18nError>
    where
        I: IntoIterator<Item = (N, B)>,
        N: AsRef<str>,
        B: Into<Vec<u8>>,
    {
        let mut registry = TagRegistry::new();
        let sources = SourceWalker::buffers(buffers, &mut registry)?;
        self.load_sources(&registry, sources)
    }

    fn load_sources(
        &mut self,
        registry: &TagRegistry,
        sources: Vec<LanguageSource>,
    ) -> Result<(), I18nError> {
        registry.validate_fallback(&self.config.fallback)?;

        for source in &sources {
            self.load_language(source)?;
        }

        info!(
            "Loaded {} languages (fallback: {})",
            registry.len(),
            self.config.fallback
        );
        Ok(())
    }

    fn load_language(&mut self, source: &LanguageSource) -> Result<(), I18nError> {
        let tag = &source.tag;
        self.printers.unregister(tag);
        let replaced = self.catalog.discard_language(tag);
        if replaced > 0 {
            debug!("Replacing {} existing messages for {}", replaced, tag);
        }

        match self.build_language(source) {
            Ok(builder) => {
                self.printers.register(tag.clone());
                self.metrics.record_language();
                self.metrics.record_messages(builder.message_count());
                self.metrics.record_selectors(builder.selector_count());
                info!("Loaded {} messages for {}", builder.message_count(), tag);
                Ok(())
            }
            Err(err) => {
                self.catalog.discard_language(tag);
                self.printers.unregister(tag);
                self.metrics.record_language_failure();
                warn!("Discarding language {}: {}", tag, err);
                Err(err)
            }
        }
    }

    fn build_language(&self, source: &LanguageSource) -> Result<CatalogBuilder, I18nError> {
        let mut builder = CatalogBuilder::new(source.tag.clone(), self.catalog.clone());
        for file in source.files()? {
            builder.load_bytes(&file.path, &file.bytes)?;
            self.metrics.record_file();
        }
        Ok(builder)
    }

    /// Printer for `tag`, or the fallback printer.
    pub fn printer(&self, tag: &LanguageTag) -> &Printer {
        if !self.printers.is_registered(tag) {
            self.metrics.record_fallback_lookup();
            debug!("No printer for {}, using {}", tag, self.printers.fallback().tag());
        }
        self.printers.printer_for(tag)
    }

    pub fn catalog(&self) -> &CatalogHandle {
        &self.catalog
    }

    /// Languages with a registered printer, sorted by tag.
    pub fn languages(&self) -> Vec<LanguageTag> {
        let mut tags: Vec<LanguageTag> = self.printers.tags().cloned().collect();
        tags.sort_by_key(|tag| tag.to_string());
        tags
    }

    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }

    pub fn source_path(&self) -> &Path {
        &self.config.source_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Arg;

    fn tag(name: &str) -> LanguageTag {
        LanguageTag::parse(name).unwrap()
    }

    fn i18n(fallback: &str) -> I18n {
        let fallback = if fallback.is_empty() {
            LanguageTag::undefined()
        } else {
            tag(fallback)
        };
        I18n::new(Config::new("unused").with_fallback(fallback))
    }

    // ==================== Buffer Load Tests ====================

    #[test]
    fn test_load_buffers_and_render() {
        let mut i18n = i18n("en");
        i18n.load_buffers([
            ("en", r#"[{"id": "apple", "message": "Apple"}]"#),
            ("ru", r#"[{"id": "apple", "message": "Яблоко"}]"#),
        ])
        .unwrap();

        assert_eq!(i18n.printer(&tag("ru")).sprintf("apple", &[]), "Яблоко");
        assert_eq!(i18n.printer(&tag("de")).sprintf("apple", &[]), "Apple");
        assert_eq!(i18n.languages(), vec![tag("en"), tag("ru")]);
    }

    #[test]
    fn test_unknown_fallback_loads_nothing() {
        let mut i18n = i18n("de");
        let result = i18n.load_buffers([("en", r#"[{"id": "apple", "message": "Apple"}]"#)]);

        assert!(matches!(result, Err(I18nError::UnknownFallback { .. })));
        assert!(!i18n.catalog().contains_language(&tag("en")));
        assert!(i18n.languages().is_empty());
    }

    #[test]
    fn test_failed_language_is_discarded() {
        let mut i18n = i18n("");
        let result = i18n.load_buffers([(
            "en",
            r#"[{"id": "apple", "message": "A"}, {"id": "apple", "message": "B"}]"#,
        )]);

        assert!(matches!(result, Err(I18nError::DuplicateMessage { .. })));
        assert!(!i18n.catalog().contains_language(&tag("en")));
        assert!(i18n.printer(&tag("en")).tag().is_undefined());
        assert_eq!(i18n.metrics().languages_failed, 1);
    }

    #[test]
    fn test_reload_replaces_language() {
        let mut i18n = i18n("");
        i18n.load_buffers([("en", r#"[{"id": "old", "message": "Old"}]"#)])
            .unwrap();
        i18n.load_buffers([("en", r#"[{"id": "new", "message": "New"}]"#)])
            .unwrap();

        assert_eq!(i18n.catalog().message_ids(&tag("en")), vec!["new".to_string()]);
        assert_eq!(i18n.printer(&tag("en")).sprintf("old", &[]), "old");
    }

    #[test]
    fn test_failed_reload_falls_back() {
        let mut i18n = i18n("ru");
        i18n.load_buffers([
            ("ru", r#"[{"id": "apple", "message": "Яблоко"}]"#),
            ("en", r#"[{"id": "apple", "message": "Apple"}]"#),
        ])
        .unwrap();

        let result = i18n.load_buffers([
            ("ru", r#"[{"id": "apple", "message": "Яблоко"}]"#),
            (
                "en",
                r#"[{"id": "apple", "message": "A"}, {"id": "apple", "message": "B"}]"#,
            ),
        ]);

        assert!(matches!(result, Err(I18nError::DuplicateMessage { .. })));
        assert!(!i18n.catalog().contains_language(&tag("en")));
        assert_eq!(i18n.languages(), vec![tag("ru")]);

        let printer = i18n.printer(&tag("en"));
        assert_eq!(printer.tag(), &tag("ru"));
        assert_eq!(printer.sprintf("apple", &[]), "Яблоко");
    }

    // ==================== Metrics Tests ====================

    #[test]
    fn test_metrics_after_load() {
        let mut i18n = i18n("en");
        i18n.load_buffers([(
            "en",
            r#"[
                {"id": "apple", "message": "Apple"},
                {"id": "apples", "rules": {"one": "%d apple", "other": "%d apples"}}
            ]"#,
        )])
        .unwrap();

        i18n.printer(&tag("en"));
        i18n.printer(&tag("fr"));

        let report = i18n.metrics();
        assert_eq!(report.languages_loaded, 1);
        assert_eq!(report.files_loaded, 1);
        assert_eq!(report.messages_loaded, 2);
        assert_eq!(report.selectors_compiled, 1);
        assert_eq!(report.fallback_lookups, 1);
    }

    #[test]
    fn test_render_plural_after_load() {
        let mut i18n = i18n("");
        i18n.load_buffers([(
            "en",
            r#"{"messages": [{"id": "apples", "rules": {"plural:one": "%d apple", "plural:other": "%d apples"}}]}"#,
        )])
        .unwrap();

        let printer = i18n.printer(&tag("en"));
        assert_eq!(printer.sprintf("apples", &[Arg::Int(1)]), "1 apple");
        assert_eq!(printer.sprintf("apples", &[Arg::Int(3)]), "3 apples");
    }
}
