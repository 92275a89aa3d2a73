//! Tag registry: the set of languages discovered in one load session.
//!
//! Registration order is preserved so that languages are loaded in a stable,
//! reproducible order. The registry only lives for the duration of a single
//! `load()` call.

use crate::i18n::{I18nError, LanguageTag};

/// Languages registered during one load session.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: Vec<LanguageTag>,
}

impl TagRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw language name and register the resulting tag.
    ///
    /// # Returns
    /// * `Ok(LanguageTag)` with the registered tag
    /// * `Err(I18nError::InvalidTag)` if the name is not a language identifier
    /// * `Err(I18nError::DuplicateTag)` if the tag was already registered
    pub fn register(&mut self, raw_name: &str) -> Result<LanguageTag, I18nError> {
        let tag = LanguageTag::parse(raw_name)?;
        self.insert(tag)
    }

    /// Register an already parsed tag.
    pub fn insert(&mut self, tag: LanguageTag) -> Result<LanguageTag, I18nError> {
        if self.contains(&tag) {
            return Err(I18nError::DuplicateTag { tag });
        }
        self.tags.push(tag.clone());
        Ok(tag)
    }

    /// Check that the configured fallback is usable.
    ///
    /// The undefined tag always passes. Any other tag must have been registered,
    /// so call this only after every language of the session is registered.
    pub fn validate_fallback(&self, tag: &LanguageTag) -> Result<(), I18nError> {
        if tag.is_undefined() || self.contains(tag) {
            return Ok(());
        }
        Err(I18nError::UnknownFallback { tag: tag.clone() })
    }

    /// Position of a tag in registration order.
    pub fn position(&self, tag: &LanguageTag) -> Option<usize> {
        self.tags.iter().position(|registered| registered == tag)
    }

    /// Whether a tag has been registered.
    pub fn contains(&self, tag: &LanguageTag) -> bool {
        self.position(tag).is_some()
    }

    /// Registered tags, in registration order.
    pub fn tags(&self) -> &[LanguageTag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tag(name: &str) -> LanguageTag {
        LanguageTag::parse(name).unwrap()
    }

    fn registry_of(names: &[&str]) -> TagRegistry {
        let mut registry = TagRegistry::new();
        for name in names {
            registry.register(name).unwrap();
        }
        registry
    }

    // ==================== Register Tests ====================

    #[test]
    fn test_register_successfully() {
        let mut registry = TagRegistry::new();
        assert!(registry.register("ru").is_ok());
        assert!(registry.register("en").is_ok());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_preserves_order() {
        let registry = registry_of(&["ru", "en", "de"]);
        assert_eq!(registry.tags(), &[tag("ru"), tag("en"), tag("de")]);
    }

    #[test]
    fn test_register_wrong_name() {
        let mut registry = TagRegistry::new();
        let result = registry.register("-");
        assert!(matches!(result, Err(I18nError::InvalidTag { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_duplicate_tag() {
        let mut registry = TagRegistry::new();
        registry.register("ru").unwrap();
        registry.register("en").unwrap();

        let result = registry.register("ru");
        match result {
            Err(I18nError::DuplicateTag { tag: duplicate }) => assert_eq!(duplicate, tag("ru")),
            other => panic!("expected DuplicateTag, got {:?}", other),
        }
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_duplicate_after_canonicalization() {
        let mut registry = TagRegistry::new();
        registry.register("en-us").unwrap();
        assert!(registry.register("EN_US").is_err());
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_position_existing() {
        let registry = registry_of(&["en", "ru"]);
        assert_eq!(registry.position(&tag("ru")), Some(1));
        assert!(registry.contains(&tag("ru")));
    }

    #[test]
    fn test_position_missing() {
        let registry = registry_of(&["en", "ru"]);
        assert_eq!(registry.position(&tag("de")), None);
        assert!(!registry.contains(&tag("de")));
    }

    // ==================== Fallback Tests ====================

    #[test]
    fn test_fallback_registered() {
        let registry = registry_of(&["en", "ru"]);
        assert!(registry.validate_fallback(&tag("en")).is_ok());
    }

    #[test]
    fn test_fallback_undefined() {
        let registry = registry_of(&["en", "ru"]);
        assert!(registry.validate_fallback(&LanguageTag::undefined()).is_ok());
    }

    #[test]
    fn test_fallback_undefined_on_empty_registry() {
        let registry = TagRegistry::new();
        assert!(registry.validate_fallback(&LanguageTag::undefined()).is_ok());
    }

    #[test]
    fn test_fallback_not_registered() {
        let registry = registry_of(&["en", "ru"]);
        let result = registry.validate_fallback(&tag("de"));
        assert!(matches!(result, Err(I18nError::UnknownFallback { .. })));
    }

    // ==================== Property Tests ====================

    const POOL: &[&str] = &["en", "ru", "de", "fr", "es", "pt-BR", "zh-Hant", "uk", "pl", "ja"];

    proptest! {
        #[test]
        fn distinct_tags_register_in_any_order(names in Just(POOL.to_vec()).prop_shuffle()) {
            let mut registry = TagRegistry::new();
            for name in &names {
                prop_assert!(registry.register(name).is_ok());
            }
            prop_assert_eq!(registry.len(), POOL.len());
        }

        #[test]
        fn second_registration_always_fails(
            names in Just(POOL.to_vec()).prop_shuffle(),
            pick in 0..POOL.len(),
        ) {
            let mut registry = TagRegistry::new();
            for name in &names {
                registry.register(name).unwrap();
            }
            let is_duplicate = matches!(
                registry.register(POOL[pick]),
                Err(I18nError::DuplicateTag { .. })
            );
            prop_assert!(is_duplicate);
            prop_assert_eq!(registry.len(), POOL.len());
        }
    }
}
