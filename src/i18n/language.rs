//! Language tag: validated BCP-47 language identifier.
//!
//! `LanguageTag` wraps a canonicalized `unic_langid::LanguageIdentifier`, so
//! `"EN-us"` and `"en_US"` compare equal to `"en-US"`. The default value is the
//! undefined tag (`und`), used to mean "no fallback configured".

use std::fmt;
use std::str::FromStr;

use unic_langid::LanguageIdentifier;

use crate::i18n::I18nError;

/// A parsed language tag (e.g. `en`, `ru`, `pt-BR`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LanguageTag {
    id: LanguageIdentifier,
}

impl LanguageTag {
    /// Parse a language name such as `"en"` or `"sr-Latn-RS"`.
    ///
    /// # Returns
    /// * `Ok(LanguageTag)` with the canonical form of the name
    /// * `Err(I18nError::InvalidTag)` if the name is not a language identifier
    pub fn parse(name: &str) -> Result<Self, I18nError> {
        LanguageIdentifier::from_bytes(name.as_bytes())
            .map(|id| Self { id })
            .map_err(|source| I18nError::InvalidTag {
                name: name.to_string(),
                source,
            })
    }

    /// The undefined tag (`und`).
    pub fn undefined() -> Self {
        Self::default()
    }

    /// Whether this is the undefined tag.
    pub fn is_undefined(&self) -> bool {
        self.id == LanguageIdentifier::default()
    }

    /// Primary language subtag, e.g. `"pt"` for `pt-BR`.
    pub fn language(&self) -> &str {
        self.id.language.as_str()
    }

    /// Region subtag if present, e.g. `Some("BR")` for `pt-BR`.
    pub fn region(&self) -> Option<&str> {
        self.id.region.as_ref().map(|region| region.as_str())
    }
}

impl FromStr for LanguageTag {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
