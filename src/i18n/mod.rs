//! Message catalog with plural-aware rendering.
//!
//! Translations are loaded per language from JSON sources, validated, and
//! compiled into a shared catalog. Printers then render message ids with
//! positional arguments, picking plural cases by language.
//!
//! # Architecture
//!
//! - `language`: `LanguageTag`, a parsed BCP-47 identifier
//! - `registry`: languages discovered in one load session
//! - `source`: buffer and directory-tree sources
//! - `record`: the translation record schema
//! - `validator`: record schema checks
//! - `rules`: compiles rule maps into plural selectors
//! - `plural`: plural categories per language
//! - `format`: printf-style interpolation
//! - `catalog`: the catalog and its builder
//! - `printer`: per-language renderers and fallback
//! - `loader`: the `I18n` facade tying it together
//! - `metrics`: load and lookup counters
//!
//! # Example
//!
//! ```rust,ignore
//! use phrasebook::{Arg, Config, I18n, LanguageTag};
//!
//! let mut i18n = I18n::new(Config::new("translations").with_fallback("en".parse()?));
//! i18n.load()?;
//!
//! let ru: LanguageTag = "ru".parse()?;
//! let text = i18n.printer(&ru).sprintf("apple", &[Arg::Int(3)]);
//! ```

mod catalog;
mod error;
pub mod format;
mod language;
mod loader;
mod metrics;
pub mod plural;
mod printer;
pub mod record;
mod registry;
mod rules;
pub mod source;
mod validator;

pub use catalog::{Catalog, CatalogBuilder, CatalogHandle, MessageEntry};
pub use error::{I18nError, RuleError, ValidationError};
pub use format::Arg;
pub use language::LanguageTag;
pub use loader::I18n;
pub use metrics::{CatalogMetrics, MetricsReport};
pub use plural::{PluralCategory, PluralRule};
pub use printer::{Printer, PrinterRegistry};
pub use record::{RawRules, TranslationRecord};
pub use registry::TagRegistry;
pub use rules::{Case, CompiledSelector, RuleCompiler};
pub use source::SourceWalker;
pub use validator::MessageValidator;
