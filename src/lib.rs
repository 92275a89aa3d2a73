//! Per-language message catalogs with plural-aware printf rendering.

pub mod config;
pub mod i18n;

pub use config::Config;
pub use i18n::{Arg, I18n, I18nError, LanguageTag, Printer};
