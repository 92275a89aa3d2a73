//! CLDR plural categories for cardinal numbers.
//!
//! Each language is mapped to a rule family; the family decides the category
//! of a number from its integer part and whether it has visible fraction
//! digits. Unknown languages use the English `one`/`other` split.

use crate::i18n::LanguageTag;

/// A CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// Category name as used in rule keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }

    /// Parse a category name. Case-sensitive, like CLDR keywords.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "zero" => Some(PluralCategory::Zero),
            "one" => Some(PluralCategory::One),
            "two" => Some(PluralCategory::Two),
            "few" => Some(PluralCategory::Few),
            "many" => Some(PluralCategory::Many),
            "other" => Some(PluralCategory::Other),
            _ => None,
        }
    }
}

/// The parts of a number that plural rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluralOperands {
    /// Absolute integer part.
    pub integer: u64,
    /// Whether the number has non-zero fraction digits.
    pub fractional: bool,
}

impl PluralOperands {
    pub fn from_int(value: i64) -> Self {
        Self {
            integer: value.unsigned_abs(),
            fractional: false,
        }
    }

    /// `None` for NaN and infinities.
    pub fn from_float(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let abs = value.abs();
        Some(Self {
            integer: abs.trunc() as u64,
            fractional: abs.fract() != 0.0,
        })
    }

    fn whole(&self) -> Option<u64> {
        (!self.fractional).then_some(self.integer)
    }
}

/// Plural rule families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// ja, zh, ko, vi, th, id, ms, ...: everything is `other`.
    NoPlural,
    /// en, de, es, it, ...: `one` for exactly 1.
    OneOther,
    /// fr, pt (except pt-PT), hy: `one` for 0 and 1 (including fractions).
    ZeroOneIntegral,
    /// hi, bn, fa, am, zu, ...: `one` for integer part 0 or exactly 1.
    ZeroOrOne,
    /// ru, uk, be
    EastSlavic,
    /// sr, hr, bs, sh
    SerboCroatian,
    /// pl
    Polish,
    /// cs, sk
    CzechSlovak,
    /// sl
    Slovenian,
    /// lt
    Lithuanian,
    /// lv
    Latvian,
    /// ro, mo
    Romanian,
    /// he, iw
    Hebrew,
    /// ar
    Arabic,
    /// ga
    Irish,
    /// cy
    Welsh,
}

impl PluralRule {
    /// Rule family for a language tag.
    ///
    /// The undefined tag has no plural forms, so every number is `other`.
    pub fn for_tag(tag: &LanguageTag) -> Self {
        if tag.is_undefined() {
            return PluralRule::NoPlural;
        }

        match tag.language() {
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "lo" | "my" | "km" | "jv" | "yo"
            | "ig" | "bo" | "dz" => PluralRule::NoPlural,
            "fr" | "hy" | "ff" | "kab" => PluralRule::ZeroOneIntegral,
            "pt" if tag.region() == Some("PT") => PluralRule::OneOther,
            "pt" => PluralRule::ZeroOneIntegral,
            "hi" | "bn" | "fa" | "am" | "zu" | "gu" | "kn" | "as" => PluralRule::ZeroOrOne,
            "ru" | "uk" | "be" => PluralRule::EastSlavic,
            "sr" | "hr" | "bs" | "sh" => PluralRule::SerboCroatian,
            "pl" => PluralRule::Polish,
            "cs" | "sk" => PluralRule::CzechSlovak,
            "sl" => PluralRule::Slovenian,
            "lt" => PluralRule::Lithuanian,
            "lv" => PluralRule::Latvian,
            "ro" | "mo" => PluralRule::Romanian,
            "he" | "iw" => PluralRule::Hebrew,
            "ar" => PluralRule::Arabic,
            "ga" => PluralRule::Irish,
            "cy" => PluralRule::Welsh,
            _ => PluralRule::OneOther,
        }
    }

    /// Category of a whole number.
    pub fn categorize(&self, value: i64) -> PluralCategory {
        self.category(PluralOperands::from_int(value))
    }

    /// Category of a number given its operands.
    pub fn category(&self, operands: PluralOperands) -> PluralCategory {
        use PluralCategory::*;

        let i = operands.integer;
        let (i10, i100) = (i % 10, i % 100);

        match (self, operands.whole()) {
            (PluralRule::NoPlural, _) => Other,

            (PluralRule::OneOther, Some(1)) => One,
            (PluralRule::OneOther, _) => Other,

            (PluralRule::ZeroOneIntegral, _) if i <= 1 => One,
            (PluralRule::ZeroOneIntegral, _) => Other,

            (PluralRule::ZeroOrOne, _) if i == 0 => One,
            (PluralRule::ZeroOrOne, Some(1)) => One,
            (PluralRule::ZeroOrOne, _) => Other,

            (PluralRule::EastSlavic, None) => Other,
            (PluralRule::EastSlavic, Some(_)) if i10 == 1 && i100 != 11 => One,
            (PluralRule::EastSlavic, Some(_)) if (2..=4).contains(&i10) && !(12..=14).contains(&i100) => Few,
            (PluralRule::EastSlavic, Some(_)) => Many,

            (PluralRule::SerboCroatian, Some(_)) if i10 == 1 && i100 != 11 => One,
            (PluralRule::SerboCroatian, Some(_)) if (2..=4).contains(&i10) && !(12..=14).contains(&i100) => Few,
            (PluralRule::SerboCroatian, _) => Other,

            (PluralRule::Polish, None) => Other,
            (PluralRule::Polish, Some(1)) => One,
            (PluralRule::Polish, Some(_)) if (2..=4).contains(&i10) && !(12..=14).contains(&i100) => Few,
            (PluralRule::Polish, Some(_)) => Many,

            (PluralRule::CzechSlovak, None) => Many,
            (PluralRule::CzechSlovak, Some(1)) => One,
            (PluralRule::CzechSlovak, Some(2..=4)) => Few,
            (PluralRule::CzechSlovak, Some(_)) => Other,

            (PluralRule::Slovenian, None) => Few,
            (PluralRule::Slovenian, Some(_)) if i100 == 1 => One,
            (PluralRule::Slovenian, Some(_)) if i100 == 2 => Two,
            (PluralRule::Slovenian, Some(_)) if (3..=4).contains(&i100) => Few,
            (PluralRule::Slovenian, Some(_)) => Other,

            (PluralRule::Lithuanian, None) => Many,
            (PluralRule::Lithuanian, Some(_)) if (11..=19).contains(&i100) => Other,
            (PluralRule::Lithuanian, Some(_)) if i10 == 1 => One,
            (PluralRule::Lithuanian, Some(_)) if i10 >= 2 => Few,
            (PluralRule::Lithuanian, Some(_)) => Other,

            (PluralRule::Latvian, None) => Other,
            (PluralRule::Latvian, Some(_)) if i10 == 0 || (11..=19).contains(&i100) => Zero,
            (PluralRule::Latvian, Some(_)) if i10 == 1 => One,
            (PluralRule::Latvian, Some(_)) => Other,

            (PluralRule::Romanian, None) => Few,
            (PluralRule::Romanian, Some(1)) => One,
            (PluralRule::Romanian, Some(0)) => Few,
            (PluralRule::Romanian, Some(_)) if (1..=19).contains(&i100) => Few,
            (PluralRule::Romanian, Some(_)) => Other,

            (PluralRule::Hebrew, None) if i == 0 => One,
            (PluralRule::Hebrew, Some(1)) => One,
            (PluralRule::Hebrew, Some(2)) => Two,
            (PluralRule::Hebrew, _) => Other,

            (PluralRule::Arabic, Some(0)) => Zero,
            (PluralRule::Arabic, Some(1)) => One,
            (PluralRule::Arabic, Some(2)) => Two,
            (PluralRule::Arabic, Some(_)) if (3..=10).contains(&i100) => Few,
            (PluralRule::Arabic, Some(_)) if (11..=99).contains(&i100) => Many,
            (PluralRule::Arabic, _) => Other,

            (PluralRule::Irish, Some(1)) => One,
            (PluralRule::Irish, Some(2)) => Two,
            (PluralRule::Irish, Some(3..=6)) => Few,
            (PluralRule::Irish, Some(7..=10)) => Many,
            (PluralRule::Irish, _) => Other,

            (PluralRule::Welsh, Some(0)) => Zero,
            (PluralRule::Welsh, Some(1)) => One,
            (PluralRule::Welsh, Some(2)) => Two,
            (PluralRule::Welsh, Some(3)) => Few,
            (PluralRule::Welsh, Some(6)) => Many,
            (PluralRule::Welsh, _) => Other,
        }
    }
}
