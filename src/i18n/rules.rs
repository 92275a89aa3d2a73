//! Rule compilation: turns a record's `rules` into argument-bound selectors.
//!
//! Accepted shapes:
//!
//! - flat: `{ "=0": "none", "one": "one apple", "plural:many": "%d apples" }`,
//!   bound to argument 1;
//! - indexed: `{ "2": { "one": "...", "other": "..." } }`, one selector per
//!   1-based argument index.
//!
//! A single `rules` map must use one shape. Keys are compiled in lexical order,
//! so the output is deterministic.

use std::collections::BTreeMap;

use tracing::warn;

use crate::i18n::plural::{PluralCategory, PluralRule};
use crate::i18n::{Arg, RawRules, RuleError};

/// Prefix that may be put in front of a category name.
const PLURAL_PREFIX: &str = "plural:";

/// Argument used by flat rules.
const IMPLICIT_ARGUMENT: usize = 1;

/// How a case key is matched against a numeric argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseMatcher {
    /// `=N`
    Exact(i64),
    /// `<N`
    LessThan(i64),
    Category(PluralCategory),
    /// Unrecognized key, kept verbatim; never matches.
    Unknown,
}

impl CaseMatcher {
    fn parse(key: &str) -> Self {
        if let Some(value) = key.strip_prefix('=').and_then(|v| v.parse().ok()) {
            return CaseMatcher::Exact(value);
        }
        if let Some(value) = key.strip_prefix('<').and_then(|v| v.parse().ok()) {
            return CaseMatcher::LessThan(value);
        }
        PluralCategory::from_name(key)
            .map(CaseMatcher::Category)
            .unwrap_or(CaseMatcher::Unknown)
    }
}

/// One `(category, template)` pair of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub category: String,
    pub template: String,
    matcher: CaseMatcher,
}

impl Case {
    pub fn new(category: impl Into<String>, template: impl Into<String>) -> Self {
        let category = category.into();
        let matcher = CaseMatcher::parse(&category);
        Self {
            category,
            template: template.into(),
            matcher,
        }
    }

    /// Whether this key names a known plural case.
    pub fn is_recognized(&self) -> bool {
        self.matcher != CaseMatcher::Unknown
    }

    fn matches(&self, value: Option<i64>, category: PluralCategory) -> bool {
        match self.matcher {
            CaseMatcher::Exact(n) => value == Some(n),
            CaseMatcher::LessThan(n) => value.map_or(false, |v| v < n),
            CaseMatcher::Category(c) => c == category,
            CaseMatcher::Unknown => false,
        }
    }
}

/// Plural cases bound to one positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSelector {
    /// 1-based index into the render arguments.
    pub argument_index: usize,
    pub cases: Vec<Case>,
}

impl CompiledSelector {
    /// Pick the template for the given arguments.
    ///
    /// `=N` cases win over everything else. Then `<N` and category cases are
    /// tried in case order, and the `other` case is the default. Returns
    /// `None` when the bound argument is missing or not numeric, or when no
    /// case applies.
    pub fn select(&self, rule: PluralRule, args: &[Arg]) -> Option<&str> {
        let arg = args.get(self.argument_index.checked_sub(1)?)?;
        let operands = arg.plural_operands()?;
        let category = rule.category(operands);
        let value = arg.as_integer();

        self.cases
            .iter()
            .find(|case| matches!(case.matcher, CaseMatcher::Exact(_)) && case.matches(value, category))
            .or_else(|| self.cases.iter().find(|case| case.matches(value, category)))
            .or_else(|| {
                self.cases
                    .iter()
                    .find(|case| case.matcher == CaseMatcher::Category(PluralCategory::Other))
            })
            .map(|case| case.template.as_str())
    }
}

/// Compiler from raw `rules` values to selectors.
pub struct RuleCompiler;

impl RuleCompiler {
    /// Compile a `rules` value.
    ///
    /// Flat rules produce a single selector for argument 1. Indexed rules
    /// produce one selector per key, in lexical key order.
    pub fn compile(rules: &RawRules) -> Result<Vec<CompiledSelector>, RuleError> {
        match rules {
            RawRules::Flat(cases) => {
                if cases.is_empty() {
                    return Err(RuleError::Empty);
                }
                Ok(vec![CompiledSelector {
                    argument_index: IMPLICIT_ARGUMENT,
                    cases: Self::cases(cases),
                }])
            }
            RawRules::Indexed(selectors) => selectors
                .iter()
                .map(|(key, cases)| {
                    let argument_index = Self::argument_index(key)?;
                    if cases.is_empty() {
                        return Err(RuleError::Empty);
                    }
                    Ok(CompiledSelector {
                        argument_index,
                        cases: Self::cases(cases),
                    })
                })
                .collect(),
            RawRules::Malformed(value) => Err(Self::diagnose(value)),
        }
    }

    fn cases(raw: &BTreeMap<String, String>) -> Vec<Case> {
        raw.iter()
            .map(|(key, template)| {
                let case = Case::new(key.strip_prefix(PLURAL_PREFIX).unwrap_or(key), template);
                if !case.is_recognized() {
                    warn!("Unknown plural case `{}` will never be selected", key);
                }
                case
            })
            .collect()
    }

    fn argument_index(key: &str) -> Result<usize, RuleError> {
        match key.parse::<usize>() {
            Ok(index) if index >= 1 => Ok(index),
            _ => Err(RuleError::InvalidArgumentIndex(key.to_string())),
        }
    }

    /// Explain why a value decoded as neither flat nor indexed rules.
    fn diagnose(value: &serde_json::Value) -> RuleError {
        let Some(map) = value.as_object() else {
            return RuleError::NotAMap;
        };

        if let Some((key, _)) = map.iter().find(|(_, entry)| !Self::is_rule_entry(entry)) {
            return RuleError::InvalidEntry(key.clone());
        }
        RuleError::MixedShapes
    }

    fn is_rule_entry(entry: &serde_json::Value) -> bool {
        match entry {
            serde_json::Value::String(_) => true,
            serde_json::Value::Object(cases) => cases.values().all(|case| case.is_string()),
            _ => false,
        }
    }
}
