//! Printers render catalog messages for one language.
//!
//! Fallback is per printer, not per message: a printer registered for `ru`
//! renders an id missing from the `ru` catalog as the id itself, even when the
//! fallback language has it. Only languages without a printer fall back.

use std::collections::HashMap;
use std::io;

use crate::i18n::format::sprintf;
use crate::i18n::plural::PluralRule;
use crate::i18n::{Arg, CatalogHandle, LanguageTag, MessageEntry};

/// Renderer bound to one language.
#[derive(Debug, Clone)]
pub struct Printer {
    tag: LanguageTag,
    rule: PluralRule,
    catalog: CatalogHandle,
}

impl Printer {
    pub fn new(tag: LanguageTag, catalog: CatalogHandle) -> Self {
        let rule = PluralRule::for_tag(&tag);
        Self { tag, rule, catalog }
    }

    /// Printer for the undefined locale.
    pub fn undefined(catalog: CatalogHandle) -> Self {
        Self::new(LanguageTag::undefined(), catalog)
    }

    pub fn tag(&self) -> &LanguageTag {
        &self.tag
    }

    pub fn plural_rule(&self) -> PluralRule {
        self.rule
    }

    /// Render a message with positional arguments.
    ///
    /// Ids without a catalog entry, and selector messages where no case
    /// applies, are rendered using the id itself as the template.
    pub fn sprintf(&self, id: &str, args: &[Arg]) -> String {
        let template = self.template(id, args);
        sprintf(template.as_deref().unwrap_or(id), args)
    }

    /// Render a message into a writer.
    pub fn fprintf<W: io::Write>(&self, writer: &mut W, id: &str, args: &[Arg]) -> io::Result<()> {
        writer.write_all(self.sprintf(id, args).as_bytes())
    }

    /// Resolve the template for `id`, if the catalog has one that applies.
    pub fn template(&self, id: &str, args: &[Arg]) -> Option<String> {
        self.catalog.read(|catalog| match catalog.get(&self.tag, id)? {
            MessageEntry::Literal(text) => Some(text.clone()),
            MessageEntry::Selectors(selectors) => selectors
                .iter()
                .find_map(|selector| selector.select(self.rule, args))
                .map(str::to_owned),
        })
    }
}

/// Printers of every loaded language, plus the fallback printer.
#[derive(Debug, Clone)]
pub struct PrinterRegistry {
    printers: HashMap<LanguageTag, Printer>,
    fallback: Printer,
    catalog: CatalogHandle,
}

impl PrinterRegistry {
    /// Create a registry whose fallback is bound to `fallback`.
    ///
    /// Pass the undefined tag for no fallback language.
    pub fn new(fallback: &LanguageTag, catalog: CatalogHandle) -> Self {
        Self {
            printers: HashMap::new(),
            fallback: Printer::new(fallback.clone(), catalog.clone()),
            catalog,
        }
    }

    /// Register a printer for a successfully loaded language.
    pub fn register(&mut self, tag: LanguageTag) {
        let printer = Printer::new(tag.clone(), self.catalog.clone());
        self.printers.insert(tag, printer);
    }

    /// Drop the printer of a language, so lookups for it fall back.
    pub fn unregister(&mut self, tag: &LanguageTag) -> bool {
        self.printers.remove(tag).is_some()
    }

    /// Printer for `tag`, or the fallback printer if none is registered.
    pub fn printer_for(&self, tag: &LanguageTag) -> &Printer {
        self.printers.get(tag).unwrap_or(&self.fallback)
    }

    pub fn is_registered(&self, tag: &LanguageTag) -> bool {
        self.printers.contains_key(tag)
    }

    pub fn fallback(&self) -> &Printer {
        &self.fallback
    }

    /// Registered language tags, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &LanguageTag> {
        self.printers.keys()
    }
}
