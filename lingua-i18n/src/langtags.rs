//! Language Tag Catalog
//!
//! A curated table of language tags with a description, a localized
//! "recognition" label, and alias tags answered by the same entry.
//!
//! ```toml
//! [zh-Hans]
//! description = "simplified Chinese"
//! recognition = "简体中文"
//! aliases = ["zh-Hans-SG"]
//! ```
//!
//! Lookups accept any valid tag and walk its fallback chain until an entry
//! answers, so `zh-Hans-US` resolves to the `zh-Hans` entry.

use crate::subtags::Subtag;
use crate::{I18nError, LangTag, Result, TagInterner};
use lingua_log::debug;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

const LANGTAGS: &str = include_str!("../data/langtags.toml");

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangItem {
    tag: Arc<LangTag>,
    aliases: Vec<Arc<LangTag>>,
    description: String,
    recognition: String,
}

impl LangItem {
    /// The entry's own tag.
    pub fn tag(&self) -> &Arc<LangTag> {
        &self.tag
    }

    /// Tags that resolve to this entry besides its own.
    pub fn aliases(&self) -> &[Arc<LangTag>] {
        &self.aliases
    }

    /// English description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Label a speaker of the language recognizes, e.g. `简体中文`.
    pub fn recognition(&self) -> &str {
        &self.recognition
    }

    /// True when `name` is this entry's tag or one of its aliases.
    pub fn answers(&self, name: &str) -> bool {
        self.tag.name() == name || self.aliases.iter().any(|alias| alias.name() == name)
    }
}

/// One record of catalog source data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogRecord {
    pub description: Option<String>,
    pub recognition: Option<String>,
    pub aliases: Vec<String>,
}

/// Index from tag names to catalog entries.
#[derive(Debug)]
pub struct LangTags {
    interner: Arc<TagInterner>,
    index: HashMap<String, Arc<LangItem>>,
    order: Vec<Arc<LangTag>>,
}

impl LangTags {
    /// Build the bundled catalog.
    pub fn embedded(interner: Arc<TagInterner>) -> Result<Self> {
        Self::from_toml_str(LANGTAGS, interner)
    }

    /// Build from a catalog file.
    pub fn from_file(path: impl AsRef<Path>, interner: Arc<TagInterner>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| I18nError::io(path, e))?;
        Self::from_toml_str(&content, interner)
    }

    /// Build from catalog TOML text.
    pub fn from_toml_str(content: &str, interner: Arc<TagInterner>) -> Result<Self> {
        let records: HashMap<String, CatalogRecord> =
            toml::from_str(content).map_err(|e| I18nError::ParseError {
                origin: "language tag catalog".to_string(),
                reason: e.to_string(),
            })?;
        Self::from_records(records, interner)
    }

    /// Build from records keyed by primary tag text.
    ///
    /// Records are processed from least to most specific tag, so a record
    /// without a recognition label always sees its ancestors' labels no
    /// matter the source order. Two records claiming the same tag, as
    /// primary or alias, are rejected.
    pub fn from_records(
        records: impl IntoIterator<Item = (String, CatalogRecord)>,
        interner: Arc<TagInterner>,
    ) -> Result<Self> {
        let mut parsed = Vec::new();
        let mut primaries: HashMap<String, String> = HashMap::new();
        for (text, record) in records {
            let tag = interner.intern(&text)?;
            if let Some(first) = primaries.insert(tag.name().to_string(), text.clone()) {
                return Err(I18nError::CatalogConflict {
                    tag: tag.name().to_string(),
                    first,
                    second: text,
                });
            }
            parsed.push((tag, record));
        }
        parsed.sort_by(|(a, _), (b, _)| {
            a.specificity()
                .cmp(&b.specificity())
                .then_with(|| a.name().cmp(b.name()))
        });

        let mut catalog = Self {
            interner,
            index: HashMap::new(),
            order: Vec::new(),
        };
        let mut claimed: HashSet<String> = HashSet::new();

        for (tag, record) in parsed {
            let recognition = match record.recognition.filter(|r| !r.is_empty()) {
                Some(recognition) => recognition,
                None => catalog
                    .inherited_recognition(&tag)
                    .unwrap_or_else(|| tag.language().name().to_string()),
            };
            let description = record
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| tag.language().name().to_string());

            let mut aliases = Vec::with_capacity(record.aliases.len());
            for text in &record.aliases {
                let alias = catalog.interner.intern(text)?;
                if alias == tag || aliases.contains(&alias) {
                    continue;
                }
                if let Some(owner) = primaries.get(alias.name()) {
                    return Err(I18nError::CatalogConflict {
                        tag: alias.name().to_string(),
                        first: owner.clone(),
                        second: format!("alias of {}", tag),
                    });
                }
                if !claimed.insert(alias.name().to_string()) {
                    let first = catalog
                        .index
                        .get(alias.name())
                        .map(|item| format!("alias of {}", item.tag))
                        .unwrap_or_default();
                    return Err(I18nError::CatalogConflict {
                        tag: alias.name().to_string(),
                        first,
                        second: format!("alias of {}", tag),
                    });
                }
                aliases.push(alias);
            }

            let item = Arc::new(LangItem {
                tag: Arc::clone(&tag),
                aliases,
                description,
                recognition,
            });
            catalog.register(&tag, &item);
            for alias in &item.aliases {
                catalog.register(alias, &item);
            }
        }

        debug!(
            "Built language tag catalog with {} tags",
            catalog.order.len()
        );
        Ok(catalog)
    }

    fn register(&mut self, tag: &Arc<LangTag>, item: &Arc<LangItem>) {
        if !self.index.contains_key(tag.name()) {
            self.index.insert(tag.name().to_string(), Arc::clone(item));
            self.order.push(Arc::clone(tag));
        }
    }

    fn inherited_recognition(&self, tag: &LangTag) -> Option<String> {
        tag.iter()
            .find_map(|name| self.index.get(name))
            .map(|item| item.recognition.clone())
    }

    /// Best entry for tag text.
    ///
    /// Fails with [`I18nError::NoSuchLangTag`] when neither the tag nor any
    /// tag in its fallback chain has an entry.
    pub fn lookup(&self, tag: &str) -> Result<Arc<LangItem>> {
        let tag = self.interner.intern(tag)?;
        self.lookup_tag(&tag)
    }

    /// Best entry for a parsed tag.
    pub fn lookup_tag(&self, tag: &LangTag) -> Result<Arc<LangItem>> {
        if let Some(item) = self.index.get(tag.name()) {
            return Ok(Arc::clone(item));
        }
        for name in tag {
            if let Some(item) = self.index.get(name) {
                debug!("Catalog lookup for {} fell back to {}", tag, name);
                return Ok(Arc::clone(item));
            }
        }
        Err(I18nError::NoSuchLangTag(tag.name().to_string()))
    }

    /// True when `tag` has an entry of its own (no fallback).
    pub fn contains(&self, tag: &str) -> bool {
        self.interner
            .intern(tag)
            .map(|tag| self.index.contains_key(tag.name()))
            .unwrap_or(false)
    }

    /// Registered tags, primary and alias, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &Arc<LangTag>> {
        self.order.iter()
    }

    /// Distinct entries in registration order.
    pub fn items(&self) -> impl Iterator<Item = &Arc<LangItem>> {
        self.order.iter().filter_map(|tag| {
            self.index
                .get(tag.name())
                .filter(|item| item.tag == *tag)
        })
    }

    /// Number of registered tags, aliases included.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Interner the catalog resolves tag text with.
    pub fn interner(&self) -> &Arc<TagInterner> {
        &self.interner
    }
}
