//! Shared Context
//!
//! [`Database`] bundles the registries, the tag interner and the catalog so
//! every tag, catalog entry and message directory built from it agrees on one
//! set of shared instances.

use crate::{I18nConfig, LangTag, LangTags, Message, Result, Subtags, TagInterner};
use lingua_log::{debug, warn};
use once_cell::sync::{Lazy, OnceCell};
use std::path::PathBuf;
use std::sync::Arc;

static GLOBAL: Lazy<Database> = Lazy::new(|| {
    let config = I18nConfig::from_env().unwrap_or_else(|e| {
        warn!("Ignoring language configuration from the environment: {}", e);
        I18nConfig::default()
    });
    Database::new(config)
});

/// Registries, interner and catalog for one configuration.
#[derive(Debug)]
pub struct Database {
    config: I18nConfig,
    interner: Arc<TagInterner>,
    langtags: OnceCell<Arc<LangTags>>,
}

impl Database {
    /// Create an isolated context. Data is read on first use.
    pub fn new(config: I18nConfig) -> Self {
        let subtags = Arc::new(Subtags::from_config(&config));
        Self {
            config,
            interner: Arc::new(TagInterner::new(subtags)),
            langtags: OnceCell::new(),
        }
    }

    /// Process-wide context configured from `LINGUA_*` variables.
    pub fn global() -> &'static Database {
        &GLOBAL
    }

    pub fn config(&self) -> &I18nConfig {
        &self.config
    }

    /// Subtag registries.
    pub fn subtags(&self) -> &Subtags {
        self.interner.subtags()
    }

    /// Tag interner.
    pub fn interner(&self) -> &Arc<TagInterner> {
        &self.interner
    }

    /// Parse and intern tag text.
    pub fn langtag(&self, text: &str) -> Result<Arc<LangTag>> {
        self.interner.intern(text)
    }

    /// Catalog, built on first call.
    ///
    /// A failed build is not cached; the next call tries again.
    pub fn langtags(&self) -> Result<&Arc<LangTags>> {
        self.langtags.get_or_try_init(|| {
            let interner = Arc::clone(&self.interner);
            let langtags = match &self.config.catalog {
                Some(path) => {
                    debug!("Reading language tag catalog from {}", path.display());
                    LangTags::from_file(path, interner)?
                }
                None => LangTags::embedded(interner)?,
            };
            Ok(Arc::new(langtags))
        })
    }

    /// Open a message directory using the configured suffix.
    pub fn open_messages(&self, dir: impl Into<PathBuf>) -> Result<Message> {
        let langtags = Arc::clone(self.langtags()?);
        Ok(Message::load(dir, langtags, self.config.suffix.clone()))
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new(I18nConfig::default())
    }
}
