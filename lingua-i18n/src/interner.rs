//! Tag Interner
//!
//! Keeps exactly one [`LangTag`] per canonical name so tags handed out by the
//! catalog and by message directories can be shared and compared cheaply.

use crate::{LangTag, Result, Subtags};
use lingua_log::trace;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache from canonical name to the shared tag instance.
#[derive(Debug)]
pub struct TagInterner {
    subtags: Arc<Subtags>,
    tags: Mutex<HashMap<String, Arc<LangTag>>>,
}

impl TagInterner {
    /// Create an empty interner validating against `subtags`.
    pub fn new(subtags: Arc<Subtags>) -> Self {
        Self {
            subtags,
            tags: Mutex::new(HashMap::new()),
        }
    }

    /// Return the shared tag for `text`, parsing it on first use.
    ///
    /// The lock is held across the parse so concurrent first lookups of the
    /// same tag never build two instances.
    pub fn intern(&self, text: &str) -> Result<Arc<LangTag>> {
        let mut tags = self.tags.lock();
        if let Some(tag) = tags.get(text) {
            return Ok(Arc::clone(tag));
        }

        let parsed = LangTag::parse(text, &self.subtags)?;
        let tag = tags
            .entry(parsed.name().to_string())
            .or_insert_with(|| {
                trace!("Interned language tag {}", parsed.name());
                Arc::new(parsed)
            });
        Ok(Arc::clone(tag))
    }

    /// Intern an already parsed tag, returning the shared instance.
    pub fn intern_tag(&self, tag: &LangTag) -> Arc<LangTag> {
        let mut tags = self.tags.lock();
        Arc::clone(
            tags.entry(tag.name().to_string())
                .or_insert_with(|| Arc::new(tag.clone())),
        )
    }

    /// Shared tag for a canonical name, if it was interned before.
    pub fn get(&self, name: &str) -> Option<Arc<LangTag>> {
        self.tags.lock().get(name).cloned()
    }

    /// Number of distinct canonical tags.
    pub fn len(&self) -> usize {
        self.tags.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registries used for validation.
    pub fn subtags(&self) -> &Subtags {
        &self.subtags
    }
}
