//! Message Directory
//!
//! A [`Message`] serves segments from a flat directory of
//! `<tag><suffix>` files. Nothing is read until a tag is asked for; each
//! loaded segment is cached under its own tag and the aliases of its catalog
//! entry.

use crate::{I18nError, LangTag, LangTags, Result, Segment};
use lingua_log::{debug, trace, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Lazily loaded segments of one message directory.
#[derive(Debug)]
pub struct Message {
    base: PathBuf,
    suffix: String,
    langtags: Arc<LangTags>,
    segments: Mutex<HashMap<String, Arc<Segment>>>,
}

impl Message {
    /// Open a message directory. No file is read here.
    pub fn load(base: impl Into<PathBuf>, langtags: Arc<LangTags>, suffix: impl Into<String>) -> Self {
        let base = base.into();
        debug!("Opened message directory {}", base.display());
        Self {
            base,
            suffix: suffix.into(),
            langtags,
            segments: Mutex::new(HashMap::new()),
        }
    }

    /// Directory the segments are read from.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Extension of segment files.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Catalog segments are described by.
    pub fn langtags(&self) -> &Arc<LangTags> {
        &self.langtags
    }

    /// File a segment for `name` is read from.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base.join(format!("{}{}", name, self.suffix))
    }

    /// Best segment for tag text.
    ///
    /// Tries the tag itself, then each tag of its fallback chain. For every
    /// candidate the cache is consulted before the directory. Fails with
    /// [`I18nError::NoSuchLangTag`] when no candidate has a segment.
    pub fn lookup(&self, tag: &str) -> Result<Arc<Segment>> {
        let tag = self.langtags.interner().intern(tag)?;
        self.lookup_tag(&tag)
    }

    /// Best segment for a parsed tag.
    pub fn lookup_tag(&self, tag: &LangTag) -> Result<Arc<Segment>> {
        let mut segments = self.segments.lock();
        let candidates = std::iter::once(tag.name()).chain(tag.iter().map(String::as_str));
        for name in candidates {
            if let Some(segment) = segments.get(name) {
                trace!("Segment cache hit for {}", name);
                return Ok(Arc::clone(segment));
            }

            let path = self.path_for(name);
            if !path.is_file() {
                continue;
            }
            let segment = Arc::new(Segment::load_from_file(&self.langtags, &path, Some(name))?);
            if name != tag.name() {
                debug!("Message lookup for {} fell back to {}", tag, name);
            }
            register(&mut segments, &segment);
            return Ok(segment);
        }
        Err(I18nError::NoSuchLangTag(tag.name().to_string()))
    }

    /// True when `tag` already resolved to a cached segment.
    ///
    /// The directory is not consulted.
    pub fn contains(&self, tag: &str) -> bool {
        self.langtags
            .interner()
            .intern(tag)
            .map(|tag| self.segments.lock().contains_key(tag.name()))
            .unwrap_or(false)
    }

    /// Add a segment built elsewhere, e.g. by [`Segment::generate`].
    ///
    /// Replaces any segment cached under the segment's own tag.
    pub fn insert(&self, segment: Segment) -> Arc<Segment> {
        let segment = Arc::new(segment);
        let mut segments = self.segments.lock();
        segments.insert(segment.langtag().name().to_string(), Arc::clone(&segment));
        register(&mut segments, &segment);
        segment
    }

    /// Load every segment file in the base directory.
    ///
    /// Returns the number of segments read. Cached tags are skipped, and so
    /// are files whose name is not a language tag.
    pub fn preload(&self) -> Result<usize> {
        let entries = std::fs::read_dir(&self.base).map_err(|e| I18nError::io(&self.base, e))?;
        let mut loaded = 0;
        for entry in entries {
            let path = entry.map_err(|e| I18nError::io(&self.base, e))?.path();
            let Some(name) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_suffix(self.suffix.as_str()))
            else {
                continue;
            };
            if !path.is_file() || name.is_empty() {
                continue;
            }

            let tag = match self.langtags.interner().intern(name) {
                Ok(tag) => tag,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            let mut segments = self.segments.lock();
            if segments.contains_key(tag.name()) {
                continue;
            }
            let segment = Arc::new(Segment::load_from_file(&self.langtags, &path, Some(tag.name()))?);
            register(&mut segments, &segment);
            loaded += 1;
        }
        debug!("Preloaded {} segments from {}", loaded, self.base.display());
        Ok(loaded)
    }

    /// Write each distinct cached segment to `<dir>/<tag><suffix>`.
    ///
    /// Returns the written paths, sorted.
    pub fn dump(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| I18nError::io(dir, e))?;

        let mut distinct: HashMap<String, Arc<Segment>> = HashMap::new();
        for segment in self.segments.lock().values() {
            distinct
                .entry(segment.langtag().name().to_string())
                .or_insert_with(|| Arc::clone(segment));
        }

        let mut written = Vec::with_capacity(distinct.len());
        for segment in distinct.values() {
            let path = dir.join(segment.file_name(&self.suffix));
            segment.dump_to_file(&path)?;
            written.push(path);
        }
        written.sort();
        Ok(written)
    }

    /// Cached tags, aliases included, sorted.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.segments.lock().keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Number of cached tags, aliases included.
    pub fn len(&self) -> usize {
        self.segments.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.lock().is_empty()
    }
}

/// Cache a segment under its own tag and its catalog aliases.
///
/// Aliases are only taken from an entry owned by the segment's tag. A segment
/// whose entry was found through fallback belongs to a more specific tag and
/// must not answer for the ancestor's aliases. Existing entries are kept.
fn register(segments: &mut HashMap<String, Arc<Segment>>, segment: &Arc<Segment>) {
    let lang = segment.lang();
    let aliases: &[Arc<LangTag>] = if lang.tag() == segment.langtag() {
        lang.aliases()
    } else {
        &[]
    };
    let names = std::iter::once(segment.langtag()).chain(aliases);
    for tag in names {
        segments
            .entry(tag.name().to_string())
            .or_insert_with(|| Arc::clone(segment));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Subtags, TagInterner};
    use std::fs;

    fn langtags() -> Arc<LangTags> {
        let interner = Arc::new(TagInterner::new(Arc::new(Subtags::embedded())));
        Arc::new(LangTags::embedded(interner).unwrap())
    }

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_reads_nothing() {
        let message = Message::load("/nonexistent/locale", langtags(), ".toml");
        assert!(message.is_empty());
        assert!(!message.contains("en"));
    }

    #[test]
    fn test_lookup_exact_and_fallback() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "zh-Hans.toml", "[greeting]\ntext = \"你好\"\n");

        let message = Message::load(dir.path(), langtags(), ".toml");
        assert!(!message.contains("zh-Hans-CN"));

        let segment = message.lookup("zh_hans_cn").unwrap();
        assert_eq!(segment.langtag().name(), "zh-Hans");
        assert_eq!(segment.lang().tag().name(), "zh-Hans");

        // Only the tag actually loaded is cached, plus catalog aliases.
        assert!(message.contains("zh-Hans"));
        assert!(message.contains("zh-Hans-SG"));
        assert!(!message.contains("zh-Hans-CN"));

        let again = message.lookup("zh-Hans").unwrap();
        assert!(Arc::ptr_eq(&segment, &again));
    }

    #[test]
    fn test_lookup_miss() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en.toml", "title = \"Hello\"\n");

        let message = Message::load(dir.path(), langtags(), ".toml");
        let err = message.lookup("fr-CA").unwrap_err();
        assert!(err.is_lookup_miss());
        assert!(message.is_empty());
    }

    #[test]
    fn test_insert_and_dump() {
        let dir = tempfile::tempdir().unwrap();
        let langtags = langtags();
        let message = Message::load(dir.path(), Arc::clone(&langtags), ".toml");

        let segment = Segment::generate(&langtags, "zh-Hant").unwrap();
        segment.lookup("greeting").set("text", "你好");
        message.insert(segment);
        assert!(message.contains("zh-Hant-MO"));

        let out = tempfile::tempdir().unwrap();
        let written = message.dump(out.path()).unwrap();
        assert_eq!(written, vec![out.path().join("zh-Hant.toml")]);

        let reloaded = Message::load(out.path(), langtags, ".toml");
        let segment = reloaded.lookup("zh-Hant").unwrap();
        assert_eq!(segment.lookup("greeting").render_key("text", &[]).unwrap(), "你好");
    }

    #[test]
    fn test_preload() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en.toml", "title = \"Hello\"\n");
        write(dir.path(), "fr.toml", "title = \"Bonjour\"\n");
        write(dir.path(), "notes.txt", "ignored");

        let message = Message::load(dir.path(), langtags(), ".toml");
        assert_eq!(message.preload().unwrap(), 2);
        assert_eq!(message.tags(), ["en", "fr"]);
        assert_eq!(message.preload().unwrap(), 0);
    }

    #[test]
    fn test_preload_skips_files_that_are_not_tags() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en.toml", "title = \"Hello\"\n");
        write(dir.path(), "README.toml", "title = \"notes\"\n");
        write(dir.path(), "en.backup.toml", "title = \"old\"\n");

        let message = Message::load(dir.path(), langtags(), ".toml");
        assert_eq!(message.preload().unwrap(), 1);
        assert_eq!(message.tags(), ["en"]);
    }

    #[test]
    fn test_fallback_segment_does_not_take_ancestor_aliases() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "zh-Hans.toml", "who = \"zh-Hans\"\n");
        write(dir.path(), "zh-Hans-US.toml", "who = \"zh-Hans-US\"\n");

        let message = Message::load(dir.path(), langtags(), ".toml");
        let us = message.lookup("zh-Hans-US").unwrap();
        assert_eq!(us.langtag().name(), "zh-Hans-US");
        assert_eq!(us.lang().tag().name(), "zh-Hans");
        assert!(!message.contains("zh-Hans-SG"));

        let sg = message.lookup("zh-Hans-SG").unwrap();
        assert_eq!(sg.langtag().name(), "zh-Hans");
        assert_eq!(sg.get("who").unwrap(), crate::Value::from("zh-Hans"));
        assert!(!Arc::ptr_eq(&us, &sg));
    }

    #[test]
    fn test_path_for() {
        let message = Message::load("locale", langtags(), ".msg");
        assert_eq!(message.path_for("en-US"), PathBuf::from("locale/en-US.msg"));
    }
}
