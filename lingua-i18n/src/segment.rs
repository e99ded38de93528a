//! Segment
//!
//! The message tree of one language variant, read from and written to a
//! `<tag><suffix>` file.

use crate::section::{Document, Node, Section};
use crate::{I18nError, LangItem, LangTag, LangTags, Result};
use lingua_log::debug;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

/// A [`Section`] tree rooted at a language tag.
///
/// Dereferences to the root section, so `segment.lookup("login")` and
/// `segment.get("title")` work directly.
#[derive(Debug)]
pub struct Segment {
    root: Section,
    tag: Arc<LangTag>,
    lang: Arc<LangItem>,
}

impl Segment {
    /// An empty segment for `tag`.
    ///
    /// `lang` is the catalog entry answering for the tag, which may belong
    /// to an ancestor.
    pub fn new(tag: Arc<LangTag>, lang: Arc<LangItem>) -> Self {
        Self {
            root: Section::root(),
            tag,
            lang,
        }
    }

    /// An empty segment for tag text, for bundles that do not exist yet.
    pub fn generate(langtags: &LangTags, tag: &str) -> Result<Self> {
        let tag = langtags.interner().intern(tag)?;
        let lang = langtags.lookup_tag(&tag)?;
        debug!("Generated empty segment for {}", tag);
        Ok(Self::new(tag, lang))
    }

    /// Build a segment from a parsed document.
    pub fn load(langtags: &LangTags, tag: &str, document: Document) -> Result<Self> {
        let segment = Self::generate(langtags, tag)?;
        segment.root.update_all(document);
        Ok(segment)
    }

    /// Build a segment from TOML text.
    pub fn load_from_str(langtags: &LangTags, tag: &str, content: &str) -> Result<Self> {
        let document = Node::parse_document(content, tag)?;
        Self::load(langtags, tag, document)
    }

    /// Read a segment file.
    ///
    /// Without an explicit tag, the file name up to its first `.` is used.
    pub fn load_from_file(
        langtags: &LangTags,
        path: impl AsRef<Path>,
        tag: Option<&str>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let tag = match tag {
            Some(tag) => tag.to_string(),
            None => tag_from_file_name(path)?,
        };
        let content = std::fs::read_to_string(path).map_err(|e| I18nError::io(path, e))?;
        let document = Node::parse_document(&content, &path.display().to_string())?;
        debug!("Loaded segment {} from {}", tag, path.display());
        Self::load(langtags, &tag, document)
    }

    /// Tag the segment is rooted at.
    pub fn langtag(&self) -> &Arc<LangTag> {
        &self.tag
    }

    /// Catalog entry describing the segment's language.
    pub fn lang(&self) -> &Arc<LangItem> {
        &self.lang
    }

    /// `<tag><suffix>`, the file name this segment is stored under.
    pub fn file_name(&self, suffix: &str) -> String {
        format!("{}{}", self.tag.name(), suffix)
    }

    /// Serialize the whole tree as TOML.
    pub fn dump_to_string(&self) -> Result<String> {
        let table = self.root.to_table()?;
        toml::to_string(&table).map_err(|e| I18nError::SerializeError {
            origin: self.tag.name().to_string(),
            reason: e.to_string(),
        })
    }

    /// Write the tree to `path`, replacing any existing file.
    pub fn dump_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.dump_to_string()?;
        std::fs::write(path, content).map_err(|e| I18nError::io(path, e))?;
        debug!("Wrote segment {} to {}", self.tag, path.display());
        Ok(())
    }
}

impl Deref for Segment {
    type Target = Section;

    fn deref(&self) -> &Section {
        &self.root
    }
}

fn tag_from_file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .ok_or_else(|| I18nError::MalformedTag {
            tag: path.display().to_string(),
            reason: "file name does not start with a language tag".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Value;
    use crate::{Subtags, TagInterner};

    const SEGMENT: &str = r#"
        [section1]
        key1 = "value1"

        [section2.section3]
        key2 = "value2"
        key3 = "value3"

        [section2.section3.section4]
        key4 = "value4"

        [render]
        key = "value: {value}"

        [login]
        username = "Username: {username}"
        password = "Password: {password}"
    "#;

    fn langtags() -> LangTags {
        let interner = Arc::new(TagInterner::new(Arc::new(Subtags::embedded())));
        LangTags::embedded(interner).unwrap()
    }

    #[test]
    fn test_nested_lookup() {
        let segment = Segment::load_from_str(&langtags(), "en", SEGMENT).unwrap();

        assert_eq!(segment.lookup("section1").get("key1").unwrap(), Value::from("value1"));

        let section3 = segment.lookup("section2.section3");
        assert_eq!(section3.title(), ".section2.section3");
        assert_eq!(section3.get("key2").unwrap(), Value::from("value2"));
        assert_eq!(section3.get("key3").unwrap(), Value::from("value3"));
        assert_eq!(
            section3.search("section4").get("key4").unwrap(),
            Value::from("value4")
        );
    }

    #[test]
    fn test_render() {
        let segment = Segment::load_from_str(&langtags(), "en", SEGMENT).unwrap();

        let rendered = segment.lookup("render").render(&[("value", "test")]).unwrap();
        assert_eq!(rendered["key"], "value: test");

        let login = segment
            .lookup("login")
            .render(&[("username", "test"), ("password", "1234")])
            .unwrap();
        assert_eq!(login["username"], "Username: test");
        assert_eq!(login["password"], "Password: 1234");
    }

    #[test]
    fn test_tag_and_lang() {
        let segment = Segment::load_from_str(&langtags(), "zh_hans_sg", SEGMENT).unwrap();
        assert_eq!(segment.langtag().name(), "zh-Hans-SG");
        // zh-Hans-SG is an alias of zh-Hans.
        assert_eq!(segment.lang().tag().name(), "zh-Hans");
        assert_eq!(segment.file_name(".toml"), "zh-Hans-SG.toml");
    }

    #[test]
    fn test_generate_is_empty() {
        let segment = Segment::generate(&langtags(), "fr-CA").unwrap();
        assert!(segment.is_empty());
        assert_eq!(segment.dump_to_string().unwrap().trim(), "");
    }

    #[test]
    fn test_generate_unknown_language_fails() {
        assert!(Segment::generate(&langtags(), "xx").is_err());
        assert!(
            Segment::generate(&langtags(), "aa")
                .unwrap_err()
                .is_lookup_miss()
        );
    }

    #[test]
    fn test_dump_and_reload() {
        let langtags = langtags();
        let segment = Segment::load_from_str(&langtags, "en", SEGMENT).unwrap();
        let text = segment.dump_to_string().unwrap();
        let reloaded = Segment::load_from_str(&langtags, "en", &text).unwrap();

        assert_eq!(segment.to_table().unwrap(), reloaded.to_table().unwrap());
        assert_eq!(
            reloaded.lookup("section2.section3.section4").get("key4").unwrap(),
            Value::from("value4")
        );
    }

    #[test]
    fn test_tag_from_file_name() {
        assert_eq!(tag_from_file_name(Path::new("dir/zh-Hans.toml")).unwrap(), "zh-Hans");
        assert_eq!(tag_from_file_name(Path::new("en.msg.toml")).unwrap(), "en");
        assert!(tag_from_file_name(Path::new(".toml")).is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = Segment::load_from_str(&langtags(), "en", "[broken").unwrap_err();
        assert!(matches!(err, I18nError::ParseError { .. }));
    }
}
