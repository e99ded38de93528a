//! Language Tags
//!
//! A language tag is `language["-" script]["-" region]`, the subset of BCP 47
//! this crate understands. Every subtag is validated against the
//! [`Subtags`](crate::Subtags) registries, which also supply the canonical
//! casing.

use crate::subtags::{Language, Region, Script, Subtag, Subtags};
use crate::{I18nError, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Separator used in canonical names.
pub const HYPHEN: char = '-';

/// A parsed, validated language tag.
///
/// Equality and hashing use the canonical name only.
///
/// # Examples
///
/// ```
/// use lingua_i18n::{LangTag, Subtags};
///
/// let subtags = Subtags::embedded();
/// let tag = LangTag::parse("zh_hans_cn", &subtags).unwrap();
/// assert_eq!(tag.name(), "zh-Hans-CN");
/// assert_eq!(tag.fallbacks(), ["zh-Hans", "zh-CN", "zh"]);
/// ```
#[derive(Debug, Clone)]
pub struct LangTag {
    name: String,
    language: Arc<Language>,
    script: Option<Arc<Script>>,
    region: Option<Arc<Region>>,
    fallbacks: Vec<String>,
}

impl LangTag {
    /// Parse tag text. `-` and `_` are both accepted as separators.
    ///
    /// With one subtag after the language, a known script code wins over a
    /// region code. With two, they are read as `script-region`.
    pub fn parse(text: &str, subtags: &Subtags) -> Result<Self> {
        let parts: Vec<&str> = text.split(['-', '_']).collect();
        let malformed = |reason: String| I18nError::MalformedTag {
            tag: text.to_string(),
            reason,
        };

        if parts.iter().any(|part| part.is_empty()) {
            return Err(malformed("empty subtag".to_string()));
        }
        if parts.len() > 3 {
            return Err(malformed(format!(
                "expected at most 3 subtags, found {}",
                parts.len()
            )));
        }

        let language = match subtags.languages.get(parts[0]) {
            Ok(language) => language,
            Err(e) if e.is_unknown_subtag() => {
                return Err(malformed(format!("unknown language '{}'", parts[0])));
            }
            Err(e) => return Err(e),
        };

        let (script, region) = match parts[1..] {
            [] => (None, None),
            [code] => match subtags.scripts.get(code) {
                Ok(script) => (Some(script), None),
                Err(e) if e.is_unknown_subtag() => (None, Some(subtags.regions.get(code)?)),
                Err(e) => return Err(e),
            },
            [script, region] => {
                let region = subtags.regions.get(region)?;
                (Some(subtags.scripts.get(script)?), Some(region))
            }
            _ => unreachable!("subtag count checked above"),
        };

        Ok(Self::from_parts(language, script, region))
    }

    /// Assemble a tag from already validated subtags.
    pub fn from_parts(
        language: Arc<Language>,
        script: Option<Arc<Script>>,
        region: Option<Arc<Region>>,
    ) -> Self {
        let lang = language.code();
        let script_code = script.as_deref().map(Subtag::code);
        let region_code = region.as_deref().map(Subtag::code);

        let name = join(lang, script_code, region_code);
        let fallbacks = match (script_code, region_code) {
            (Some(s), Some(r)) => vec![join(lang, Some(s), None), join(lang, None, Some(r)), lang.to_string()],
            (Some(_), None) | (None, Some(_)) => vec![lang.to_string()],
            (None, None) => Vec::new(),
        };

        Self {
            name,
            language,
            script,
            region,
            fallbacks,
        }
    }

    /// Canonical name, e.g. `zh-Hans-CN`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Language in ISO 639
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Script in ISO 15924
    pub fn script(&self) -> Option<&Script> {
        self.script.as_deref()
    }

    /// Country or region in ISO 3166-1
    pub fn region(&self) -> Option<&Region> {
        self.region.as_deref()
    }

    /// Less specific tags to try when this one is unavailable, most specific
    /// first. Empty for a bare language.
    pub fn fallbacks(&self) -> &[String] {
        &self.fallbacks
    }

    /// Number of subtags in the canonical name.
    pub fn specificity(&self) -> usize {
        1 + usize::from(self.script.is_some()) + usize::from(self.region.is_some())
    }

    /// Iterate over the fallback chain.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.fallbacks.iter()
    }
}

fn join(language: &str, script: Option<&str>, region: Option<&str>) -> String {
    let mut name = language.to_string();
    for subtag in [script, region].into_iter().flatten() {
        name.push(HYPHEN);
        name.push_str(subtag);
    }
    name
}

impl PartialEq for LangTag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for LangTag {}

impl PartialEq<str> for LangTag {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for LangTag {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

impl Hash for LangTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for LangTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<str> for LangTag {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl<'a> IntoIterator for &'a LangTag {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
