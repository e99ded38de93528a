//! Subtag Registries
//!
//! Read-only lookup tables for the three subtag kinds a language tag is built
//! from: languages (ISO 639), scripts (ISO 15924) and regions (ISO 3166-1).
//!
//! Each registry is backed by a TOML document holding one table per
//! lower-cased code. The document is parsed on first access and every record
//! is kept behind an `Arc` for the lifetime of the registry.

use crate::{I18nError, Result};
use lingua_log::debug;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

const LANGUAGES: &str = include_str!("../data/languages.toml");
const SCRIPTS: &str = include_str!("../data/scripts.toml");
const REGIONS: &str = include_str!("../data/regions.toml");

/// The kind of subtag a registry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtagKind {
    Language,
    Script,
    Region,
}

impl SubtagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubtagKind::Language => "language",
            SubtagKind::Script => "script",
            SubtagKind::Region => "region",
        }
    }
}

impl fmt::Display for SubtagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record stored in a subtag registry.
pub trait Subtag: DeserializeOwned + Send + Sync + 'static {
    /// Registry kind, used in error messages.
    const KIND: SubtagKind;

    /// Canonical code, in the casing used inside a tag.
    fn code(&self) -> &str;

    /// English name.
    fn name(&self) -> &str;

    /// Extra codes the record answers to besides its own key.
    fn alternate_codes(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Language in ISO 639.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Language {
    #[serde(default)]
    alpha_2: Option<String>,
    alpha_3: String,
    name: String,
}

impl Language {
    /// ISO 639-1 code, when the language has one.
    pub fn alpha_2(&self) -> Option<&str> {
        self.alpha_2.as_deref()
    }

    /// ISO 639-3 code.
    pub fn alpha_3(&self) -> &str {
        &self.alpha_3
    }
}

impl Subtag for Language {
    const KIND: SubtagKind = SubtagKind::Language;

    /// The shortest code: `alpha_2` if present, else `alpha_3`.
    fn code(&self) -> &str {
        self.alpha_2.as_deref().unwrap_or(&self.alpha_3)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn alternate_codes(&self) -> Vec<String> {
        vec![self.alpha_3.clone()]
    }
}

/// Script in ISO 15924.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Script {
    alpha_4: String,
    numeric: u16,
    name: String,
}

impl Script {
    pub fn alpha_4(&self) -> &str {
        &self.alpha_4
    }

    pub fn numeric(&self) -> u16 {
        self.numeric
    }
}

impl Subtag for Script {
    const KIND: SubtagKind = SubtagKind::Script;

    fn code(&self) -> &str {
        &self.alpha_4
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Country or region in ISO 3166-1.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Region {
    alpha_2: String,
    alpha_3: String,
    numeric: u16,
    name: String,
    #[serde(default)]
    official_name: Option<String>,
    flag: String,
}

impl Region {
    pub fn alpha_2(&self) -> &str {
        &self.alpha_2
    }

    pub fn alpha_3(&self) -> &str {
        &self.alpha_3
    }

    /// UN M.49 numeric code.
    pub fn numeric(&self) -> u16 {
        self.numeric
    }

    /// Official name; falls back to the short name.
    pub fn official_name(&self) -> &str {
        self.official_name.as_deref().unwrap_or(&self.name)
    }

    /// Flag emoji built from regional indicator symbols.
    pub fn flag(&self) -> &str {
        &self.flag
    }
}

impl Subtag for Region {
    const KIND: SubtagKind = SubtagKind::Region;

    fn code(&self) -> &str {
        &self.alpha_2
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn alternate_codes(&self) -> Vec<String> {
        vec![format!("{:03}", self.numeric)]
    }
}

/// Where a registry reads its records from.
#[derive(Debug, Clone)]
pub enum RegistrySource {
    /// Data compiled into the binary
    Embedded(&'static str),
    /// A TOML file on disk
    File(PathBuf),
}

impl RegistrySource {
    fn read(&self) -> Result<Cow<'static, str>> {
        match self {
            RegistrySource::Embedded(text) => Ok(Cow::Borrowed(text)),
            RegistrySource::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|e| I18nError::io(path, e)),
        }
    }
}

impl fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrySource::Embedded(_) => f.write_str("<embedded>"),
            RegistrySource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Lazily loaded, read-only table of subtag records.
///
/// Lookups are case-insensitive; the returned record carries the canonical
/// casing.
#[derive(Debug)]
pub struct SubtagRegistry<T: Subtag> {
    source: RegistrySource,
    entries: OnceCell<HashMap<String, Arc<T>>>,
}

impl<T: Subtag> SubtagRegistry<T> {
    /// Create a registry over the given source. Nothing is read yet.
    pub fn new(source: RegistrySource) -> Self {
        Self {
            source,
            entries: OnceCell::new(),
        }
    }

    /// Create a registry reading a TOML file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(RegistrySource::File(path.into()))
    }

    /// Look up a record by code.
    ///
    /// Fails with [`I18nError::UnknownSubtag`] when the code is absent, and
    /// with an IO or registry-data error when the backing data is unusable.
    pub fn get(&self, code: &str) -> Result<Arc<T>> {
        self.entries()?
            .get(&code.to_lowercase())
            .cloned()
            .ok_or_else(|| I18nError::UnknownSubtag {
                kind: T::KIND,
                code: code.to_string(),
            })
    }

    /// Number of distinct records.
    pub fn len(&self) -> Result<usize> {
        Ok(self.codes()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Canonical codes of every record, sorted.
    pub fn codes(&self) -> Result<Vec<String>> {
        let mut codes: Vec<String> = self
            .entries()?
            .values()
            .map(|entry| entry.code().to_string())
            .collect();
        codes.sort();
        codes.dedup();
        Ok(codes)
    }

    fn entries(&self) -> Result<&HashMap<String, Arc<T>>> {
        self.entries.get_or_try_init(|| self.load())
    }

    fn load(&self) -> Result<HashMap<String, Arc<T>>> {
        let text = self.source.read()?;
        let records: HashMap<String, T> =
            toml::from_str(&text).map_err(|e| I18nError::RegistryData {
                kind: T::KIND,
                reason: format!("{}: {}", self.source, e),
            })?;

        let mut entries = HashMap::with_capacity(records.len() * 2);
        let mut alternates = Vec::new();
        for (key, record) in records {
            let record = Arc::new(record);
            for code in record.alternate_codes() {
                alternates.push((code.to_lowercase(), Arc::clone(&record)));
            }
            entries.insert(key.to_lowercase(), record);
        }
        // Record keys take precedence over alternate codes.
        for (code, record) in alternates {
            entries.entry(code).or_insert(record);
        }

        debug!(
            "Loaded {} {} subtags from {}",
            entries.len(),
            T::KIND,
            self.source
        );
        Ok(entries)
    }
}

/// The three registries a language tag is validated against.
#[derive(Debug)]
pub struct Subtags {
    pub languages: SubtagRegistry<Language>,
    pub scripts: SubtagRegistry<Script>,
    pub regions: SubtagRegistry<Region>,
}

impl Subtags {
    /// Registries backed by the bundled data.
    pub fn embedded() -> Self {
        Self {
            languages: SubtagRegistry::new(RegistrySource::Embedded(LANGUAGES)),
            scripts: SubtagRegistry::new(RegistrySource::Embedded(SCRIPTS)),
            regions: SubtagRegistry::new(RegistrySource::Embedded(REGIONS)),
        }
    }

    /// Registries from explicit sources.
    pub fn new(languages: RegistrySource, scripts: RegistrySource, regions: RegistrySource) -> Self {
        Self {
            languages: SubtagRegistry::new(languages),
            scripts: SubtagRegistry::new(scripts),
            regions: SubtagRegistry::new(regions),
        }
    }

    /// Bundled data, with any path set in the configuration taking its place.
    pub fn from_config(config: &crate::I18nConfig) -> Self {
        let source = |path: &Option<PathBuf>, embedded: &'static str| match path {
            Some(path) => RegistrySource::File(path.clone()),
            None => RegistrySource::Embedded(embedded),
        };
        Self::new(
            source(&config.languages, LANGUAGES),
            source(&config.scripts, SCRIPTS),
            source(&config.regions, REGIONS),
        )
    }
}

impl Default for Subtags {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_zh() {
        let subtags = Subtags::embedded();
        let language = subtags.languages.get("zh").unwrap();
        assert_eq!(language.code(), "zh");
        assert_eq!(language.name(), "Chinese");
        assert_eq!(language.alpha_2(), Some("zh"));
        assert_eq!(language.alpha_3(), "zho");
    }

    #[test]
    fn test_language_is_case_insensitive() {
        let subtags = Subtags::embedded();
        let upper = subtags.languages.get("ZH").unwrap();
        let lower = subtags.languages.get("zh").unwrap();
        assert!(Arc::ptr_eq(&upper, &lower));
    }

    #[test]
    fn test_language_alpha_3_resolves_to_shortest_code() {
        let subtags = Subtags::embedded();
        assert_eq!(subtags.languages.get("zho").unwrap().code(), "zh");
        assert_eq!(subtags.languages.get("eng").unwrap().code(), "en");
    }

    #[test]
    fn test_language_without_alpha_2() {
        let subtags = Subtags::embedded();
        let yue = subtags.languages.get("yue").unwrap();
        assert_eq!(yue.code(), "yue");
        assert_eq!(yue.alpha_2(), None);
    }

    #[test]
    fn test_language_unknown() {
        let subtags = Subtags::embedded();
        let err = subtags.languages.get("xx").unwrap_err();
        assert!(err.is_unknown_subtag());
    }

    #[test]
    fn test_script_hans() {
        let subtags = Subtags::embedded();
        let script = subtags.scripts.get("hans").unwrap();
        assert_eq!(script.code(), "Hans");
        assert_eq!(script.name(), "Han (Simplified variant)");
        assert_eq!(script.numeric(), 501);
        assert_eq!(script.alpha_4(), "Hans");
    }

    #[test]
    fn test_script_unknown() {
        let subtags = Subtags::embedded();
        assert!(subtags.scripts.get("xxxx").unwrap_err().is_unknown_subtag());
    }

    #[test]
    fn test_region_cn() {
        let subtags = Subtags::embedded();
        let region = subtags.regions.get("cn").unwrap();
        assert_eq!(region.code(), "CN");
        assert_eq!(region.flag(), "🇨🇳");
        assert_eq!(region.name(), "China");
        assert_eq!(region.numeric(), 156);
        assert_eq!(region.alpha_2(), "CN");
        assert_eq!(region.alpha_3(), "CHN");
        assert_eq!(region.official_name(), "People's Republic of China");
    }

    #[test]
    fn test_region_numeric_code() {
        let subtags = Subtags::embedded();
        assert_eq!(subtags.regions.get("156").unwrap().code(), "CN");
        assert_eq!(subtags.regions.get("032").unwrap().code(), "AR");
    }

    #[test]
    fn test_region_unknown() {
        let subtags = Subtags::embedded();
        let err = subtags.regions.get("xx").unwrap_err();
        assert!(matches!(
            err,
            I18nError::UnknownSubtag {
                kind: SubtagKind::Region,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let registry: SubtagRegistry<Script> =
            SubtagRegistry::from_path("/nonexistent/lingua/scripts.toml");
        let err = registry.get("latn").unwrap_err();
        assert!(matches!(err, I18nError::Io { .. }));
        assert!(!err.is_unknown_subtag());
    }

    #[test]
    fn test_corrupt_data_is_registry_error() {
        let registry: SubtagRegistry<Script> =
            SubtagRegistry::new(RegistrySource::Embedded("[latn]\nalpha_4 = 1\n"));
        let err = registry.get("latn").unwrap_err();
        assert!(matches!(
            err,
            I18nError::RegistryData {
                kind: SubtagKind::Script,
                ..
            }
        ));
    }

    #[test]
    fn test_codes_are_distinct_records() {
        let subtags = Subtags::embedded();
        let codes = subtags.regions.codes().unwrap();
        assert!(codes.contains(&"CN".to_string()));
        assert!(!codes.contains(&"156".to_string()));
        assert_eq!(subtags.regions.len().unwrap(), codes.len());
    }
}
