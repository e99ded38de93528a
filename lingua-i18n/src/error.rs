//! Error types for tag resolution and message lookup

use crate::subtags::SubtagKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving tags or reading message catalogs.
#[derive(Debug, Error)]
pub enum I18nError {
    /// Tag text cannot be a language tag at all
    #[error("Malformed language tag '{tag}': {reason}")]
    MalformedTag { tag: String, reason: String },

    /// Script or region code missing from its registry
    #[error("Unknown {kind} subtag: {code}")]
    UnknownSubtag { kind: SubtagKind, code: String },

    /// Neither the tag nor any tag in its fallback chain is available
    #[error("No such language tag: {0}")]
    NoSuchLangTag(String),

    /// Leaf key absent from a section
    #[error("Key not found: '{key}' in section '{section}'")]
    KeyNotFound { section: String, key: String },

    /// Template could not be rendered
    #[error("Format error in '{template}': {reason}")]
    FormatError { template: String, reason: String },

    /// Two catalog records claim the same tag
    #[error("Conflicting catalog entries for {tag}: claimed by {first} and {second}")]
    CatalogConflict {
        tag: String,
        first: String,
        second: String,
    },

    /// Registry data exists but cannot be decoded
    #[error("Invalid {kind} registry data: {reason}")]
    RegistryData { kind: SubtagKind, reason: String },

    /// Failed to parse a structured document
    #[error("Failed to parse {origin}: {reason}")]
    ParseError { origin: String, reason: String },

    /// Failed to serialize a structured document
    #[error("Failed to serialize {origin}: {reason}")]
    SerializeError { origin: String, reason: String },

    /// IO error, with the path that caused it
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl I18nError {
    /// Wrap an IO error with the path being read or written.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        I18nError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for a lookup miss in a catalog or a message directory.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, I18nError::NoSuchLangTag(_))
    }

    /// True when a registry answered "no such code".
    pub fn is_unknown_subtag(&self) -> bool {
        matches!(self, I18nError::UnknownSubtag { .. })
    }
}
