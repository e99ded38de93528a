//! Language Tags and Message Catalogs for Lingua
//!
//! Resolves BCP47-style language tags and serves localized messages with
//! fallback:
//!
//! - **Language Tags**: `language[-script][-region]`, canonical casing, and a
//!   fallback chain from most to least specific
//! - **Subtag Registries**: ISO 639 languages, ISO 15924 scripts and
//!   ISO 3166 regions, bundled or loaded from files
//! - **Catalog**: curated tags with aliases, descriptions and localized
//!   labels, looked up with fallback
//! - **Messages**: per-language TOML files loaded on demand into a tree of
//!   dotted sections with `{name}` templates
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lingua_i18n::Database;
//!
//! let db = Database::default();
//!
//! let tag = db.langtag("zh_hans_cn")?;
//! assert_eq!(tag.name(), "zh-Hans-CN");
//! assert_eq!(tag.fallbacks(), ["zh-Hans", "zh-CN", "zh"]);
//!
//! let messages = db.open_messages("locale")?;
//! let segment = messages.lookup("zh-Hans-CN")?;
//! let login = segment.lookup("login").render(&[("username", "alice")])?;
//! println!("{}", login["username"]);
//! # Ok::<(), lingua_i18n::I18nError>(())
//! ```
//!
//! # Catalog Lookup
//!
//! ```rust
//! use lingua_i18n::Database;
//!
//! let db = Database::default();
//! let item = db.langtags()?.lookup("zh-Hans-US")?;
//! assert_eq!(item.tag().name(), "zh-Hans");
//! assert_eq!(item.recognition(), "简体中文");
//! # Ok::<(), lingua_i18n::I18nError>(())
//! ```

mod config;
mod database;
mod error;
mod interner;
mod langtag;
mod langtags;
mod message;
mod section;
mod segment;
mod subtags;
mod template;

pub use config::{DEFAULT_SUFFIX, ENV_PREFIX, I18nConfig};
pub use database::Database;
pub use error::I18nError;
pub use interner::TagInterner;
pub use langtag::{HYPHEN, LangTag};
pub use langtags::{CatalogRecord, LangItem, LangTags};
pub use message::Message;
pub use section::{Document, Node, PATH_SEPARATOR, Section, Value};
pub use segment::Segment;
pub use subtags::{
    Language, Region, RegistrySource, Script, Subtag, SubtagKind, SubtagRegistry, Subtags,
};
pub use template::format_template;

/// Result type for language and message operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Database, I18nConfig, I18nError, LangItem, LangTag, LangTags, Message, Result, Section,
        Segment, Subtag, Value, format_template,
    };
}
