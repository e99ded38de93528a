// Lingua - language tag resolution and message catalogs for Rust
//
// This library resolves BCP47-style language tags against bundled subtag
// registries and serves localized messages with fallback along each tag's
// chain of less specific forms.

// Re-export core functionality
pub use lingua_i18n::*;

// Re-export logging
pub use lingua_log as log;

/// Prelude for common imports
pub mod prelude {
    pub use lingua_i18n::prelude::*;
    pub use lingua_i18n::{Node, Subtags, TagInterner};
}
