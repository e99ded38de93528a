//! Section Tree
//!
//! A hierarchical key-value store addressed by dotted paths. Each [`Section`]
//! holds leaf values and named child sections. Children are created on first
//! access and shared afterwards, so a section can be navigated through a
//! shared reference.
//!
//! ```
//! use lingua_i18n::{Node, Section};
//!
//! let root = Section::root();
//! root.update("login", Node::strings([("username", "Username: {username}")]));
//!
//! let login = root.lookup("login");
//! let rendered = login.render(&[("username", "alice")]).unwrap();
//! assert_eq!(rendered["username"], "Username: alice");
//! ```

use crate::template::format_template;
use crate::{I18nError, Result};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Path separator for [`Section::lookup`].
pub const PATH_SEPARATOR: char = '.';

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Datetime(toml::value::Datetime),
    Array(Vec<Value>),
}

impl Value {
    /// The string, if this is a string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    fn from_toml(value: toml::Value, origin: &str) -> Result<Self> {
        Ok(match value {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Integer(i),
            toml::Value::Float(f) => Value::Float(f),
            toml::Value::Boolean(b) => Value::Boolean(b),
            toml::Value::Datetime(d) => Value::Datetime(d),
            toml::Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| Value::from_toml(item, origin))
                    .collect::<Result<_>>()?,
            ),
            toml::Value::Table(_) => {
                return Err(I18nError::ParseError {
                    origin: origin.to_string(),
                    reason: "tables inside arrays are not supported".to_string(),
                });
            }
        })
    }

    fn to_toml(&self) -> toml::Value {
        match self {
            Value::String(s) => toml::Value::String(s.clone()),
            Value::Integer(i) => toml::Value::Integer(*i),
            Value::Float(f) => toml::Value::Float(*f),
            Value::Boolean(b) => toml::Value::Boolean(*b),
            Value::Datetime(d) => toml::Value::Datetime(*d),
            Value::Array(items) => toml::Value::Array(items.iter().map(Value::to_toml).collect()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Datetime(d) => write!(f, "{}", d),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

/// A parsed document node: either a leaf or a nested table.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Value),
    Table(BTreeMap<String, Node>),
}

/// Top-level mapping of a parsed document.
pub type Document = BTreeMap<String, Node>;

impl Node {
    /// Convert a TOML value, classifying every node once.
    pub fn from_toml(value: toml::Value, origin: &str) -> Result<Self> {
        match value {
            toml::Value::Table(table) => Ok(Node::Table(Self::from_table(table, origin)?)),
            other => Ok(Node::Leaf(Value::from_toml(other, origin)?)),
        }
    }

    /// Convert every entry of a TOML table.
    pub fn from_table(table: toml::Table, origin: &str) -> Result<Document> {
        table
            .into_iter()
            .map(|(key, value)| Ok((key, Self::from_toml(value, origin)?)))
            .collect()
    }

    /// Parse TOML text into a document.
    pub fn parse_document(content: &str, origin: &str) -> Result<Document> {
        let table: toml::Table = toml::from_str(content).map_err(|e| I18nError::ParseError {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_table(table, origin)
    }
}

impl Node {
    /// A leaf node.
    pub fn leaf(value: impl Into<Value>) -> Self {
        Node::Leaf(value.into())
    }

    /// A table of string leaves.
    pub fn strings<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Node::Table(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), Node::leaf(value)))
                .collect(),
        )
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Leaf(value)
    }
}

/// A node of the section tree.
#[derive(Debug, Default)]
pub struct Section {
    title: String,
    values: RwLock<BTreeMap<String, Value>>,
    children: RwLock<BTreeMap<String, Arc<Section>>>,
}

impl Section {
    /// Create an empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            values: RwLock::new(BTreeMap::new()),
            children: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create an untitled root section.
    pub fn root() -> Self {
        Self::default()
    }

    /// Dotted path from the root, e.g. `.section2.section3`.
    ///
    /// The root is untitled, so every descendant title starts with the
    /// separator.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Leaf value of this section. Ancestors are not consulted.
    pub fn get(&self, key: &str) -> Result<Value> {
        self.values
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| I18nError::KeyNotFound {
                section: self.title.clone(),
                key: key.to_string(),
            })
    }

    /// Create or overwrite a leaf value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.write().insert(key.into(), value.into());
    }

    /// True when this section has a leaf named `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    /// Leaf keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }

    /// Child names, sorted.
    pub fn children(&self) -> Vec<String> {
        self.children.read().keys().cloned().collect()
    }

    /// Child named `name`, created empty on first access.
    ///
    /// Repeated calls return the same instance.
    pub fn search(&self, name: &str) -> Arc<Section> {
        if let Some(child) = self.children.read().get(name) {
            return Arc::clone(child);
        }
        let mut children = self.children.write();
        Arc::clone(
            children
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(Section::new(self.child_title(name)))),
        )
    }

    fn child_title(&self, name: &str) -> String {
        format!("{}{}{}", self.title, PATH_SEPARATOR, name)
    }

    /// Descendant at a dotted path, creating each missing level.
    pub fn lookup(&self, path: &str) -> Arc<Section> {
        let mut parts = path.split(PATH_SEPARATOR);
        // `split` always yields at least one item.
        let first = parts.next().unwrap_or_default();
        parts.fold(self.search(first), |section, name| section.search(name))
    }

    /// Ingest a document node under `key`.
    ///
    /// Tables descend into the child named `key`; leaves are set directly.
    pub fn update(&self, key: &str, node: Node) {
        match node {
            Node::Leaf(value) => self.set(key, value),
            Node::Table(entries) => {
                let child = self.search(key);
                for (name, node) in entries {
                    child.update(&name, node);
                }
            }
        }
    }

    /// Ingest every entry of a document.
    pub fn update_all(&self, document: Document) {
        for (key, node) in document {
            self.update(&key, node);
        }
    }

    /// Render every leaf of this section (not its descendants).
    ///
    /// String leaves are templates filled from `args`; other leaves use their
    /// plain string form.
    pub fn render(&self, args: &[(&str, &str)]) -> Result<BTreeMap<String, String>> {
        self.values
            .read()
            .iter()
            .map(|(key, value)| Ok((key.clone(), render_value(value, args)?)))
            .collect()
    }

    /// Render a single leaf.
    pub fn render_key(&self, key: &str, args: &[(&str, &str)]) -> Result<String> {
        render_value(&self.get(key)?, args)
    }

    /// Convert the subtree back to a TOML table.
    ///
    /// Fails when a leaf and a child share a name, which TOML cannot express.
    pub fn to_table(&self) -> Result<toml::Table> {
        let mut table = toml::Table::new();
        for (key, value) in self.values.read().iter() {
            table.insert(key.clone(), value.to_toml());
        }
        for (name, child) in self.children.read().iter() {
            if table.contains_key(name) {
                return Err(I18nError::SerializeError {
                    origin: child.title.clone(),
                    reason: "name is used by both a value and a section".to_string(),
                });
            }
            table.insert(name.clone(), toml::Value::Table(child.to_table()?));
        }
        Ok(table)
    }

    /// True when the section has neither leaves nor children.
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty() && self.children.read().is_empty()
    }
}

fn render_value(value: &Value, args: &[(&str, &str)]) -> Result<String> {
    match value {
        Value::String(template) => format_template(template, args),
        other => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(content: &str) -> Document {
        Node::parse_document(content, "test").unwrap()
    }

    #[test]
    fn test_get_and_set() {
        let section = Section::new("greeting");
        section.set("text", "hello world");
        assert_eq!(section.get("text").unwrap(), Value::from("hello world"));
        assert_eq!(section.title(), "greeting");
    }

    #[test]
    fn test_get_missing_key() {
        let section = Section::new("greeting");
        let err = section.get("missing").unwrap_err();
        assert!(matches!(err, I18nError::KeyNotFound { .. }));
        assert!(!err.is_lookup_miss());
    }

    #[test]
    fn test_get_does_not_ascend() {
        let root = Section::root();
        root.set("shared", "root value");
        let child = root.search("child");
        assert!(child.get("shared").is_err());
    }

    #[test]
    fn test_search_is_idempotent() {
        let root = Section::root();
        let a = root.search("a");
        let b = root.search("a");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(root.children(), ["a"]);
    }

    #[test]
    fn test_child_title_joins_parent_title() {
        let root = Section::root();
        assert_eq!(root.title(), "");
        assert_eq!(root.search("a").title(), ".a");

        let named = Section::new("menu");
        assert_eq!(named.search("file").title(), "menu.file");
        assert_eq!(named.lookup("file.recent").title(), "menu.file.recent");
    }

    #[test]
    fn test_lookup_creates_each_level() {
        let root = Section::root();
        let leaf = root.lookup("a.b.c");
        assert_eq!(leaf.title(), ".a.b.c");
        assert!(Arc::ptr_eq(&leaf, &root.search("a").search("b").search("c")));
    }

    #[test]
    fn test_update_nested_tables() {
        let root = Section::root();
        root.update_all(document(
            r#"
            [section1]
            key1 = "value1"

            [section2.section3]
            key2 = "value2"

            [section2.section3.section4]
            key4 = "value4"
            "#,
        ));

        assert_eq!(root.lookup("section1").get("key1").unwrap(), Value::from("value1"));
        assert_eq!(
            root.lookup("section2.section3").get("key2").unwrap(),
            Value::from("value2")
        );
        assert_eq!(
            root.lookup("section2.section3.section4").get("key4").unwrap(),
            Value::from("value4")
        );
    }

    #[test]
    fn test_update_is_associative_over_key_order() {
        let split = Section::root();
        split.update_all(document("[a]\nb = 1\n"));
        split.update_all(document("[a]\nc = 2\n"));

        let joined = Section::root();
        joined.update_all(document("[a]\nb = 1\nc = 2\n"));

        assert_eq!(split.to_table().unwrap(), joined.to_table().unwrap());
    }

    #[test]
    fn test_update_empty_table_creates_child() {
        let root = Section::root();
        root.update("empty", Node::Table(BTreeMap::new()));
        assert_eq!(root.children(), ["empty"]);
    }

    #[test]
    fn test_render_only_own_leaves() {
        let root = Section::root();
        root.update_all(document(
            r#"
            [login]
            username = "Username: {username}"
            password = "Password: {password}"
            attempts = 3

            [login.help]
            hint = "never rendered from login"
            "#,
        ));

        let rendered = root
            .lookup("login")
            .render(&[("username", "test"), ("password", "1234")])
            .unwrap();
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered["username"], "Username: test");
        assert_eq!(rendered["password"], "Password: 1234");
        assert_eq!(rendered["attempts"], "3");
        assert!(!rendered.contains_key("hint"));
    }

    #[test]
    fn test_render_missing_argument() {
        let section = Section::new("render");
        section.set("key", "value: {value}");
        let err = section.render(&[]).unwrap_err();
        assert!(matches!(err, I18nError::FormatError { .. }));
    }

    #[test]
    fn test_render_key() {
        let section = Section::new("render");
        section.set("key", "value: {value}");
        assert_eq!(section.render_key("key", &[("value", "test")]).unwrap(), "value: test");
        assert!(section.render_key("other", &[]).is_err());
    }

    #[test]
    fn test_non_string_values_display() {
        let root = Section::root();
        root.update_all(document("flag = true\nratio = 0.5\nlist = [1, \"two\"]\n"));
        let rendered = root.render(&[]).unwrap();
        assert_eq!(rendered["flag"], "true");
        assert_eq!(rendered["ratio"], "0.5");
        assert_eq!(rendered["list"], "[1, two]");
    }

    #[test]
    fn test_array_of_tables_rejected() {
        let err = Node::parse_document("items = [{ a = 1 }]", "test").unwrap_err();
        assert!(matches!(err, I18nError::ParseError { .. }));
    }

    #[test]
    fn test_to_table_name_clash() {
        let root = Section::root();
        root.set("a", "leaf");
        root.search("a");
        assert!(matches!(
            root.to_table().unwrap_err(),
            I18nError::SerializeError { .. }
        ));
    }
}
