//! Integration tests for common Lingua workflows.
//!
//! These tests verify that the most common use cases work correctly through
//! the facade crate.

use lingua::prelude::*;
use std::fs;
use std::sync::Arc;

// =============================================================================
// Tag Resolution
// =============================================================================

#[test]
fn test_canonical_forms() {
    let db = Database::default();

    let cases = [
        ("zh-hans-cn", "zh-Hans-CN"),
        ("ZH_HANT", "zh-Hant"),
        ("en-us", "en-US"),
        ("EN", "en"),
        ("zho-Hans", "zh-Hans"),
        ("es-724", "es-ES"),
    ];
    for (input, canonical) in cases {
        assert_eq!(db.langtag(input).unwrap().name(), canonical, "{input}");
    }
}

#[test]
fn test_fallback_chains() {
    let db = Database::default();

    assert_eq!(db.langtag("zh-Hans-CN").unwrap().fallbacks(), ["zh-Hans", "zh-CN", "zh"]);
    assert_eq!(db.langtag("zh-Hant").unwrap().fallbacks(), ["zh"]);
    assert_eq!(db.langtag("en-GB").unwrap().fallbacks(), ["en"]);
    assert!(db.langtag("fr").unwrap().fallbacks().is_empty());
}

#[test]
fn test_malformed_tags() {
    let db = Database::default();

    for input in ["", "zz", "en--US", "zh-Hans-CN-x", "en-Qqqq"] {
        assert!(db.langtag(input).is_err(), "{input:?} should be rejected");
    }
    assert!(matches!(
        db.langtag("zz").unwrap_err(),
        I18nError::MalformedTag { .. }
    ));
}

// =============================================================================
// Catalog
// =============================================================================

#[test]
fn test_catalog_lookup_and_aliases() {
    let db = Database::default();
    let langtags = db.langtags().unwrap();

    let ja = langtags.lookup("ja-JP").unwrap();
    assert_eq!(ja.tag().name(), "ja");
    assert!(ja.answers("ja-Jpan"));

    let item = langtags.lookup("zh-Hans-MY").unwrap();
    assert_eq!(item.tag().name(), "zh-Hans");
    assert_eq!(item.description(), "simplified Chinese");

    let fr_ca = langtags.lookup("fr-CA").unwrap();
    assert_eq!(fr_ca.recognition(), "Français canadien");

    // Regional entries without a label inherit the language's.
    assert_eq!(langtags.lookup("fr-FR").unwrap().recognition(), "Français");
}

// =============================================================================
// Messages
// =============================================================================

#[test]
fn test_generate_write_and_serve() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::default();
    let langtags = db.langtags().unwrap();

    let message = db.open_messages(dir.path()).unwrap();
    for tag in ["en", "zh-Hans"] {
        let segment = Segment::generate(langtags, tag).unwrap();
        segment.lookup("login").set("username", "{username}");
        message.insert(segment);
    }
    let written = message.dump(dir.path()).unwrap();
    assert_eq!(written.len(), 2);

    let served = db.open_messages(dir.path()).unwrap();
    assert!(!served.contains("zh-Hans"));

    let segment = served.lookup("zh-Hans-SG").unwrap();
    assert_eq!(segment.langtag().name(), "zh-Hans");
    assert_eq!(
        segment
            .lookup("login")
            .render_key("username", &[("username", "alice")])
            .unwrap(),
        "alice"
    );
    assert!(served.lookup("de").unwrap_err().is_lookup_miss());
}

#[test]
fn test_section_tree_editing() {
    let root = Section::root();
    root.update(
        "menu",
        Node::strings([("open", "Open {file}"), ("close", "Close")]),
    );

    let menu = root.lookup("menu");
    assert!(Arc::ptr_eq(&menu, &root.search("menu")));
    assert_eq!(menu.keys(), ["close", "open"]);
    assert_eq!(
        menu.render(&[("file", "notes.txt")]).unwrap()["open"],
        "Open notes.txt"
    );
    assert_eq!(root.lookup("menu.recent").title(), ".menu.recent");
}

#[test]
fn test_custom_suffix_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("pt.lang"), "title = \"Olá\"\n").unwrap();

    let db = Database::new(I18nConfig::default().with_suffix(".lang"));
    let message = db.open_messages(dir.path()).unwrap();

    let segment = message.lookup("pt-BR").unwrap();
    assert_eq!(segment.get("title").unwrap(), Value::from("Olá"));
    assert_eq!(message.tags(), ["pt"]);
}
