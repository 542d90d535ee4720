//! Shared test utilities for the unit test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tree = content(json!({"posts": [{"title": "Hello"}]}));
//! assert_eq!(find(&tree, "posts.0.title"), &Content::from("Hello"));
//! assert_eq!(keys(&tree), vec!["posts"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::Content;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Tree construction and lookups (panic with a clear message on miss)
// =========================================================================

/// Build a content tree from a `json!` literal.
pub fn content(value: serde_json::Value) -> Content {
    Content::from(value)
}

/// Follow a dotted path: record keys by name, collection items by index.
pub fn find<'a>(tree: &'a Content, path: &str) -> &'a Content {
    let mut node = tree;
    for segment in path.split('.') {
        node = match node {
            Content::Record(record) => record.get(segment).unwrap_or_else(|| {
                let available: Vec<&str> = record.keys().map(String::as_str).collect();
                panic!("key '{segment}' of '{path}' not found. Available: {available:?}")
            }),
            Content::Collection(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i))
                .unwrap_or_else(|| {
                    panic!(
                        "index '{segment}' of '{path}' out of range (len {})",
                        items.len()
                    )
                }),
            Content::Scalar(_) => {
                panic!("'{segment}' of '{path}' reached a {} scalar", node.kind())
            }
        };
    }
    node
}

/// Record keys in order. Panics if `tree` is not a record.
pub fn keys(tree: &Content) -> Vec<&str> {
    match tree.as_record() {
        Some(record) => record.keys().map(String::as_str).collect(),
        None => panic!("expected a record, found {}", tree.kind()),
    }
}
