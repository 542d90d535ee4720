//! Reference resolution for `*_id` fields.
//!
//! An integer under `<relation>_id` points into the collection named by the
//! plural of `<relation>` at the *root* of the data tree, whatever depth the
//! reference itself sits at:
//!
//! ```text
//! root.authors = [ { id: 1, name: "X" }, { id: 2, name: "Y" } ]   scanned by `id`
//! root.tags    = { "5": { id: 5, label: "news" } }                indexed by key
//!
//! { author_id: 2 }  →  { author: { id: 2, name: "Y" } }
//! { tag_id: 5 }     →  { tag: { id: 5, label: "news" } }
//! { author_id: 9 }  →  { author: null }
//! ```
//!
//! When the value is not an integer, or the root has no such collection, the
//! key is plain data and the rule declines.

use crate::content::Content;
use crate::naming::KeyNaming;
use crate::walk::Rewrite;

/// How the referenced collection was searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Collection is a record keyed by the id's string form.
    Keyed,
    /// Collection is a sequence scanned for a matching `id` field.
    Scan,
}

/// A resolved `*_id` field.
#[derive(Debug, Clone, PartialEq)]
pub struct Associated {
    pub rewrite: Rewrite,
    pub lookup: Lookup,
    pub found: bool,
}

impl Associated {
    pub fn into_rewrite(self) -> Rewrite {
        self.rewrite
    }
}

/// Resolve one record entry if it is a reference into `root`.
pub fn associate(key: &str, value: &Content, root: &Content, naming: &KeyNaming) -> Option<Associated> {
    let relation = naming.foreign_key_base(key)?;
    let id = value.as_integer()?;
    let collection = root.get(&naming.pluralize(relation))?;
    let (lookup, entity) = find_entity(collection, id)?;
    Some(Associated {
        rewrite: Rewrite::new(relation, entity.cloned().unwrap_or_default()),
        lookup,
        found: entity.is_some(),
    })
}

/// Find the entity with `id` in a keyed record or a sequence.
///
/// Returns `None` when `collection` is a scalar and cannot hold entities.
pub fn find_entity(collection: &Content, id: i64) -> Option<(Lookup, Option<&Content>)> {
    match collection {
        Content::Record(by_id) => Some((Lookup::Keyed, by_id.get(id.to_string().as_str()))),
        Content::Collection(items) => Some((
            Lookup::Scan,
            items
                .iter()
                .find(|item| item.get("id").and_then(Content::as_integer) == Some(id)),
        )),
        Content::Scalar(_) => None,
    }
}
