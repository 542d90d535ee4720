//! The content tree every other module works on.
//!
//! A loaded data directory is a tree of three shapes:
//!
//! ```text
//! Record       { "authors": [...], "site": { ... } }   ordered key → Content
//! Collection   [ {...}, {...} ]                         ordered Content
//! Scalar       "text" | 42 | 1.5 | true | null
//! ```
//!
//! Records are backed by [`IndexMap`], so key order is insertion order. This
//! matters for rendering: templates iterate records and expect the order the
//! author wrote. Loading goes through `serde_json`/`toml` with their
//! `preserve_order` features for the same reason.
//!
//! Numbers keep their [`serde_json::Number`] representation, so `3` and `3.0`
//! stay distinct and round-trip unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// Ordered mapping from key to subtree.
pub type Record = IndexMap<String, Content>;

/// A node of the content tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Content {
    Record(Record),
    Collection(Vec<Content>),
    Scalar(Scalar),
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Default for Content {
    fn default() -> Self {
        Content::Scalar(Scalar::Null)
    }
}

impl Content {
    /// The null scalar, used wherever a lookup comes back empty.
    pub fn null() -> Self {
        Content::Scalar(Scalar::Null)
    }

    /// An empty record.
    pub fn empty_record() -> Self {
        Content::Record(Record::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Content::Scalar(Scalar::Null))
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Content::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&[Content]> {
        match self {
            Content::Collection(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Content::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// The value as an integer id.
    ///
    /// Only integral numbers that fit in `i64` qualify. Floats (even `2.0`),
    /// numeric strings and booleans do not.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Content::Scalar(Scalar::Number(n)) => n.as_i64(),
            _ => None,
        }
    }

    /// Look up `key` when this node is a record.
    pub fn get(&self, key: &str) -> Option<&Content> {
        self.as_record().and_then(|record| record.get(key))
    }

    /// Short label for the node's shape, used in CLI output and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Content::Record(_) => "record",
            Content::Collection(_) => "collection",
            Content::Scalar(Scalar::Null) => "null",
            Content::Scalar(Scalar::Bool(_)) => "bool",
            Content::Scalar(Scalar::Number(_)) => "number",
            Content::Scalar(Scalar::String(_)) => "string",
        }
    }
}

impl From<serde_json::Value> for Content {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Content::null(),
            Value::Bool(b) => Content::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Content::Scalar(Scalar::Number(n)),
            Value::String(s) => Content::Scalar(Scalar::String(s)),
            Value::Array(items) => Content::Collection(items.into_iter().map(Content::from).collect()),
            Value::Object(map) => Content::Record(
                map.into_iter()
                    .map(|(key, value)| (key, Content::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<toml::Value> for Content {
    fn from(value: toml::Value) -> Self {
        use toml::Value;
        match value {
            Value::String(s) => Content::Scalar(Scalar::String(s)),
            Value::Integer(i) => Content::Scalar(Scalar::Number(i.into())),
            // NaN and infinities have no JSON form
            Value::Float(f) => Number::from_f64(f)
                .map(|n| Content::Scalar(Scalar::Number(n)))
                .unwrap_or_default(),
            Value::Boolean(b) => Content::Scalar(Scalar::Bool(b)),
            Value::Datetime(dt) => Content::Scalar(Scalar::String(dt.to_string())),
            Value::Array(items) => Content::Collection(items.into_iter().map(Content::from).collect()),
            Value::Table(table) => Content::Record(
                table
                    .into_iter()
                    .map(|(key, value)| (key, Content::from(value)))
                    .collect(),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Content::from)
    }
}

impl From<Record> for Content {
    fn from(record: Record) -> Self {
        Content::Record(record)
    }
}

impl From<Vec<Content>> for Content {
    fn from(items: Vec<Content>) -> Self {
        Content::Collection(items)
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Scalar(Scalar::String(s))
    }
}

impl From<i64> for Content {
    fn from(i: i64) -> Self {
        Content::Scalar(Scalar::Number(i.into()))
    }
}

impl From<bool> for Content {
    fn from(b: bool) -> Self {
        Content::Scalar(Scalar::Bool(b))
    }
}
