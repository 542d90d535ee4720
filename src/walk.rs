//! Generic recursive rewrite over a content tree.
//!
//! [`walk`] rebuilds a tree, offering every record entry to a rule. When the
//! rule declines, the walker descends into the value. When the rule returns a
//! [`Rewrite`], the new entry is stored as-is and not descended into: the rule
//! has already produced its final value.
//!
//! ```text
//! { "posts": [ { "title_localized": {..}, "author_id": 2 } ] }
//!      │            │                        │
//!      │ declined   │ rewritten → "title"    │ declined (by this rule)
//!      ▼            ▼                        ▼
//!   descend      stored, not descended    descend (scalar, copied)
//! ```
//!
//! The input is borrowed and never modified. Collections keep their length
//! and order; scalars are copied through.

use crate::content::{Content, Record};
use serde::{Deserialize, Serialize};

/// Replacement entry produced by a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    pub key: String,
    pub value: Content,
}

impl Rewrite {
    pub fn new(key: impl Into<String>, value: Content) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// What happens to the original entry when a rule rewrites it.
///
/// Some sites' templates read both `title` and `title_localized`, others only
/// the rewritten key, so this is a switch rather than a fixed behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetainPolicy {
    /// Only the rewritten entry appears in the output.
    #[default]
    Replace,
    /// The original key and its untouched value follow the rewritten entry.
    KeepOriginal,
}

/// Rebuild `tree`, applying `rule` at every record entry.
pub fn walk<F>(tree: &Content, policy: RetainPolicy, rule: &mut F) -> Content
where
    F: FnMut(&str, &Content) -> Option<Rewrite>,
{
    match tree {
        Content::Record(record) => {
            let mut out = Record::with_capacity(record.len());
            for (key, value) in record {
                match rule(key, value) {
                    None => {
                        let walked = walk(value, policy, rule);
                        out.insert(key.clone(), walked);
                    }
                    Some(rewrite) => {
                        out.insert(rewrite.key, rewrite.value);
                        if policy == RetainPolicy::KeepOriginal {
                            out.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
            Content::Record(out)
        }
        Content::Collection(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(walk(item, policy, rule));
            }
            Content::Collection(out)
        }
        Content::Scalar(_) => tree.clone(),
    }
}
