//! Centralized key parsing for the data naming conventions.
//!
//! Two suffixes turn an ordinary data key into a resolution directive:
//!
//! - `title_localized: { en: ..., fr: ... }` is a per-locale field that
//!   becomes `title`.
//! - `author_id: 2` is a reference that becomes `author`, looked up in the
//!   `authors` collection.
//!
//! Both predicates return the base name with the suffix stripped, or `None`
//! when the key does not carry the suffix. A key that is *only* the suffix
//! (`_id`) has no base and never matches.
//!
//! ## Plurals
//!
//! The collection a reference points into is the relation name made plural.
//! The default is a bare `+s` (`author` → `authors`, `category` →
//! `categorys`). Irregular nouns are not guessed: they are listed explicitly
//! in a [`PluralTable`], normally filled from the `[plurals]` config table.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Default suffix marking a per-locale field.
pub const LOCALIZED_SUFFIX: &str = "_localized";

/// Default suffix marking a reference by id.
pub const FOREIGN_KEY_SUFFIX: &str = "_id";

/// Turns a relation name into the key of the collection holding it.
pub trait Pluralize: fmt::Debug + Send + Sync {
    fn pluralize(&self, singular: &str) -> String;
}

/// Appends `s`. No irregular handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaivePlural;

impl Pluralize for NaivePlural {
    fn pluralize(&self, singular: &str) -> String {
        format!("{singular}s")
    }
}

/// Explicit irregular plurals with a naive `+s` fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralTable {
    irregular: BTreeMap<String, String>,
}

impl PluralTable {
    pub fn new(irregular: BTreeMap<String, String>) -> Self {
        Self { irregular }
    }

    /// Add one irregular pair, builder style.
    pub fn with(mut self, singular: impl Into<String>, plural: impl Into<String>) -> Self {
        self.irregular.insert(singular.into(), plural.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.irregular.is_empty()
    }
}

impl Pluralize for PluralTable {
    fn pluralize(&self, singular: &str) -> String {
        match self.irregular.get(singular) {
            Some(plural) => plural.clone(),
            None => NaivePlural.pluralize(singular),
        }
    }
}

/// The naming conventions a resolution runs with.
///
/// Suffixes are used as given; an empty suffix would match every key, so
/// callers loading them from config validate first (see
/// [`SiteConfig::validate`](crate::config::SiteConfig::validate)).
#[derive(Debug, Clone)]
pub struct KeyNaming {
    localized_suffix: String,
    foreign_key_suffix: String,
    plurals: Arc<dyn Pluralize>,
}

impl Default for KeyNaming {
    fn default() -> Self {
        Self {
            localized_suffix: LOCALIZED_SUFFIX.to_string(),
            foreign_key_suffix: FOREIGN_KEY_SUFFIX.to_string(),
            plurals: Arc::new(NaivePlural),
        }
    }
}

impl KeyNaming {
    pub fn new(localized_suffix: impl Into<String>, foreign_key_suffix: impl Into<String>) -> Self {
        Self {
            localized_suffix: localized_suffix.into(),
            foreign_key_suffix: foreign_key_suffix.into(),
            ..Self::default()
        }
    }

    /// Replace the pluralization strategy.
    pub fn with_plurals(mut self, plurals: impl Pluralize + 'static) -> Self {
        self.plurals = Arc::new(plurals);
        self
    }

    pub fn localized_suffix(&self) -> &str {
        &self.localized_suffix
    }

    pub fn foreign_key_suffix(&self) -> &str {
        &self.foreign_key_suffix
    }

    /// `"title_localized"` → `Some("title")`.
    ///
    /// Repeated suffixes are all stripped (`"title_localized_localized"` →
    /// `"title"`), so a resolved key never carries the marker again.
    pub fn localized_base<'a>(&self, key: &'a str) -> Option<&'a str> {
        let mut base = strip_marker(key, &self.localized_suffix)?;
        while let Some(inner) = strip_marker(base, &self.localized_suffix) {
            base = inner;
        }
        Some(base)
    }

    /// `"author_id"` → `Some("author")`.
    pub fn foreign_key_base<'a>(&self, key: &'a str) -> Option<&'a str> {
        strip_marker(key, &self.foreign_key_suffix)
    }

    /// Collection key for a relation: `"author"` → `"authors"`.
    pub fn pluralize(&self, relation: &str) -> String {
        self.plurals.pluralize(relation)
    }
}

fn strip_marker<'a>(key: &'a str, suffix: &str) -> Option<&'a str> {
    key.strip_suffix(suffix).filter(|base| !base.is_empty())
}
