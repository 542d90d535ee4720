//! Locale selection for `*_localized` fields.
//!
//! ```text
//! title_localized: { en: "Hello", fr: "Bonjour" }
//!
//!   active fr, default en  →  title: "Bonjour"
//!   active de, default en  →  title: "Hello"
//!   active de, default de  →  title: null
//! ```
//!
//! A null variant counts as missing, so `{ fr: null, en: "Hello" }` falls
//! back to English for a French view. A `*_localized` key whose value is not
//! a record is ordinary data and is left alone.

use crate::content::{Content, Record};
use crate::naming::KeyNaming;
use crate::walk::Rewrite;
use serde::{Deserialize, Serialize};

/// The locale pair a view is resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locales {
    pub active: String,
    pub default: String,
}

impl Locales {
    pub fn new(active: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            default: default.into(),
        }
    }

    /// Whether this view is the default-locale view.
    pub fn is_default(&self) -> bool {
        self.active == self.default
    }
}

/// Which variant a localized field resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    Active,
    Default,
    Missing,
}

/// A resolved `*_localized` field.
#[derive(Debug, Clone, PartialEq)]
pub struct Localized {
    pub rewrite: Rewrite,
    pub source: LocaleSource,
}

impl Localized {
    pub fn into_rewrite(self) -> Rewrite {
        self.rewrite
    }
}

/// Resolve one record entry if it is a locale-variant field.
pub fn localize(key: &str, value: &Content, locales: &Locales, naming: &KeyNaming) -> Option<Localized> {
    let base = naming.localized_base(key)?;
    let variants = value.as_record()?;
    let (source, selected) = select_variant(variants, locales);
    Some(Localized {
        rewrite: Rewrite::new(base, selected.cloned().unwrap_or_default()),
        source,
    })
}

/// Pick the active variant, else the default one.
pub fn select_variant<'a>(variants: &'a Record, locales: &Locales) -> (LocaleSource, Option<&'a Content>) {
    let present = |locale: &str| variants.get(locale).filter(|v| !v.is_null());
    if let Some(value) = present(&locales.active) {
        (LocaleSource::Active, Some(value))
    } else if let Some(value) = present(&locales.default) {
        (LocaleSource::Default, Some(value))
    } else {
        (LocaleSource::Missing, None)
    }
}
