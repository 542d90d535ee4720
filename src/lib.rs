//! # i18n-data
//!
//! Resolves a static site's data files into one ready-to-render view per
//! language. Two naming conventions in the data drive the rewrite:
//!
//! ```text
//! title_localized: { en: "Hello", fr: "Bonjour" }   →  title: "Bonjour"      (fr view)
//! author_id: 2                                      →  author: { id: 2, ... }
//! ```
//!
//! # Architecture: Two-Pass Rewrite
//!
//! ```text
//! _data/  →  load  →  raw tree  →  localize  →  associate  →  view per language
//! ```
//!
//! Both passes are the same generic [`walk`] over the tree with a different
//! rule plugged in. The association pass looks entities up in the output of
//! the localization pass, so an embedded author already has its `bio` in the
//! right language.
//!
//! The core ([`walk`], [`localize`], [`associate`], [`resolve`]) is pure and
//! infallible: it takes a borrowed tree and an explicit locale pair and
//! returns a new tree. Loading files, configuration and the CLI sit around
//! it and are the only places that can fail.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | The Record / Collection / Scalar tree type |
//! | [`naming`] | `_localized` / `_id` suffix predicates and pluralization |
//! | [`walk`] | Generic recursive rewrite with a pluggable rule |
//! | [`localize`] | Rule: pick the active or default locale variant |
//! | [`associate`] | Rule: replace an id with the referenced entity |
//! | [`resolve`] | Pipeline: localize then associate, per language |
//! | [`config`] | `config.toml` loading, merging over defaults, validation |
//! | [`data`] | Data directory loading and view writing |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Misses Become Null
//!
//! A field with neither the active nor the default locale, or a reference to
//! an id that does not exist, resolves to `null` instead of failing the
//! build. One bad record should not block the rest of the site. Misses are
//! counted and reported by the CLI, and logged at `debug` level.
//!
//! ## Ordinary Data Stays Ordinary
//!
//! The suffixes only act when the value has the expected shape: a record for
//! `_localized`, an integer for `_id`, and an existing collection to look in.
//! Anything else (`video_id: "dQw4w9WgXcQ"`) passes through untouched.
//!
//! ## Explicit Plurals
//!
//! `author_id` looks in `authors`. Irregular nouns are listed in the
//! `[plurals]` config table rather than guessed.
//!
//! ## Keeping Original Keys
//!
//! Templates written against older data sometimes read `title_localized`
//! directly. `resolve.retain_original_keys` keeps the original entry next to
//! its rewrite for those sites; the default is to replace.

pub mod associate;
pub mod config;
pub mod content;
pub mod data;
pub mod localize;
pub mod naming;
pub mod output;
pub mod resolve;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_helpers;
