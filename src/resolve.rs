//! The resolution pipeline: localization, then association.
//!
//! ```text
//! raw tree ──walk(localize)──▶ localized tree ──walk(associate, root = localized)──▶ view
//! ```
//!
//! Associations are looked up in the *localized* tree. An embedded author
//! therefore carries `bio`, not `bio_localized`, and lookups see keys with
//! their suffixes already stripped.
//!
//! Resolution never fails. Missing locale variants and dangling references
//! become `null` and are counted in [`ResolveStats`] so the CLI can report
//! them.
//!
//! Each call is a pure function of its inputs, so [`resolve_languages`]
//! produces every language view of one tree in parallel.

use crate::associate::associate;
use crate::content::Content;
use crate::localize::{LocaleSource, Locales, localize};
use crate::naming::KeyNaming;
use crate::walk::{RetainPolicy, walk};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, trace};

/// Knobs for a resolution run.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub retain: RetainPolicy,
    pub naming: KeyNaming,
}

/// Counts of what a resolution did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolveStats {
    /// `*_localized` fields rewritten.
    pub localized: usize,
    /// Of those, how many used the default locale.
    pub fallbacks: usize,
    /// Of those, how many had neither locale and became null.
    pub missing_locales: usize,
    /// `*_id` fields rewritten.
    pub associated: usize,
    /// Of those, how many pointed at no entity and became null.
    pub missing_associations: usize,
}

impl ResolveStats {
    pub fn unresolved(&self) -> usize {
        self.missing_locales + self.missing_associations
    }
}

/// A resolved view and what it took to get there.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub content: Content,
    pub stats: ResolveStats,
}

/// Resolve `tree` for one locale pair.
pub fn resolve(tree: &Content, locales: &Locales, options: &ResolveOptions) -> Resolution {
    let mut stats = ResolveStats::default();
    let localized = localize_tree(tree, locales, options, &mut stats);
    let content = associate_tree(&localized, options, &mut stats);
    debug!(
        locale = %locales.active,
        localized = stats.localized,
        associated = stats.associated,
        unresolved = stats.unresolved(),
        "resolved data tree"
    );
    Resolution { content, stats }
}

/// Replace every locale-variant field in `tree`.
pub fn localize_tree(
    tree: &Content,
    locales: &Locales,
    options: &ResolveOptions,
    stats: &mut ResolveStats,
) -> Content {
    walk(tree, options.retain, &mut |key: &str, value: &Content| {
        let field = localize(key, value, locales, &options.naming)?;
        stats.localized += 1;
        match field.source {
            LocaleSource::Active => {}
            LocaleSource::Default => stats.fallbacks += 1,
            LocaleSource::Missing => {
                stats.missing_locales += 1;
                debug!(key, active = %locales.active, default = %locales.default, "no locale variant");
            }
        }
        trace!(key, to = %field.rewrite.key, "localized");
        Some(field.into_rewrite())
    })
}

/// Replace every reference in `tree`, looking entities up in `tree` itself.
pub fn associate_tree(tree: &Content, options: &ResolveOptions, stats: &mut ResolveStats) -> Content {
    walk(tree, options.retain, &mut |key: &str, value: &Content| {
        let assoc = associate(key, value, tree, &options.naming)?;
        stats.associated += 1;
        if !assoc.found {
            stats.missing_associations += 1;
            debug!(key, id = ?value.as_integer(), lookup = ?assoc.lookup, "dangling reference");
        }
        trace!(key, to = %assoc.rewrite.key, "associated");
        Some(assoc.into_rewrite())
    })
}

/// Resolve `tree` once per language, in parallel, keyed in `languages` order.
pub fn resolve_languages(
    tree: &Content,
    languages: &[String],
    default_lang: &str,
    options: &ResolveOptions,
) -> IndexMap<String, Resolution> {
    let views: Vec<(String, Resolution)> = languages
        .par_iter()
        .map(|lang| {
            let locales = Locales::new(lang.as_str(), default_lang);
            let resolution = resolve(tree, &locales, options);
            info!(lang = %lang, unresolved = resolution.stats.unresolved(), "resolved language");
            (lang.clone(), resolution)
        })
        .collect();
    views.into_iter().collect()
}
