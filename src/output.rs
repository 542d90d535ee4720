//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Load
//!
//! ```text
//! Data: site/_data
//! 001 authors (2 entries)
//! 002 blog (1 key)
//! 003 site (3 keys)
//! ```
//!
//! ## Resolve
//!
//! ```text
//! en (default) → dist/en/data.json
//!     Localized: 7 (0 from default)
//!     Associated: 4
//! fr → dist/fr/data.json
//!     Localized: 7 (2 from default)
//!     Associated: 4
//!     Unresolved: 1 locale field, 1 reference
//!
//! Resolved 2 languages, 2 unresolved fields
//! ```
//!
//! # Architecture
//!
//! Each section has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::content::Content;
use crate::resolve::{Resolution, ResolveStats};
use indexmap::IndexMap;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `1 entry`, `2 entries`.
fn count(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Shape summary for a top-level data entry.
fn describe(content: &Content) -> String {
    match content {
        Content::Record(record) => count(record.len(), "key", "keys"),
        Content::Collection(items) => count(items.len(), "entry", "entries"),
        Content::Scalar(_) => content.kind().to_string(),
    }
}

// ============================================================================
// Load output
// ============================================================================

/// Format the loaded data tree: one line per top-level entry.
pub fn format_data_output(data: &Content, data_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!("Data: {}", data_dir.display())];
    match data.as_record() {
        Some(record) if !record.is_empty() => {
            for (i, (key, value)) in record.iter().enumerate() {
                lines.push(format!("{} {} ({})", format_index(i + 1), key, describe(value)));
            }
        }
        _ => lines.push("    (no data files)".to_string()),
    }
    lines
}

/// Print the loaded data tree to stdout.
pub fn print_data_output(data: &Content, data_dir: &Path) {
    for line in format_data_output(data, data_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Resolve output
// ============================================================================

/// Format one language's resolution: header plus indented counts.
pub fn format_resolve_output(
    lang: &str,
    is_default: bool,
    stats: &ResolveStats,
    written_to: Option<&Path>,
) -> Vec<String> {
    let marker = if is_default { " (default)" } else { "" };
    let header = match written_to {
        Some(path) => format!("{lang}{marker} → {}", path.display()),
        None => format!("{lang}{marker}"),
    };
    let mut lines = vec![
        header,
        format!(
            "    Localized: {} ({} from default)",
            stats.localized, stats.fallbacks
        ),
        format!("    Associated: {}", stats.associated),
    ];
    if stats.unresolved() > 0 {
        lines.push(format!(
            "    Unresolved: {}, {}",
            count(stats.missing_locales, "locale field", "locale fields"),
            count(stats.missing_associations, "reference", "references"),
        ));
    }
    lines
}

/// Print one language's resolution to stdout.
pub fn print_resolve_output(
    lang: &str,
    is_default: bool,
    stats: &ResolveStats,
    written_to: Option<&Path>,
) {
    for line in format_resolve_output(lang, is_default, stats, written_to) {
        println!("{}", line);
    }
}

/// Format the closing summary across all languages.
pub fn format_summary(views: &IndexMap<String, Resolution>) -> Vec<String> {
    let unresolved: usize = views.values().map(|v| v.stats.unresolved()).sum();
    vec![
        String::new(),
        format!(
            "Resolved {}, {}",
            count(views.len(), "language", "languages"),
            count(unresolved, "unresolved field", "unresolved fields"),
        ),
    ]
}

/// Print the closing summary to stdout.
pub fn print_summary(views: &IndexMap<String, Resolution>) {
    for line in format_summary(views) {
        println!("{}", line);
    }
}

/// Closing line of `check`: only clean data is reported valid.
pub fn format_check_result(views: &IndexMap<String, Resolution>) -> String {
    let unresolved: usize = views.values().map(|v| v.stats.unresolved()).sum();
    if unresolved == 0 {
        "==> Data is valid".to_string()
    } else {
        format!(
            "==> Checked: {}",
            count(unresolved, "unresolved field", "unresolved fields")
        )
    }
}
