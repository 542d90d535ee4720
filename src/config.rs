//! Site configuration module.
//!
//! Handles loading, validating, and merging the site's `config.toml`. User
//! values are layered on top of stock defaults, so a config file only needs
//! the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! languages = ["en"]        # One resolved view is produced per language
//! default_lang = "en"       # Fallback locale; must be listed in `languages`
//! data_dir = "_data"        # Data directory, relative to the site root
//!
//! [resolve]
//! retain_original_keys = false      # Keep `title_localized` next to `title`
//! localized_suffix = "_localized"   # Marks per-locale fields
//! foreign_key_suffix = "_id"        # Marks references by id
//!
//! [plurals]
//! # category = "categories" # Irregular collection names (default: name + "s")
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::localize::Locales;
use crate::naming::{KeyNaming, PluralTable};
use crate::resolve::ResolveOptions;
use crate::walk::RetainPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Languages a resolved view is produced for, in output order.
    pub languages: Vec<String>,
    /// Locale used when a field has no variant for the active one.
    pub default_lang: String,
    /// Data directory relative to the site root.
    pub data_dir: String,
    /// Key conventions and rewrite policy.
    pub resolve: ResolveConfig,
    /// Irregular plurals: relation name → collection key.
    pub plurals: BTreeMap<String, String>,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            default_lang: "en".to_string(),
            data_dir: "_data".to_string(),
            resolve: ResolveConfig::default(),
            plurals: BTreeMap::new(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.languages.is_empty() {
            return Err(ConfigError::Validation("languages must not be empty".into()));
        }
        if let Some(lang) = self.languages.iter().find(|l| l.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "languages contains an empty entry: {lang:?}"
            )));
        }
        for (i, lang) in self.languages.iter().enumerate() {
            if self.languages[..i].contains(lang) {
                return Err(ConfigError::Validation(format!(
                    "languages lists '{lang}' more than once"
                )));
            }
        }
        if !self.languages.contains(&self.default_lang) {
            return Err(ConfigError::Validation(format!(
                "default_lang '{}' must be one of languages {:?}",
                self.default_lang, self.languages
            )));
        }
        if self.resolve.localized_suffix.is_empty() || self.resolve.foreign_key_suffix.is_empty() {
            return Err(ConfigError::Validation(
                "resolve suffixes must not be empty".into(),
            ));
        }
        if self.resolve.localized_suffix == self.resolve.foreign_key_suffix {
            return Err(ConfigError::Validation(
                "resolve.localized_suffix and resolve.foreign_key_suffix must differ".into(),
            ));
        }
        if let Some((singular, _)) = self
            .plurals
            .iter()
            .find(|(singular, plural)| singular.is_empty() || plural.is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "plurals entry '{singular}' must map a non-empty name to a non-empty collection"
            )));
        }
        Ok(())
    }

    /// Resolution options carried by this config.
    pub fn resolve_options(&self) -> ResolveOptions {
        let retain = if self.resolve.retain_original_keys {
            RetainPolicy::KeepOriginal
        } else {
            RetainPolicy::Replace
        };
        let naming = KeyNaming::new(
            self.resolve.localized_suffix.as_str(),
            self.resolve.foreign_key_suffix.as_str(),
        )
        .with_plurals(PluralTable::new(self.plurals.clone()));
        ResolveOptions { retain, naming }
    }

    /// Locale pair for one of the configured languages.
    pub fn locales_for(&self, lang: &str) -> Result<Locales, ConfigError> {
        if !self.languages.iter().any(|l| l == lang) {
            return Err(ConfigError::Validation(format!(
                "language '{lang}' is not configured; available: {:?}",
                self.languages
            )));
        }
        Ok(Locales::new(lang, self.default_lang.as_str()))
    }

    /// Absolute-or-relative path of the data directory under `root`.
    pub fn data_path(&self, root: &Path) -> PathBuf {
        root.join(&self.data_dir)
    }
}

/// Key conventions and rewrite policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveConfig {
    /// Keep the original `*_localized` / `*_id` entry next to its rewrite.
    pub retain_original_keys: bool,
    /// Suffix marking per-locale fields.
    pub localized_suffix: String,
    /// Suffix marking references by id.
    pub foreign_key_suffix: String,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            retain_original_keys: false,
            localized_suffix: crate::naming::LOCALIZED_SUFFIX.to_string(),
            foreign_key_suffix: crate::naming::FOREIGN_KEY_SUFFIX.to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of languages resolved at once.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores).max(1)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given site root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# i18n-data Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Languages to produce a resolved data view for, in output order.
languages = ["en"]

# Locale used when a field has no variant for the active language.
# Must be one of `languages`.
default_lang = "en"

# Data directory, relative to the site root. Every .json and .toml file in
# it becomes a key named after the file (subdirectories nest).
data_dir = "_data"

# ---------------------------------------------------------------------------
# Resolution
# ---------------------------------------------------------------------------
[resolve]
# Keep the original entry next to its rewrite, e.g. both `title` and
# `title_localized`, both `author` and `author_id`.
retain_original_keys = false

# `title_localized = { en = "...", fr = "..." }` becomes `title`.
localized_suffix = "_localized"

# `author_id = 2` becomes `author`, looked up in the `authors` collection.
foreign_key_suffix = "_id"

# ---------------------------------------------------------------------------
# Irregular plurals
# ---------------------------------------------------------------------------
# References look in the collection named `<relation>s`. List exceptions here.
[plurals]
# category = "categories"
# person = "people"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum languages resolved in parallel.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
