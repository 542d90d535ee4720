//! Data directory loading and view writing.
//!
//! The data directory becomes one [`Content`] record. Each file is keyed by
//! its stem; each subdirectory becomes a nested record:
//!
//! ```text
//! _data/
//! ├── authors.json        → root.authors
//! ├── site.toml           → root.site
//! ├── blog/
//! │   └── series.json     → root.blog.series
//! ├── notes.md            (ignored: not a data format)
//! └── .draft.json         (ignored: hidden)
//! ```
//!
//! Entries are visited in file-name order, so the root record's key order is
//! stable across machines. Decoding is delegated to `serde_json` and `toml`.

use crate::content::{Content, Record};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("JSON encoding error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Data path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Supported data file formats, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Toml,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "json" => Some(DataFormat::Json),
            "toml" => Some(DataFormat::Toml),
            _ => None,
        }
    }
}

/// Load every data file under `dir` into one record.
///
/// A missing directory yields an empty record: a site without data is valid.
pub fn load_data_dir(dir: &Path) -> Result<Content, DataError> {
    if !dir.exists() {
        debug!(dir = %dir.display(), "no data directory");
        return Ok(Content::empty_record());
    }
    if !dir.is_dir() {
        return Err(DataError::NotADirectory(dir.to_path_buf()));
    }

    let mut root = Record::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(format) = DataFormat::from_path(entry.path()) else {
            continue;
        };
        let Ok(rel) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let content = load_data_file(entry.path(), format)?;
        debug!(file = %rel.display(), kind = content.kind(), "loaded data file");
        insert_at(&mut root, rel, content);
    }
    Ok(Content::Record(root))
}

/// Decode a single data file.
pub fn load_data_file(path: &Path, format: DataFormat) -> Result<Content, DataError> {
    let text = fs::read_to_string(path)?;
    match format {
        DataFormat::Json => serde_json::from_str::<serde_json::Value>(&text)
            .map(Content::from)
            .map_err(|source| DataError::Json {
                path: path.to_path_buf(),
                source,
            }),
        DataFormat::Toml => toml::from_str::<toml::Table>(&text)
            .map(|table| Content::from(toml::Value::Table(table)))
            .map_err(|source| DataError::Toml {
                path: path.to_path_buf(),
                source,
            }),
    }
}

/// Write a resolved view as pretty JSON, creating parent directories.
pub fn write_json(content: &Content, path: &Path) -> Result<(), DataError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(content)?;
    fs::write(path, json)?;
    Ok(())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Place `content` at the namespace given by `rel`'s directories and stem.
fn insert_at(root: &mut Record, rel: &Path, content: Content) {
    let mut node = root;
    if let Some(parent) = rel.parent() {
        for component in parent.components() {
            let name = component.as_os_str().to_string_lossy().to_string();
            let slot = node.entry(name).or_insert_with(Content::empty_record);
            if !matches!(slot, Content::Record(_)) {
                warn!(namespace = %parent.display(), "data directory replaces a file with the same name");
                *slot = Content::empty_record();
            }
            let Content::Record(next) = slot else {
                return;
            };
            node = next;
        }
    }
    let stem = rel
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    if node.contains_key(&stem) {
        warn!(file = %rel.display(), "data file replaces an existing entry with the same name");
    }
    node.insert(stem, content);
}
