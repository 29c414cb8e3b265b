//! Persisted poster cache
//!
//! A flat JSON object mapping movie title to poster URL, with `null` meaning
//! "looked up, nothing found." The whole map lives in memory during a run and
//! every flush rewrites the file in full; nothing is appended incrementally.

use crate::domain::error::PosterError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct PosterCache {
    path: PathBuf,
    entries: BTreeMap<String, Option<String>>,
}

impl PosterCache {
    /// Loads the cache from `path`.
    ///
    /// An absent file yields an empty cache. A file that exists but does not
    /// parse is a hard error: silently discarding a corrupt cache would
    /// re-spend every lookup, so it is left for the user to resolve.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PosterError> {
        let path = path.into();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| {
                PosterError::Cache(format!(
                    "Cache file {} is malformed ({}). Fix or remove it manually.",
                    path.display(),
                    e
                ))
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the title has been looked up before, found or not.
    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    pub fn get(&self, title: &str) -> Option<&Option<String>> {
        self.entries.get(title)
    }

    pub fn insert(&mut self, title: String, poster: Option<String>) {
        self.entries.insert(title, poster);
    }

    /// Rewrites the cache file in full as pretty-printed JSON, creating the
    /// parent directory if needed.
    pub fn flush(&self) -> Result<(), PosterError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries holding a poster URL.
    pub fn found_count(&self) -> usize {
        self.entries.values().filter(|v| v.is_some()).count()
    }

    /// Entries cached as "looked up, nothing found."
    pub fn missing_count(&self) -> usize {
        self.entries.values().filter(|v| v.is_none()).count()
    }
}
