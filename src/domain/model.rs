use serde::{Deserialize, Serialize};

// One row of the input movie list. `title` is the cache key; a later row
// with the same title overwrites the earlier one's cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: String,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
        }
    }
}

/// Counters reported at the end of a run.
///
/// `found`/`missing` are computed over the input records against the final
/// cache; `fetched` and `failed` cover only this run's network activity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Total input records.
    pub total: usize,
    /// Input records whose cache entry holds a poster URL.
    pub found: usize,
    /// Input records whose cache entry is null (no poster or lookup failed).
    pub missing: usize,
    /// Lookups performed this run.
    pub fetched: usize,
    /// Lookups that failed with a transport or payload error this run.
    /// These titles are cached as null; the failure survives only here
    /// and in the logs.
    pub failed: usize,
}
