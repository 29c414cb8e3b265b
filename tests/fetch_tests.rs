//! Integration tests for the fetch-and-cache loop, driven through stub
//! lookup services so no network is involved.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

use posterfetch::application::fetch::{run_fetch, FetchOptions};
use posterfetch::domain::error::PosterError;
use posterfetch::domain::model::MovieRecord;
use posterfetch::domain::traits::PosterLookup;
use posterfetch::infrastructure::storage::cache::PosterCache;

enum Scripted {
    Url(&'static str),
    NoPoster,
    TransportError,
}

/// Stub lookup with per-title scripted outcomes and a call log.
struct ScriptedLookup {
    responses: HashMap<&'static str, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedLookup {
    fn new(responses: Vec<(&'static str, Scripted)>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PosterLookup for ScriptedLookup {
    async fn lookup(&self, title: &str, _year: &str) -> Result<Option<String>, PosterError> {
        self.calls.lock().unwrap().push(title.to_string());
        match self.responses.get(title) {
            Some(Scripted::Url(url)) => Ok(Some(url.to_string())),
            Some(Scripted::NoPoster) | None => Ok(None),
            Some(Scripted::TransportError) => {
                Err(PosterError::Io(std::io::Error::other("connection timed out")))
            }
        }
    }
}

/// Stub that records how many entries the cache file holds on disk at the
/// moment of each lookup, to observe the periodic flush cadence mid-run.
struct DiskObservingLookup {
    cache_path: PathBuf,
    observed: Mutex<Vec<usize>>,
}

#[async_trait]
impl PosterLookup for DiskObservingLookup {
    async fn lookup(&self, title: &str, _year: &str) -> Result<Option<String>, PosterError> {
        let on_disk = fs::read_to_string(&self.cache_path)
            .ok()
            .and_then(|s| serde_json::from_str::<BTreeMap<String, Option<String>>>(&s).ok())
            .map(|m| m.len())
            .unwrap_or(0);
        self.observed.lock().unwrap().push(on_disk);
        Ok(Some(format!("https://example.com/{}.jpg", title)))
    }
}

fn opts(flush_every: usize) -> FetchOptions {
    FetchOptions {
        flush_every,
        delay: Duration::ZERO,
        retry_missing: false,
    }
}

fn read_cache_file(path: &std::path::Path) -> BTreeMap<String, Option<String>> {
    serde_json::from_str(&fs::read_to_string(path).expect("cache file should exist"))
        .expect("cache file should be valid JSON")
}

#[tokio::test]
async fn idempotence_second_run_makes_no_calls() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("posters.json");
    let records = vec![MovieRecord::new("A", "2000"), MovieRecord::new("B", "2001")];

    let first = ScriptedLookup::new(vec![
        ("A", Scripted::Url("urlA")),
        ("B", Scripted::NoPoster),
    ]);
    let mut cache = PosterCache::load(&path).unwrap();
    run_fetch(&mut cache, &records, &first, &opts(10)).await.unwrap();
    assert_eq!(first.call_count(), 2);
    let after_first = read_cache_file(&path);

    // Second run over the same input: everything is cached, including the
    // not-found marker for B.
    let second = ScriptedLookup::new(vec![]);
    let mut cache = PosterCache::load(&path).unwrap();
    let summary = run_fetch(&mut cache, &records, &second, &opts(10)).await.unwrap();

    assert_eq!(second.call_count(), 0);
    assert_eq!(summary.fetched, 0);
    assert_eq!(read_cache_file(&path), after_first);
}

#[tokio::test]
async fn merge_preserves_prepopulated_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("posters.json");
    fs::write(&path, r#"{"A": "urlA"}"#).unwrap();

    let records = vec![MovieRecord::new("A", "2000"), MovieRecord::new("B", "2001")];
    let lookup = ScriptedLookup::new(vec![("B", Scripted::Url("urlB"))]);

    let mut cache = PosterCache::load(&path).unwrap();
    let summary = run_fetch(&mut cache, &records, &lookup, &opts(10)).await.unwrap();

    assert_eq!(lookup.calls(), vec!["B".to_string()]);
    let expected: BTreeMap<String, Option<String>> = BTreeMap::from([
        ("A".to_string(), Some("urlA".to_string())),
        ("B".to_string(), Some("urlB".to_string())),
    ]);
    assert_eq!(read_cache_file(&path), expected);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.found, 2);
    assert_eq!(summary.missing, 0);
}

#[tokio::test]
async fn not_found_is_cached_as_null_and_counted_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("posters.json");
    let records = vec![MovieRecord::new("C", "1999")];
    let lookup = ScriptedLookup::new(vec![("C", Scripted::NoPoster)]);

    let mut cache = PosterCache::load(&path).unwrap();
    let summary = run_fetch(&mut cache, &records, &lookup, &opts(10)).await.unwrap();

    assert_eq!(read_cache_file(&path).get("C"), Some(&None));
    assert_eq!(summary.found, 0);
    assert_eq!(summary.missing, 1);
    assert_eq!(summary.failed, 0);
}

#[tokio::test]
async fn transport_error_is_tolerated_and_cached_as_null() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("posters.json");
    let records = vec![MovieRecord::new("D", "1984"), MovieRecord::new("E", "1985")];
    let lookup = ScriptedLookup::new(vec![
        ("D", Scripted::TransportError),
        ("E", Scripted::Url("urlE")),
    ]);

    let mut cache = PosterCache::load(&path).unwrap();
    let summary = run_fetch(&mut cache, &records, &lookup, &opts(10)).await.unwrap();

    // The failed item does not abort the run; the item after it still runs.
    assert_eq!(lookup.call_count(), 2);
    assert_eq!(read_cache_file(&path).get("D"), Some(&None));
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.found, 1);
    assert_eq!(summary.missing, 1);
}

#[tokio::test]
async fn periodic_flush_every_ten_items() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("posters.json");
    let records: Vec<MovieRecord> = (0..25)
        .map(|i| MovieRecord::new(format!("Movie {:02}", i), "2000"))
        .collect();

    let lookup = DiskObservingLookup {
        cache_path: path.clone(),
        observed: Mutex::new(Vec::new()),
    };

    let mut cache = PosterCache::load(&path).unwrap();
    run_fetch(&mut cache, &records, &lookup, &opts(10)).await.unwrap();

    let observed = lookup.observed.lock().unwrap().clone();
    assert_eq!(observed.len(), 25);
    // No flush before item 10: the file does not exist yet.
    assert_eq!(observed[9], 0);
    // Flushes after items 10 and 20 are visible to the next lookup.
    assert_eq!(observed[10], 10);
    assert_eq!(observed[20], 20);
    // Final unconditional flush covers the modulo remainder.
    assert_eq!(read_cache_file(&path).len(), 25);
}

#[tokio::test]
async fn duplicate_title_later_row_wins() {
    struct YearEcho;

    #[async_trait]
    impl PosterLookup for YearEcho {
        async fn lookup(&self, _title: &str, year: &str) -> Result<Option<String>, PosterError> {
            Ok(Some(format!("url-{}", year)))
        }
    }

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("posters.json");
    let records = vec![MovieRecord::new("X", "2000"), MovieRecord::new("X", "2005")];

    let mut cache = PosterCache::load(&path).unwrap();
    let summary = run_fetch(&mut cache, &records, &YearEcho, &opts(10)).await.unwrap();

    // Both rows are pending on a cold cache; the later one overwrites.
    assert_eq!(summary.fetched, 2);
    assert_eq!(
        read_cache_file(&path).get("X"),
        Some(&Some("url-2005".to_string()))
    );
}

#[tokio::test]
async fn retry_missing_requeues_null_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("posters.json");
    fs::write(&path, r#"{"A": "urlA", "B": null}"#).unwrap();

    let records = vec![MovieRecord::new("A", "2000"), MovieRecord::new("B", "2001")];
    let lookup = ScriptedLookup::new(vec![("B", Scripted::Url("urlB"))]);

    let mut cache = PosterCache::load(&path).unwrap();
    let fetch_opts = FetchOptions {
        retry_missing: true,
        ..opts(10)
    };
    let summary = run_fetch(&mut cache, &records, &lookup, &fetch_opts).await.unwrap();

    assert_eq!(lookup.calls(), vec!["B".to_string()]);
    assert_eq!(
        read_cache_file(&path).get("B"),
        Some(&Some("urlB".to_string()))
    );
    assert_eq!(summary.found, 2);
}

#[tokio::test]
async fn final_flush_happens_even_with_no_pending_items() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("posters.json");
    let records: Vec<MovieRecord> = Vec::new();
    let lookup = ScriptedLookup::new(vec![]);

    let mut cache = PosterCache::load(&path).unwrap();
    let summary = run_fetch(&mut cache, &records, &lookup, &opts(10)).await.unwrap();

    assert_eq!(lookup.call_count(), 0);
    assert_eq!(summary.total, 0);
    assert!(path.exists(), "run completion always persists the cache");
    assert!(read_cache_file(&path).is_empty());
}
