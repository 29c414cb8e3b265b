//! The incremental fetch-and-cache loop
//!
//! Strictly sequential: one lookup at a time, a fixed politeness delay
//! between lookups, a full cache flush every `flush_every` items and once
//! unconditionally at the end. An individual lookup failure is logged,
//! cached as null, and never aborts the run.

use crate::domain::error::PosterError;
use crate::domain::model::{MovieRecord, RunSummary};
use crate::domain::traits::PosterLookup;
use crate::infrastructure::storage::cache::PosterCache;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Flush the cache to disk after every N processed items.
    pub flush_every: usize,
    /// Politeness delay between consecutive lookups.
    pub delay: Duration,
    /// Re-queue titles cached as null, so transient failures from an earlier
    /// run get another attempt.
    pub retry_missing: bool,
}

impl FetchOptions {
    pub fn from_config(config: &crate::infrastructure::config::Config) -> Self {
        Self {
            flush_every: config.flush_every,
            delay: Duration::from_millis(config.delay_ms),
            retry_missing: false,
        }
    }
}

/// Returns the records that still need a lookup, in input order.
///
/// A title already in the cache is settled, found or not. With
/// `retry_missing`, titles cached as null are treated as pending again.
pub fn pending_records<'a>(
    cache: &PosterCache,
    records: &'a [MovieRecord],
    retry_missing: bool,
) -> Vec<&'a MovieRecord> {
    records
        .iter()
        .filter(|r| match cache.get(&r.title) {
            None => true,
            Some(None) => retry_missing,
            Some(Some(_)) => false,
        })
        .collect()
}

/// Runs the batch fetch over `records`, mutating and flushing `cache`.
///
/// Returns the summary counters; `found`/`missing` are computed over the
/// input records against the final cache state, so already-cached titles
/// count too.
pub async fn run_fetch(
    cache: &mut PosterCache,
    records: &[MovieRecord],
    lookup: &dyn PosterLookup,
    opts: &FetchOptions,
) -> Result<RunSummary, PosterError> {
    let pending = pending_records(cache, records, opts.retry_missing);
    let flush_every = opts.flush_every.max(1);

    tracing::info!(
        "{} movies total, {} posters to fetch",
        records.len(),
        pending.len()
    );

    let pb = ProgressBar::new(pending.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .expect("progress template is static")
            .progress_chars("#>-"),
    );

    let mut fetched = 0;
    let mut failed = 0;

    for (i, record) in pending.iter().enumerate() {
        pb.set_message(format!("{} ({})", record.title, record.year));

        let poster = match lookup.lookup(&record.title, &record.year).await {
            Ok(Some(url)) => {
                tracing::debug!("poster found for '{}': {}", record.title, url);
                Some(url)
            }
            Ok(None) => {
                tracing::debug!("no poster for '{}' ({})", record.title, record.year);
                None
            }
            Err(e) => {
                // Tolerated per item: the failure survives in the logs and
                // the `failed` counter, the cache records a plain null.
                tracing::warn!("lookup failed for '{}': {}", record.title, e);
                failed += 1;
                None
            }
        };

        cache.insert(record.title.clone(), poster);
        fetched += 1;
        pb.inc(1);

        if (i + 1) % flush_every == 0 {
            cache.flush()?;
            tracing::debug!("progress saved after {} items", i + 1);
        }

        tokio::time::sleep(opts.delay).await;
    }

    cache.flush()?;
    pb.finish_and_clear();

    let mut summary = RunSummary {
        total: records.len(),
        fetched,
        failed,
        ..RunSummary::default()
    };
    for record in records {
        match cache.get(&record.title) {
            Some(Some(_)) => summary.found += 1,
            _ => summary.missing += 1,
        }
    }

    Ok(summary)
}
