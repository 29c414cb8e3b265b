use crate::domain::error::PosterError;
use async_trait::async_trait;

/// Trait for remote poster lookup services
///
/// The three outcomes stay distinct at this seam and collapse to the same
/// null cache value: `Ok(Some(url))` is a poster, `Ok(None)` is a definitive
/// "no poster for this title," and `Err` is a transport or payload failure
/// that the run loop logs and tolerates.
#[async_trait]
pub trait PosterLookup {
    /// Look up the poster URL for a title/year pair.
    async fn lookup(&self, title: &str, year: &str) -> Result<Option<String>, PosterError>;
}
