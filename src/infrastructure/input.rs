// CSV movie list parsing
use crate::domain::error::PosterError;
use crate::domain::model::MovieRecord;
use std::path::Path;

/// Reads the movie list from a CSV file with `title` and `year` columns.
///
/// Extra columns are ignored, both fields are trimmed, and row order and
/// duplicates are preserved. A missing header or an unreadable row is a
/// hard error; this is the caller's input, not the cache.
pub fn read_movie_list(path: &Path) -> Result<Vec<MovieRecord>, PosterError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in reader.deserialize() {
        let record: MovieRecord = row?;
        records.push(MovieRecord {
            title: record.title.trim().to_string(),
            year: record.year.trim().to_string(),
        });
    }

    Ok(records)
}
