use crate::domain::error::PosterError;
use crate::domain::traits::PosterLookup;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// OMDb's placeholder for a field with no usable content.
const NO_VALUE_SENTINEL: &str = "N/A";

// OMDb API response structure. Only the fields the fetcher interprets are
// modeled; everything else in the payload is ignored.
#[derive(Deserialize, Debug)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// OMDb poster lookup implementation
///
/// Holds its API key as an injected value; nothing here reads globals.
pub struct OmdbClient {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl OmdbClient {
    pub fn new(client: Client, endpoint: String, api_key: String, timeout: Duration) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            timeout,
        }
    }
}

#[async_trait]
impl PosterLookup for OmdbClient {
    async fn lookup(&self, title: &str, year: &str) -> Result<Option<String>, PosterError> {
        let params = [("t", title), ("y", year), ("apikey", self.api_key.as_str())];

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await?
            .json::<OmdbResponse>()
            .await?;

        Ok(interpret_response(response))
    }
}

// A negative status ("Movie not found!", invalid year, ...) is a definitive
// no-poster answer, not an error; only transport and payload failures reach
// the caller as Err.
fn interpret_response(response: OmdbResponse) -> Option<String> {
    if response.response != "True" {
        if let Some(msg) = response.error {
            tracing::debug!("OMDb negative response: {}", msg);
        }
        return None;
    }

    match response.poster {
        Some(poster) if !poster.is_empty() && poster != NO_VALUE_SENTINEL => Some(poster),
        _ => None,
    }
}
