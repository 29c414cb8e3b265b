// HTTP client utilities
use crate::domain::error::PosterError;
use reqwest::Client;

/// Create a default HTTP client with appropriate settings
///
/// Per-request timeouts are set by the caller; this only configures pooling
/// and the user agent.
pub fn create_client() -> Result<Client, PosterError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .user_agent(concat!("posterfetch/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
