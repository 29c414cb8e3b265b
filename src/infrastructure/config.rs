use crate::domain::error::PosterError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Sample value written by `--generate-config`; never accepted as a real key.
pub const API_KEY_PLACEHOLDER: &str = "PASTE_YOUR_OMDB_KEY_HERE";

/// Environment variable consulted when no key is given on the command line.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout for poster lookups, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Politeness delay between consecutive lookups, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Flush the cache to disk after every N processed items.
    #[serde(default = "default_flush_every")]
    pub flush_every: usize,
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            delay_ms: default_delay_ms(),
            flush_every: default_flush_every(),
            cache_path: default_cache_path(),
            logging: Logging::default(),
        }
    }
}

// Defaults
fn default_api_key() -> String {
    API_KEY_PLACEHOLDER.to_string()
}
fn default_endpoint() -> String {
    "http://www.omdbapi.com/".to_string()
}
fn default_timeout_secs() -> u64 {
    8
}
fn default_delay_ms() -> u64 {
    250
}
fn default_flush_every() -> usize {
    10
}
fn default_cache_path() -> PathBuf {
    PathBuf::from("data/posters.json")
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("posterfetch").join("config.toml"))
}

pub fn load_config() -> Result<Config, PosterError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match toml::from_str::<Config>(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample() -> Result<(), PosterError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| PosterError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| PosterError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(PosterError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}

/// Resolves the API key, preferring the CLI flag over the `OMDB_API_KEY`
/// environment variable over the config file.
///
/// Fails when the winning value is empty or still the sample placeholder, so
/// the run aborts before any cache or network I/O.
pub fn resolve_api_key(cli_key: Option<&str>, config: &Config) -> Result<String, PosterError> {
    let env_key = std::env::var(API_KEY_ENV).ok();
    resolve_api_key_from(cli_key, env_key.as_deref(), config)
}

fn resolve_api_key_from(
    cli_key: Option<&str>,
    env_key: Option<&str>,
    config: &Config,
) -> Result<String, PosterError> {
    let key = cli_key
        .or(env_key)
        .unwrap_or(config.api_key.as_str())
        .trim();

    if key.is_empty() || key == API_KEY_PLACEHOLDER {
        return Err(PosterError::Config(format!(
            "OMDb API key not configured. Set it in {}, via ${}, or with --api-key.",
            get_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the config file".to_string()),
            API_KEY_ENV,
        )));
    }

    Ok(key.to_string())
}
