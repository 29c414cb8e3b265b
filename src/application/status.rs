use crate::domain::error::PosterError;
use crate::infrastructure::config::{self, Config};
use crate::infrastructure::storage::cache::PosterCache;
use colored::Colorize;

/// Prints cache and configuration status for `--status`.
pub fn print_status(config: &Config) -> Result<(), PosterError> {
    println!("{}", "posterfetch Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if config.cache_path.exists() {
        let cache = PosterCache::load(&config.cache_path)?;
        println!(
            "Cache: {} ({} entries, {} found, {} missing)",
            cache.path().display(),
            cache.len(),
            cache.found_count(),
            cache.missing_count()
        );
    } else {
        println!("Cache: {} (not created yet)", config.cache_path.display());
    }

    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );

    if config::resolve_api_key(None, config).is_ok() {
        println!("OMDb API key: Configured");
    } else {
        println!("OMDb API key: Not configured");
    }

    Ok(())
}
