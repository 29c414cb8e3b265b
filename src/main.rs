// Main entry point
use std::time::Duration;

use clap::Parser;
use colored::Colorize;

use posterfetch::application::fetch::{run_fetch, FetchOptions};
use posterfetch::application::status::print_status;
use posterfetch::infrastructure::config::{self, load_config, Logging};
use posterfetch::infrastructure::input::read_movie_list;
use posterfetch::infrastructure::network::{http, OmdbClient};
use posterfetch::infrastructure::storage::cache::PosterCache;
use posterfetch::interfaces::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config()?;

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    // Handle commands (flags)
    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }
    if cli.status {
        print_status(&config)?;
        return Ok(());
    }

    // Preconditions, checked before any cache or network I/O.
    let api_key = match config::resolve_api_key(cli.api_key.as_deref(), &config) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            std::process::exit(1);
        }
    };

    let Some(input) = cli.input else {
        eprintln!("{}", "Please provide a movie list CSV".red());
        std::process::exit(1);
    };
    if !input.exists() {
        eprintln!("{}", format!("{} not found.", input.display()).red());
        std::process::exit(1);
    }

    let records = read_movie_list(&input)?;

    let cache_path = cli.cache.unwrap_or_else(|| config.cache_path.clone());
    let mut cache = PosterCache::load(cache_path)?;
    if !cache.is_empty() {
        println!("Loaded {} cached posters", cache.len());
    }

    let client = http::create_client()?;
    let lookup = OmdbClient::new(
        client,
        config.endpoint.clone(),
        api_key,
        Duration::from_secs(config.timeout_secs),
    );

    let mut opts = FetchOptions::from_config(&config);
    if let Some(ms) = cli.delay_ms {
        opts.delay = Duration::from_millis(ms);
    }
    if let Some(n) = cli.flush_every {
        opts.flush_every = n;
    }
    opts.retry_missing = cli.retry_missing;

    let summary = run_fetch(&mut cache, &records, &lookup, &opts).await?;

    println!();
    println!("{}", "Done.".green().bold());
    println!("Movies:        {}", summary.total);
    println!("Posters found: {}", summary.found.to_string().green());
    println!("Missing:       {}", summary.missing.to_string().yellow());
    if summary.failed > 0 {
        println!(
            "{}",
            format!(
                "{} lookups failed this run and were cached as missing; re-run with --retry-missing to retry them.",
                summary.failed
            )
            .yellow()
        );
    }
    println!("Saved to:      {}", cache.path().display());

    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt().with_env_filter(filter).init();

    Ok(())
}
