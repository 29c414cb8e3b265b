use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "posterfetch")]
#[command(about = "Fetch and cache movie poster URLs from OMDb.")]
#[command(version)]
pub struct Cli {
    /// Movie list CSV with `title` and `year` columns
    pub input: Option<PathBuf>,

    /// Cache file path (overrides the config file)
    #[arg(short = 'c', long)]
    pub cache: Option<PathBuf>,

    /// OMDb API key (overrides $OMDB_API_KEY and the config file)
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Delay between lookups in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Flush the cache after every N processed items
    #[arg(long)]
    pub flush_every: Option<usize>,

    /// Re-attempt titles cached without a poster
    #[arg(long)]
    pub retry_missing: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Show cache and config status
    #[arg(long)]
    pub status: bool,
}
