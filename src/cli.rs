use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "vodx",
    about = "Find highlight moments in Twitch VODs from chat activity",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Streamer usernames (reads from stdin if no names and no --file given)
    pub usernames: Vec<String>,

    /// File with one username per line
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Analyze a specific VOD URL directly, skipping the latest-VOD lookup
    #[arg(long)]
    pub vod: Vec<String>,

    /// Bucket length in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub interval: Option<u32>,

    /// Number of highlights to pick per VOD
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub highlights: Option<u32>,

    /// Seconds to rewind each highlight link before the spike
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub preroll: Option<u32>,

    /// Warm-up/cool-down minutes trimmed from each end of the VOD
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub trim_minutes: Option<u32>,

    /// Directory holding saved chat logs (<vod_id>.txt)
    #[arg(short, long)]
    pub chatlog_dir: Option<PathBuf>,

    /// Output format: text (default), json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show per-VOD diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}
