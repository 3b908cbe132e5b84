use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;

use eyre::{Result, bail};
use log::{debug, info, warn};

mod cli;

use cli::{Cli, OutputFormat};
use vodx::highlights::{Outcome, Params};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("vodx.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vodx")
        .join("logs")
}

/// Retry an async operation with exponential backoff
async fn retry<F, Fut, T>(max_attempts: u32, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut last_err = None;
    for attempt in 0..max_attempts {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(e) => {
                if attempt + 1 < max_attempts {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    debug!("Attempt {} failed: {e}, retrying in {delay:?}", attempt + 1);
                    tokio::time::sleep(delay).await;
                }
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap())
}

fn twitch_credentials() -> Result<(String, String)> {
    let id = std::env::var("TWITCH_CLIENT_ID")
        .map_err(|_| eyre::eyre!("TWITCH_CLIENT_ID environment variable not set"))?;
    let secret = std::env::var("TWITCH_CLIENT_SECRET")
        .map_err(|_| eyre::eyre!("TWITCH_CLIENT_SECRET environment variable not set"))?;
    Ok((id, secret))
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = <Cli as clap::Parser>::parse();

    // Load config file (non-fatal if missing/invalid)
    let config = vodx::config::Config::load().unwrap_or_default();

    // CLI flags take priority over config file values
    let defaults = Params::default();
    let params = Params {
        interval_secs: cli.interval.or(config.interval_secs).unwrap_or(defaults.interval_secs),
        highlight_count: cli
            .highlights
            .or(config.highlight_count)
            .unwrap_or(defaults.highlight_count),
        preroll_secs: cli.preroll.or(config.preroll_secs).unwrap_or(defaults.preroll_secs),
        trim_minutes: cli.trim_minutes.or(config.trim_minutes).unwrap_or(defaults.trim_minutes),
    };
    if params.interval_secs == 0
        || params.highlight_count == 0
        || params.preroll_secs == 0
        || params.trim_minutes == 0
    {
        bail!("interval, highlights, preroll and trim-minutes must all be at least 1");
    }

    let chatlog_dir = cli
        .chatlog_dir
        .clone()
        .or(config.chatlog_dir)
        .unwrap_or_else(|| PathBuf::from("chatlogs"));

    // VODs named directly by URL need no API lookup
    let mut vods: Vec<vodx::twitch::VodReference> = Vec::new();
    for url in &cli.vod {
        match vodx::twitch::extract_vod_id(url) {
            Some(vod_id) => vods.push(vodx::twitch::VodReference {
                streamer: vod_id.clone(),
                vod_id,
                url: url.clone(),
            }),
            None => {
                warn!("Not a VOD URL: {url}");
                eprintln!("Not a VOD URL: {url} (expected twitch.tv/videos/<id>)");
            }
        }
    }

    // Collect usernames: from args, file, or stdin
    let mut usernames = cli.usernames.clone();
    if let Some(ref path) = cli.file {
        usernames.extend(vodx::read_usernames(path)?);
    }
    if usernames.is_empty() && cli.vod.is_empty() {
        let stdin = io::stdin();
        let lines = stdin.lock().lines().collect::<Result<Vec<_>, _>>()?;
        usernames = vodx::parse_usernames(&lines.join("\n"));
    }
    if usernames.is_empty() && vods.is_empty() {
        bail!("no usernames or VODs provided\n\nUsage: vodx <USERNAME>...\n       vodx -f usernames.txt\n       vodx --vod <URL>\n       echo <USERNAME> | vodx");
    }

    let client = reqwest::Client::new();

    if !usernames.is_empty() {
        info!("Usernames loaded: {usernames:?}");

        let (client_id, client_secret) = twitch_credentials()?;
        let session = retry(3, || {
            let client = &client;
            let client_id = &client_id;
            let client_secret = &client_secret;
            async move { vodx::twitch::authenticate(client, client_id, client_secret).await }
        })
        .await?;

        for username in &usernames {
            let vod = retry(3, || {
                let client = &client;
                let session = &session;
                async move { vodx::twitch::resolve_latest_vod(client, session, username).await }
            })
            .await;

            match vod {
                Ok(Some(vod)) => vods.push(vod),
                Ok(None) => {
                    warn!("No recent VODs available for {username}");
                    eprintln!("No recent VODs available for {username}");
                }
                Err(e) => {
                    warn!("Failed to resolve VOD for {username}: {e}");
                    eprintln!("Failed to resolve VOD for {username}: {e}");
                }
            }
        }
    }

    let mut sections = Vec::new();
    let mut reports = Vec::new();

    for vod in &vods {
        let username = &vod.streamer;
        debug!("Analyzing VOD {} for {username} ({})", vod.vod_id, vod.url);

        let Some(chat_log) = vodx::chatlog::load_chat_log(&chatlog_dir, &vod.vod_id) else {
            warn!(
                "Chat log not found: {}",
                vodx::chatlog::chat_log_path(&chatlog_dir, &vod.vod_id).display()
            );
            eprintln!("No chat log saved for {username}'s VOD {}", vod.vod_id);
            continue;
        };

        let highlights = match vodx::highlights::analyze(&chat_log, &params) {
            Outcome::Highlights(h) => h,
            Outcome::EmptyChat => {
                info!("VOD {}: chat log empty or all noise", vod.vod_id);
                eprintln!("No usable chat in {username}'s VOD {}", vod.vod_id);
                continue;
            }
            Outcome::InsufficientBuckets => {
                info!("VOD {}: chat too short after edge trimming", vod.vod_id);
                eprintln!("Chat too short to pick highlights for {username}'s VOD {}", vod.vod_id);
                continue;
            }
        };

        if cli.verbose {
            eprintln!(
                "Streamer: {username}\nVOD: {} ({})\nHighlights: {}",
                vod.vod_id,
                vod.url,
                highlights.len(),
            );
        }

        let links: Vec<_> = highlights
            .iter()
            .map(|h| vodx::output::deep_link(&vod.vod_id, h))
            .collect();

        match cli.format {
            OutputFormat::Text => sections.push(format!(
                "Highlights for {username}:\n{}",
                vodx::output::render_text(&links)
            )),
            OutputFormat::Json => reports.push(vodx::output::VodReport {
                streamer: username.clone(),
                vod_id: vod.vod_id.clone(),
                highlights: links,
            }),
        }
    }

    let report = match cli.format {
        OutputFormat::Text => sections.join("\n\n"),
        OutputFormat::Json => vodx::output::render_json(&reports)?,
    };
    if let Some(ref path) = cli.output {
        std::fs::write(path, &report)?;
        if cli.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else if !report.is_empty() {
        println!("{report}");
    }

    Ok(())
}
