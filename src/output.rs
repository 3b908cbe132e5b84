use eyre::Result;
use serde::Serialize;

use crate::highlights::Highlight;

/// One rendered highlight link for a VOD.
#[derive(Debug, Clone, Serialize)]
pub struct HighlightLink {
    pub url: String,
    pub score: u32,
}

pub fn deep_link(vod_id: &str, highlight: &Highlight) -> HighlightLink {
    HighlightLink {
        url: format!(
            "https://www.twitch.tv/videos/{vod_id}?t={}",
            highlight.time.to_url_offset()
        ),
        score: highlight.score,
    }
}

/// Plain text: one `link (score)` per line.
pub fn render_text(links: &[HighlightLink]) -> String {
    links
        .iter()
        .map(|l| format!("{} ({})", l.url, l.score))
        .collect::<Vec<_>>()
        .join("\n")
}

/// All highlight links for one VOD.
#[derive(Debug, Serialize)]
pub struct VodReport {
    pub streamer: String,
    pub vod_id: String,
    pub highlights: Vec<HighlightLink>,
}

/// One JSON document for the whole run: a top-level array with one entry per
/// VOD, so multi-streamer output stays parseable.
pub fn render_json(reports: &[VodReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}
