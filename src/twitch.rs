use eyre::{Result, bail};
use log::debug;
use regex::Regex;
use serde::Deserialize;

const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const HELIX_USERS_URL: &str = "https://api.twitch.tv/helix/users";
const HELIX_VIDEOS_URL: &str = "https://api.twitch.tv/helix/videos";

/// App-token credentials for the Helix API, passed explicitly to every call.
#[derive(Debug, Clone)]
pub struct TwitchSession {
    client_id: String,
    token: String,
}

/// A streamer's most recent VOD as resolved via the Helix API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VodReference {
    pub streamer: String,
    pub vod_id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    data: Vec<HelixUser>,
}

#[derive(Debug, Deserialize)]
struct HelixUser {
    id: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    data: Vec<HelixVideo>,
}

#[derive(Debug, Deserialize)]
struct HelixVideo {
    id: String,
    url: String,
}

/// Exchange client credentials for an app access token.
pub async fn authenticate(
    client: &reqwest::Client,
    client_id: &str,
    client_secret: &str,
) -> Result<TwitchSession> {
    debug!("Requesting app access token");

    let resp = client
        .post(TOKEN_URL)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("Twitch token endpoint returned {status}: {body}");
    }

    let token: TokenResponse = resp.json().await?;
    Ok(TwitchSession {
        client_id: client_id.to_string(),
        token: token.access_token,
    })
}

/// Look up a streamer's most recent VOD. An unknown login or a channel with
/// no VODs is `Ok(None)`, not an error.
pub async fn resolve_latest_vod(
    client: &reqwest::Client,
    session: &TwitchSession,
    login: &str,
) -> Result<Option<VodReference>> {
    debug!("Resolving user id for {login}");

    let users: UsersResponse = client
        .get(HELIX_USERS_URL)
        .query(&[("login", login)])
        .bearer_auth(&session.token)
        .header("Client-Id", &session.client_id)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let Some(user) = users.data.first() else {
        debug!("No Twitch user named {login}");
        return Ok(None);
    };

    let videos: VideosResponse = client
        .get(HELIX_VIDEOS_URL)
        .query(&[("user_id", user.id.as_str())])
        .bearer_auth(&session.token)
        .header("Client-Id", &session.client_id)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let Some(video) = videos.data.first() else {
        debug!("No recent VODs for {login}");
        return Ok(None);
    };

    Ok(Some(VodReference {
        streamer: login.to_string(),
        vod_id: video.id.clone(),
        url: video.url.clone(),
    }))
}

/// Extract the numeric VOD id from a `twitch.tv/videos/...` URL.
pub fn extract_vod_id(url: &str) -> Option<String> {
    let re = Regex::new(r"twitch\.tv/videos/(\d+)").unwrap();
    re.captures(url).map(|caps| caps[1].to_string())
}
