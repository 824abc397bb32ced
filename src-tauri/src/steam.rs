//! Steam Web API client: owned-games library fetch.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::http::{build_api_client, handle_api_response, API_LIMITER};

const OWNED_GAMES_URL: &str = "https://api.steampowered.com/IPlayerService/GetOwnedGames/v1/";

/// One game from the user's Steam library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedGame {
    pub appid: u64,
    pub name: String,
    /// Total playtime in minutes.
    pub playtime_forever_min: u64,
    /// Unix timestamp of the last session, 0 if never played.
    pub last_played: i64,
}

/// Fetch the full owned-games list for a Steam ID.
/// Requires a Steam Web API key; the profile's game details must be public.
pub async fn fetch_owned_games(api_key: &str, steam_id: &str) -> Result<Vec<OwnedGame>, String> {
    info!("Fetching owned games for Steam ID {}", steam_id);
    let client = build_api_client()?;
    API_LIMITER.wait_for_domain(OWNED_GAMES_URL).await?;

    let response = client
        .get(OWNED_GAMES_URL)
        .query(&[
            ("key", api_key),
            ("steamid", steam_id),
            ("include_appinfo", "1"),
            ("include_played_free_games", "1"),
            ("format", "json"),
        ])
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                "Steam API timeout after 60s".to_string()
            } else {
                format!("Steam API request failed: {}", e)
            }
        })?;

    let body = handle_api_response(response, "Steam").await?;
    let games = parse_owned_games(&body)?;
    info!("Steam returned {} owned games", games.len());
    Ok(games)
}

/// Parse the GetOwnedGames response body.
/// A private profile comes back as an empty `response` object; that maps to
/// an empty list rather than an error here, and the command layer surfaces
/// a hint when the library is empty.
fn parse_owned_games(body: &str) -> Result<Vec<OwnedGame>, String> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| format!("Failed to parse Steam response as JSON: {}", e))?;

    let games = match json["response"]["games"].as_array() {
        Some(games) => games,
        None => return Ok(Vec::new()),
    };

    let mut result = Vec::with_capacity(games.len());
    for game in games {
        let appid = match game["appid"].as_u64() {
            Some(id) => id,
            None => continue,
        };
        result.push(OwnedGame {
            appid,
            name: game["name"].as_str().unwrap_or("Unknown").to_string(),
            playtime_forever_min: game["playtime_forever"].as_u64().unwrap_or(0),
            last_played: game["rtime_last_played"].as_i64().unwrap_or(0),
        });
    }
    Ok(result)
}
