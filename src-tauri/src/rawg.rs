//! RAWG API client: game metadata search and PC requirements text.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::http::{build_api_client, handle_api_response, API_LIMITER};

const RAWG_BASE_URL: &str = "https://api.rawg.io/api";

/// Metadata for one game as returned by RAWG.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMeta {
    pub slug: String,
    pub name: String,
    pub released: Option<String>,
    pub metacritic: Option<i64>,
    pub genres: Vec<String>,
    pub background_image: Option<String>,
    /// Free-text PC requirements, when the detail endpoint provides them.
    pub requirements_min: Option<String>,
    pub requirements_rec: Option<String>,
}

/// Search RAWG for games matching the query. Returns up to `limit` results.
pub async fn search_games(api_key: &str, query: &str, limit: usize) -> Result<Vec<GameMeta>, String> {
    info!("RAWG search for '{}'", query);
    let client = build_api_client()?;

    let url = format!("{}/games", RAWG_BASE_URL);
    API_LIMITER.wait_for_domain(&url).await?;

    let page_size = limit.clamp(1, 40).to_string();
    let response = client
        .get(&url)
        .query(&[("key", api_key), ("search", query), ("page_size", &page_size)])
        .send()
        .await
        .map_err(|e| format!("RAWG API request failed: {}", e))?;

    let body = handle_api_response(response, "RAWG").await?;
    parse_search_results(&body)
}

/// Fetch full details for a game slug, including PC requirements text.
pub async fn game_detail(api_key: &str, slug: &str) -> Result<GameMeta, String> {
    info!("RAWG detail for '{}'", slug);
    let client = build_api_client()?;

    let url = format!("{}/games/{}", RAWG_BASE_URL, slug);
    API_LIMITER.wait_for_domain(&url).await?;

    let response = client
        .get(&url)
        .query(&[("key", api_key)])
        .send()
        .await
        .map_err(|e| format!("RAWG API request failed: {}", e))?;

    let body = handle_api_response(response, "RAWG").await?;
    let json: serde_json::Value = serde_json::from_str(&body)
        .map_err(|e| format!("Failed to parse RAWG detail as JSON: {}", e))?;
    parse_game(&json).ok_or_else(|| format!("RAWG detail for '{}' is missing a slug", slug))
}

fn parse_search_results(body: &str) -> Result<Vec<GameMeta>, String> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| format!("Failed to parse RAWG response as JSON: {}", e))?;

    let results = json["results"].as_array().cloned().unwrap_or_default();
    Ok(results.iter().filter_map(parse_game).collect())
}

/// Parse one game object. PC requirements live under the `platforms` array
/// on the entry whose platform slug is "pc".
fn parse_game(json: &serde_json::Value) -> Option<GameMeta> {
    let slug = json["slug"].as_str()?.to_string();

    let genres = json["genres"]
        .as_array()
        .map(|gs| {
            gs.iter()
                .filter_map(|g| g["name"].as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let mut requirements_min = None;
    let mut requirements_rec = None;
    if let Some(platforms) = json["platforms"].as_array() {
        for p in platforms {
            if p["platform"]["slug"].as_str() == Some("pc") {
                requirements_min = p["requirements"]["minimum"]
                    .as_str()
                    .map(|s| s.to_string());
                requirements_rec = p["requirements"]["recommended"]
                    .as_str()
                    .map(|s| s.to_string());
            }
        }
    }

    Some(GameMeta {
        slug,
        name: json["name"].as_str().unwrap_or("Unknown").to_string(),
        released: json["released"].as_str().map(|s| s.to_string()),
        metacritic: json["metacritic"].as_i64(),
        genres,
        background_image: json["background_image"].as_str().map(|s| s.to_string()),
        requirements_min,
        requirements_rec,
    })
}
