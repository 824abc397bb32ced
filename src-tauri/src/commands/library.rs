use tauri::Manager;
use tracing::info;

use crate::cache::ApiCache;
use crate::error::GameDockError;
use crate::rawg::{self, GameMeta};
use crate::steam::{self, OwnedGame};

use super::config::preferences;
use super::keychain::require_api_key;

const LIBRARY_TTL_MINUTES: i64 = 6 * 60;

/// Resolve the app-data cache database path, creating the directory if needed.
pub fn cache_db_path(app: &tauri::AppHandle) -> Result<std::path::PathBuf, String> {
    let dir = app
        .path()
        .app_data_dir()
        .map_err(|e| format!("Failed to resolve app data directory: {}", e))?;
    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("Failed to create app data directory: {}", e))?;
    Ok(dir.join("gamedock-cache.db"))
}

/// Read the Steam ID from preferences, erroring with a settings hint when unset.
fn configured_steam_id(app: &tauri::AppHandle) -> Result<String, String> {
    let store = preferences(app)?;
    store
        .get("steam_id")
        .and_then(|v| v.as_str().map(|s| s.to_string()))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            GameDockError::Config("No Steam ID configured. Please set it in Settings.".to_string())
                .into()
        })
}

/// Fetch the owned-games library from Steam and cache it.
#[tauri::command]
pub async fn sync_library(app: tauri::AppHandle) -> Result<Vec<OwnedGame>, String> {
    info!("sync_library called");

    let api_key = require_api_key("steam")?;
    let steam_id = configured_steam_id(&app)?;
    let db_path = cache_db_path(&app)?;

    let games = steam::fetch_owned_games(&api_key, &steam_id)
        .await
        .map_err(GameDockError::Library)?;

    let steam_id_for_cache = steam_id.clone();
    let games_for_cache = games.clone();
    tokio::task::spawn_blocking(move || -> Result<(), String> {
        let cache = ApiCache::new(&db_path)?;
        cache.put("library", &steam_id_for_cache, &games_for_cache, LIBRARY_TTL_MINUTES)
    })
    .await
    .map_err(|e| format!("Cache task failed: {}", e))??;

    Ok(games)
}

/// Return the cached library without any network requests.
/// Empty when never synced or when the cache has expired.
#[tauri::command]
pub async fn list_library(app: tauri::AppHandle) -> Result<Vec<OwnedGame>, String> {
    info!("list_library called");

    let steam_id = configured_steam_id(&app)?;
    let db_path = cache_db_path(&app)?;

    let cached = tokio::task::spawn_blocking(move || -> Result<Option<Vec<OwnedGame>>, String> {
        let cache = ApiCache::new(&db_path)?;
        cache.get("library", &steam_id)
    })
    .await
    .map_err(|e| format!("Cache task failed: {}", e))??;

    Ok(cached.unwrap_or_default())
}

/// Search RAWG for metadata matching a title.
#[tauri::command]
pub async fn search_game_meta(query: String, limit: Option<usize>) -> Result<Vec<GameMeta>, String> {
    info!("search_game_meta called for: {}", query);

    let api_key = require_api_key("rawg")?;
    rawg::search_games(&api_key, &query, limit.unwrap_or(10))
        .await
        .map_err(|e| GameDockError::Library(e).into())
}

/// Fetch full RAWG details (including PC requirements text) for a slug.
#[tauri::command]
pub async fn game_meta_detail(slug: String) -> Result<GameMeta, String> {
    info!("game_meta_detail called for: {}", slug);

    let api_key = require_api_key("rawg")?;
    rawg::game_detail(&api_key, &slug)
        .await
        .map_err(|e| GameDockError::Library(e).into())
}

/// Clear expired entries from the API cache. Returns the number removed.
#[tauri::command]
pub async fn clear_api_cache(app: tauri::AppHandle) -> Result<usize, String> {
    info!("clear_api_cache called");

    let db_path = cache_db_path(&app)?;
    tokio::task::spawn_blocking(move || -> Result<usize, String> {
        let cache = ApiCache::new(&db_path)?;
        cache.clear_expired()
    })
    .await
    .map_err(|e| format!("Cache task failed: {}", e))?
}
