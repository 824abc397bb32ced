use serde::Serialize;
use tauri::Manager;
use tracing::info;

use crate::cache::ApiCache;

use super::config::preferences;

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub steam_api_key_set: bool,
    pub rawg_api_key_set: bool,
    pub itad_api_key_set: bool,
    pub groq_api_key_set: bool,
    pub steam_id_configured: bool,
    pub cache_accessible: bool,
    pub cache_path: Option<String>,
}

fn key_is_set(service_id: &str) -> bool {
    keyring::Entry::new(service_id, "gamedock")
        .and_then(|e| e.get_password())
        .is_ok()
}

#[tauri::command]
pub fn run_health_check(app: tauri::AppHandle) -> Result<HealthReport, String> {
    info!("Running health check");

    let steam_key_set = key_is_set("gamedock-steam-api");
    let rawg_key_set = key_is_set("gamedock-rawg-api");
    let itad_key_set = key_is_set("gamedock-itad-api");
    let groq_key_set = key_is_set("gamedock-groq-api");
    info!(
        "API keys set: steam={}, rawg={}, itad={}, groq={}",
        steam_key_set, rawg_key_set, itad_key_set, groq_key_set
    );

    let steam_id_configured = preferences(&app)
        .ok()
        .and_then(|store| store.get("steam_id"))
        .and_then(|v| v.as_str().map(|s| !s.is_empty()))
        .unwrap_or(false);
    info!("Steam ID configured: {}", steam_id_configured);

    // Opening the cache exercises both the app-data dir and SQLite
    let (cache_accessible, cache_path) = match app.path().app_data_dir() {
        Ok(dir) => {
            let db_path = dir.join("gamedock-cache.db");
            let ok = std::fs::create_dir_all(&dir).is_ok() && ApiCache::new(&db_path).is_ok();
            (ok, Some(db_path.to_string_lossy().to_string()))
        }
        Err(_) => (false, None),
    };
    info!("Cache accessible: {} at {:?}", cache_accessible, cache_path);

    Ok(HealthReport {
        steam_api_key_set: steam_key_set,
        rawg_api_key_set: rawg_key_set,
        itad_api_key_set: itad_key_set,
        groq_api_key_set: groq_key_set,
        steam_id_configured,
        cache_accessible,
        cache_path,
    })
}
