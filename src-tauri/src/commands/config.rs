use std::sync::Arc;

use tauri::{AppHandle, Wry};
use tauri_plugin_store::{Store, StoreExt};
use tracing::info;

/// Open the shared preferences store. All non-secret settings (theme,
/// Steam ID, Groq model, hardware profile) live in this one file.
pub(super) fn preferences(app: &AppHandle) -> Result<Arc<Store<Wry>>, String> {
    app.store("preferences.json")
        .map_err(|e| format!("Failed to open preferences store: {}", e))
}

#[tauri::command]
pub fn get_preference(app: AppHandle, key: &str) -> Result<Option<String>, String> {
    info!("Getting preference: {}", key);
    let store = preferences(&app)?;
    Ok(store
        .get(key)
        .and_then(|v| v.as_str().map(|s| s.to_string())))
}

#[tauri::command]
pub fn set_preference(app: AppHandle, key: &str, value: &str) -> Result<(), String> {
    info!("Setting preference: {} = {}", key, value);
    let store = preferences(&app)?;
    store.set(key, serde_json::json!(value));
    store
        .save()
        .map_err(|e| format!("Failed to save preferences: {}", e))
}
