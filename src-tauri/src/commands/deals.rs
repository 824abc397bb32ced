use tauri::AppHandle;
use tracing::info;

use crate::cache::ApiCache;
use crate::error::GameDockError;
use crate::groq;
use crate::itad::{self, DealInfo, PriceOverview};

use super::config::preferences;
use super::keychain::require_api_key;
use super::library::cache_db_path;

const DEALS_TTL_MINUTES: i64 = 30;

/// Get the configured Groq model from preferences, with a sensible default.
fn configured_groq_model(app: &AppHandle) -> Result<String, String> {
    let store = preferences(app)?;
    Ok(store
        .get("groq_model")
        .and_then(|v| v.as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| groq::DEFAULT_MODEL.to_string()))
}

/// Fetch the current deal feed, cache-first.
#[tauri::command]
pub async fn fetch_deals(app: AppHandle, limit: Option<usize>) -> Result<Vec<DealInfo>, String> {
    let limit = limit.unwrap_or(40);
    info!("fetch_deals called (limit {})", limit);

    let db_path = cache_db_path(&app)?;
    let cache_key = format!("feed-{}", limit);

    let key_for_get = cache_key.clone();
    let db_for_get = db_path.clone();
    let cached = tokio::task::spawn_blocking(move || -> Result<Option<Vec<DealInfo>>, String> {
        let cache = ApiCache::new(&db_for_get)?;
        cache.get("deals", &key_for_get)
    })
    .await
    .map_err(|e| format!("Cache task failed: {}", e))??;

    if let Some(deals) = cached {
        return Ok(deals);
    }

    let api_key = require_api_key("itad")?;
    let deals = itad::fetch_deals(&api_key, limit)
        .await
        .map_err(GameDockError::Deals)?;

    let deals_for_cache = deals.clone();
    tokio::task::spawn_blocking(move || -> Result<(), String> {
        let cache = ApiCache::new(&db_path)?;
        cache.put("deals", &cache_key, &deals_for_cache, DEALS_TTL_MINUTES)
    })
    .await
    .map_err(|e| format!("Cache task failed: {}", e))??;

    Ok(deals)
}

/// Best current price for a title versus its historic low.
/// Returns null when the title is unknown to ITAD or has no active offers.
#[tauri::command]
pub async fn price_overview(title: String) -> Result<Option<PriceOverview>, String> {
    info!("price_overview called for: {}", title);

    let api_key = require_api_key("itad")?;
    let game_id = match itad::lookup_game(&api_key, &title)
        .await
        .map_err(GameDockError::Deals)?
    {
        Some(id) => id,
        None => return Ok(None),
    };
    itad::price_overview(&api_key, &game_id, &title)
        .await
        .map_err(|e| GameDockError::Deals(e).into())
}

/// Summarize the best current deals in a couple of sentences via Groq.
#[tauri::command]
pub async fn deal_digest(app: AppHandle, deals: Vec<DealInfo>) -> Result<String, String> {
    info!("deal_digest called for {} deals", deals.len());

    if deals.is_empty() {
        return Ok("No active deals to summarize.".to_string());
    }

    let api_key = require_api_key("groq")?;
    let model = configured_groq_model(&app)?;

    let listing = deals
        .iter()
        .take(15)
        .map(|d| {
            format!(
                "- {} at {} for {:.2} (was {:.2}, -{}%)",
                d.title, d.shop, d.price_new, d.price_old, d.cut_percent
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = format!(
        "You are a concise assistant for a game deal tracker. Given the deals \
         below, write a 2-3 sentence digest naming the two or three standout \
         offers. Plain text only, no markdown.\n\n{}",
        listing
    );

    groq::chat(&api_key, &model, &prompt).await
}

/// List the Groq models available to the configured key.
#[tauri::command]
pub async fn list_groq_models() -> Result<Vec<groq::ModelInfo>, String> {
    info!("list_groq_models called");

    let api_key = require_api_key("groq")?;
    groq::list_models(&api_key).await
}
