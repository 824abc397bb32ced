//! IsThereAnyDeal API client: game lookup, price overviews, and the deal feed.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::http::{build_api_client, handle_api_response, API_LIMITER};

const ITAD_BASE_URL: &str = "https://api.isthereanydeal.com";

/// One current deal for display on the Deals page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealInfo {
    pub title: String,
    pub shop: String,
    pub price_new: f64,
    pub price_old: f64,
    pub cut_percent: u8,
    pub url: String,
    pub expires_at: Option<String>,
}

/// Best current price for one game versus its historic low.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceOverview {
    pub title: String,
    pub best_price: f64,
    pub best_shop: String,
    pub best_url: String,
    pub historic_low: Option<f64>,
}

/// Resolve an ITAD game id from a title. Returns None when unknown.
pub async fn lookup_game(api_key: &str, title: &str) -> Result<Option<String>, String> {
    info!("ITAD lookup for '{}'", title);
    let client = build_api_client()?;

    let url = format!("{}/games/lookup/v1", ITAD_BASE_URL);
    API_LIMITER.wait_for_domain(&url).await?;

    let response = client
        .get(&url)
        .query(&[("key", api_key), ("title", title)])
        .send()
        .await
        .map_err(|e| format!("ITAD API request failed: {}", e))?;

    let body = handle_api_response(response, "ITAD").await?;
    parse_lookup(&body)
}

/// Fetch the current best price for a game id, with its historic low.
pub async fn price_overview(
    api_key: &str,
    game_id: &str,
    title: &str,
) -> Result<Option<PriceOverview>, String> {
    info!("ITAD prices for game id {}", game_id);
    let client = build_api_client()?;

    let url = format!("{}/games/prices/v3", ITAD_BASE_URL);
    API_LIMITER.wait_for_domain(&url).await?;

    let response = client
        .post(&url)
        .query(&[("key", api_key)])
        .json(&serde_json::json!([game_id]))
        .send()
        .await
        .map_err(|e| format!("ITAD API request failed: {}", e))?;

    let body = handle_api_response(response, "ITAD").await?;
    parse_price_overview(&body, title)
}

/// Fetch the front-page deal feed, newest cuts first.
pub async fn fetch_deals(api_key: &str, limit: usize) -> Result<Vec<DealInfo>, String> {
    info!("ITAD deal feed (limit {})", limit);
    let client = build_api_client()?;

    let url = format!("{}/deals/v2", ITAD_BASE_URL);
    API_LIMITER.wait_for_domain(&url).await?;

    let limit_str = limit.clamp(1, 200).to_string();
    let response = client
        .get(&url)
        .query(&[("key", api_key), ("limit", &limit_str), ("sort", "-cut")])
        .send()
        .await
        .map_err(|e| format!("ITAD API request failed: {}", e))?;

    let body = handle_api_response(response, "ITAD").await?;
    parse_deal_feed(&body)
}

fn parse_lookup(body: &str) -> Result<Option<String>, String> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| format!("Failed to parse ITAD lookup as JSON: {}", e))?;

    if json["found"].as_bool() != Some(true) {
        return Ok(None);
    }
    Ok(json["game"]["id"].as_str().map(|s| s.to_string()))
}

fn parse_price_overview(body: &str, title: &str) -> Result<Option<PriceOverview>, String> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| format!("Failed to parse ITAD prices as JSON: {}", e))?;

    let entry = match json.as_array().and_then(|a| a.first()) {
        Some(entry) => entry,
        None => return Ok(None),
    };

    // Deals come sorted by price; the first one is the best current offer.
    let best = match entry["deals"].as_array().and_then(|d| d.first()) {
        Some(deal) => deal,
        None => return Ok(None),
    };

    Ok(Some(PriceOverview {
        title: title.to_string(),
        best_price: best["price"]["amount"].as_f64().unwrap_or(0.0),
        best_shop: best["shop"]["name"].as_str().unwrap_or("Unknown").to_string(),
        best_url: best["url"].as_str().unwrap_or("").to_string(),
        historic_low: entry["historyLow"]["all"]["amount"].as_f64(),
    }))
}

fn parse_deal_feed(body: &str) -> Result<Vec<DealInfo>, String> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| format!("Failed to parse ITAD deal feed as JSON: {}", e))?;

    let list = json["list"].as_array().cloned().unwrap_or_default();
    let mut deals = Vec::with_capacity(list.len());
    for item in &list {
        let title = match item["title"].as_str() {
            Some(t) => t.to_string(),
            None => continue,
        };
        let deal = &item["deal"];
        deals.push(DealInfo {
            title,
            shop: deal["shop"]["name"].as_str().unwrap_or("Unknown").to_string(),
            price_new: deal["price"]["amount"].as_f64().unwrap_or(0.0),
            price_old: deal["regular"]["amount"].as_f64().unwrap_or(0.0),
            cut_percent: deal["cut"].as_u64().unwrap_or(0).min(100) as u8,
            url: deal["url"].as_str().unwrap_or("").to_string(),
            expires_at: deal["expiry"].as_str().map(|s| s.to_string()),
        });
    }
    Ok(deals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lookup_found() {
        let body = r#"{"found": true, "game": {"id": "018d937f-abc", "slug": "celeste", "title": "Celeste"}}"#;
        assert_eq!(parse_lookup(body).unwrap().as_deref(), Some("018d937f-abc"));
    }

    #[test]
    fn test_parse_lookup_not_found() {
        let body = r#"{"found": false}"#;
        assert!(parse_lookup(body).unwrap().is_none());
    }

    #[test]
    fn test_parse_price_overview() {
        let body = r#"[{
            "id": "018d937f-abc",
            "deals": [
                {"shop": {"name": "GOG"}, "price": {"amount": 4.99}, "regular": {"amount": 19.99}, "cut": 75, "url": "https://example.com/d"},
                {"shop": {"name": "Steam"}, "price": {"amount": 9.99}, "regular": {"amount": 19.99}, "cut": 50, "url": "https://example.com/s"}
            ],
            "historyLow": {"all": {"amount": 3.99}}
        }]"#;
        let overview = parse_price_overview(body, "Celeste").unwrap().unwrap();
        assert_eq!(overview.best_shop, "GOG");
        assert_eq!(overview.best_price, 4.99);
        assert_eq!(overview.historic_low, Some(3.99));
    }

    #[test]
    fn test_parse_price_overview_no_deals() {
        let body = r#"[{"id": "x", "deals": [], "historyLow": {}}]"#;
        assert!(parse_price_overview(body, "Celeste").unwrap().is_none());
        assert!(parse_price_overview("[]", "Celeste").unwrap().is_none());
    }

    #[test]
    fn test_parse_deal_feed() {
        let body = r#"{
            "list": [
                {
                    "title": "Hades",
                    "deal": {
                        "shop": {"name": "Steam"},
                        "price": {"amount": 6.24},
                        "regular": {"amount": 24.99},
                        "cut": 75,
                        "url": "https://example.com/hades",
                        "expiry": "2026-09-01T00:00:00Z"
                    }
                },
                {"deal": {}}
            ]
        }"#;
        let deals = parse_deal_feed(body).unwrap();
        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0].title, "Hades");
        assert_eq!(deals[0].cut_percent, 75);
        assert_eq!(deals[0].expires_at.as_deref(), Some("2026-09-01T00:00:00Z"));
    }

    #[test]
    fn test_parse_deal_feed_clamps_cut() {
        let body = r#"{"list": [{"title": "X", "deal": {"cut": 250}}]}"#;
        let deals = parse_deal_feed(body).unwrap();
        assert_eq!(deals[0].cut_percent, 100);
    }
}
