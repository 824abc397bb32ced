//! HowLongToBeat search client.
//!
//! Hits the site's JSON search endpoint and returns the best-matching game's
//! completion times in hours. "Not found" is a valid result (`Ok(None)`).

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::http::{build_api_client, handle_api_response, API_LIMITER};

const HLTB_SEARCH_URL: &str = "https://howlongtobeat.com/api/search";
const HLTB_REFERER: &str = "https://howlongtobeat.com/";

/// Completion times for one game, in hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HltbTimes {
    pub name: String,
    pub main_story: f32,
    pub main_extra: f32,
    pub completionist: f32,
    pub all_styles: f32,
    /// Title similarity against the query, 0.0 to 1.0.
    pub similarity: f32,
}

/// Search HowLongToBeat and return the closest match, if any.
pub async fn search(game_name: &str) -> Result<Option<HltbTimes>, String> {
    info!("HLTB search for '{}'", game_name);
    let client = build_api_client()?;
    API_LIMITER.wait_for_domain(HLTB_SEARCH_URL).await?;

    let terms: Vec<&str> = game_name.split_whitespace().collect();
    let body = serde_json::json!({
        "searchType": "games",
        "searchTerms": terms,
        "searchPage": 1,
        "size": 20,
        "searchOptions": {
            "games": {
                "userId": 0,
                "platform": "",
                "sortCategory": "popular",
                "rangeCategory": "main",
                "rangeTime": {"min": 0, "max": 0},
                "modifier": ""
            },
            "users": {},
            "filter": "",
            "sort": 0,
            "randomizer": 0
        }
    });

    let response = client
        .post(HLTB_SEARCH_URL)
        .header("Referer", HLTB_REFERER)
        .json(&body)
        .send()
        .await
        .map_err(|e| format!("HowLongToBeat request failed: {}", e))?;

    let text = handle_api_response(response, "HowLongToBeat").await?;
    parse_search_response(&text, game_name)
}

/// Parse the search response and pick the most similar title.
/// The endpoint reports times in seconds; convert to hours.
fn parse_search_response(body: &str, query: &str) -> Result<Option<HltbTimes>, String> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| format!("Failed to parse HowLongToBeat response as JSON: {}", e))?;

    let data = json["data"].as_array().cloned().unwrap_or_default();
    let mut best: Option<HltbTimes> = None;

    for entry in &data {
        let name = match entry["game_name"].as_str() {
            Some(n) => n.to_string(),
            None => continue,
        };
        let similarity = title_similarity(query, &name);
        let candidate = HltbTimes {
            similarity,
            main_story: seconds_to_hours(entry["comp_main"].as_f64()),
            main_extra: seconds_to_hours(entry["comp_plus"].as_f64()),
            completionist: seconds_to_hours(entry["comp_100"].as_f64()),
            all_styles: seconds_to_hours(entry["comp_all"].as_f64()),
            name,
        };
        match &best {
            Some(current) if current.similarity >= similarity => {}
            _ => best = Some(candidate),
        }
    }

    Ok(best)
}

fn seconds_to_hours(seconds: Option<f64>) -> f32 {
    let hours = seconds.unwrap_or(0.0) / 3600.0;
    // One decimal place is all the precision the site itself displays
    ((hours * 10.0).round() / 10.0) as f32
}

/// Word-overlap similarity between a query and a candidate title, 0.0 to 1.0.
fn title_similarity(query: &str, title: &str) -> f32 {
    let query_words: Vec<String> = normalized_words(query);
    let title_words: Vec<String> = normalized_words(title);
    if query_words.is_empty() || title_words.is_empty() {
        return 0.0;
    }
    let matched = query_words
        .iter()
        .filter(|w| title_words.contains(w))
        .count();
    let denom = query_words.len().max(title_words.len());
    matched as f32 / denom as f32
}

fn normalized_words(s: &str) -> Vec<String> {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_picks_most_similar_title() {
        let body = r#"{
            "data": [
                {"game_name": "Hollow Knight: Silksong", "comp_main": 90000, "comp_plus": 144000, "comp_100": 216000, "comp_all": 150000},
                {"game_name": "Hollow Knight", "comp_main": 95400, "comp_plus": 143640, "comp_100": 227160, "comp_all": 148320}
            ]
        }"#;
        let result = parse_search_response(body, "Hollow Knight").unwrap().unwrap();
        assert_eq!(result.name, "Hollow Knight");
        assert_eq!(result.main_story, 26.5);
        assert!(result.similarity > 0.9);
    }

    #[test]
    fn test_parse_empty_data_is_not_found() {
        assert!(parse_search_response(r#"{"data": []}"#, "x").unwrap().is_none());
        assert!(parse_search_response(r#"{}"#, "x").unwrap().is_none());
    }

    #[test]
    fn test_seconds_to_hours_rounding() {
        assert_eq!(seconds_to_hours(Some(3600.0)), 1.0);
        assert_eq!(seconds_to_hours(Some(5400.0)), 1.5);
        assert_eq!(seconds_to_hours(None), 0.0);
    }

    #[test]
    fn test_title_similarity() {
        assert_eq!(title_similarity("Celeste", "Celeste"), 1.0);
        assert_eq!(title_similarity("Hollow Knight", "Hollow Knight: Silksong"), 2.0 / 3.0);
        assert_eq!(title_similarity("", "Celeste"), 0.0);
    }

    #[test]
    fn test_title_similarity_ignores_case_and_punctuation() {
        assert_eq!(title_similarity("NIER: Automata", "NieR Automata"), 1.0);
    }
}
