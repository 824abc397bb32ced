//! Groq API client (OpenAI-compatible chat completions).
//!
//! Used for the optional deal digest on the Deals page and for listing the
//! models available to the configured key.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::http::{build_api_client, handle_api_response, API_LIMITER};

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

/// Send a single-turn chat completion and return the assistant text.
pub async fn chat(api_key: &str, model: &str, prompt: &str) -> Result<String, String> {
    info!("Groq chat completion with model '{}'", model);
    let client = build_api_client()?;

    let body = serde_json::json!({
        "model": model,
        "max_tokens": 1024,
        "messages": [
            {"role": "user", "content": prompt}
        ]
    });

    let url = format!("{}/chat/completions", GROQ_BASE_URL);
    API_LIMITER.wait_for_domain(&url).await?;

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("content-type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            let msg = if e.is_timeout() {
                "Groq API timeout after 60s".to_string()
            } else {
                format!("Groq API request failed: {}", e)
            };
            error!("{}", msg);
            msg
        })?;

    let body_text = handle_api_response(response, "Groq").await?;

    let resp_json: serde_json::Value = serde_json::from_str(&body_text).map_err(|e| {
        let msg = format!("Failed to parse Groq API response wrapper: {}", e);
        error!("{}", msg);
        msg
    })?;

    resp_json["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| strip_markdown_fences(s))
        .ok_or_else(|| {
            let msg = "No content in Groq API response".to_string();
            error!("{}", msg);
            msg
        })
}

/// List the models available to the given key.
pub async fn list_models(api_key: &str) -> Result<Vec<ModelInfo>, String> {
    info!("Listing Groq models");
    let client = build_api_client()?;

    let url = format!("{}/models", GROQ_BASE_URL);
    API_LIMITER.wait_for_domain(&url).await?;

    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", api_key))
        .send()
        .await
        .map_err(|e| format!("Groq API request failed: {}", e))?;

    let body_text = handle_api_response(response, "Groq").await?;
    parse_models(&body_text)
}

fn parse_models(body: &str) -> Result<Vec<ModelInfo>, String> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| format!("Failed to parse Groq models response: {}", e))?;

    let data = json["data"].as_array().cloned().unwrap_or_default();
    Ok(data
        .iter()
        .filter_map(|m| {
            let id = m["id"].as_str()?.to_string();
            Some(ModelInfo {
                name: id.clone(),
                id,
            })
        })
        .collect())
}

/// Strip markdown code fences from a model response if present.
fn strip_markdown_fences(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        let after_open = match trimmed.find('\n') {
            Some(pos) => &trimmed[pos + 1..],
            None => trimmed,
        };
        let cleaned = after_open.trim_end();
        if let Some(stripped) = cleaned.strip_suffix("```") {
            return stripped.trim().to_string();
        }
        return cleaned.trim().to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_models() {
        let body = r#"{"data": [{"id": "llama-3.3-70b-versatile"}, {"id": "gemma2-9b-it"}, {"no_id": true}]}"#;
        let models = parse_models(body).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].id, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_strip_markdown_fences() {
        assert_eq!(strip_markdown_fences("plain text"), "plain text");
        assert_eq!(strip_markdown_fences("```\nhello\n```"), "hello");
        assert_eq!(strip_markdown_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_markdown_fences("  padded  "), "padded");
    }
}
