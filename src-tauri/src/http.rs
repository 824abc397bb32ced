use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};
use std::time::{Duration, Instant};

use url::Url;

pub const USER_AGENT: &str = "GameDock/1.0";

/// Shared limiter for all outbound API calls. Per-domain tracking means the
/// upstream services pace independently of each other.
pub static API_LIMITER: LazyLock<RateLimiter> = LazyLock::new(|| RateLimiter::new(2.0));

/// Build the shared reqwest client used by all API modules.
/// 60s total timeout covers the slowest of the upstream APIs.
pub fn build_api_client() -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}

/// Per-domain rate limiter using a simple last-request-time tracking approach.
/// Ensures at most `requests_per_second` requests per domain.
pub struct RateLimiter {
    last_request: Mutex<HashMap<String, Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(requests_per_second: f64) -> Self {
        Self {
            last_request: Mutex::new(HashMap::new()),
            min_interval: Duration::from_secs_f64(1.0 / requests_per_second),
        }
    }

    /// Wait until enough time has elapsed since the last request to the same domain.
    pub async fn wait_for_domain(&self, url: &str) -> Result<(), String> {
        let domain = Url::parse(url)
            .map_err(|e| format!("Failed to parse URL '{}': {}", url, e))?
            .host_str()
            .ok_or_else(|| format!("No host in URL: {}", url))?
            .to_string();

        let sleep_duration = {
            let map = self.last_request.lock().unwrap();
            if let Some(last) = map.get(&domain) {
                let elapsed = last.elapsed();
                if elapsed < self.min_interval {
                    Some(self.min_interval - elapsed)
                } else {
                    None
                }
            } else {
                None
            }
        };

        if let Some(duration) = sleep_duration {
            tokio::time::sleep(duration).await;
        }

        // Update last request time after waiting
        let mut map = self.last_request.lock().unwrap();
        map.insert(domain, Instant::now());
        Ok(())
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Check the response status and return the body text, or a descriptive error
/// including the upstream status code and the first part of the body.
pub async fn handle_api_response(
    response: reqwest::Response,
    api_name: &str,
) -> Result<String, String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("Failed to read {} response body: {}", api_name, e))?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(format!(
            "{} API returned {}: {}",
            api_name,
            status,
            truncate_utf8(&body, 300)
        ))
    }
}

/// Truncate to at most `max` bytes without splitting a UTF-8 character.
fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_interval() {
        let limiter = RateLimiter::new(2.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_rate_limiter_rejects_bad_url() {
        let limiter = RateLimiter::new(1.0);
        assert!(limiter.wait_for_domain("not a url").await.is_err());
    }

    #[tokio::test]
    async fn test_rate_limiter_first_request_does_not_wait() {
        let limiter = RateLimiter::new(0.1);
        let start = Instant::now();
        limiter
            .wait_for_domain("https://api.example.com/x")
            .await
            .unwrap();
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_rate_limiter_spaces_same_domain_requests() {
        let limiter = RateLimiter::new(20.0);
        limiter
            .wait_for_domain("https://api.example.com/a")
            .await
            .unwrap();
        let start = Instant::now();
        limiter
            .wait_for_domain("https://api.example.com/b")
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        // Two-byte char straddling the cut point must not split
        let body = format!("{}\u{e9} tail", "x".repeat(299));
        let cut = truncate_utf8(&body, 300);
        assert_eq!(cut.len(), 299);
        assert!(cut.chars().all(|c| c == 'x'));

        assert_eq!(truncate_utf8("short", 300), "short");
        assert_eq!(truncate_utf8("\u{e9}\u{e9}\u{e9}", 3), "\u{e9}");
    }
}
