use std::path::Path;

use chrono::{Duration, Utc};
use rusqlite::{params, Connection};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

/// SQLite-backed TTL cache for API payloads (owned-games library, deal
/// lists, price overviews). Values are stored as JSON under a namespaced key.
/// All operations are synchronous (rusqlite is blocking); callers in async
/// contexts should use `tokio::task::spawn_blocking`.
pub struct ApiCache {
    conn: Connection,
}

impl ApiCache {
    /// Open or create the cache database at the given path.
    pub fn new(db_path: &Path) -> Result<Self, String> {
        let conn = Connection::open(db_path)
            .map_err(|e| format!("Failed to open cache database at {:?}: {}", db_path, e))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS api_cache (
                cache_key TEXT PRIMARY KEY,
                payload_json TEXT NOT NULL,
                cached_at TEXT NOT NULL,
                expires_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_api_cache_expires ON api_cache(expires_at);",
        )
        .map_err(|e| format!("Failed to create cache table: {}", e))?;

        Ok(Self { conn })
    }

    /// Look up a cached payload under `namespace` and `key`.
    /// Returns None if not found or if the entry has expired.
    pub fn get<T: DeserializeOwned>(
        &self,
        namespace: &str,
        key: &str,
    ) -> Result<Option<T>, String> {
        let cache_key = make_key(namespace, key);
        let now = Utc::now().to_rfc3339();

        let mut stmt = self
            .conn
            .prepare("SELECT payload_json FROM api_cache WHERE cache_key = ?1 AND expires_at > ?2")
            .map_err(|e| format!("Failed to prepare cache query: {}", e))?;

        let result = stmt.query_row(params![cache_key, now], |row| {
            let json: String = row.get(0)?;
            Ok(json)
        });

        match result {
            Ok(json) => {
                let value: T = serde_json::from_str(&json)
                    .map_err(|e| format!("Failed to deserialize cached payload: {}", e))?;
                info!("Cache hit for '{}'", cache_key);
                Ok(Some(value))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(format!("Cache lookup failed: {}", e)),
        }
    }

    /// Store a payload with the given TTL in minutes.
    /// Overwrites any existing entry under the same key.
    pub fn put<T: Serialize>(
        &self,
        namespace: &str,
        key: &str,
        value: &T,
        ttl_minutes: i64,
    ) -> Result<(), String> {
        let cache_key = make_key(namespace, key);
        let now = Utc::now();
        let expires = now + Duration::minutes(ttl_minutes);
        let json = serde_json::to_string(value)
            .map_err(|e| format!("Failed to serialize payload for cache: {}", e))?;

        self.conn
            .execute(
                "INSERT OR REPLACE INTO api_cache
                 (cache_key, payload_json, cached_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![cache_key, json, now.to_rfc3339(), expires.to_rfc3339()],
            )
            .map_err(|e| format!("Failed to store payload in cache: {}", e))?;

        info!("Cached '{}' (expires in {} minutes)", cache_key, ttl_minutes);
        Ok(())
    }

    /// Delete all expired entries. Returns the number of deleted rows.
    pub fn clear_expired(&self) -> Result<usize, String> {
        let now = Utc::now().to_rfc3339();
        let count = self
            .conn
            .execute("DELETE FROM api_cache WHERE expires_at < ?1", params![now])
            .map_err(|e| format!("Failed to clear expired cache entries: {}", e))?;

        info!("Cleared {} expired cache entries", count);
        Ok(count)
    }
}

/// Build the namespaced key: lowercase, trimmed, collapsed whitespace.
fn make_key(namespace: &str, key: &str) -> String {
    let normalized = key
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ");
    format!("{}:{}", namespace, normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Payload {
        title: String,
        price: f64,
    }

    fn make_payload(title: &str) -> Payload {
        Payload {
            title: title.to_string(),
            price: 19.99,
        }
    }

    #[test]
    fn test_cache_put_and_get() {
        let dir = TempDir::new().unwrap();
        let cache = ApiCache::new(&dir.path().join("test.db")).unwrap();
        let payload = make_payload("Hollow Knight");

        cache.put("deals", "Hollow Knight", &payload, 30).unwrap();
        let result: Option<Payload> = cache.get("deals", "Hollow Knight").unwrap();
        assert_eq!(result, Some(payload));
    }

    #[test]
    fn test_cache_get_nonexistent() {
        let dir = TempDir::new().unwrap();
        let cache = ApiCache::new(&dir.path().join("test.db")).unwrap();

        let result: Option<Payload> = cache.get("deals", "nonexistent").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_cache_namespaces_are_isolated() {
        let dir = TempDir::new().unwrap();
        let cache = ApiCache::new(&dir.path().join("test.db")).unwrap();
        let payload = make_payload("Celeste");

        cache.put("deals", "Celeste", &payload, 30).unwrap();
        let other: Option<Payload> = cache.get("library", "Celeste").unwrap();
        assert!(other.is_none());
    }

    #[test]
    fn test_cache_normalized_key() {
        let dir = TempDir::new().unwrap();
        let cache = ApiCache::new(&dir.path().join("test.db")).unwrap();
        let payload = make_payload("Elden Ring");

        cache.put("deals", "  Elden  Ring  ", &payload, 30).unwrap();

        let result: Option<Payload> = cache.get("deals", "elden ring").unwrap();
        assert!(result.is_some());
        let result: Option<Payload> = cache.get("deals", "ELDEN RING").unwrap();
        assert!(result.is_some());
    }

    #[test]
    fn test_cache_expired_entry_returns_none() {
        let dir = TempDir::new().unwrap();
        let cache = ApiCache::new(&dir.path().join("test.db")).unwrap();
        let payload = make_payload("Expired Game");

        // Insert directly with an already-past expiry
        let now = Utc::now();
        let expired = now - Duration::hours(1);
        let json = serde_json::to_string(&payload).unwrap();
        cache
            .conn
            .execute(
                "INSERT OR REPLACE INTO api_cache
                 (cache_key, payload_json, cached_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    make_key("deals", "Expired Game"),
                    json,
                    now.to_rfc3339(),
                    expired.to_rfc3339(),
                ],
            )
            .unwrap();

        let result: Option<Payload> = cache.get("deals", "Expired Game").unwrap();
        assert!(result.is_none(), "Expired entry should return None");
    }

    #[test]
    fn test_cache_clear_expired() {
        let dir = TempDir::new().unwrap();
        let cache = ApiCache::new(&dir.path().join("test.db")).unwrap();
        let payload = make_payload("Test Game");

        cache.put("deals", "valid entry", &payload, 30).unwrap();

        let now = Utc::now();
        let expired = now - Duration::hours(1);
        let json = serde_json::to_string(&payload).unwrap();
        cache
            .conn
            .execute(
                "INSERT OR REPLACE INTO api_cache
                 (cache_key, payload_json, cached_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    make_key("deals", "expired entry"),
                    json,
                    now.to_rfc3339(),
                    expired.to_rfc3339(),
                ],
            )
            .unwrap();

        let deleted = cache.clear_expired().unwrap();
        assert_eq!(deleted, 1);

        let valid: Option<Payload> = cache.get("deals", "valid entry").unwrap();
        assert!(valid.is_some());
        let gone: Option<Payload> = cache.get("deals", "expired entry").unwrap();
        assert!(gone.is_none());
    }

    #[test]
    fn test_cache_put_overwrites() {
        let dir = TempDir::new().unwrap();
        let cache = ApiCache::new(&dir.path().join("test.db")).unwrap();

        let v1 = make_payload("v1");
        let mut v2 = make_payload("v2");
        v2.price = 9.99;

        cache.put("deals", "same key", &v1, 30).unwrap();
        cache.put("deals", "same key", &v2, 30).unwrap();

        let result: Payload = cache.get("deals", "same key").unwrap().unwrap();
        assert_eq!(result.title, "v2");
        assert_eq!(result.price, 9.99);
    }

    #[test]
    fn test_make_key() {
        assert_eq!(make_key("deals", "  Hello  World  "), "deals:hello world");
        assert_eq!(make_key("library", "UPPER"), "library:upper");
    }
}
