//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Supabase project (without `/rest/v1`)
    pub supabase_url: String,
    /// Anonymous API key sent with every content store request
    pub supabase_anon_key: String,
    /// HTTP server port
    pub server_port: u16,
    /// File backing the persistent cache storage
    pub cache_file: String,
    /// TTL in seconds for hero and carousel list caches
    pub list_cache_ttl: u64,
    /// TTL in seconds for the single-article cache
    pub article_cache_ttl: u64,
    /// Interval in seconds between expired-entry sweeps
    pub sweep_interval: u64,
    /// Fallback delay in milliseconds before route prefetching starts
    pub prefetch_delay_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SUPABASE_URL` - Content store base URL (default: http://localhost:54321)
    /// - `SUPABASE_ANON_KEY` - Content store API key (default: empty)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_FILE` - Persistent cache file (default: revista-cache.json)
    /// - `LIST_CACHE_TTL` - List cache TTL in seconds (default: 300)
    /// - `ARTICLE_CACHE_TTL` - Article cache TTL in seconds (default: 1800)
    /// - `SWEEP_INTERVAL` - Expired entry sweep frequency in seconds (default: 60)
    /// - `PREFETCH_DELAY_MS` - Prefetch fallback delay in milliseconds (default: 1200)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            supabase_url: env::var("SUPABASE_URL").unwrap_or(defaults.supabase_url),
            supabase_anon_key: env::var("SUPABASE_ANON_KEY").unwrap_or(defaults.supabase_anon_key),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            cache_file: env::var("CACHE_FILE").unwrap_or(defaults.cache_file),
            list_cache_ttl: parse_var("LIST_CACHE_TTL", defaults.list_cache_ttl),
            article_cache_ttl: parse_var("ARTICLE_CACHE_TTL", defaults.article_cache_ttl),
            sweep_interval: parse_var("SWEEP_INTERVAL", defaults.sweep_interval),
            prefetch_delay_ms: parse_var("PREFETCH_DELAY_MS", defaults.prefetch_delay_ms),
        }
    }

    /// PostgREST endpoint of the content store.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url.trim_end_matches('/'))
    }

    pub fn list_ttl(&self) -> Duration {
        Duration::from_secs(self.list_cache_ttl)
    }

    pub fn article_ttl(&self) -> Duration {
        Duration::from_secs(self.article_cache_ttl)
    }

    pub fn prefetch_delay(&self) -> Duration {
        Duration::from_millis(self.prefetch_delay_ms)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: String::new(),
            server_port: 3000,
            cache_file: "revista-cache.json".to_string(),
            list_cache_ttl: 300,
            article_cache_ttl: 1800,
            sweep_interval: 60,
            prefetch_delay_ms: 1200,
        }
    }
}
