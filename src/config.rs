//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in seconds applied to cache entries populated on a read miss
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep task interval in seconds
    pub cleanup_interval: u64,
    /// Simulated backing-store latency in milliseconds
    pub db_latency_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL` - Cache entry TTL in seconds (default: 30)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    /// - `DB_LATENCY_MS` - Simulated backing-store latency (default: 100)
    pub fn from_env() -> Self {
        Self {
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            db_latency_ms: env::var("DB_LATENCY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: 30,
            server_port: 3000,
            cleanup_interval: 1,
            db_latency_ms: 100,
        }
    }
}
