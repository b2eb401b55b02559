//! Cache Aside - A cache-aside data service
//!
//! Reads consult a fast cache before a slower backing store and repopulate
//! the cache with an expiry on miss; writes go to the backing store first
//! and invalidate the cached entry.

pub mod api;
pub mod backing;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use store::CacheAsideStore;
pub use tasks::spawn_cleanup_task;
