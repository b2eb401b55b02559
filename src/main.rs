//! Cache Aside - A cache-aside data service
//!
//! Reads consult a fast cache before a slower backing store; writes go to
//! the backing store first and invalidate the cached entry.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_aside::api::create_router;
use cache_aside::backing::SimulatedBackingStore;
use cache_aside::cache::MemoryCache;
use cache_aside::{spawn_cleanup_task, AppState, CacheAsideStore, Config};

/// Main entry point for the cache-aside data service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Construct the cache and backing-store collaborators
/// 4. Inject them into the cache-aside store
/// 5. Start background cache sweep task
/// 6. Create Axum router with all endpoints
/// 7. Start HTTP server on configured port
/// 8. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_aside=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cache-aside data service");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, port={}, cleanup_interval={}s, db_latency={}ms",
        config.cache_ttl, config.server_port, config.cleanup_interval, config.db_latency_ms
    );

    // Both collaborators are owned here and injected into the store; the
    // store holds no lifecycle over either
    let cache = Arc::new(MemoryCache::new());
    let backing = Arc::new(SimulatedBackingStore::new(Duration::from_millis(
        config.db_latency_ms,
    )));
    let store = CacheAsideStore::new(
        cache.clone(),
        backing,
        Duration::from_secs(config.cache_ttl),
    );
    info!("Cache-aside store initialized");

    // Start background sweep task over the in-memory cache
    let cleanup_handle = spawn_cleanup_task(cache, config.cleanup_interval);
    info!("Background cache sweep task started");

    // Create router with all endpoints
    let app = create_router(AppState::new(store));

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the sweep task
    cleanup_handle.abort();
    warn!("Cache sweep task aborted");
}
