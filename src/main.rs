//! Revista - backend for a Romanian online magazine
//!
//! Serves the magazine JSON API over the Supabase content store, with a
//! file-backed response cache.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use revista::api::{create_router, AppState};
use revista::cache::FileStorage;
use revista::config::Config;
use revista::routing::Route;
use revista::store::SupabaseStore;
use revista::tasks::{
    spawn_cleanup_task, spawn_prefetcher, FeedWarmer, PrefetchReport, PrefetchSchedule,
};

/// Main entry point for the magazine server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the cache file and connect the content store
/// 4. Start the cache sweep and route prefetch tasks
/// 5. Serve the API until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "revista=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Revista server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: store={}, port={}, cache_file={}, list_ttl={}s, article_ttl={}s",
        config.rest_url(),
        config.server_port,
        config.cache_file,
        config.list_cache_ttl,
        config.article_cache_ttl
    );

    let storage = FileStorage::open(&config.cache_file);
    let store = SupabaseStore::new(config.rest_url(), &config.supabase_anon_key);
    let state = AppState::from_config(&config, Arc::new(store), Arc::new(storage));
    info!("Content store and cache initialized");

    let sweep_handle = spawn_cleanup_task(state.feed.clone(), config.sweep_interval);
    let prefetch_handle = spawn_prefetcher(
        Route::prefetch_targets(),
        Arc::new(FeedWarmer::new(state.feed.clone())),
        PrefetchSchedule::after_delay(config.prefetch_delay()),
    );
    info!("Background tasks started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle, prefetch_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts the
/// background tasks.
async fn shutdown_signal(sweep_handle: JoinHandle<()>, prefetch_handle: JoinHandle<PrefetchReport>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
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

    sweep_handle.abort();
    prefetch_handle.abort();
    warn!("Background tasks aborted");
}
