//! Viewport Cache - feed simulator
//!
//! Replays a scroll session over a synthetic vehicle listings feed: each
//! scroll event computes the rendered window, rows entering it load their
//! photos through the shared cache, and a sweep task keeps the cache trim.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use viewport_cache::{
    spawn_sweep_task, BoundedCache, Config, FetchError, ImageFetcher, ImageLoader, ListWindow,
    VirtualRange,
};

const FEED_LEN: usize = 500;
const ROW_HEIGHT: f64 = 120.0;
const VIEWPORT_HEIGHT: f64 = 800.0;
const PLACEHOLDER_AVATAR: &str = "https://cdn.listings.example/static/avatar-placeholder.png";

/// Stands in for the network: resolves a remote URI to a local file path
/// after a short delay. Photos whose id ends in 37 are missing upstream.
#[derive(Debug)]
struct SimulatedFetcher {
    latency: Duration,
}

impl ImageFetcher for SimulatedFetcher {
    async fn fetch(&self, uri: &str) -> Result<String, FetchError> {
        tokio::time::sleep(self.latency).await;
        if uri.ends_with("37.jpg") {
            return Err(FetchError::unavailable(uri, "HTTP 404"));
        }
        let mut hasher = DefaultHasher::new();
        uri.hash(&mut hasher);
        Ok(format!("file:///var/cache/images/{:016x}", hasher.finish()))
    }
}

/// Main entry point for the feed simulator.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared cache instance
/// 4. Start background sweep task
/// 5. Replay the scroll session until done or interrupted
/// 6. Abort the sweep task and report cache statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "viewport_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting feed simulator");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, default_ttl={}s, eviction={}%, sweep_interval={}s, overscan={}",
        config.max_entries,
        config.default_ttl,
        config.eviction_percent,
        config.sweep_interval,
        config.overscan
    );

    let cache = Arc::new(RwLock::new(BoundedCache::<String>::from_config(&config)));
    let sweep_handle = spawn_sweep_task(
        cache.clone(),
        config.sweep_interval(),
        config.sweep_max_age(),
    );

    let loader = ImageLoader::new(
        cache.clone(),
        SimulatedFetcher {
            latency: Duration::from_millis(15),
        },
    )
    .with_timeout(config.fetch_timeout());
    let window = ListWindow::new(ROW_HEIGHT, config.overscan)
        .ok_or_else(|| anyhow::anyhow!("row height must be positive"))?;

    tokio::select! {
        _ = replay_session(&loader, &window) => {
            info!("Scroll session finished");
        }
        _ = shutdown_signal() => {}
    }

    sweep_handle.abort();
    warn!("Sweep task aborted");

    let stats = cache.read().await.stats();
    info!(hit_rate = stats.hit_rate(), "Final cache stats");
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

/// Scrolls down the feed in flings, bounces at the top, and scrolls back.
async fn replay_session(loader: &ImageLoader<SimulatedFetcher>, window: &ListWindow) {
    let bottom = window.max_scroll_offset(VIEWPORT_HEIGHT, FEED_LEN);
    let step = ROW_HEIGHT * 2.5;

    let mut offsets = Vec::new();
    let mut offset = -60.0;
    while offset < bottom * 0.6 {
        offsets.push(offset);
        offset += step;
    }
    while offset > -40.0 {
        offsets.push(offset);
        offset -= step * 1.5;
    }

    let mut previous = VirtualRange::EMPTY;
    for offset in offsets {
        let range = window.range(offset, VIEWPORT_HEIGHT, FEED_LEN);
        let uris: Vec<String> = range
            .entering(&previous)
            .flat_map(|row| [photo_uri(row), PLACEHOLDER_AVATAR.to_string()])
            .collect();

        if !uris.is_empty() {
            let report = loader.prefetch(uris).await;
            debug!(offset, start = range.start, end = range.end, ?report, "Scroll event");
        }
        previous = range;
        tokio::time::sleep(Duration::from_millis(16)).await;
    }
}

fn photo_uri(row: usize) -> String {
    format!("https://cdn.listings.example/vehicles/{row}.jpg")
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to install Ctrl+C handler");
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
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, stopping session...");
        }
        _ = terminate => {
            info!("Received SIGTERM, stopping session...");
        }
    }
}
