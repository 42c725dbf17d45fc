use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::cache::DashboardCache;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::error::AppResult;
use crate::handlers;
use crate::models::FilterSelection;
use crate::services::api_client::ApiClient;
use crate::services::axis::AxisRegistry;
use crate::state::AppState;

/// Build the application state and Axum router from a [`Config`].
///
/// Creates the upstream client and the dashboard caches, and assembles the
/// middleware stack. Returns the shared state and a ready-to-serve router.
pub fn build_app(config: Config) -> AppResult<(AppState, Router)> {
    let api = ApiClient::new(&config.api_url, &config.api_url_fallback)?;
    let debounce = Duration::from_millis(config.debounce_ms);

    let state = AppState {
        config: Arc::new(config),
        api: Arc::new(api),
        cache: Arc::new(DashboardCache::new()),
        selection: Arc::new(RwLock::new(FilterSelection::default())),
        debouncer: Arc::new(Debouncer::new(debounce)),
        axis: Arc::new(AxisRegistry::new()),
    };

    let app = Router::new()
        .merge(handlers::routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    Ok((state, app))
}

/// Bind the router to `host:port` and spawn the server as a tokio task.
///
/// Returns the actual port the server bound to (useful when `port` is 0 for
/// OS-assigned ports) and a [`JoinHandle`] for the server task.
pub async fn serve(
    app: Router,
    host: &str,
    port: u16,
) -> Result<(u16, JoinHandle<()>), Box<dyn std::error::Error>> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let actual_port = listener.local_addr()?.port();

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    Ok((actual_port, handle))
}
