use surplus::config::Config;
use surplus::server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "surplus=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Starting Surplus {} on {}", surplus::VERSION, config.address());

    let host = config.host.clone();
    let port = config.port;
    let (state, app) = server::build_app(config).expect("Failed to build application");

    // The initial dataset load is explicit; only selection changes go
    // through the debouncer.
    {
        let state = state.clone();
        tokio::spawn(async move {
            state.refresh_now().await;
        });
    }

    let (actual_port, handle) = server::serve(app, &host, port)
        .await
        .expect("Failed to bind address");

    tracing::info!("Listening on http://{}:{}", host, actual_port);

    handle.await.expect("Server error");
}
