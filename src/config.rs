use std::env;

/// Public deployment of the aggregation API, used when no fallback is
/// configured.
pub const DEFAULT_FALLBACK_API_URL: &str =
    "https://quant-matrix-eda-app-production.up.railway.app";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Primary base URL of the upstream aggregation API.
    pub api_url: String,
    /// Secondary base URL tried once when the primary fails.
    pub api_url_fallback: String,
    /// Settle window for coalescing rapid filter changes.
    pub debounce_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: env::var("SURPLUS_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("SURPLUS_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(7080),
            api_url: env::var("SURPLUS_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".into()),
            api_url_fallback: env::var("SURPLUS_API_URL_FALLBACK")
                .unwrap_or_else(|_| DEFAULT_FALLBACK_API_URL.into()),
            debounce_ms: env::var("SURPLUS_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(250),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
