//! HTTP client for the upstream aggregation API with automatic fallback:
//! one attempt against the primary base URL, one against the fallback,
//! never more.

use std::time::Duration;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::dataset::Dataset;
use crate::models::{FilterOptions, FilterSelection};

const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct ApiClient {
    http: Client,
    primary_url: String,
    fallback_url: String,
}

impl ApiClient {
    pub fn new(primary_url: &str, fallback_url: &str) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http,
            primary_url: primary_url.trim_end_matches('/').to_string(),
            fallback_url: fallback_url.trim_end_matches('/').to_string(),
        })
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        base: &str,
        method: &Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, String> {
        let url = format!("{}{}", base, path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| format!("{}: {}", url, e))?
            .error_for_status()
            .map_err(|e| format!("{}: {}", url, e))?;
        response
            .json::<T>()
            .await
            .map_err(|e| format!("{}: invalid response body: {}", url, e))
    }

    /// Issue a request against the primary endpoint; on any failure
    /// (transport error or non-2xx), retry once against the fallback with
    /// the identical method and body. A failure of both attempts surfaces
    /// the two underlying errors together.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> AppResult<T> {
        match self.attempt(&self.primary_url, &method, path, body.as_ref()).await {
            Ok(value) => Ok(value),
            Err(primary) => {
                warn!(error = %primary, "primary endpoint failed, trying fallback");
                match self.attempt(&self.fallback_url, &method, path, body.as_ref()).await {
                    Ok(value) => {
                        debug!(path, "fallback endpoint served the request");
                        Ok(value)
                    }
                    Err(fallback) => Err(AppError::UpstreamUnavailable { primary, fallback }),
                }
            }
        }
    }

    /// Distinct filter values offered by the upstream.
    pub async fn filter_options(&self) -> AppResult<FilterOptions> {
        self.request(Method::GET, "/api/filters/", None).await
    }

    /// The filtered dataset for one selection.
    pub async fn filtered_data(&self, filters: &FilterSelection) -> AppResult<Dataset> {
        let body = serde_json::json!({ "filters": filters });
        self.request(Method::POST, "/api/data/", Some(body)).await
    }

    /// Upstream liveness probe.
    pub async fn health(&self) -> AppResult<()> {
        let _: Value = self.request(Method::GET, "/api/health/", None).await?;
        Ok(())
    }
}
