//! Shared test utilities for integration tests.
//!
//! Provides a `TestClient` that drives the application router directly,
//! plus a `StubUpstream`: a real HTTP server bound to an OS-assigned port
//! that plays the role of the external aggregation API.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use surplus::config::Config;
use surplus::handlers;
use surplus::server;
use surplus::state::AppState;
use tower::ServiceExt;

/// A stand-in for the upstream aggregation API. Its dataset response and
/// failure mode can be swapped at runtime; `hits` counts dataset requests.
pub struct StubUpstream {
    pub base_url: String,
    data: Arc<Mutex<Value>>,
    hits: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl StubUpstream {
    pub async fn start(initial_data: Value) -> Self {
        let data = Arc::new(Mutex::new(initial_data));
        let hits = Arc::new(AtomicUsize::new(0));
        let fail = Arc::new(AtomicBool::new(false));

        let data_route = {
            let data = Arc::clone(&data);
            let hits = Arc::clone(&hits);
            let fail = Arc::clone(&fail);
            post(move |_body: Json<Value>| {
                let data = Arc::clone(&data);
                let hits = Arc::clone(&hits);
                let fail = Arc::clone(&fail);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    if fail.load(Ordering::SeqCst) {
                        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"})))
                            .into_response();
                    }
                    let value = data.lock().unwrap().clone();
                    Json(value).into_response()
                }
            })
        };

        let app = Router::new()
            .route("/api/data/", data_route)
            .route(
                "/api/filters/",
                get(|| async {
                    Json(json!({
                        "brands": ["Brand 1", "Brand 2"],
                        "packTypes": ["Bottle", "Can"],
                        "ppgs": ["Small", "Large"],
                        "channels": ["Retail"],
                        "years": [2022, 2023]
                    }))
                }),
            )
            .route(
                "/api/health/",
                get(|| async { Json(json!({"status": "ok"})) }),
            );

        let (port, _handle) = server::serve(app, "127.0.0.1", 0)
            .await
            .expect("Failed to start stub upstream");

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            data,
            hits,
            fail,
        }
    }

    /// Swap the dataset response served for subsequent requests.
    pub fn set_data(&self, value: Value) {
        *self.data.lock().unwrap() = value;
    }

    /// Make the dataset endpoint answer 500 until turned off again.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of dataset requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// A base URL that refuses connections: bound, resolved, then released.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// A test client that drives the application router without binding a
/// listener for it.
pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// Create a client whose upstream is the given primary/fallback pair.
    pub fn with_upstream(primary: &str, fallback: &str) -> Self {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 0,
            api_url: primary.into(),
            api_url_fallback: fallback.into(),
            debounce_ms: 25,
        };
        let (state, _app) = server::build_app(config).expect("Failed to build app");
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    /// Run an immediate (non-debounced) dataset refresh.
    pub async fn refresh(&self) {
        self.state.refresh_now().await;
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        split(response).await
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        uri: &str,
    ) -> (StatusCode, Option<T>) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).ok();
        (status, parsed)
    }

    /// Make a POST request with a JSON body and return status and body.
    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        split(response).await
    }
}

async fn split(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).to_string())
}

/// A small but fully populated dataset response.
pub fn sample_dataset() -> Value {
    json!({
        "salesByYear": [
            {"Year": 2022, "SalesValue": 2_000_000.0},
            {"Year": 2023, "SalesValue": 3_000_000.0}
        ],
        "salesByBrandYear": [
            {"Year": 2023, "Brand": "Brand 1", "SalesValue": 1_000_000.0},
            {"Year": 2023, "Brand": "Brand 2", "SalesValue": 2_000_000.0}
        ],
        "volumeByBrandYear": [
            {"Year": 2023, "Brand": "Brand 1", "Volume": 500_000.0},
            {"Year": 2023, "Brand": "Brand 2", "Volume": 400_000.0}
        ],
        "yearBrandSales": [
            {"Year": 2022, "Brand": "Brand 1", "SalesValue": 900_000.0},
            {"Year": 2023, "Brand": "Brand 1", "SalesValue": 1_000_000.0},
            {"Year": 2023, "Brand": "Brand 2", "SalesValue": 2_000_000.0}
        ],
        "marketShareSales": [
            {"Brand": "Brand 1", "SalesValue": 1_000_000.0, "Volume": 500_000.0},
            {"Brand": "Brand 2", "SalesValue": 2_000_000.0, "Volume": 400_000.0}
        ],
        "monthlyTrend": [
            {"date": "2023-01-01", "SalesValue": 400_000.0, "Volume": 200_000.0},
            {"date": "2023-02-01", "SalesValue": 600_000.0, "Volume": 250_000.0}
        ],
        "monthlyBrandSales": [
            {"Year": 2023, "Month": 1, "Brand": "Brand 1", "SalesValue": 100_000.0},
            {"Year": 2023, "Month": 1, "Brand": "Brand 2", "SalesValue": 300_000.0},
            {"Year": 2023, "Month": 2, "Brand": "Brand 1", "SalesValue": 200_000.0},
            {"Year": 2023, "Month": 2, "Brand": "Brand 2", "SalesValue": 400_000.0}
        ],
        "kpiCorrelation": [
            {"row": "SalesValue", "col": "SalesValue", "value": 1.0},
            {"row": "SalesValue", "col": "Volume", "value": 0.8},
            {"row": "Volume", "col": "SalesValue", "value": 0.8},
            {"row": "Volume", "col": "Volume", "value": 1.0}
        ]
    })
}
