//! Common test utilities for API integration tests
//!
//! Every test gets a fresh router over an in-memory store seeded with two
//! categories, so no database is needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde::de::DeserializeOwned;
use tomato_api::app::{build_router, AppState};
use tomato_api::config::{ApiConfig, Config, DatabaseConfig};
use tomato_shared::store::memory::MemoryStore;
use tower::ServiceExt;

/// Test context holding a router and the store behind it
pub struct TestContext {
    pub app: axum::Router,
    pub store: Arc<MemoryStore>,
}

/// A response with its body already read
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parses the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Body is not valid JSON ({}): {}",
                e,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    /// Body as text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl TestContext {
    /// Creates a context with categories 1 "Groceries" and 2 "Work"
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::with_categories([(1, "Groceries"), (2, "Work")]));
        let state = AppState::new(store.clone(), test_config());

        Self {
            app: build_router(state),
            store,
        }
    }

    /// Sends a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Sends a POST request with a JSON body
    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        self.post_raw(uri, body.to_string()).await
    }

    /// Sends a POST request with a body that is sent as-is
    pub async fn post_raw(&self, uri: &str, body: impl Into<String>) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.into()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        TestResponse { status, body }
    }
}

fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgresql://localhost/unused".to_string(),
            connect_timeout_seconds: 10,
            operation_timeout_seconds: 30,
        },
    }
}
