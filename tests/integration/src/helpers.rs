//! Test helpers for integration tests
//!
//! Builds the application over an [`InMemoryStore`] and sends requests to it
//! with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use invite_api::{create_app, AppState};
use invite_core::Snowflake;
use invite_service::testing::InMemoryStore;
use serde::Serialize;
use serde_json::Value;
use tower::ServiceExt;

/// Largest response body the helpers will buffer
const MAX_BODY: usize = 1024 * 1024;

/// Application under test plus a handle on its backing store
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    router: Router,
}

/// Status and decoded JSON body of a response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// Payload of a successful `{ "data": ... }` response
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// Error code of a failed response
    pub fn error_code(&self) -> Option<&str> {
        self.body["error"]["code"].as_str()
    }
}

impl TestApp {
    /// Guild with Bronze/Silver/Gold roles and ranks 100/250/500
    pub async fn tiered() -> Self {
        Self::with_store(InMemoryStore::tiered_guild().await)
    }

    /// Guild with Bronze/Silver/Gold roles and no ranks
    pub async fn standard() -> Self {
        Self::with_store(InMemoryStore::standard_guild().await)
    }

    pub fn with_store(store: Arc<InMemoryStore>) -> Self {
        let router = create_app(AppState::new(store.context()));
        Self { store, router }
    }

    /// Engine acting as `bot_user_id` instead of the default bot account
    pub fn acting_as(store: Arc<InMemoryStore>, bot_user_id: Snowflake) -> Self {
        let router = create_app(AppState::new(store.context_as(bot_user_id)));
        Self { store, router }
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post<T: Serialize>(&self, uri: &str, body: &T) -> Result<TestResponse> {
        self.send(Method::POST, uri, Some(serde_json::to_value(body)?)).await
    }

    pub async fn post_empty(&self, uri: &str) -> Result<TestResponse> {
        self.send(Method::POST, uri, None).await
    }

    pub async fn put<T: Serialize>(&self, uri: &str, body: &T) -> Result<TestResponse> {
        self.send(Method::PUT, uri, Some(serde_json::to_value(body)?)).await
    }

    pub async fn delete<T: Serialize>(&self, uri: &str, body: &T) -> Result<TestResponse> {
        self.send(Method::DELETE, uri, Some(serde_json::to_value(body)?)).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> Result<TestResponse> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), MAX_BODY)
            .await
            .context("reading response body")?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("decoding response body")?
        };

        Ok(TestResponse { status, body })
    }
}

/// Fail with the response body when the status is not the expected one
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "unexpected status, body: {}",
        response.body
    );
}

/// Role ids in a JSON array of strings
pub fn id_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|ids| {
            ids.iter()
                .filter_map(|id| id.as_str().map(ToString::to_string))
                .collect()
        })
        .unwrap_or_default()
}
