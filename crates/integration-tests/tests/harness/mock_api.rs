//! Mock SECP backend for integration tests
//!
//! Serves the locale dictionary and a handful of API routes with fixed
//! status codes, recording what it receives

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Token `/api/me` accepts
pub const VALID_TOKEN: &str = "good-token";

/// Mock backend that returns predictable responses
pub struct MockApi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockApiState>,
}

struct MockApiState {
    dictionary: Option<Value>,
    dictionary_delay: Duration,
    dictionary_count: AtomicU32,
    /// `Authorization` values seen per API request
    authorizations: Mutex<Vec<Vec<String>>>,
}

impl MockApiState {
    fn record(&self, headers: &HeaderMap) {
        let values = headers
            .get_all(AUTHORIZATION)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_owned)
            .collect();
        self.authorizations.lock().unwrap().push(values);
    }
}

/// Builder for [`MockApi`]
#[derive(Default)]
pub struct MockApiBuilder {
    dictionary: Option<Value>,
    dictionary_delay: Duration,
}

impl MockApiBuilder {
    /// Serve `dictionary` at `/ui/i18n/zh-CN.json` (404 otherwise)
    pub fn dictionary(mut self, dictionary: Value) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Hold dictionary responses back so concurrent loads overlap
    pub fn dictionary_delay(mut self, delay: Duration) -> Self {
        self.dictionary_delay = delay;
        self
    }

    pub async fn start(self) -> anyhow::Result<MockApi> {
        let state = Arc::new(MockApiState {
            dictionary: self.dictionary,
            dictionary_delay: self.dictionary_delay,
            dictionary_count: AtomicU32::new(0),
            authorizations: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/ui/i18n/{file}", routing::get(handle_dictionary))
            .route("/api/me", routing::get(handle_me))
            .route("/api/admin", routing::get(handle_admin))
            .route("/api/sms", routing::post(handle_sms))
            .route("/api/broken", routing::get(handle_broken))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(MockApi { addr, shutdown, state })
    }
}

impl MockApi {
    pub fn builder() -> MockApiBuilder {
        MockApiBuilder::default()
    }

    /// Start with the standard zh-CN dictionary
    pub async fn start() -> anyhow::Result<Self> {
        Self::builder().dictionary(default_dictionary()).start().await
    }

    pub fn base_url(&self) -> url::Url {
        url::Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    /// Number of dictionary requests received
    pub fn dictionary_count(&self) -> u32 {
        self.state.dictionary_count.load(Ordering::SeqCst)
    }

    /// `Authorization` values of each API request, in arrival order
    pub fn authorizations(&self) -> Vec<Vec<String>> {
        self.state.authorizations.lock().unwrap().clone()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

pub fn default_dictionary() -> Value {
    json!({
        "error.unauthorized": "登录已过期，请重新登录。",
        "error.forbiddenInternalOnly": "该功能仅限内部用户使用。",
        "error.toLogin": "请先登录。",
        "error.server": "服务器内部错误。",
        "common.requestFailed": "请求失败。",
        "greeting": "你好，{name}！"
    })
}

async fn handle_dictionary(State(state): State<Arc<MockApiState>>, Path(file): Path<String>) -> Response {
    state.dictionary_count.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(state.dictionary_delay).await;

    match (&state.dictionary, file.as_str()) {
        (Some(dictionary), "zh-CN.json") => Json(dictionary.clone()).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn handle_me(State(state): State<Arc<MockApiState>>, headers: HeaderMap) -> Response {
    state.record(&headers);

    let expected = format!("Bearer {VALID_TOKEN}");
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Json(json!({ "user": "alice" })).into_response(),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "code": "UNAUTHORIZED" }))).into_response(),
    }
}

async fn handle_admin(State(state): State<Arc<MockApiState>>, headers: HeaderMap) -> Response {
    state.record(&headers);
    (StatusCode::FORBIDDEN, Json(json!({ "code": "FORBIDDEN" }))).into_response()
}

async fn handle_sms(State(state): State<Arc<MockApiState>>, headers: HeaderMap) -> Response {
    state.record(&headers);
    (StatusCode::TOO_MANY_REQUESTS, Json(json!({ "code": "SMS_DAILY_LIMIT" }))).into_response()
}

async fn handle_broken(State(state): State<Arc<MockApiState>>, headers: HeaderMap) -> Response {
    state.record(&headers);
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
}
