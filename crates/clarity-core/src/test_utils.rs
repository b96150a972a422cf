//! Test utilities for clarity-core
//!
//! This module provides a mock Gemini server that speaks enough of the
//! `generateContent` API to exercise the real HTTP backend end to end.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::sync::oneshot;

/// Scripted reply for one model
#[derive(Debug, Clone)]
pub enum MockGeminiReply {
    /// Respond 200 with a single candidate containing this text
    Text(String),
    /// Respond 200 with no candidates (blocked / empty answer)
    NoCandidates,
    /// Respond with this HTTP status and an error body
    Status(u16),
    /// Respond 200 with a body that is not JSON
    Malformed,
}

#[derive(Clone)]
struct MockState {
    replies: Arc<Vec<(String, MockGeminiReply)>>,
    calls: Arc<Mutex<Vec<String>>>,
}

/// Mock Gemini server for testing and development
pub struct MockGeminiServer {
    addr: SocketAddr,
    calls: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockGeminiServer {
    /// Start the mock server on an available port
    ///
    /// Models without a scripted reply get a 404, like unknown models on the
    /// real API.
    pub async fn start(replies: Vec<(String, MockGeminiReply)>) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            replies: Arc::new(replies),
            calls: calls.clone(),
        };

        let app = Router::new()
            .route("/v1beta/models", get(handle_list_models))
            .route("/v1beta/models/:model_action", post(handle_generate))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            calls,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Models requested so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockGeminiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn has_api_key(headers: &HeaderMap) -> bool {
    headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|k| !k.is_empty())
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "error": { "code": status.as_u16(), "message": message } })),
    )
        .into_response()
}

/// Model list endpoint (health check)
async fn handle_list_models(headers: HeaderMap) -> Response {
    if !has_api_key(&headers) {
        return error_response(StatusCode::UNAUTHORIZED, "API key not valid");
    }
    Json(json!({ "models": [{ "name": "models/gemini-2.0-flash" }] })).into_response()
}

/// generateContent endpoint; the path segment is `<model>:generateContent`
async fn handle_generate(
    State(state): State<MockState>,
    Path(model_action): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !has_api_key(&headers) {
        return error_response(StatusCode::UNAUTHORIZED, "API key not valid");
    }

    let Some(model) = model_action.strip_suffix(":generateContent") else {
        return error_response(StatusCode::NOT_FOUND, "Unknown action");
    };
    state.calls.lock().unwrap().push(model.to_string());

    match state.replies.iter().find(|(m, _)| m == model).map(|(_, r)| r) {
        Some(MockGeminiReply::Text(text)) => Json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }]
        }))
        .into_response(),
        Some(MockGeminiReply::NoCandidates) => {
            Json(json!({ "promptFeedback": { "blockReason": "OTHER" } })).into_response()
        }
        Some(MockGeminiReply::Status(code)) => error_response(
            StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            "Scripted failure",
        ),
        Some(MockGeminiReply::Malformed) => {
            (StatusCode::OK, "<html>upstream proxy</html>").into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, "Model not found"),
    }
}
