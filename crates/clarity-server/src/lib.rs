//! Clarity Web Server
//!
//! Axum-based REST API around the Clarity categorizer.
//!
//! - `POST /api/transactions/categorize` assigns a category to a description
//! - `GET /api/categories` lists the taxonomy
//! - `GET /api/health` reports liveness and whether AI is configured
//!
//! CORS origins come from `FRONTEND_URL`; error responses are sanitized.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use clarity_core::{AIBackend, Categorizer};

mod handlers;

/// Default frontend origin (Vite dev server)
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_FRONTEND_URL.to_string()],
        }
    }
}

impl ServerConfig {
    /// Read `FRONTEND_URL` (comma-separated origins)
    pub fn from_env() -> Self {
        match std::env::var("FRONTEND_URL") {
            Ok(value) => Self {
                allowed_origins: parse_origins(&value),
            },
            Err(_) => Self::default(),
        }
    }
}

/// Parse a comma-separated origin list, dropping blanks and trailing slashes
pub fn parse_origins(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Shared application state
pub struct AppState {
    pub categorizer: Categorizer,
}

/// Create the application router
pub fn create_router(categorizer: Categorizer, config: ServerConfig) -> Router {
    let cors = cors_layer(&config);

    let state = Arc::new(AppState { categorizer });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/categories", get(handlers::list_categories))
        .route(
            "/transactions/categorize",
            post(handlers::categorize_transaction),
        );

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.allowed_origins.is_empty() {
        return layer;
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

/// Start the server
pub async fn serve(
    categorizer: Categorizer,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    check_ai_connection(&categorizer).await;
    info!("CORS origins: {}", config.allowed_origins.join(", "));

    let app = create_router(categorizer, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
async fn check_ai_connection(categorizer: &Categorizer) {
    match categorizer.ai() {
        Some(client) => {
            let models = categorizer.models().join(", ");
            if client.health_check().await {
                info!(
                    "✅ AI backend connected: {} {} (models: {})",
                    client.name(),
                    client.host(),
                    models
                );
            } else {
                warn!(
                    "⚠️  AI backend configured but not responding: {} {} (keyword fallback stays available)",
                    client.name(),
                    client.host()
                );
            }
        }
        None => {
            info!("ℹ️  AI backend not configured (set GEMINI_API_KEY to enable AI categorization)");
        }
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            internal: Some(err.into()),
        }
    }
}
