//! HTTP API gateway for Flytrap.
//!
//! Exposes the honeypot endpoint and a health check:
//! - `POST /api/v1/honeypot` — one decision-engine turn, guarded by an
//!   `X-API-Key` header check
//! - `GET /health` — liveness probe, unauthenticated
//!
//! Built on Axum. The gateway owns serialization of conversation state:
//! callers send the full history with every request and the engine
//! never retains it.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::{self, Next},
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use flytrap_core::error::Error;
use flytrap_core::{HoneypotTurnResult, Message};
use flytrap_engine::DecisionEngine;

/// Shared application state for the gateway.
pub struct GatewayState {
    /// Key callers must present in `X-API-Key`. When unset, requests
    /// are admitted with a warning — suitable for local development only.
    pub api_key: Option<String>,
    pub engine: DecisionEngine,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState, allowed_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/honeypot", post(honeypot_handler))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1", api)
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(cors_layer(allowed_origins))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderName::from_static("x-api-key"),
        ]);

    if allowed_origins.iter().any(|o| o == "*") {
        layer.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<axum::http::HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

/// Start the gateway HTTP server.
pub async fn start(config: flytrap_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let provider = flytrap_providers::build_from_config(&config)?;
    let engine = DecisionEngine::new(provider, &config.model, config.temperature)
        .with_max_tokens(config.max_tokens);

    if config.api_key.is_none() {
        warn!("No service API key configured — honeypot endpoint is open");
    }

    let state = Arc::new(GatewayState {
        api_key: config.api_key.clone(),
        engine,
    });

    let app = build_router(state, &config.gateway.allowed_origins);

    info!(addr = %addr, model = %config.model, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Wire types ---

/// The honeypot request body.
#[derive(Debug, Deserialize)]
pub struct HoneypotRequest {
    /// Current incoming message from the scammer
    pub message: String,

    /// Previous conversation history, oldest first
    #[serde(default)]
    pub conversation_history: Vec<Message>,

    /// Additional metadata; accepted and currently uninterpreted
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Structured error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
            details: serde_json::Map::new(),
        }
    }
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn honeypot_handler(
    State(state): State<SharedState>,
    Json(payload): Json<HoneypotRequest>,
) -> Result<Json<HoneypotTurnResult>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        message_len = payload.message.len(),
        history_len = payload.conversation_history.len(),
        "Honeypot message received"
    );

    match state
        .engine
        .decide(&payload.conversation_history, &payload.message)
        .await
    {
        Ok(result) => Ok(Json(result)),
        Err(e @ Error::Upstream { .. }) => {
            error!(error = %e, "Completion service unavailable");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new(e.to_string())),
            ))
        }
        Err(e) => {
            error!(error = %e, "Turn processing failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            ))
        }
    }
}

/// `X-API-Key` equality check for the /api/v1 routes.
async fn auth_middleware(
    State(state): State<SharedState>,
    req: axum::extract::Request,
    next: Next,
) -> Result<axum::response::Response, (StatusCode, Json<ErrorResponse>)> {
    let Some(expected) = state.api_key.as_deref() else {
        return Ok(next.run(req).await);
    };

    let provided = req
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok());

    if provided == Some(expected) {
        Ok(next.run(req).await)
    } else {
        warn!("Unauthorized request — missing or invalid X-API-Key");
        Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Invalid or missing API key")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use flytrap_core::error::ProviderError;
    use flytrap_core::provider::{GenerateRequest, Provider};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct MockProvider {
        response: Result<String, ProviderError>,
    }

    #[async_trait]
    impl Provider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn generate(&self, _request: GenerateRequest) -> Result<String, ProviderError> {
            self.response.clone()
        }
    }

    fn test_app(api_key: Option<&str>, response: Result<String, ProviderError>) -> Router {
        let provider = Arc::new(MockProvider { response });
        let engine = DecisionEngine::new(provider, "mock-model", 0.7);
        let state = Arc::new(GatewayState {
            api_key: api_key.map(String::from),
            engine,
        });
        build_router(state, &["*".to_string()])
    }

    fn honeypot_request(api_key: Option<&str>, body: serde_json::Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/v1/honeypot")
            .header("Content-Type", "application/json");
        if let Some(key) = api_key {
            builder = builder.header("X-API-Key", key);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    const DECISION: &str = r#"{"scamDetected": true, "confidenceScore": 0.9,
        "agentResponse": "Oh dear, let me find my spectacles.",
        "reasoning": "urgent payment demand"}"#;

    #[tokio::test]
    async fn health_endpoint() {
        let app = test_app(None, Ok(DECISION.into()));
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_api_key_rejected() {
        let app = test_app(Some("right-key"), Ok(DECISION.into()));
        let req = honeypot_request(Some("wrong-key"), serde_json::json!({"message": "test"}));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_api_key_rejected() {
        let app = test_app(Some("right-key"), Ok(DECISION.into()));
        let req = honeypot_request(None, serde_json::json!({"message": "test"}));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn health_is_exempt_from_auth() {
        let app = test_app(Some("right-key"), Ok(DECISION.into()));
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn successful_turn_returns_wire_shape() {
        let app = test_app(Some("key"), Ok(DECISION.into()));
        let req = honeypot_request(
            Some("key"),
            serde_json::json!({
                "message": "Sir, share OTP to verify your account",
                "conversation_history": [
                    {"role": "user", "content": "Hello, this is bank calling"},
                    {"role": "assistant", "content": "Oh, hello! What can I help you with?"}
                ]
            }),
        );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["scam_detected"], true);
        assert_eq!(body["engagement_metrics"]["total_turns"], 3);
        // "otp" + "verify" + "account" => tech-curious
        assert_eq!(
            body["engagement_metrics"]["current_persona"],
            "tech-curious"
        );
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_bad_gateway() {
        let app = test_app(
            Some("key"),
            Err(ProviderError::Network("connection refused".into())),
        );
        let req = honeypot_request(Some("key"), serde_json::json!({"message": "test"}));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn no_configured_key_admits_requests() {
        let app = test_app(None, Ok(DECISION.into()));
        let req = honeypot_request(None, serde_json::json!({"message": "test"}));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
