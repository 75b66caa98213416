//! Axum HTTP server for the web gateway.
//!
//! Routes: health, chat send, and the read-only action listing.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use tokio::sync::oneshot;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::chat::{ChatGateway, ChatReply, ChatRequest, GatewayError};
use crate::channels::web::auth::{SessionDirectory, resolve_identity};
use crate::channels::web::types::*;
use crate::error::ChannelError;

/// Shared state for all gateway handlers.
pub struct GatewayState {
    pub gateway: ChatGateway,
    pub sessions: SessionDirectory,
    /// Shutdown signal sender.
    pub shutdown_tx: tokio::sync::RwLock<Option<oneshot::Sender<()>>>,
    /// Server startup time for uptime reporting.
    pub startup_time: std::time::Instant,
}

impl GatewayState {
    pub fn new(gateway: ChatGateway, sessions: SessionDirectory) -> Self {
        Self {
            gateway,
            sessions,
            shutdown_tx: tokio::sync::RwLock::new(None),
            startup_time: std::time::Instant::now(),
        }
    }
}

/// Build the gateway router. Exposed separately from [`start_server`] so
/// tests can drive it without binding a socket.
pub fn router(state: Arc<GatewayState>) -> Router {
    let api = Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/chat/send", post(chat_send_handler))
        .route("/api/chat/actions", get(chat_actions_handler));

    // CORS: the gateway is consumed by the app's own frontend; keep the
    // surface same-origin-shaped and the method list minimal.
    let cors = CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ]));

    api.layer(DefaultBodyLimit::max(64 * 1024)) // chat messages are small
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            header::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Returns the actual bound `SocketAddr` (useful when binding to port 0).
pub async fn start_server(
    addr: SocketAddr,
    state: Arc<GatewayState>,
) -> Result<SocketAddr, ChannelError> {
    let listener =
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ChannelError::StartupFailed {
                name: "gateway".to_string(),
                reason: format!("Failed to bind to {}: {}", addr, e),
            })?;
    let bound_addr = listener
        .local_addr()
        .map_err(|e| ChannelError::StartupFailed {
            name: "gateway".to_string(),
            reason: format!("Failed to get local addr: {}", e),
        })?;

    let app = router(Arc::clone(&state));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    *state.shutdown_tx.write().await = Some(shutdown_tx);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("Web gateway shutting down");
            })
            .await
        {
            tracing::error!("Web gateway server error: {}", e);
        }
    });

    tracing::info!("Web gateway listening on {}", bound_addr);
    Ok(bound_addr)
}

/// Trigger graceful shutdown, if the server is running.
pub async fn shutdown(state: &GatewayState) {
    if let Some(tx) = state.shutdown_tx.write().await.take() {
        let _ = tx.send(());
    }
}

// --- Health ---

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        channel: "chat-gateway",
    })
}

// --- Chat handlers ---

async fn chat_send_handler(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<ChatReply>, (StatusCode, Json<QuotaExceededResponse>)> {
    let identity = resolve_identity(&headers, &state.sessions);

    let request = ChatRequest {
        user_id: identity.user_id,
        fallback_identity: identity.fallback,
        message: req.message,
        recipe_context: req.recipe_context,
    };

    match state.gateway.handle(request).await {
        Ok(reply) => Ok(Json(reply)),
        Err(e @ GatewayError::QuotaExceeded { .. }) => Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(QuotaExceededResponse {
                message: e.to_string(),
            }),
        )),
    }
}

/// List the registered action names. Read-only; used for documentation and
/// debugging.
async fn chat_actions_handler(State(state): State<Arc<GatewayState>>) -> Json<ActionListResponse> {
    Json(ActionListResponse {
        actions: state.gateway.dispatcher().action_names(),
        description: "Actions the assistant can perform on your behalf via chat",
    })
}
