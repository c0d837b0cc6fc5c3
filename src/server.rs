//! HTTP shell — the inbound webhook and read-only status endpoints.
//!
//! The webhook acknowledges immediately and processes asynchronously;
//! internal faults never reach the upstream platform (which would retry the
//! delivery).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::{debug, error};

use crate::pipeline::Dispatcher;
use crate::session::SessionStore;
use crate::store::RegistrationStore;

/// Shared state for the HTTP routes.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub sessions: Arc<SessionStore>,
    pub store: Arc<dyn RegistrationStore>,
}

/// Inbound webhook envelope (Telegram update shape). Everything beyond the
/// chat id and text is ignored.
#[derive(Debug, Deserialize)]
pub struct WebhookUpdate {
    #[serde(default)]
    pub update_id: Option<i64>,
    #[serde(default)]
    pub message: Option<UpdateMessage>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMessage {
    pub chat: UpdateChat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateChat {
    pub id: i64,
}

/// POST /webhook
///
/// Always acknowledges `{"ok":true}` — an unrecognized or textless payload
/// is a no-op, and a refusal would only provoke upstream delivery retries.
/// Recognized messages are enqueued for the participant's worker.
async fn webhook(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let ack = Json(serde_json::json!({"ok": true}));

    let Ok(update) = serde_json::from_value::<WebhookUpdate>(payload) else {
        debug!("Unrecognized webhook payload ignored");
        return ack;
    };
    let Some(message) = update.message else {
        return ack;
    };
    let Some(text) = message.text else {
        debug!(update_id = ?update.update_id, "Update without text payload ignored");
        return ack;
    };

    let participant_id = message.chat.id.to_string();
    state.dispatcher.dispatch(&participant_id, text).await;
    ack
}

/// GET /api/intake/{participant_id}/status
///
/// Read-only intake status: the in-memory session (if any) and the durable
/// registration record.
async fn intake_status(
    State(state): State<AppState>,
    Path(participant_id): Path<String>,
) -> impl IntoResponse {
    let record = match state.store.get(&participant_id).await {
        Ok(record) => record,
        Err(e) => {
            error!(participant = %participant_id, error = %e, "Status read failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "store unavailable"})),
            )
                .into_response();
        }
    };

    let session = state.sessions.snapshot(&participant_id).await;

    if record.is_none() && session.is_none() {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "unknown participant"})),
        )
            .into_response();
    }

    let stage = record
        .as_ref()
        .map(|r| r.stage)
        .or_else(|| session.as_ref().map(|s| s.stage))
        .unwrap_or_default();

    Json(serde_json::json!({
        "participant_id": participant_id,
        "stage": stage,
        "invalid_count": session.as_ref().map(|s| s.invalid_count),
        "last_topic": session.as_ref().and_then(|s| s.last_topic.clone()),
        "record": record,
    }))
    .into_response()
}

/// GET /healthz
async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Build the HTTP router.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(webhook))
        .route("/api/intake/{participant_id}/status", get(intake_status))
        .route("/healthz", get(healthz))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
