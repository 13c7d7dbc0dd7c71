//! HTTP request handlers

use super::types::{
    ActionRequest, ActionResponse, DebugEcho, ErrorResponse, StatusResponse, TurnResponse,
};
use super::webhook::{session_from_tracker, slot_events, turn_from_request, Action};
use super::AppState;
use crate::carrier::CarrierExtractor;
use crate::runtime::{RuntimeError, TurnOutcome};
use crate::state_machine::{ContentPlan, InboundTurn, Outcome};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde_json::Value;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Action server protocol
        .route("/webhook", post(action_webhook))
        // Direct JSON turns
        .route("/api/conversations/:id/turn", post(send_turn))
        .route("/api/conversations/:id/start", post(start_conversation))
        .route("/api/conversations/:id/fallback", post(fallback_turn))
        .route("/api/conversations/:id/delete", post(delete_conversation))
        // Bridge debugging
        .route("/debug/webhook", post(debug_webhook))
        .route("/status", get(get_status))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Action Server
// ============================================================

async fn action_webhook(
    State(state): State<AppState>,
    Json(req): Json<ActionRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let action = Action::parse(&req.next_action)
        .ok_or_else(|| AppError::NotFound(format!("Unknown action: {}", req.next_action)))?;

    let sender = req
        .sender_id
        .as_deref()
        .or(req.tracker.sender_id.as_deref())
        .unwrap_or("unknown");
    let before = session_from_tracker(&req.tracker);
    let turn = turn_from_request(&req);

    let engine = state.runtime.engine();
    let mut plan = ContentPlan::new();
    let (after, outcome) = match action {
        Action::SessionStart => engine.start(&turn).emit(&mut plan),
        Action::ChooseOption => engine.process(&before, &turn, &mut plan),
        Action::Fallback => engine.fallback(&before).emit(&mut plan),
    };

    let events = match (action, outcome) {
        (Action::Fallback, _) | (_, Outcome::Farewell) => Vec::new(),
        _ => slot_events(&before, &after),
    };

    tracing::info!(
        conversation_id = sender,
        action = %req.next_action,
        state = %before.state,
        next_state = %after.state,
        option = ?turn.selected_option,
        "Action handled"
    );

    Ok(Json(ActionResponse {
        events,
        responses: state.renderer.render(&plan),
    }))
}

// ============================================================
// Direct Turn API
// ============================================================

fn turn_response(state: &AppState, outcome: TurnOutcome) -> TurnResponse {
    TurnResponse {
        state: outcome.session.state,
        messages: state.renderer.render(&outcome.plan),
        session: outcome.session,
        plan: outcome.plan,
    }
}

async fn send_turn(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(turn): Json<InboundTurn>,
) -> Result<Json<TurnResponse>, AppError> {
    let outcome = state.runtime.handle_turn(&id, &turn).await?;
    Ok(Json(turn_response(&state, outcome)))
}

async fn start_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(turn): Json<InboundTurn>,
) -> Result<Json<TurnResponse>, AppError> {
    let outcome = state.runtime.restart(&id, &turn).await?;
    Ok(Json(turn_response(&state, outcome)))
}

async fn fallback_turn(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(turn): Json<InboundTurn>,
) -> Result<Json<TurnResponse>, AppError> {
    let outcome = state.runtime.handle_fallback(&id, &turn).await?;
    Ok(Json(turn_response(&state, outcome)))
}

async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.runtime.forget(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================
// Debug Capture
// ============================================================

/// Pull the user text out of whatever the bridge sent
fn debug_message_text(body: &Value) -> Option<String> {
    let message = body.get("message").or_else(|| body.get("text"))?;
    match message {
        Value::String(text) => Some(text.clone()),
        Value::Object(inner) => inner.get("text").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Whether the bot would personalize the greeting for this text
fn matches_detection_format(extractor: &CarrierExtractor, text: &str) -> bool {
    text.to_uppercase().contains("COMPANIA_DETECTADA")
        || text.contains("OPERATOR")
        || extractor.extract_carrier(text).is_some()
}

async fn debug_webhook(State(state): State<AppState>, body: String) -> Json<Vec<DebugEcho>> {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let parsed: Option<Value> = serde_json::from_str(&body).ok();
    let message = parsed.as_ref().and_then(debug_message_text);

    match message.as_deref() {
        Some(text) => {
            let recognized = matches_detection_format(state.runtime.engine().extractor(), text);
            tracing::info!(
                raw = %body,
                message = text,
                recognized,
                "Debug webhook capture"
            );
            if !recognized {
                tracing::warn!(
                    message = text,
                    "Unrecognized format; expected COMPANIA_DETECTADA <name>, OPERATOR <name> NUMERO <digits>, or a bare carrier name"
                );
            }
        }
        None => tracing::warn!(raw = %body, "Debug webhook capture without message text"),
    }

    let shown = message.as_deref().unwrap_or("None");
    Json(vec![DebugEcho {
        text: format!("Debug: Recibí mensaje '{shown}' a las {timestamp}"),
    }])
}

// ============================================================
// Status
// ============================================================

async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let vocabulary = state.runtime.engine().extractor().vocabulary();
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        vocabulary_version: vocabulary.version().to_string(),
        carriers: vocabulary.carrier_count(),
        aliases: vocabulary.alias_count(),
    })
}

async fn health() -> &'static str {
    "ok"
}

async fn get_version() -> &'static str {
    concat!("spotty-bot ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    NotFound(String),
    Internal(String),
}

impl From<RuntimeError> for AppError {
    fn from(err: RuntimeError) -> Self {
        tracing::error!(error = %err, "Turn failed");
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
