//! HTTP request handlers

use super::types::{
    ConversationResponse, CreateConversationResponse, ErrorResponse, SuccessResponse,
    TurnRequest, TurnResponse,
};
use super::AppState;
use crate::db::DbError;
use crate::dialog::Conversation;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Conversation creation
        .route("/api/conversations/new", post(create_conversation))
        // Conversation retrieval
        .route("/api/conversations/:id", get(get_conversation))
        // User turns
        .route("/api/conversations/:id/turn", post(send_turn))
        // Lifecycle
        .route("/api/conversations/:id/delete", post(delete_conversation))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Conversation Creation
// ============================================================

async fn create_conversation(
    State(state): State<AppState>,
) -> Result<Json<CreateConversationResponse>, AppError> {
    let id = uuid::Uuid::new_v4().to_string();

    state
        .runtime
        .db()
        .upsert_conversation(&id, &Conversation::default())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(conv_id = %id, "Conversation created");
    Ok(Json(CreateConversationResponse {
        conversation_id: id,
    }))
}

// ============================================================
// Conversation Retrieval
// ============================================================

async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationResponse>, AppError> {
    let conversation = state.runtime.db().get_conversation(&id).map_err(|err| match err {
        e @ DbError::ConversationNotFound(_) => AppError::NotFound(e.to_string()),
        other => AppError::Internal(other.to_string()),
    })?;

    Ok(Json(ConversationResponse { conversation }))
}

// ============================================================
// User Turns
// ============================================================

async fn send_turn(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    if req.is_empty() {
        return Err(AppError::BadRequest(
            "Turn needs an intent, entities or text".to_string(),
        ));
    }

    let replies = state
        .runtime
        .handle_turn(&id, &req.into())
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(TurnResponse { replies }))
}

// ============================================================
// Lifecycle
// ============================================================

async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let deleted = state
        .runtime
        .delete_conversation(&id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !deleted {
        return Err(AppError::NotFound(
            DbError::ConversationNotFound(id).to_string(),
        ));
    }

    tracing::info!(conv_id = %id, "Conversation deleted");
    Ok(Json(SuccessResponse { success: true }))
}

async fn get_version() -> &'static str {
    concat!("dicebot ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
