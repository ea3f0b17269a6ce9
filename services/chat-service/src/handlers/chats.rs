// Chat Handlers untuk Chat Service (session registry + health)
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use shared::{ErrorResponse, StartChatRequest, StartChatResponse};

use super::json_body_or_empty;
use crate::{
    config::{AppState, HealthCheckResponse},
    error::AppError,
};

// Buka chat untuk pasangan user, atau kembalikan chat yang sudah ada
#[utoipa::path(
    post,
    path = "/chat/start",
    tag = "chats",
    request_body = StartChatRequest,
    responses(
        (status = 200, description = "Chat id untuk pasangan user", body = StartChatResponse),
        (status = 400, description = "user1 atau user2 kosong", body = ErrorResponse)
    )
)]
pub async fn start_chat(
    State(state): State<AppState>,
    payload: Result<Json<StartChatRequest>, JsonRejection>,
) -> Result<Json<StartChatResponse>, AppError> {
    let request = json_body_or_empty(payload)?;

    let chat_id = state
        .chat_repo
        .start_chat(request.user1.as_deref(), request.user2.as_deref())
        .await?;

    Ok(Json(StartChatResponse { chat_id }))
}

// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service sehat", body = HealthCheckResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(state.health_check().await)
}
