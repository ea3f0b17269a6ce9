// Message Handlers untuk Chat Service
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use shared::{ErrorResponse, MessagesResponse, PostMessageRequest, PostMessageResponse};

use super::{json_body_or_empty, parse_chat_id};
use crate::{config::AppState, error::AppError};

// Kirim message ke chat
#[utoipa::path(
    post,
    path = "/chat/{chat_id}/message",
    tag = "messages",
    params(
        ("chat_id" = String, Path, description = "Chat ID dari /chat/start")
    ),
    request_body = PostMessageRequest,
    responses(
        (status = 200, description = "Message tersimpan", body = PostMessageResponse),
        (status = 400, description = "sender atau text kosong", body = ErrorResponse),
        (status = 404, description = "Chat tidak ditemukan", body = ErrorResponse)
    )
)]
pub async fn post_message(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    payload: Result<Json<PostMessageRequest>, JsonRejection>,
) -> Result<Json<PostMessageResponse>, AppError> {
    let chat_id = parse_chat_id(&chat_id)?;
    let request = json_body_or_empty(payload)?;

    let message = state
        .message_repo
        .append_message(&chat_id, request.sender.as_deref(), request.text.as_deref())
        .await?;

    Ok(Json(PostMessageResponse {
        success: true,
        message,
    }))
}

// Ambil semua message chat sesuai urutan kirim
#[utoipa::path(
    get,
    path = "/chat/{chat_id}/messages",
    tag = "messages",
    params(
        ("chat_id" = String, Path, description = "Chat ID dari /chat/start")
    ),
    responses(
        (status = 200, description = "Daftar message", body = MessagesResponse),
        (status = 404, description = "Chat tidak ditemukan", body = ErrorResponse)
    )
)]
pub async fn get_messages(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<MessagesResponse>, AppError> {
    let chat_id = parse_chat_id(&chat_id)?;
    let messages = state.message_repo.list_messages(&chat_id).await?;

    Ok(Json(MessagesResponse { messages }))
}
