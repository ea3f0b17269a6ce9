// Handler modules untuk Chat Service
pub mod chats;
pub mod messages;

use axum::{extract::rejection::JsonRejection, Json};
use uuid::Uuid;

use crate::error::AppError;

// Chat id yang bukan UUID sama saja dengan chat yang tidak ada
pub(crate) fn parse_chat_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found("Chat not found."))
}

// Tanpa Content-Type JSON body dianggap {}, jadi lookup chat dan validasi field tetap jalan.
// Body JSON yang rusak tetap 400.
pub(crate) fn json_body_or_empty<T: Default>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection.into()),
    }
}
