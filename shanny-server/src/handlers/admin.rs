use axum::{
    Json,
    extract::State,
    http::HeaderMap,
};
use serde::Serialize;
use tracing::warn;

use shanny_core::model::ContactMessage;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Rows returned by the admin listing.
pub const ADMIN_LIST_LIMIT: u32 = 200;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Serialize)]
pub struct MessageList {
    pub data: Vec<ContactMessage>,
}

/// `GET /api/contact/admin/list`
pub async fn list_messages_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<MessageList>> {
    let key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if !state.is_admin_key(key) {
        warn!(key_present = key.is_some(), "admin listing unauthorized");
        return Err(AppError::unauthorized());
    }

    let data = state.contact_messages.list_recent(ADMIN_LIST_LIMIT).await?;
    Ok(Json(MessageList { data }))
}
