//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::infrastructure::dto::http::RoomSummaryDto;
use crate::ui::state::AppState;
use hiroma_shared::time::timestamp_to_jst_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of live rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let room_summaries: Vec<RoomSummaryDto> = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            id: room.id.into_string(),
            participants: room
                .participant_names
                .into_iter()
                .map(|n| n.into_string())
                .collect(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        })
        .collect();

    Json(room_summaries)
}
