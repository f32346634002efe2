//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Summary of one live room, for `GET /api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub participants: Vec<String>,
    pub created_at: String,
}
