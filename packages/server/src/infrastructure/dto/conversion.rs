//! Conversion logic between DTOs and domain entities.

use std::collections::HashMap;

use crate::domain::{ConnectionId, CursorPosition, DrawMode, DrawOp};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Entity
// ========================================

impl From<dto::DrawModeDto> for DrawMode {
    fn from(mode: dto::DrawModeDto) -> Self {
        match mode {
            dto::DrawModeDto::Draw => DrawMode::Draw,
            dto::DrawModeDto::Erase => DrawMode::Erase,
            dto::DrawModeDto::Rectangle => DrawMode::Rectangle,
            dto::DrawModeDto::Circle => DrawMode::Circle,
            dto::DrawModeDto::Line => DrawMode::Line,
        }
    }
}

impl From<dto::DrawOpDto> for DrawOp {
    fn from(dto: dto::DrawOpDto) -> Self {
        Self {
            x0: dto.x0,
            y0: dto.y0,
            x1: dto.x1,
            y1: dto.y1,
            color: dto.color,
            line_width: dto.line_width,
            mode: dto.mode.into(),
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<DrawMode> for dto::DrawModeDto {
    fn from(mode: DrawMode) -> Self {
        match mode {
            DrawMode::Draw => dto::DrawModeDto::Draw,
            DrawMode::Erase => dto::DrawModeDto::Erase,
            DrawMode::Rectangle => dto::DrawModeDto::Rectangle,
            DrawMode::Circle => dto::DrawModeDto::Circle,
            DrawMode::Line => dto::DrawModeDto::Line,
        }
    }
}

impl From<DrawOp> for dto::DrawOpDto {
    fn from(op: DrawOp) -> Self {
        Self {
            x0: op.x0,
            y0: op.y0,
            x1: op.x1,
            y1: op.y1,
            color: op.color,
            line_width: op.line_width,
            mode: op.mode.into(),
        }
    }
}

impl From<CursorPosition> for dto::CursorDto {
    fn from(cursor: CursorPosition) -> Self {
        Self {
            x: cursor.x,
            y: cursor.y,
            user_name: cursor.user_name.into_string(),
        }
    }
}

/// カーソル位置テーブルをワイヤフォーマット（コネクション ID キーのマップ）へ変換
pub fn cursors_to_dto(
    cursors: HashMap<ConnectionId, CursorPosition>,
) -> HashMap<String, dto::CursorDto> {
    cursors
        .into_iter()
        .map(|(connection_id, cursor)| (connection_id.into_string(), cursor.into()))
        .collect()
}

/// 描画ログをワイヤフォーマットへ変換
pub fn draw_history_to_dto(history: Vec<DrawOp>) -> Vec<dto::DrawOpDto> {
    history.into_iter().map(Into::into).collect()
}
