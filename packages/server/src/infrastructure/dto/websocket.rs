//! WebSocket event DTOs (the wire protocol).
//!
//! Events are JSON text frames tagged by a `type` field. Tags are the
//! kebab-case event names, payload fields are camelCase. Frames whose tag is
//! unknown or whose payload is missing required fields fail to deserialize and
//! are dropped at the decode boundary, never partially applied.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One whiteboard stroke/shape instruction on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawOpDto {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub color: String,
    pub line_width: f64,
    pub mode: DrawModeDto,
}

/// Whiteboard drawing mode on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawModeDto {
    Draw,
    Erase,
    Rectangle,
    Circle,
    Line,
}

/// One participant cursor on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorDto {
    pub x: f64,
    pub y: f64,
    pub user_name: String,
}

/// A chat line, forwarded verbatim (fire-and-forget, never stored)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub id: String,
    pub text: String,
    pub sender: String,
    pub timestamp: String,
}

/// client → server events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    JoinRoom { room_id: String, user_name: String },
    LeaveRoom { room_id: String },
    ClientDraw { room_id: String, op: DrawOpDto },
    CursorMove { room_id: String, x: f64, y: f64 },
    ClearCanvas { room_id: String },
    ClientCodeChange { room_id: String, code: String },
    GetCodeHistory { room_id: String },
    GetDrawingHistory { room_id: String },
    SendMessage { room_id: String, message: ChatMessageDto },
}

/// server → client events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    UpdateParticipants { participants: Vec<String> },
    DrawingHistory { history: Vec<DrawOpDto> },
    CodeHistory { code: String },
    ServerDraw { op: DrawOpDto },
    UpdateCursors { cursors: HashMap<String, CursorDto> },
    ClearCanvas,
    ServerCodeChange { code: String },
    ReceiveMessage { message: ChatMessageDto },
}
