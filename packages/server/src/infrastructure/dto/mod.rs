//! Data Transfer Objects (DTOs) for the collaboration hub.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs (the wire protocol)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
