//! Hiroma collaboration server library.
//!
//! This library provides the session and room-state synchronization core for
//! a realtime collaboration hub: named rooms whose participants share a
//! whiteboard, a code buffer, cursor positions and chat over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
