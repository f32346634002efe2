//! Shared utilities for the Hiroma collaboration hub.
//!
//! This crate carries the pieces both the server and the CLI client need:
//! logging setup and time handling.

pub mod logger;
pub mod time;
