//! CLI client for the Hiroma collaboration hub.

mod domain;
mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
