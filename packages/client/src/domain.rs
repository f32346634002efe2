//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Send a chat message with the given text
    Chat(String),
    /// Replace the room's shared code buffer
    Code(String),
    /// Clear the room's whiteboard
    Clear,
    /// Send a demo whiteboard stroke
    Draw,
    /// Leave the room and exit
    Quit,
    /// Unrecognized slash command
    Unknown(String),
}

/// Parse one line of user input into a command.
///
/// Lines starting with `/` are commands; everything else is chat text.
pub fn parse_input(line: &str) -> InputCommand {
    let line = line.trim();
    if !line.starts_with('/') {
        return InputCommand::Chat(line.to_string());
    }

    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "/code" => InputCommand::Code(rest.to_string()),
        "/clear" => InputCommand::Clear,
        "/draw" => InputCommand::Draw,
        "/quit" => InputCommand::Quit,
        other => InputCommand::Unknown(other.to_string()),
    }
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(current_attempt: u32, max_attempts: u32) -> bool {
    current_attempt < max_attempts
}
