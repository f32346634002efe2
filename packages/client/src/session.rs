//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use uuid::Uuid;

use hiroma_server::infrastructure::dto::websocket::{
    ChatMessageDto, ClientEvent, DrawModeDto, DrawOpDto, ServerEvent,
};
use hiroma_shared::time::{get_jst_timestamp, timestamp_to_jst_rfc3339};

use super::domain::{InputCommand, parse_input};
use super::error::ClientError;
use super::formatter::MessageFormatter;
use super::ui::redisplay_prompt;

/// Run one WebSocket client session: join the room, relay stdin commands,
/// render incoming events. Returns when the user quits or the connection drops.
pub async fn run_client_session(
    url: &str,
    room_id: &str,
    user_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (ws_stream, _response) = match connect_async(url).await {
        Ok(result) => result,
        Err(e) => {
            return Err(Box::new(ClientError::ConnectionError(e.to_string())));
        }
    };

    tracing::info!("Connected to collaboration hub!");
    println!(
        "\nYou are '{}' in room '{}'. Type to chat; /code <text>, /clear, /draw, /quit. Press Ctrl+C to exit.\n",
        user_name, room_id
    );

    let (mut write, mut read) = ws_stream.split();

    // Join the room before anything else
    let join_event = ClientEvent::JoinRoom {
        room_id: room_id.to_string(),
        user_name: user_name.to_string(),
    };
    write
        .send(Message::Text(serde_json::to_string(&join_event)?.into()))
        .await?;

    // Clone user_name for read task
    let user_name_for_read = user_name.to_string();

    // Spawn a task to render incoming events
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(ServerEvent::UpdateParticipants { participants }) => {
                            MessageFormatter::format_participants(&participants)
                        }
                        Ok(ServerEvent::DrawingHistory { history }) => {
                            MessageFormatter::format_drawing_history(&history)
                        }
                        Ok(ServerEvent::CodeHistory { code }) => {
                            MessageFormatter::format_code_history(&code)
                        }
                        Ok(ServerEvent::ServerDraw { op }) => MessageFormatter::format_draw(&op),
                        Ok(ServerEvent::UpdateCursors { cursors }) => {
                            MessageFormatter::format_cursors(&cursors)
                        }
                        Ok(ServerEvent::ClearCanvas) => MessageFormatter::format_clear_canvas(),
                        Ok(ServerEvent::ServerCodeChange { code }) => {
                            MessageFormatter::format_code_change(&code)
                        }
                        Ok(ServerEvent::ReceiveMessage { message }) => {
                            MessageFormatter::format_chat_message(&message)
                        }
                        // If parsing fails, display as raw text
                        Err(_) => MessageFormatter::format_raw_message(&text),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&user_name_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    let user_name_for_prompt = user_name.to_string();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", user_name_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to handle stdin input and send events to the server
    let room_id_for_write = room_id.to_string();
    let user_name_for_write = user_name.to_string();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let event = match parse_input(&line) {
                InputCommand::Chat(text) => ClientEvent::SendMessage {
                    room_id: room_id_for_write.clone(),
                    message: ChatMessageDto {
                        id: Uuid::new_v4().to_string(),
                        text,
                        sender: user_name_for_write.clone(),
                        timestamp: timestamp_to_jst_rfc3339(get_jst_timestamp()),
                    },
                },
                InputCommand::Code(code) => ClientEvent::ClientCodeChange {
                    room_id: room_id_for_write.clone(),
                    code,
                },
                InputCommand::Clear => ClientEvent::ClearCanvas {
                    room_id: room_id_for_write.clone(),
                },
                InputCommand::Draw => ClientEvent::ClientDraw {
                    room_id: room_id_for_write.clone(),
                    op: DrawOpDto {
                        x0: 0.25,
                        y0: 0.25,
                        x1: 0.75,
                        y1: 0.75,
                        color: "#1e90ff".to_string(),
                        line_width: 2.0,
                        mode: DrawModeDto::Draw,
                    },
                },
                InputCommand::Quit => {
                    let leave_event = ClientEvent::LeaveRoom {
                        room_id: room_id_for_write.clone(),
                    };
                    if let Ok(json) = serde_json::to_string(&leave_event) {
                        let _ = write.send(Message::Text(json.into())).await;
                    }
                    break;
                }
                InputCommand::Unknown(command) => {
                    println!("unknown command: {}", command);
                    redisplay_prompt(&user_name_for_write);
                    continue;
                }
            };

            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize event: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send event: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            let connection_error = read_result.unwrap_or(false);
            if connection_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            let write_error = write_result.unwrap_or(false);
            if write_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
    }

    Ok(())
}
