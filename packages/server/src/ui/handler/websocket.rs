//! WebSocket connection handlers.
//!
//! One `handle_socket` per transport connection. The connection gets a fresh
//! UUID identity at upgrade time; inbound frames are decoded into `ClientEvent`
//! and dispatched to the use cases, outbound events arrive on the connection's
//! pusher channel and are written by a dedicated task.
//!
//! Trust boundary note: room-scoped events are not checked against the rooms
//! the sender actually joined. Any connection that names an existing room id
//! can draw on, clear or edit that room (cursor moves being the one exception,
//! dropped for non-participants). The clients are a trusted pool.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, RoomId, UserName},
    infrastructure::dto::{
        conversion::{cursors_to_dto, draw_history_to_dto},
        websocket::{ClientEvent, ServerEvent},
    },
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionIdFactory::generate();
    tracing::info!("New connection: {}", connection_id.as_str());
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: events addressed to this
/// connection (via its pusher channel) are written to the WebSocket. The
/// channel preserves per-recipient FIFO ordering.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events and register it
    // with the pusher before any event can address this connection
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_client(connection_id.clone(), tx)
        .await;

    // Spawn a task to receive events from other connections and send to this one
    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    // Reject malformed frames at the decode boundary, never
                    // partially applied
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(
                                "Dropping malformed event from '{}': {}",
                                connection_id_clone.as_str(),
                                e
                            );
                            continue;
                        }
                    };
                    dispatch_event(&state_clone, &connection_id_clone, event).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Connection '{}' requested close",
                        connection_id_clone.as_str()
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Transport teardown: leave every room this connection is a member of and
    // notify the remaining participants, room by room
    let outcomes = state.disconnect_usecase.execute(&connection_id).await;
    for (room_id, outcome) in outcomes {
        let participants_json = serde_json::to_string(&ServerEvent::UpdateParticipants {
            participants: user_names_to_strings(outcome.participant_names),
        })
        .unwrap();
        let cursors_json = serde_json::to_string(&ServerEvent::UpdateCursors {
            cursors: cursors_to_dto(outcome.cursors),
        })
        .unwrap();

        if let Err(e) = state
            .disconnect_usecase
            .broadcast_participants(outcome.remaining_members.clone(), &participants_json)
            .await
        {
            tracing::warn!(
                "Failed to broadcast participants update for room '{}': {}",
                room_id.as_str(),
                e
            );
        }
        if let Err(e) = state
            .disconnect_usecase
            .broadcast_cursors(outcome.remaining_members, &cursors_json)
            .await
        {
            tracing::warn!(
                "Failed to broadcast cursors update for room '{}': {}",
                room_id.as_str(),
                e
            );
        }
    }

    tracing::info!("Connection closed: {}", connection_id.as_str());
}

/// Dispatch one decoded client event.
///
/// Every arm is one atomic room-state mutation (via a use case) followed by
/// the fan-out the operation calls for. Failures are local: a bad room id or
/// an event for an unknown room is dropped without touching any room state.
async fn dispatch_event(state: &Arc<AppState>, connection_id: &ConnectionId, event: ClientEvent) {
    match event {
        ClientEvent::JoinRoom { room_id, user_name } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            let user_name = match UserName::new(user_name) {
                Ok(user_name) => user_name,
                Err(e) => {
                    tracing::warn!(
                        "Dropping join-room from '{}': {}",
                        connection_id.as_str(),
                        e
                    );
                    return;
                }
            };

            let outcome = state
                .join_room_usecase
                .execute(room_id, connection_id.clone(), user_name)
                .await;

            // Send the room's current state to the new participant only
            let history_json = serde_json::to_string(&ServerEvent::DrawingHistory {
                history: draw_history_to_dto(outcome.draw_history),
            })
            .unwrap();
            let code_json = serde_json::to_string(&ServerEvent::CodeHistory {
                code: outcome.code_buffer,
            })
            .unwrap();
            if let Err(e) = state
                .join_room_usecase
                .push_room_state(connection_id, &history_json, &code_json)
                .await
            {
                tracing::warn!(
                    "Failed to send room state to '{}': {}",
                    connection_id.as_str(),
                    e
                );
            }

            // Notify everyone in the room (including the sender) about the
            // updated participants list
            let participants_json = serde_json::to_string(&ServerEvent::UpdateParticipants {
                participants: user_names_to_strings(outcome.participant_names),
            })
            .unwrap();
            if let Err(e) = state
                .join_room_usecase
                .broadcast_participants(outcome.members, &participants_json)
                .await
            {
                tracing::warn!("Failed to broadcast participants update: {}", e);
            }
        }

        ClientEvent::LeaveRoom { room_id } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            // No-op if the connection never joined this room
            let Some(outcome) = state
                .leave_room_usecase
                .execute(&room_id, connection_id)
                .await
            else {
                return;
            };

            let participants_json = serde_json::to_string(&ServerEvent::UpdateParticipants {
                participants: user_names_to_strings(outcome.participant_names),
            })
            .unwrap();
            let cursors_json = serde_json::to_string(&ServerEvent::UpdateCursors {
                cursors: cursors_to_dto(outcome.cursors),
            })
            .unwrap();

            if let Err(e) = state
                .leave_room_usecase
                .broadcast_participants(outcome.remaining_members.clone(), &participants_json)
                .await
            {
                tracing::warn!("Failed to broadcast participants update: {}", e);
            }
            if let Err(e) = state
                .leave_room_usecase
                .broadcast_cursors(outcome.remaining_members, &cursors_json)
                .await
            {
                tracing::warn!("Failed to broadcast cursors update: {}", e);
            }
        }

        ClientEvent::ClientDraw { room_id, op } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            // The sender has already rendered the stroke locally; no self-echo
            let draw_json =
                serde_json::to_string(&ServerEvent::ServerDraw { op: op.clone() }).unwrap();
            let Some(targets) = state
                .whiteboard_usecase
                .execute_draw(&room_id, connection_id, op.into())
                .await
            else {
                tracing::debug!("Dropping draw for unknown room '{}'", room_id.as_str());
                return;
            };
            if let Err(e) = state
                .whiteboard_usecase
                .broadcast_draw(targets, &draw_json)
                .await
            {
                tracing::warn!("Failed to broadcast draw: {}", e);
            }
        }

        ClientEvent::CursorMove { room_id, x, y } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            // Silently dropped unless the sender is a participant of the room
            let Some(update) = state
                .whiteboard_usecase
                .execute_cursor_move(&room_id, connection_id, x, y)
                .await
            else {
                tracing::debug!(
                    "Dropping cursor-move from non-participant '{}'",
                    connection_id.as_str()
                );
                return;
            };

            let cursors_json = serde_json::to_string(&ServerEvent::UpdateCursors {
                cursors: cursors_to_dto(update.cursors),
            })
            .unwrap();
            if let Err(e) = state
                .whiteboard_usecase
                .broadcast_cursors(update.members, &cursors_json)
                .await
            {
                tracing::warn!("Failed to broadcast cursors update: {}", e);
            }
        }

        ClientEvent::ClearCanvas { room_id } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            let Some(targets) = state.whiteboard_usecase.execute_clear(&room_id).await else {
                return;
            };
            let clear_json = serde_json::to_string(&ServerEvent::ClearCanvas).unwrap();
            if let Err(e) = state
                .whiteboard_usecase
                .broadcast_clear(targets, &clear_json)
                .await
            {
                tracing::warn!("Failed to broadcast clear-canvas: {}", e);
            }
        }

        ClientEvent::ClientCodeChange { room_id, code } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            let code_json =
                serde_json::to_string(&ServerEvent::ServerCodeChange { code: code.clone() })
                    .unwrap();
            let Some(targets) = state
                .code_editor_usecase
                .execute_change(&room_id, connection_id, code)
                .await
            else {
                return;
            };
            if let Err(e) = state
                .code_editor_usecase
                .broadcast_code_change(targets, &code_json)
                .await
            {
                tracing::warn!("Failed to broadcast code change: {}", e);
            }
        }

        ClientEvent::GetCodeHistory { room_id } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            // Resync-friendly: an unknown room answers with empty state
            let code = state.code_editor_usecase.code_history(&room_id).await;
            let code_json = serde_json::to_string(&ServerEvent::CodeHistory { code }).unwrap();
            if let Err(e) = state
                .code_editor_usecase
                .push_code_history(connection_id, &code_json)
                .await
            {
                tracing::warn!(
                    "Failed to send code history to '{}': {}",
                    connection_id.as_str(),
                    e
                );
            }
        }

        ClientEvent::GetDrawingHistory { room_id } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            let history = state.whiteboard_usecase.drawing_history(&room_id).await;
            let history_json = serde_json::to_string(&ServerEvent::DrawingHistory {
                history: draw_history_to_dto(history),
            })
            .unwrap();
            if let Err(e) = state
                .whiteboard_usecase
                .push_history(connection_id, &history_json)
                .await
            {
                tracing::warn!(
                    "Failed to send drawing history to '{}': {}",
                    connection_id.as_str(),
                    e
                );
            }
        }

        ClientEvent::SendMessage { room_id, message } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            // Not stored; echoed to the whole room including the sender so
            // every client renders from the same broadcast
            let targets = state.chat_usecase.execute(&room_id).await;
            let message_json =
                serde_json::to_string(&ServerEvent::ReceiveMessage { message }).unwrap();
            if let Err(e) = state
                .chat_usecase
                .broadcast_message(targets, &message_json)
                .await
            {
                tracing::warn!("Failed to broadcast chat message: {}", e);
            }
        }
    }
}

fn parse_room_id(connection_id: &ConnectionId, raw: String) -> Option<RoomId> {
    match RoomId::new(raw) {
        Ok(room_id) => Some(room_id),
        Err(e) => {
            tracing::warn!(
                "Dropping event with invalid room id from '{}': {}",
                connection_id.as_str(),
                e
            );
            None
        }
    }
}

fn user_names_to_strings(user_names: Vec<UserName>) -> Vec<String> {
    user_names.into_iter().map(|n| n.into_string()).collect()
}
