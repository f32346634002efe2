//! Realtime collaboration hub server.
//!
//! Clients join named rooms over WebSocket and exchange whiteboard strokes,
//! cursor positions, a shared code buffer and chat lines. Room state is
//! in-memory only and disappears when the last participant leaves.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroma-server
//! cargo run --bin hiroma-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use hiroma_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemoryRoomRegistry,
    },
    ui::Server,
    usecase::{
        ChatUseCase, CodeEditorUseCase, DisconnectUseCase, GetRoomsUseCase, JoinRoomUseCase,
        LeaveRoomUseCase, WhiteboardUseCase,
    },
};
use hiroma_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hiroma-server")]
#[command(about = "Realtime collaboration hub server (whiteboard, code, chat)", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. RoomRegistry
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create RoomRegistry (in-memory, rooms are created lazily on join)
    let registry = Arc::new(InMemoryRoomRegistry::new(Arc::new(SystemClock)));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let disconnect_usecase = Arc::new(DisconnectUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let whiteboard_usecase = Arc::new(WhiteboardUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let code_editor_usecase = Arc::new(CodeEditorUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let chat_usecase = Arc::new(ChatUseCase::new(registry.clone(), message_pusher.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));

    // 4. Create and run the server
    let server = Server::new(
        message_pusher,
        join_room_usecase,
        leave_room_usecase,
        disconnect_usecase,
        whiteboard_usecase,
        code_editor_usecase,
        chat_usecase,
        get_rooms_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
