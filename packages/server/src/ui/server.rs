//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::MessagePusher;
use crate::usecase::{
    ChatUseCase, CodeEditorUseCase, DisconnectUseCase, GetRoomsUseCase, JoinRoomUseCase,
    LeaveRoomUseCase, WhiteboardUseCase,
};

use super::{
    handler::{
        http::{get_rooms, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Collaboration hub server
///
/// This struct encapsulates the server wiring and provides methods to build
/// the router and run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     message_pusher,
///     join_room_usecase,
///     leave_room_usecase,
///     disconnect_usecase,
///     whiteboard_usecase,
///     code_editor_usecase,
///     chat_usecase,
///     get_rooms_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    message_pusher: Arc<dyn MessagePusher>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    disconnect_usecase: Arc<DisconnectUseCase>,
    whiteboard_usecase: Arc<WhiteboardUseCase>,
    code_editor_usecase: Arc<CodeEditorUseCase>,
    chat_usecase: Arc<ChatUseCase>,
    get_rooms_usecase: Arc<GetRoomsUseCase>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        message_pusher: Arc<dyn MessagePusher>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        disconnect_usecase: Arc<DisconnectUseCase>,
        whiteboard_usecase: Arc<WhiteboardUseCase>,
        code_editor_usecase: Arc<CodeEditorUseCase>,
        chat_usecase: Arc<ChatUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
    ) -> Self {
        Self {
            message_pusher,
            join_room_usecase,
            leave_room_usecase,
            disconnect_usecase,
            whiteboard_usecase,
            code_editor_usecase,
            chat_usecase,
            get_rooms_usecase,
        }
    }

    /// Build the axum router for this server
    ///
    /// Exposed separately from [`Server::run`] so integration tests can bind
    /// the router to an ephemeral port.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            message_pusher: self.message_pusher,
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            disconnect_usecase: self.disconnect_usecase,
            whiteboard_usecase: self.whiteboard_usecase,
            code_editor_usecase: self.code_editor_usecase,
            chat_usecase: self.chat_usecase,
            get_rooms_usecase: self.get_rooms_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the collaboration hub server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Collaboration hub server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
