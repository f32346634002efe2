//! Server state shared across request handlers.

use std::sync::Arc;

use crate::domain::MessagePusher;
use crate::usecase::{
    ChatUseCase, CodeEditorUseCase, DisconnectUseCase, GetRoomsUseCase, JoinRoomUseCase,
    LeaveRoomUseCase, WhiteboardUseCase,
};

/// Shared application state
pub struct AppState {
    /// MessagePusher（コネクションのチャンネル登録に使用）
    pub message_pusher: Arc<dyn MessagePusher>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// DisconnectUseCase（コネクション切断のユースケース）
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    /// WhiteboardUseCase（ホワイトボード操作のユースケース）
    pub whiteboard_usecase: Arc<WhiteboardUseCase>,
    /// CodeEditorUseCase（共有コードバッファのユースケース）
    pub code_editor_usecase: Arc<CodeEditorUseCase>,
    /// ChatUseCase（チャット送信のユースケース）
    pub chat_usecase: Arc<ChatUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
}
