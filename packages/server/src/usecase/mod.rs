//! UseCase 層
//!
//! プロトコル操作 1 種類につき 1 つのユースケースを定義します。
//! 各ユースケースは RoomRegistry でルーム状態を原子的に変更し、
//! MessagePusher で通知対象へブロードキャストします。
//! 通知メッセージ（JSON）の組み立ては UI 層（DTO 層）の責務です。

pub mod chat;
pub mod code_editor;
pub mod disconnect;
pub mod join_room;
pub mod leave_room;
pub mod rooms;
pub mod whiteboard;

pub use chat::ChatUseCase;
pub use code_editor::CodeEditorUseCase;
pub use disconnect::DisconnectUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use rooms::GetRoomsUseCase;
pub use whiteboard::WhiteboardUseCase;
