//! ドメイン層
//!
//! ルームの集約（Room）、値オブジェクト、および Infrastructure 層が実装する
//! インターフェース（RoomRegistry / MessagePusher）を定義します。
//! ドメイン層は他の層に依存しません（依存性の逆転）。

pub mod entity;
pub mod error;
pub mod pusher;
pub mod registry;
pub mod value_object;

pub use entity::{CursorPosition, DrawMode, DrawOp, Participant, Room, RoomSummary};
pub use error::{DomainError, MessagePushError};
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::{CursorUpdate, JoinOutcome, LeaveOutcome, RoomRegistry};
pub use value_object::{ConnectionId, ConnectionIdFactory, RoomId, Timestamp, UserName};
