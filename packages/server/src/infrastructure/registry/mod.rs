//! RoomRegistry の実装
//!
//! - `inmemory`: プロセス内 HashMap によるルーム管理（再起動で消える設計）

pub mod inmemory;

pub use inmemory::InMemoryRoomRegistry;
