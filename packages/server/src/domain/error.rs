//! ドメイン層のエラー型定義

use thiserror::Error;

/// 値オブジェクトのバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// RoomId が不正（空文字、または長すぎる）
    #[error("Invalid room id: '{0}'")]
    InvalidRoomId(String),

    /// UserName が不正（空文字、または長すぎる）
    #[error("Invalid user name: '{0}'")]
    InvalidUserName(String),

    /// ConnectionId が不正（空文字）
    #[error("Invalid connection id")]
    InvalidConnectionId,
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先のクライアントが見つからない
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    /// 送信に失敗した（チャンネルが閉じているなど）
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
