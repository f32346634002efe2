//! MessagePusher trait 定義
//!
//! 「ルーム R の参加者全員へ」「送信者以外へ」「特定の 1 コネクションへ」という
//! ファンアウト配送の能力を抽象化します。配送は best-effort / at-most-once で、
//! 配送中に切断された受信者は単にそのイベントを受け取りません（再送なし）。
//!
//! 受信者ごとの順序は配送チャンネル（unbounded mpsc）が保証します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::MessagePushError;
use super::value_object::ConnectionId;

/// クライアントへのメッセージ送信用チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装
/// （WebSocket など）には依存しません。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// コネクションの送信チャンネルを登録する
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// コネクションの送信チャンネルを登録解除する
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の 1 コネクションへ送信する
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 複数のコネクションへ送信する（一部の失敗を許容する）
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
