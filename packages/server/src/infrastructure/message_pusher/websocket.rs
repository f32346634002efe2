//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - コネクションごとの `UnboundedSender` を管理
//! - コネクションへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//!
//! これにより、「WebSocket の生成」と「メッセージの送信」が分離されます：
//! - UI 層: WebSocket 接続の受付、sender の生成
//! - Infrastructure 層: sender の管理、メッセージ送信
//!
//! 送信は受信者のキューへの非ブロッキングな enqueue です。切断済みの受信者への
//! 送信は失敗としてログに残すだけで、再送や後追い配送は行いません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `clients`: 接続中のコネクションと対応する WebSocket sender のマップ
pub struct WebSocketMessagePusher {
    /// 接続中のコネクションの WebSocket sender
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!(
            "Connection '{}' registered to MessagePusher",
            connection_id.as_str()
        );
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id.as_str()
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(connection_id) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to connection '{}'", connection_id.as_str());
            Ok(())
        } else {
            Err(MessagePushError::ClientNotFound(
                connection_id.as_str().to_string(),
            ))
        }
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!(
                        "Failed to push message to connection '{}': {}",
                        target.as_str(),
                        e
                    );
                } else {
                    tracing::debug!("Broadcasted message to connection '{}'", target.as_str());
                }
            } else {
                tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    target.as_str()
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketMessagePusher の基本的なメッセージ送信機能
    // - push_to: 特定のコネクションへの送信
    // - broadcast: 複数コネクションへの送信
    // - エラーハンドリング（存在しないコネクション）
    //
    // 【なぜこのテストが必要か】
    // - MessagePusher は UseCase から呼ばれる通信層の中核
    // - メッセージの送信が正しく行われることを保証する必要がある
    // - ブロードキャストが部分失敗を許容することを検証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功ケース
    // 2. push_to の失敗ケース（コネクションが存在しない）
    // 3. broadcast の成功ケース（複数コネクション）
    // 4. broadcast の部分失敗ケース（一部のコネクションが存在しない）
    // ========================================

    fn conn(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のコネクションにメッセージを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_client(conn("c1"), tx).await;

        // when (操作):
        let result = pusher.push_to(&conn("c1"), "Hello").await;

        // then (期待する結果):
        assert!(result.is_ok());
        let received = rx.recv().await;
        assert_eq!(received, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しないコネクションへの送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.push_to(&conn("nonexistent"), "Hello").await;

        // then (期待する結果):
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            MessagePushError::ClientNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 複数のコネクションにメッセージをブロードキャストできる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(conn("c1"), tx1).await;
        pusher.register_client(conn("c2"), tx2).await;

        // when (操作):
        let targets = vec![conn("c1"), conn("c2")];
        let result = pusher.broadcast(targets, "Broadcast message").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: ブロードキャスト時、一部のコネクションが存在しなくても成功する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        pusher.register_client(conn("c1"), tx1).await;

        // when (操作):
        let targets = vec![conn("c1"), conn("nonexistent")];
        let result = pusher.broadcast(targets, "Broadcast message").await;

        // then (期待する結果):
        assert!(result.is_ok()); // ブロードキャストは部分失敗を許容
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のターゲットリストでもエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.broadcast(vec![], "Message").await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unregistered_client_no_longer_receives() {
        // テスト項目: 登録解除したコネクションはブロードキャストの対象にならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        pusher.register_client(conn("c1"), tx1).await;
        pusher.unregister_client(&conn("c1")).await;

        // when (操作):
        let result = pusher.broadcast(vec![conn("c1")], "Message").await;

        // then (期待する結果):
        assert!(result.is_ok());
        // 送信側チャンネルは破棄されているため、受信は None になる
        assert_eq!(rx1.recv().await, None);
    }
}
