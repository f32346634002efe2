//! UseCase: コネクション切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//! - トランスポート切断時のクリーンアップ（全ルームからの退出、チャンネル登録解除）
//!
//! ### なぜこのテストが必要か
//! - 切断処理はクライアントのメッセージではなくトランスポートの teardown で
//!   起動するため、参加している「全て」のルームを列挙することを保証する必要がある
//! - 切断後に残りの参加者へ通知するためのスナップショットを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系: 複数ルームに参加したコネクションの切断
//! - エッジケース: どのルームにも参加していないコネクションの切断

use std::sync::Arc;

use crate::domain::{ConnectionId, LeaveOutcome, MessagePusher, RoomId, RoomRegistry};

/// コネクション切断のユースケース
pub struct DisconnectUseCase {
    /// RoomRegistry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// コネクション切断を実行
    ///
    /// コネクションが参加している全てのルームから退出し、送信チャンネルを
    /// 登録解除します。
    ///
    /// # Returns
    ///
    /// 退出したルームごとのスナップショット（残りの参加者への通知用）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<(RoomId, LeaveOutcome)> {
        let rooms = self.registry.rooms_of_connection(connection_id).await;

        let mut outcomes = Vec::with_capacity(rooms.len());
        for room_id in rooms {
            if let Some(outcome) = self.registry.leave_room(&room_id, connection_id).await {
                tracing::info!(
                    "User '{}' ({}) left room '{}' (disconnected)",
                    outcome.user_name.as_str(),
                    connection_id.as_str(),
                    room_id.as_str()
                );
                outcomes.push((room_id, outcome));
            }
        }

        self.message_pusher.unregister_client(connection_id).await;

        outcomes
    }

    /// 更新された参加者リストを残りの参加者にブロードキャスト
    pub async fn broadcast_participants(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }

    /// 更新されたカーソルテーブルを残りの参加者にブロードキャスト
    pub async fn broadcast_cursors(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }
}
