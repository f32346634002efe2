//! UseCase: ルーム退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - ルームからの退出処理（名簿・カーソルの削除、空ルームの破棄）
//!
//! ### なぜこのテストが必要か
//! - 退出時に残りの参加者へ通知するためのスナップショットを保証
//! - 参加していないコネクションの leave がエラーにならないこと（冪等性）を確認
//! - 最後の参加者の退出でルームが破棄されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系: 参加者の退出と残りメンバーへの通知
//! - エッジケース: 最後の参加者の退出（ルーム破棄、通知対象なし）
//! - 異常系: 参加していないコネクション・存在しないルームの退出試行

use std::sync::Arc;

use crate::domain::{ConnectionId, LeaveOutcome, MessagePusher, RoomId, RoomRegistry};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// RoomRegistry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// ルーム退出を実行
    ///
    /// 参加していなかった場合は `None` を返し、何も起きません（エラーにはしない）。
    ///
    /// # Returns
    ///
    /// 退出直後のスナップショット（残りの参加者、名簿、カーソルテーブル）
    pub async fn execute(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Option<LeaveOutcome> {
        let outcome = self.registry.leave_room(room_id, connection_id).await?;
        tracing::info!(
            "User '{}' ({}) left room '{}'",
            outcome.user_name.as_str(),
            connection_id.as_str(),
            room_id.as_str()
        );
        Some(outcome)
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
