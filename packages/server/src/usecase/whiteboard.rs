//! UseCase: ホワイトボード操作処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 描画（execute_draw）、カーソル移動（execute_cursor_move）、
//!   全消去（execute_clear）、描画ログ取得（drawing_history）
//!
//! ### なぜこのテストが必要か
//! - 描画ログの到着順（ルーム単位のグローバル順序）を保証する必要がある
//!   （erase / 上書き系モードでは順序が意味を持つ）
//! - 描画ブロードキャストが送信者を除外すること（ローカルで描画済みのため）を確認
//! - 参加者でないコネクションのカーソル更新が黙って捨てられることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系: 描画の追記とブロードキャスト、カーソル更新、全消去
//! - 異常系: 存在しないルームへの操作（no-op）、非参加者のカーソル更新

use std::sync::Arc;

use crate::domain::{
    ConnectionId, CursorUpdate, DrawOp, MessagePusher, RoomId, RoomRegistry,
};

/// ホワイトボード操作のユースケース
pub struct WhiteboardUseCase {
    /// RoomRegistry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl WhiteboardUseCase {
    /// 新しい WhiteboardUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 描画を実行
    ///
    /// 描画ログに追記し、送信者を除いたブロードキャスト対象を返します。
    /// 送信者はローカルで描画済みのため、エコーバックしません。
    /// ルームが存在しない場合は `None`（何も記録されない）。
    pub async fn execute_draw(
        &self,
        room_id: &RoomId,
        sender: &ConnectionId,
        op: DrawOp,
    ) -> Option<Vec<ConnectionId>> {
        let members = self.registry.append_draw_op(room_id, op).await?;
        Some(members.into_iter().filter(|id| id != sender).collect())
    }

    /// カーソル移動を実行
    ///
    /// 送信者がルームの参加者でない場合、更新は黙って捨てられ `None` を返します。
    /// 更新後のカーソルテーブルは送信者を含む全参加者へ配送されます。
    pub async fn execute_cursor_move(
        &self,
        room_id: &RoomId,
        sender: &ConnectionId,
        x: f64,
        y: f64,
    ) -> Option<CursorUpdate> {
        self.registry.update_cursor(room_id, sender, x, y).await
    }

    /// 全消去を実行
    ///
    /// 描画ログを空にし、送信者を含む全参加者（通知対象）を返します。
    /// 元に戻す手段はありません。
    pub async fn execute_clear(&self, room_id: &RoomId) -> Option<Vec<ConnectionId>> {
        self.registry.clear_draw_history(room_id).await
    }

    /// 現在の描画ログを取得（再同期用。存在しないルームは空）
    pub async fn drawing_history(&self, room_id: &RoomId) -> Vec<DrawOp> {
        self.registry.draw_history(room_id).await
    }

    /// 描画イベントをブロードキャスト
    pub async fn broadcast_draw(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }

    /// 更新されたカーソルテーブルをブロードキャスト
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

    /// 全消去シグナルをブロードキャスト
    pub async fn broadcast_clear(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }

    /// 描画ログを要求元のコネクションへ送る
    pub async fn push_history(
        &self,
        connection_id: &ConnectionId,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .push_to(connection_id, message)
            .await
            .map_err(|e| e.to_string())
    }
}
