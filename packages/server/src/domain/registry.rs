//! RoomRegistry trait 定義
//!
//! ドメイン層が必要とするルーム管理のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 原子性
//!
//! 各メソッドは「同一ルームに対する他の操作」と直列化された原子的な単位として
//! 実装されなければなりません。呼び出し側（UseCase 層）は操作 1 回につき
//! メソッド 1 回を呼び、戻り値のスナップショットだけを使って通知を組み立てます。
//! イベントをまたいで Room への参照を保持してはいけません。

use std::collections::HashMap;

use async_trait::async_trait;

use super::entity::{CursorPosition, DrawOp, RoomSummary};
use super::value_object::{ConnectionId, RoomId, UserName};

/// join 直後のスナップショット
///
/// 新規参加者へ送るルーム状態と、通知対象の全参加者を 1 回の原子的な操作で返します。
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    /// ルームの全参加者（join した本人を含む）
    pub members: Vec<ConnectionId>,
    /// 参加者の表示名リスト（join 順）
    pub participant_names: Vec<UserName>,
    /// 現在の描画ログ（新規参加者の同期用）
    pub draw_history: Vec<DrawOp>,
    /// 現在の共有コードバッファ（新規参加者の同期用）
    pub code_buffer: String,
}

/// leave 直後のスナップショット
#[derive(Debug, Clone)]
pub struct LeaveOutcome {
    /// 退出した参加者の表示名
    pub user_name: UserName,
    /// 残っている参加者（通知対象）
    pub remaining_members: Vec<ConnectionId>,
    /// 残っている参加者の表示名リスト（join 順）
    pub participant_names: Vec<UserName>,
    /// 退出者のエントリを除いたカーソル位置テーブル
    pub cursors: HashMap<ConnectionId, CursorPosition>,
    /// 最後の参加者の退出でルームが破棄されたかどうか
    pub room_removed: bool,
}

/// カーソル更新直後のスナップショット
#[derive(Debug, Clone)]
pub struct CursorUpdate {
    /// ルームの全参加者（送信者を含む通知対象）
    pub members: Vec<ConnectionId>,
    /// 更新後のカーソル位置テーブル
    pub cursors: HashMap<ConnectionId, CursorPosition>,
}

/// RoomRegistry trait
///
/// ルーム ID から Room へのマッピングを所有します。ルームは最初の join で
/// 遅延生成され、参加者が 0 人になった時点で破棄されます。参加者のいない
/// ルームがレジストリに登録されることはありません。
///
/// 未知のルームに対する読み取りは空の状態を返し（ルームは登録しない）、
/// 未知のルームに対する変更操作は黙って無視されます（`None` を返す）。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// ルームに参加する（ルームが無ければ作成する。失敗しない）
    async fn join_room(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
        user_name: UserName,
    ) -> JoinOutcome;

    /// ルームから退出する
    ///
    /// 参加していなかった場合は `None`（エラーにはしない）。
    /// 最後の参加者が退出した場合、ルームをレジストリから破棄します。
    async fn leave_room(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Option<LeaveOutcome>;

    /// コネクションが参加している全ルームの ID を取得（切断処理用）
    async fn rooms_of_connection(&self, connection_id: &ConnectionId) -> Vec<RoomId>;

    /// ルームの全参加者を取得（未知のルームは空）
    async fn members(&self, room_id: &RoomId) -> Vec<ConnectionId>;

    /// 描画ログに 1 ストロークを追記し、全参加者を返す
    async fn append_draw_op(&self, room_id: &RoomId, op: DrawOp) -> Option<Vec<ConnectionId>>;

    /// 描画ログを空にし、全参加者を返す
    async fn clear_draw_history(&self, room_id: &RoomId) -> Option<Vec<ConnectionId>>;

    /// 現在の描画ログを取得（未知のルームは空）
    async fn draw_history(&self, room_id: &RoomId) -> Vec<DrawOp>;

    /// カーソル位置を更新する
    ///
    /// 送信者がルームの参加者でない場合は `None`（更新は黙って捨てられる）。
    async fn update_cursor(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        x: f64,
        y: f64,
    ) -> Option<CursorUpdate>;

    /// 共有コードバッファを置き換え、全参加者を返す
    async fn set_code_buffer(&self, room_id: &RoomId, code: String) -> Option<Vec<ConnectionId>>;

    /// 現在の共有コードバッファを取得（未知のルームは空文字）
    async fn code_buffer(&self, room_id: &RoomId) -> String;

    /// 全ルームの概要を取得（HTTP API 用）
    async fn room_summaries(&self) -> Vec<RoomSummary>;
}
