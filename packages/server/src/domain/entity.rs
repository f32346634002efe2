//! エンティティ定義
//!
//! ルームの集約（Room）とその構成要素を定義します。
//! Room のメソッドは純粋なインメモリ操作のみを行い、副作用を持たないため
//! 単体テストが容易です。排他制御は Infrastructure 層（レジストリ実装）の責務です。

use std::collections::HashMap;

use super::value_object::{ConnectionId, RoomId, Timestamp, UserName};

/// ルームの参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// 参加者のコネクション ID
    pub connection_id: ConnectionId,
    /// 表示名
    pub user_name: UserName,
}

/// ホワイトボードの描画モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Draw,
    Erase,
    Rectangle,
    Circle,
    Line,
}

/// ホワイトボードの 1 ストローク（記録後は不変な値）
///
/// 座標は [0, 1] に正規化されたルーム相対座標。
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub color: String,
    pub line_width: f64,
    pub mode: DrawMode,
}

/// 参加者のカーソル位置
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPosition {
    pub x: f64,
    pub y: f64,
    pub user_name: UserName,
}

/// HTTP API 向けのルーム概要
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSummary {
    pub id: RoomId,
    pub participant_names: Vec<UserName>,
    pub created_at: Timestamp,
}

/// ルームの集約
///
/// 1 ルーム分の一時的な共有状態を保持します：
///
/// - `participants`: 参加者名簿（join 順を保持）
/// - `draw_history`: 描画ログ（明示的なクリア以外は追記のみ）
/// - `cursors`: カーソル位置テーブル（定義域は常に参加者の部分集合）
/// - `code_buffer`: 共有コードバッファ（last-writer-wins）
///
/// プロセス再起動をまたいだ永続化は行いません。最後の参加者が退出した時点で
/// レジストリから破棄され、すべての状態が失われます。
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub created_at: Timestamp,
    participants: Vec<Participant>,
    draw_history: Vec<DrawOp>,
    cursors: HashMap<ConnectionId, CursorPosition>,
    code_buffer: String,
}

impl Room {
    /// 新しい空の Room を作成
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            participants: Vec::new(),
            draw_history: Vec::new(),
            cursors: HashMap::new(),
            code_buffer: String::new(),
        }
    }

    /// 参加者を追加する
    ///
    /// 同じコネクション ID で再 join した場合は表示名を上書きし、
    /// 名簿上の位置（join 順）は維持します。
    pub fn join(&mut self, connection_id: ConnectionId, user_name: UserName) {
        match self
            .participants
            .iter_mut()
            .find(|p| p.connection_id == connection_id)
        {
            Some(participant) => {
                participant.user_name = user_name;
            }
            None => {
                self.participants.push(Participant {
                    connection_id,
                    user_name,
                });
            }
        }
    }

    /// 参加者を削除する
    ///
    /// 参加者のカーソルエントリも同時に削除します。
    /// 参加していないコネクションの場合は `None` を返し、何も変更しません。
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Option<UserName> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.connection_id == connection_id)?;
        let participant = self.participants.remove(index);
        self.cursors.remove(connection_id);
        Some(participant.user_name)
    }

    /// コネクションがこのルームの参加者かどうか
    pub fn is_member(&self, connection_id: &ConnectionId) -> bool {
        self.participants
            .iter()
            .any(|p| &p.connection_id == connection_id)
    }

    /// 参加者が 1 人もいないかどうか
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// 参加者の表示名リスト（join 順）
    pub fn participant_names(&self) -> Vec<UserName> {
        self.participants
            .iter()
            .map(|p| p.user_name.clone())
            .collect()
    }

    /// 参加者のコネクション ID リスト（join 順）
    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.participants
            .iter()
            .map(|p| p.connection_id.clone())
            .collect()
    }

    /// 描画ログに 1 ストロークを追記する
    pub fn append_draw_op(&mut self, op: DrawOp) {
        self.draw_history.push(op);
    }

    /// 描画ログを空にする（元に戻せない）
    pub fn clear_draw_history(&mut self) {
        self.draw_history.clear();
    }

    /// 描画ログ（到着順）
    pub fn draw_history(&self) -> &[DrawOp] {
        &self.draw_history
    }

    /// カーソル位置を更新する
    ///
    /// 参加者でないコネクションの更新は黙って捨てられ、`false` を返します。
    /// 表示名は名簿のエントリから引きます。
    pub fn update_cursor(&mut self, connection_id: &ConnectionId, x: f64, y: f64) -> bool {
        let Some(participant) = self
            .participants
            .iter()
            .find(|p| &p.connection_id == connection_id)
        else {
            return false;
        };
        self.cursors.insert(
            connection_id.clone(),
            CursorPosition {
                x,
                y,
                user_name: participant.user_name.clone(),
            },
        );
        true
    }

    /// カーソル位置テーブル
    pub fn cursors(&self) -> &HashMap<ConnectionId, CursorPosition> {
        &self.cursors
    }

    /// 共有コードバッファを丸ごと置き換える（last-writer-wins）
    pub fn set_code_buffer(&mut self, code: String) {
        self.code_buffer = code;
    }

    /// 共有コードバッファの現在値
    pub fn code_buffer(&self) -> &str {
        &self.code_buffer
    }

    /// HTTP API 向けの概要を作成
    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id.clone(),
            participant_names: self.participant_names(),
            created_at: self.created_at,
        }
    }
}
