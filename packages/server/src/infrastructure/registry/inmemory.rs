//! InMemory RoomRegistry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## ロック規律
//!
//! - ルームマップ全体を守る外側の Mutex と、ルームごとの Mutex の 2 段構成。
//! - ロック順序は常に「マップ → ルーム」。逆順で取得することはありません。
//! - join / leave はルームの生成・破棄と名簿の変更を原子的にするため、
//!   操作全体でマップロックを保持します。
//! - 描画・カーソル・コード・読み取りはマップロックを Arc の取得だけに使い、
//!   本体の操作はルームロックのみで行います。別ルーム同士の操作は並行に
//!   実行されます。
//!
//! 最後の参加者が退出したルームの Arc を別タスクがまだ握っているケースでは、
//! そのルームへの書き込みはマップから外れた Room に落ち、誰にも観測されずに
//! 破棄されます。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hiroma_shared::time::Clock;

use crate::domain::{
    ConnectionId, CursorUpdate, DrawOp, JoinOutcome, LeaveOutcome, Room, RoomId, RoomRegistry,
    RoomSummary, Timestamp, UserName,
};

/// インメモリ RoomRegistry 実装
///
/// ルームは最初の join で遅延生成し、参加者が 0 人になった時点で破棄します。
pub struct InMemoryRoomRegistry {
    /// ルーム作成時刻の取得に使うクロック
    clock: Arc<dyn Clock>,
    /// ルーム ID → Room のマップ
    rooms: Mutex<HashMap<RoomId, Arc<Mutex<Room>>>>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// ルームの Arc を取得する（マップロックは取得後すぐに解放）
    async fn room(&self, room_id: &RoomId) -> Option<Arc<Mutex<Room>>> {
        self.rooms.lock().await.get(room_id).cloned()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join_room(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
        user_name: UserName,
    ) -> JoinOutcome {
        // ルームの生成と最初の参加者の追加を原子的にするため、
        // マップロックを保持したまま名簿を変更する
        let mut rooms = self.rooms.lock().await;
        let room_arc = rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                tracing::info!("Room '{}' created", room_id.as_str());
                Arc::new(Mutex::new(Room::new(
                    room_id.clone(),
                    Timestamp::new(self.clock.now_jst_millis()),
                )))
            })
            .clone();
        let mut room = room_arc.lock().await;
        room.join(connection_id, user_name);

        JoinOutcome {
            members: room.member_ids(),
            participant_names: room.participant_names(),
            draw_history: room.draw_history().to_vec(),
            code_buffer: room.code_buffer().to_string(),
        }
    }

    async fn leave_room(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Option<LeaveOutcome> {
        // 最後の参加者の退出とルームの破棄を原子的にするため、
        // マップロックを保持したまま名簿を変更する
        let mut rooms = self.rooms.lock().await;
        let room_arc = rooms.get(room_id)?.clone();
        let mut room = room_arc.lock().await;

        let user_name = room.leave(connection_id)?;
        let room_removed = room.is_empty();
        let outcome = LeaveOutcome {
            user_name,
            remaining_members: room.member_ids(),
            participant_names: room.participant_names(),
            cursors: room.cursors().clone(),
            room_removed,
        };
        drop(room);

        if room_removed {
            rooms.remove(room_id);
            tracing::info!("Room '{}' removed (empty)", room_id.as_str());
        }

        Some(outcome)
    }

    async fn rooms_of_connection(&self, connection_id: &ConnectionId) -> Vec<RoomId> {
        let rooms = self.rooms.lock().await;
        let mut member_of = Vec::new();
        for (room_id, room_arc) in rooms.iter() {
            let room = room_arc.lock().await;
            if room.is_member(connection_id) {
                member_of.push(room_id.clone());
            }
        }
        member_of
    }

    async fn members(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        match self.room(room_id).await {
            Some(room_arc) => {
                let room = room_arc.lock().await;
                room.member_ids()
            }
            None => Vec::new(),
        }
    }

    async fn append_draw_op(&self, room_id: &RoomId, op: DrawOp) -> Option<Vec<ConnectionId>> {
        let room_arc = self.room(room_id).await?;
        let mut room = room_arc.lock().await;
        room.append_draw_op(op);
        Some(room.member_ids())
    }

    async fn clear_draw_history(&self, room_id: &RoomId) -> Option<Vec<ConnectionId>> {
        let room_arc = self.room(room_id).await?;
        let mut room = room_arc.lock().await;
        room.clear_draw_history();
        Some(room.member_ids())
    }

    async fn draw_history(&self, room_id: &RoomId) -> Vec<DrawOp> {
        match self.room(room_id).await {
            Some(room_arc) => {
                let room = room_arc.lock().await;
                room.draw_history().to_vec()
            }
            None => Vec::new(),
        }
    }

    async fn update_cursor(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        x: f64,
        y: f64,
    ) -> Option<CursorUpdate> {
        let room_arc = self.room(room_id).await?;
        let mut room = room_arc.lock().await;
        if !room.update_cursor(connection_id, x, y) {
            return None;
        }
        Some(CursorUpdate {
            members: room.member_ids(),
            cursors: room.cursors().clone(),
        })
    }

    async fn set_code_buffer(&self, room_id: &RoomId, code: String) -> Option<Vec<ConnectionId>> {
        let room_arc = self.room(room_id).await?;
        let mut room = room_arc.lock().await;
        room.set_code_buffer(code);
        Some(room.member_ids())
    }

    async fn code_buffer(&self, room_id: &RoomId) -> String {
        match self.room(room_id).await {
            Some(room_arc) => {
                let room = room_arc.lock().await;
                room.code_buffer().to_string()
            }
            None => String::new(),
        }
    }

    async fn room_summaries(&self) -> Vec<RoomSummary> {
        let rooms = self.rooms.lock().await;
        let mut summaries = Vec::with_capacity(rooms.len());
        for room_arc in rooms.values() {
            let room = room_arc.lock().await;
            summaries.push(room.summary());
        }
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }
}
