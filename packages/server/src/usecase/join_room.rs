//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルームへの参加処理（遅延生成、名簿への追加、同期用スナップショット）
//!
//! ### なぜこのテストが必要か
//! - join は失敗しない（ルームが無ければ作る）ことを保証
//! - 新規参加者が現在の描画ログとコードバッファを受け取れることを確認
//! - 同じコネクションの再 join が名簿を重複させないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系: 新規ルームへの参加、既存ルームへの後から参加
//! - エッジケース: 同じコネクションでの再 join（表示名の上書き）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, JoinOutcome, MessagePusher, RoomId, RoomRegistry, UserName,
};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// RoomRegistry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// ルーム参加を実行
    ///
    /// ルームが存在しなければ作成し、名簿に参加者を追加します。
    /// この操作は失敗しません。
    ///
    /// # Returns
    ///
    /// 参加直後のスナップショット（通知対象の全参加者、名簿、描画ログ、コード）
    pub async fn execute(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
        user_name: UserName,
    ) -> JoinOutcome {
        tracing::info!(
            "User '{}' ({}) joined room '{}'",
            user_name.as_str(),
            connection_id.as_str(),
            room_id.as_str()
        );
        self.registry
            .join_room(room_id, connection_id, user_name)
            .await
    }

    /// 新規参加者にルームの現在状態（描画ログ・コード履歴）を送る
    pub async fn push_room_state(
        &self,
        connection_id: &ConnectionId,
        drawing_history_json: &str,
        code_history_json: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .push_to(connection_id, drawing_history_json)
            .await
            .map_err(|e| e.to_string())?;
        self.message_pusher
            .push_to(connection_id, code_history_json)
            .await
            .map_err(|e| e.to_string())
    }

    /// 更新された参加者リストをルームの全参加者にブロードキャスト
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemoryRoomRegistry,
    };
    use hiroma_shared::time::FixedClock;

    fn create_test_registry() -> Arc<InMemoryRoomRegistry> {
        Arc::new(InMemoryRoomRegistry::new(Arc::new(FixedClock::new(
            1700000000000,
        ))))
    }

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    fn conn(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn name(value: &str) -> UserName {
        UserName::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_new_room() {
        // テスト項目: 新規ルームへの参加でルームが作成され、空のスナップショットが返る
        // given (前提条件):
        let registry = create_test_registry();
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = JoinRoomUseCase::new(registry.clone(), message_pusher);

        // when (操作):
        let outcome = usecase
            .execute(room_id("r1"), conn("c1"), name("Alice"))
            .await;

        // then (期待する結果):
        assert_eq!(outcome.members, vec![conn("c1")]);
        assert_eq!(outcome.participant_names, vec![name("Alice")]);
        assert!(outcome.draw_history.is_empty());
        assert_eq!(outcome.code_buffer, "");
    }

    #[tokio::test]
    async fn test_join_existing_room_appends_to_roster() {
        // テスト項目: 既存ルームへの参加で名簿に join 順で追加される
        // given (前提条件):
        let registry = create_test_registry();
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = JoinRoomUseCase::new(registry.clone(), message_pusher);
        usecase
            .execute(room_id("r1"), conn("c1"), name("Alice"))
            .await;

        // when (操作):
        let outcome = usecase
            .execute(room_id("r1"), conn("c2"), name("Bob"))
            .await;

        // then (期待する結果):
        assert_eq!(outcome.members, vec![conn("c1"), conn("c2")]);
        assert_eq!(
            outcome.participant_names,
            vec![name("Alice"), name("Bob")]
        );
    }

    #[tokio::test]
    async fn test_rejoin_does_not_duplicate_roster_entry() {
        // テスト項目: 同じコネクションの再 join が名簿を重複させない
        // given (前提条件):
        let registry = create_test_registry();
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = JoinRoomUseCase::new(registry.clone(), message_pusher);
        usecase
            .execute(room_id("r1"), conn("c1"), name("Alice"))
            .await;

        // when (操作): 新しい表示名で再 join
        let outcome = usecase
            .execute(room_id("r1"), conn("c1"), name("Alicia"))
            .await;

        // then (期待する結果):
        assert_eq!(outcome.members, vec![conn("c1")]);
        assert_eq!(outcome.participant_names, vec![name("Alicia")]);
    }

    #[tokio::test]
    async fn test_push_room_state_delivers_both_messages_to_joiner() {
        // テスト項目: 新規参加者に描画ログとコード履歴の両方が届く
        // given (前提条件):
        let registry = create_test_registry();
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = JoinRoomUseCase::new(registry.clone(), message_pusher.clone());
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        message_pusher.register_client(conn("c1"), tx).await;

        // when (操作):
        let result = usecase
            .push_room_state(&conn("c1"), r#"{"type":"drawing-history"}"#, r#"{"type":"code-history"}"#)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            rx.recv().await,
            Some(r#"{"type":"drawing-history"}"#.to_string())
        );
        assert_eq!(
            rx.recv().await,
            Some(r#"{"type":"code-history"}"#.to_string())
        );
    }
}
