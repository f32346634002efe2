//! UseCase: 共有コードバッファ操作処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - コード変更（execute_change）とコード履歴取得（code_history）
//!
//! ### なぜこのテストが必要か
//! - last-writer-wins のセマンティクス（バージョン検査もマージも無い）を保証
//! - コード変更のブロードキャストが送信者を除外することを確認
//! - 存在しないルームへの変更が no-op であることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系: コード変更と後から参加したクライアントの同期
//! - 異常系: 存在しないルームへの変更・読み取り
//!
//! ## 既知の制約
//!
//! 2 つのコネクションからの同時編集は後勝ちで黙って上書きされます。
//! マージもバージョン検査も行いません。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomId, RoomRegistry};

/// 共有コードバッファ操作のユースケース
pub struct CodeEditorUseCase {
    /// RoomRegistry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl CodeEditorUseCase {
    /// 新しい CodeEditorUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// コード変更を実行（last-writer-wins）
    ///
    /// バッファを丸ごと置き換え、送信者を除いたブロードキャスト対象を返します。
    /// ルームが存在しない場合は `None`。
    pub async fn execute_change(
        &self,
        room_id: &RoomId,
        sender: &ConnectionId,
        code: String,
    ) -> Option<Vec<ConnectionId>> {
        let members = self.registry.set_code_buffer(room_id, code).await?;
        Some(members.into_iter().filter(|id| id != sender).collect())
    }

    /// 現在のコードバッファを取得（再同期用。存在しないルームは空文字）
    pub async fn code_history(&self, room_id: &RoomId) -> String {
        self.registry.code_buffer(room_id).await
    }

    /// コード変更イベントをブロードキャスト
    pub async fn broadcast_code_change(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }

    /// コード履歴を要求元のコネクションへ送る
    pub async fn push_code_history(
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomRegistry, UserName, pusher::MockMessagePusher};
    use crate::infrastructure::registry::InMemoryRoomRegistry;
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
    async fn test_change_excludes_sender_from_targets() {
        // テスト項目: コード変更のブロードキャスト対象から送信者が除外される
        // given (前提条件):
        let registry = create_test_registry();
        let usecase = CodeEditorUseCase::new(registry.clone(), Arc::new(MockMessagePusher::new()));
        registry
            .join_room(room_id("r1"), conn("c1"), name("Alice"))
            .await;
        registry
            .join_room(room_id("r1"), conn("c2"), name("Bob"))
            .await;

        // when (操作):
        let targets = usecase
            .execute_change(&room_id("r1"), &conn("c1"), "let x = 1".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(targets.unwrap(), vec![conn("c2")]);
        assert_eq!(usecase.code_history(&room_id("r1")).await, "let x = 1");
    }

    #[tokio::test]
    async fn test_concurrent_changes_last_writer_wins() {
        // テスト項目: 2 つのコネクションからの変更は後勝ちで上書きされる
        // given (前提条件):
        let registry = create_test_registry();
        let usecase = CodeEditorUseCase::new(registry.clone(), Arc::new(MockMessagePusher::new()));
        registry
            .join_room(room_id("r1"), conn("c1"), name("Alice"))
            .await;
        registry
            .join_room(room_id("r1"), conn("c2"), name("Bob"))
            .await;

        // when (操作): Alice のあとに Bob が書き込む
        usecase
            .execute_change(&room_id("r1"), &conn("c1"), "let x = 1".to_string())
            .await
            .unwrap();
        usecase
            .execute_change(&room_id("r1"), &conn("c2"), "let x = 2".to_string())
            .await
            .unwrap();

        // then (期待する結果): マージされず、最後の書き込みだけが残る
        assert_eq!(usecase.code_history(&room_id("r1")).await, "let x = 2");
    }

    #[tokio::test]
    async fn test_change_on_unknown_room_is_noop() {
        // テスト項目: 存在しないルームへのコード変更は no-op
        // given (前提条件):
        let registry = create_test_registry();
        let usecase = CodeEditorUseCase::new(registry.clone(), Arc::new(MockMessagePusher::new()));

        // when (操作):
        let targets = usecase
            .execute_change(&room_id("nowhere"), &conn("c1"), "text".to_string())
            .await;

        // then (期待する結果):
        assert!(targets.is_none());
        assert!(registry.room_summaries().await.is_empty());
    }

    #[tokio::test]
    async fn test_code_history_on_unknown_room_is_empty() {
        // テスト項目: 存在しないルームのコード履歴は空文字
        // given (前提条件):
        let registry = create_test_registry();
        let usecase = CodeEditorUseCase::new(registry, Arc::new(MockMessagePusher::new()));

        // when (操作):
        let code = usecase.code_history(&room_id("nowhere")).await;

        // then (期待する結果):
        assert_eq!(code, "");
    }
}
