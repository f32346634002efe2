//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ChatUseCase::execute() メソッド（ブロードキャスト対象の選定）
//!
//! ### なぜこのテストが必要か
//! - チャットは保存されない（fire-and-forget）ため、対象選定と配送が全て
//! - 表示の一貫性のため送信者自身もブロードキャストを受け取る
//!   （送信者はローカルの楽観的描画ではなくエコーから表示する設計）
//!
//! ### どのような状況を想定しているか
//! - 正常系: ルーム全員（送信者を含む）への配送
//! - エッジケース: 存在しないルームへの送信（対象なし）

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomId, RoomRegistry};

/// チャットメッセージ送信のユースケース
///
/// メッセージは RoomState に保存されず、配送のみ行われます。
pub struct ChatUseCase {
    /// RoomRegistry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ChatUseCase {
    /// 新しい ChatUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// メッセージ送信の対象（送信者を含むルーム全員）を取得
    ///
    /// ルームが存在しない場合は空のリストを返します。
    pub async fn execute(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.registry.members(room_id).await
    }

    /// チャットメッセージをブロードキャスト
    pub async fn broadcast_message(
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
    async fn test_targets_include_sender() {
        // テスト項目: 配送対象にルーム全員（送信者を含む）が含まれる
        // given (前提条件):
        let registry = create_test_registry();
        let usecase = ChatUseCase::new(registry.clone(), Arc::new(MockMessagePusher::new()));
        registry
            .join_room(room_id("r1"), conn("c1"), name("Alice"))
            .await;
        registry
            .join_room(room_id("r1"), conn("c2"), name("Bob"))
            .await;

        // when (操作):
        let targets = usecase.execute(&room_id("r1")).await;

        // then (期待する結果):
        assert_eq!(targets, vec![conn("c1"), conn("c2")]);
    }

    #[tokio::test]
    async fn test_targets_for_unknown_room_are_empty() {
        // テスト項目: 存在しないルームへの送信は対象が空になる
        // given (前提条件):
        let registry = create_test_registry();
        let usecase = ChatUseCase::new(registry, Arc::new(MockMessagePusher::new()));

        // when (操作):
        let targets = usecase.execute(&room_id("nowhere")).await;

        // then (期待する結果):
        assert!(targets.is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_message_delegates_to_pusher() {
        // テスト項目: メッセージのブロードキャストが MessagePusher に委譲される
        // given (前提条件):
        let registry = create_test_registry();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(|targets, message| targets.len() == 2 && message.contains("receive-message"))
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = ChatUseCase::new(registry, Arc::new(pusher));

        // when (操作):
        let result = usecase
            .broadcast_message(
                vec![conn("c1"), conn("c2")],
                r#"{"type":"receive-message"}"#,
            )
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
