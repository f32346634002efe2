//! UseCase: ルーム一覧取得処理（HTTP API 用）

use std::sync::Arc;

use crate::domain::{RoomRegistry, RoomSummary};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// RoomRegistry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 現在アクティブな全ルームの概要を取得
    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.registry.room_summaries().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, RoomId, RoomRegistry, UserName};
    use crate::infrastructure::registry::InMemoryRoomRegistry;
    use hiroma_shared::time::FixedClock;

    #[tokio::test]
    async fn test_execute_lists_active_rooms() {
        // テスト項目: アクティブなルームだけが一覧に含まれる
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new(Arc::new(FixedClock::new(
            1700000000000,
        ))));
        let usecase = GetRoomsUseCase::new(registry.clone());
        registry
            .join_room(
                RoomId::new("r1".to_string()).unwrap(),
                ConnectionId::new("c1".to_string()).unwrap(),
                UserName::new("Alice".to_string()).unwrap(),
            )
            .await;

        // when (操作):
        let summaries = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id.as_str(), "r1");
        assert_eq!(summaries[0].participant_names.len(), 1);
    }
}
