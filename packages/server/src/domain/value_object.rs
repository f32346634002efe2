//! 値オブジェクト定義
//!
//! 不正な値がドメインに入り込まないよう、コンストラクタでバリデーションを行います。
//! デコード境界（UI 層）で文字列から値オブジェクトへ変換し、失敗したイベントは
//! その場で破棄されます。

use uuid::Uuid;

use super::error::DomainError;

/// ルーム ID（呼び出し側が指定する不透明な文字列）
const MAX_ROOM_ID_LENGTH: usize = 128;

/// 表示名の最大長
const MAX_USER_NAME_LENGTH: usize = 64;

/// ルーム ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    /// 新しい RoomId を作成（空文字・空白のみ・長すぎる ID は拒否）
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() || value.len() > MAX_ROOM_ID_LENGTH {
            return Err(DomainError::InvalidRoomId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// 参加者の表示名
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    /// 新しい UserName を作成（空文字・空白のみ・長すぎる名前は拒否）
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() || value.chars().count() > MAX_USER_NAME_LENGTH {
            return Err(DomainError::InvalidUserName(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// コネクション ID
///
/// トランスポート接続 1 本ごとにサーバー側で払い出される不透明な ID。
/// 切断された瞬間に無効になり、再接続は新しい ID になります（再開セマンティクスなし）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 既存の文字列から ConnectionId を作成（空文字は拒否）
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::InvalidConnectionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ConnectionId のファクトリ
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// UUID v4 で新しい ConnectionId を生成
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// Unix タイムスタンプ（JST、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_accepts_valid_value() {
        // テスト項目: 通常の文字列から RoomId が作成できる
        // given (前提条件):
        let value = "room-42".to_string();

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "room-42");
    }

    #[test]
    fn test_room_id_rejects_empty_value() {
        // テスト項目: 空文字からは RoomId が作成できない
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_room_id_rejects_whitespace_only_value() {
        // テスト項目: 空白のみの文字列からは RoomId が作成できない
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_room_id_rejects_too_long_value() {
        // テスト項目: 最大長を超える文字列からは RoomId が作成できない
        // given (前提条件):
        let value = "x".repeat(MAX_ROOM_ID_LENGTH + 1);

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_user_name_accepts_valid_value() {
        // テスト項目: 通常の文字列から UserName が作成できる
        // given (前提条件):
        let value = "Alice".to_string();

        // when (操作):
        let result = UserName::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "Alice");
    }

    #[test]
    fn test_user_name_rejects_empty_value() {
        // テスト項目: 空文字からは UserName が作成できない
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = UserName::new(value);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_user_name_rejects_too_long_value() {
        // テスト項目: 最大長を超える文字列からは UserName が作成できない
        // given (前提条件):
        let value = "あ".repeat(MAX_USER_NAME_LENGTH + 1);

        // when (操作):
        let result = UserName::new(value);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_connection_id_factory_generates_unique_ids() {
        // テスト項目: ConnectionIdFactory が一意な ID を生成する
        // given (前提条件):

        // when (操作):
        let id1 = ConnectionIdFactory::generate();
        let id2 = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_connection_id_rejects_empty_value() {
        // テスト項目: 空文字からは ConnectionId が作成できない
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = ConnectionId::new(value);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_timestamp_holds_value() {
        // テスト項目: Timestamp が渡された値を保持する
        // given (前提条件):
        let millis = 1700000000000;

        // when (操作):
        let timestamp = Timestamp::new(millis);

        // then (期待する結果):
        assert_eq!(timestamp.value(), millis);
    }
}
