//! Formatting of incoming server events for terminal display.

use hiroma_server::infrastructure::dto::websocket::{ChatMessageDto, CursorDto, DrawOpDto};
use std::collections::HashMap;

/// Formats server events into human-readable terminal output
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the participants list of the current room
    pub fn format_participants(participants: &[String]) -> String {
        format!("\n*** participants: [{}]\n", participants.join(", "))
    }

    /// Format an incoming chat message
    pub fn format_chat_message(message: &ChatMessageDto) -> String {
        format!(
            "\n[{}] {}: {}\n",
            message.timestamp, message.sender, message.text
        )
    }

    /// Format a whiteboard stroke drawn by another participant
    pub fn format_draw(op: &DrawOpDto) -> String {
        format!(
            "\n*** draw {:?} ({:.2},{:.2})-({:.2},{:.2}) {}\n",
            op.mode, op.x0, op.y0, op.x1, op.y1, op.color
        )
    }

    /// Format the drawing history received on join/resync
    pub fn format_drawing_history(history: &[DrawOpDto]) -> String {
        format!("\n*** drawing history: {} op(s)\n", history.len())
    }

    /// Format the cursor table
    pub fn format_cursors(cursors: &HashMap<String, CursorDto>) -> String {
        let mut entries: Vec<String> = cursors
            .values()
            .map(|c| format!("{} ({:.2},{:.2})", c.user_name, c.x, c.y))
            .collect();
        entries.sort();
        format!("\n*** cursors: [{}]\n", entries.join(", "))
    }

    /// Format a code buffer update from another participant
    pub fn format_code_change(code: &str) -> String {
        format!("\n*** code updated ({} chars)\n", code.chars().count())
    }

    /// Format the code history received on join/resync
    pub fn format_code_history(code: &str) -> String {
        if code.is_empty() {
            "\n*** code buffer is empty\n".to_string()
        } else {
            format!("\n*** code buffer:\n{}\n", code)
        }
    }

    /// Format a clear-canvas signal
    pub fn format_clear_canvas() -> String {
        "\n*** canvas cleared\n".to_string()
    }

    /// Format a message that could not be parsed
    pub fn format_raw_message(text: &str) -> String {
        format!("\n[raw] {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiroma_server::infrastructure::dto::websocket::DrawModeDto;

    #[test]
    fn test_format_participants_joins_names() {
        // テスト項目: 参加者リストがカンマ区切りで整形される
        // given (前提条件):
        let participants = vec!["Alice".to_string(), "Bob".to_string()];

        // when (操作):
        let formatted = MessageFormatter::format_participants(&participants);

        // then (期待する結果):
        assert!(formatted.contains("[Alice, Bob]"));
    }

    #[test]
    fn test_format_chat_message_includes_sender_and_text() {
        // テスト項目: チャットメッセージに送信者と本文が含まれる
        // given (前提条件):
        let message = ChatMessageDto {
            id: "m1".to_string(),
            text: "hello".to_string(),
            sender: "Alice".to_string(),
            timestamp: "2024-01-01T00:00:00+09:00".to_string(),
        };

        // when (操作):
        let formatted = MessageFormatter::format_chat_message(&message);

        // then (期待する結果):
        assert!(formatted.contains("Alice"));
        assert!(formatted.contains("hello"));
    }

    #[test]
    fn test_format_cursors_is_sorted_for_stable_output() {
        // テスト項目: カーソル一覧が安定した順序で整形される
        // given (前提条件):
        let mut cursors = HashMap::new();
        cursors.insert(
            "c2".to_string(),
            CursorDto {
                x: 0.1,
                y: 0.1,
                user_name: "Bob".to_string(),
            },
        );
        cursors.insert(
            "c1".to_string(),
            CursorDto {
                x: 0.2,
                y: 0.2,
                user_name: "Alice".to_string(),
            },
        );

        // when (操作):
        let formatted = MessageFormatter::format_cursors(&cursors);

        // then (期待する結果): Alice が Bob より先に並ぶ
        let alice_pos = formatted.find("Alice").unwrap();
        let bob_pos = formatted.find("Bob").unwrap();
        assert!(alice_pos < bob_pos);
    }

    #[test]
    fn test_format_code_history_empty_buffer() {
        // テスト項目: 空のコードバッファ用の表示がある
        // given (前提条件):
        let code = "";

        // when (操作):
        let formatted = MessageFormatter::format_code_history(code);

        // then (期待する結果):
        assert!(formatted.contains("empty"));
    }

    #[test]
    fn test_format_draw_mentions_mode_and_color() {
        // テスト項目: 描画イベントの表示にモードと色が含まれる
        // given (前提条件):
        let op = DrawOpDto {
            x0: 0.0,
            y0: 0.0,
            x1: 1.0,
            y1: 1.0,
            color: "#f00".to_string(),
            line_width: 2.0,
            mode: DrawModeDto::Erase,
        };

        // when (操作):
        let formatted = MessageFormatter::format_draw(&op);

        // then (期待する結果):
        assert!(formatted.contains("Erase"));
        assert!(formatted.contains("#f00"));
    }
}
