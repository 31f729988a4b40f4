use serde::{Deserialize, Serialize};

use crate::constants::conversation::{DEFAULT_TITLE, TITLE_ELLIPSIS, TITLE_MAX_CHARS};

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Model,
}

/// A transcript entry. Never edited after it is appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub role: Author,
    pub content: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

impl Message {
    pub fn new(role: Author, content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            role,
            content: content.into(),
            timestamp: now_millis(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Author::User, content)
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Author::Model, content)
    }
}

/// A generated SVG artifact and the prompt that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub prompt: String,
    pub svg_code: String,
    pub timestamp: i64,
}

impl HistoryItem {
    pub fn new(prompt: impl Into<String>, svg_code: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            prompt: prompt.into(),
            svg_code: svg_code.into(),
            timestamp: now_millis(),
        }
    }
}

/// `messages` are oldest first; `svgs` are newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub svgs: Vec<HistoryItem>,
    pub last_modified: i64,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            svgs: Vec::new(),
            last_modified: now_millis(),
        }
    }

    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_TITLE
    }

    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.touch();
    }

    pub fn push_artifact(&mut self, item: HistoryItem) {
        self.svgs.insert(0, item);
        self.touch();
    }

    /// Title from the first user message, set only while the conversation is
    /// still empty or untitled.
    pub fn derive_title(&mut self, text: &str) {
        if self.messages.is_empty() || self.has_default_title() {
            self.title = title_from(text);
        }
    }

    pub fn latest_svg(&self) -> Option<&str> {
        self.svgs.first().map(|item| item.svg_code.as_str())
    }

    fn touch(&mut self) {
        self.last_modified = now_millis().max(self.last_modified);
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Upper-cased first `TITLE_MAX_CHARS` characters, with an ellipsis when cut.
pub fn title_from(text: &str) -> String {
    let truncated = if text.chars().count() > TITLE_MAX_CHARS {
        let head: String = text.chars().take(TITLE_MAX_CHARS).collect();
        format!("{head}{TITLE_ELLIPSIS}")
    } else {
        text.to_string()
    };
    truncated.to_uppercase()
}

pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_conversation_is_empty_and_untitled() {
        let conv = Conversation::new();
        assert_eq!(conv.title, DEFAULT_TITLE);
        assert!(conv.messages.is_empty());
        assert!(conv.svgs.is_empty());
        assert!(conv.last_modified > 0);
    }

    #[test]
    fn test_title_from_short_text() {
        assert_eq!(title_from("draw a gear"), "DRAW A GEAR");
    }

    #[test]
    fn test_title_from_long_text_is_truncated() {
        let title = title_from("a shield with a lightning bolt inside");
        assert_eq!(title, "A SHIELD WITH A LIGH...");
    }

    #[test]
    fn test_title_truncation_counts_chars_not_bytes() {
        let text = "é".repeat(25);
        let title = title_from(&text);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + TITLE_ELLIPSIS.len());
        assert!(title.starts_with('É'));
    }

    #[test]
    fn test_derive_title_only_once() {
        let mut conv = Conversation::new();
        conv.derive_title("first prompt");
        conv.push_message(Message::user("first prompt"));
        conv.derive_title("second prompt");
        assert_eq!(conv.title, "FIRST PROMPT");
    }

    #[test]
    fn test_artifacts_are_newest_first() {
        let mut conv = Conversation::new();
        conv.push_artifact(HistoryItem::new("one", "<svg>1</svg>"));
        conv.push_artifact(HistoryItem::new("two", "<svg>2</svg>"));
        assert_eq!(conv.latest_svg(), Some("<svg>2</svg>"));
        assert_eq!(conv.svgs[1].prompt, "one");
    }

    #[test]
    fn test_json_field_names() {
        let mut conv = Conversation::new();
        conv.push_message(Message::model("hi"));
        conv.push_artifact(HistoryItem::new("p", "<svg/>"));
        let json = serde_json::to_value(&conv).unwrap();
        assert!(json.get("lastModified").is_some());
        assert_eq!(json["messages"][0]["role"], "model");
        assert_eq!(json["svgs"][0]["svgCode"], "<svg/>");
    }
}
