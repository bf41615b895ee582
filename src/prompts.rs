//! Fixed few-shot priming scripts for both translation directions.
//!
//! These transcripts are configuration data, not logic: each call to the
//! adapter copies one of them and appends the live request, so the wording
//! here can change without touching any control flow.

use serde::Serialize;

/// A role-tagged chat message sent to the completion API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// The sender of a chat message, serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Transcript that biases the model toward emoji-only output.
pub fn forward_examples() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are an emoji translator. You must respond only with emojis, no text. \
             Combine 2-6 emojis to convey complex emotions and situations accurately.",
        ),
        ChatMessage::user("I'm feeling great today"),
        ChatMessage::assistant("😄🌟✨"),
        ChatMessage::user("Just completed my project"),
        ChatMessage::assistant("✅🎉🏆"),
        ChatMessage::user("Learning to code"),
        ChatMessage::assistant("👩‍💻📚✨"),
    ]
}

/// Transcript that biases the model toward descriptive text for emoji input.
pub fn reverse_examples() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are an emoji interpreter. Convert emojis into descriptive text \
             that captures their combined meaning.",
        ),
        ChatMessage::user("🎉✈️🌍🏡💼😄"),
        ChatMessage::assistant("I got a new job and I'm moving abroad!"),
        ChatMessage::user("😫📚💻⏰😵‍💫☕"),
        ChatMessage::assistant("I feel tired and stressed with school work."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let message = ChatMessage::assistant("😄🌟✨");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "😄🌟✨");
    }

    #[test]
    fn test_forward_examples_start_with_system_prompt() {
        let examples = forward_examples();
        assert_eq!(examples[0].role, Role::System);
        assert!(examples.len() > 1);
    }

    #[test]
    fn test_examples_alternate_user_assistant() {
        for examples in [forward_examples(), reverse_examples()] {
            for pair in examples[1..].chunks(2) {
                assert_eq!(pair[0].role, Role::User);
                assert_eq!(pair[1].role, Role::Assistant);
            }
        }
    }
}
