//! The translation adapter.
//!
//! Frames user input as a fixed few-shot prompt, issues one chat completion
//! call, and normalizes whatever comes back into a displayable string. Both
//! operations always return a string: expected failures map to documented
//! sentinel values instead of errors.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::config::Config;
use crate::openai::{ApiError, OpenAIClient};
use crate::prompts::{self, ChatMessage};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

// Forward-path sentinels.
pub const EMPTY_INPUT: &str = "❓";
pub const EMPTY_OUTPUT: &str = "😊";
pub const SERVICE_FAILURE: &str = "❌🤖";
pub const UNEXPECTED_FAILURE: &str = "❌";

// Reverse-path sentinels.
pub const REVERSE_EMPTY_INPUT: &str = "No emojis provided";
pub const REVERSE_EMPTY_OUTPUT: &str = "Unable to interpret these emojis";
pub const REVERSE_SERVICE_FAILURE: &str = "Error: Unable to connect to translation service";
pub const REVERSE_UNEXPECTED_FAILURE: &str = "Error: Translation failed";

// Output stays tight for the forward path (a handful of glyphs) and roomier
// but cooler-headed for the reverse path (a short sentence).
const FORWARD_MAX_TOKENS: u32 = 10;
const FORWARD_TEMPERATURE: f32 = 0.5;
const REVERSE_MAX_TOKENS: u32 = 50;
const REVERSE_TEMPERATURE: f32 = 0.7;

/// Failure to assemble a working adapter from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key configured: set OPENAI_API_KEY or add openai_api_key to config.json")]
    MissingApiKey,
}

/// Seam between the adapter and the remote completion service, so tests can
/// substitute a stub for the real endpoint.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ApiError>;
}

#[async_trait]
impl ChatCompletion for OpenAIClient {
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ApiError> {
        OpenAIClient::chat(self, model, messages, max_tokens, temperature).await
    }
}

#[derive(Clone)]
pub struct Translator<C = OpenAIClient> {
    client: C,
    model: String,
}

impl Translator<OpenAIClient> {
    /// Builds an adapter against the real OpenAI endpoint. Fails when no API
    /// key is configured; performs no network I/O.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config.api_key().ok_or(ConfigError::MissingApiKey)?;
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self::with_client(model, OpenAIClient::new(&api_key)))
    }
}

impl<C: ChatCompletion> Translator<C> {
    pub fn with_client(model: impl Into<String>, client: C) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Translates text into a short emoji sequence.
    pub async fn translate(&self, text: &str) -> String {
        let text = text.trim();
        if text.is_empty() {
            return EMPTY_INPUT.to_string();
        }

        let mut messages = prompts::forward_examples();
        messages.push(ChatMessage::user(format!("Translate this to emoji: {text}")));

        match self
            .client
            .chat(&self.model, &messages, FORWARD_MAX_TOKENS, FORWARD_TEMPERATURE)
            .await
        {
            Ok(reply) => {
                let reply = reply.trim();
                if reply.is_empty() {
                    EMPTY_OUTPUT.to_string()
                } else {
                    reply.to_string()
                }
            }
            Err(err) => {
                warn!(input = truncate(text, 40), error = %err, "forward translation failed");
                if err.is_service_failure() {
                    SERVICE_FAILURE.to_string()
                } else {
                    UNEXPECTED_FAILURE.to_string()
                }
            }
        }
    }

    /// Interprets an emoji sequence as descriptive text.
    pub async fn translate_reverse(&self, emojis: &str) -> String {
        let emojis = emojis.trim();
        if emojis.is_empty() {
            return REVERSE_EMPTY_INPUT.to_string();
        }

        let mut messages = prompts::reverse_examples();
        messages.push(ChatMessage::user(format!("Interpret these emojis: {emojis}")));

        match self
            .client
            .chat(&self.model, &messages, REVERSE_MAX_TOKENS, REVERSE_TEMPERATURE)
            .await
        {
            Ok(reply) => {
                let reply = reply.trim();
                if reply.is_empty() {
                    REVERSE_EMPTY_OUTPUT.to_string()
                } else {
                    reply.to_string()
                }
            }
            Err(err) => {
                warn!(input = truncate(emojis, 40), error = %err, "reverse translation failed");
                if err.is_service_failure() {
                    REVERSE_SERVICE_FAILURE.to_string()
                } else {
                    REVERSE_UNEXPECTED_FAILURE.to_string()
                }
            }
        }
    }
}

/// Truncate on a char boundary for log output.
fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::Role;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy)]
    enum Reply {
        Text(&'static str),
        ServiceFailure,
        UnexpectedFailure,
    }

    #[derive(Clone)]
    struct StubClient {
        reply: Reply,
        calls: Arc<AtomicUsize>,
        last_messages: Arc<Mutex<Vec<ChatMessage>>>,
    }

    impl StubClient {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: Arc::new(AtomicUsize::new(0)),
                last_messages: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_messages(&self) -> Vec<ChatMessage> {
            self.last_messages.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatCompletion for StubClient {
        async fn chat(
            &self,
            _model: &str,
            messages: &[ChatMessage],
            _max_tokens: u32,
            _temperature: f32,
        ) -> Result<String, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_messages.lock().unwrap() = messages.to_vec();
            match self.reply {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::ServiceFailure => Err(ApiError::Status {
                    status: reqwest::StatusCode::TOO_MANY_REQUESTS,
                    body: "rate limited".to_string(),
                }),
                Reply::UnexpectedFailure => Err(ApiError::Decode(
                    serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
                )),
            }
        }
    }

    fn translator(reply: Reply) -> (Translator<StubClient>, StubClient) {
        let stub = StubClient::new(reply);
        (Translator::with_client(DEFAULT_MODEL, stub.clone()), stub)
    }

    #[tokio::test]
    async fn test_translate_empty_input_skips_network() {
        let (translator, stub) = translator(Reply::Text("😊✨"));
        assert_eq!(translator.translate("").await, EMPTY_INPUT);
        assert_eq!(translator.translate("   ").await, EMPTY_INPUT);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_translate_reverse_empty_input_skips_network() {
        let (translator, stub) = translator(Reply::Text("I'm happy"));
        assert_eq!(translator.translate_reverse("").await, REVERSE_EMPTY_INPUT);
        assert_eq!(translator.translate_reverse("   ").await, REVERSE_EMPTY_INPUT);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_translate_success() {
        let (translator, stub) = translator(Reply::Text("😊✨"));
        assert_eq!(translator.translate("I'm happy").await, "😊✨");
        assert_eq!(stub.calls(), 1);

        let messages = stub.last_messages();
        let last = messages.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, "Translate this to emoji: I'm happy");
        assert_eq!(messages[0].role, Role::System);
    }

    #[tokio::test]
    async fn test_translate_reverse_success() {
        let (translator, stub) = translator(Reply::Text("I'm feeling happy"));
        assert_eq!(translator.translate_reverse("😊✨").await, "I'm feeling happy");
        assert_eq!(stub.calls(), 1);
        assert_eq!(
            stub.last_messages().last().unwrap().content,
            "Interpret these emojis: 😊✨"
        );
    }

    #[tokio::test]
    async fn test_translate_trims_model_output() {
        let (translator, _) = translator(Reply::Text("  🌮🔥 \n"));
        assert_eq!(translator.translate("spicy tacos").await, "🌮🔥");
    }

    #[tokio::test]
    async fn test_empty_model_output_defaults() {
        let (translator, _) = translator(Reply::Text("   "));
        assert_eq!(translator.translate("I'm happy").await, EMPTY_OUTPUT);
        assert_eq!(
            translator.translate_reverse("😊✨").await,
            REVERSE_EMPTY_OUTPUT
        );
    }

    #[tokio::test]
    async fn test_service_failure_sentinels() {
        let (translator, _) = translator(Reply::ServiceFailure);
        assert_eq!(translator.translate("I'm happy").await, SERVICE_FAILURE);
        assert_eq!(
            translator.translate_reverse("😊✨").await,
            REVERSE_SERVICE_FAILURE
        );
    }

    #[tokio::test]
    async fn test_unexpected_failure_sentinels() {
        let (translator, _) = translator(Reply::UnexpectedFailure);
        assert_eq!(translator.translate("I'm happy").await, UNEXPECTED_FAILURE);
        assert_eq!(
            translator.translate_reverse("😊✨").await,
            REVERSE_UNEXPECTED_FAILURE
        );
    }

    #[tokio::test]
    async fn test_priming_script_not_mutated_between_calls() {
        let (translator, stub) = translator(Reply::Text("😊"));
        let expected = prompts::forward_examples().len() + 1;

        translator.translate("first").await;
        assert_eq!(stub.last_messages().len(), expected);

        translator.translate("second").await;
        assert_eq!(stub.last_messages().len(), expected);
    }

    #[tokio::test]
    async fn test_model_identifier_exposed() {
        let (translator, _) = translator(Reply::Text("😊"));
        assert_eq!(translator.model(), DEFAULT_MODEL);

        let custom = Translator::with_client("gpt-4", StubClient::new(Reply::Text("😊")));
        assert_eq!(custom.model(), "gpt-4");
    }

    #[test]
    fn test_new_fails_without_api_key() {
        std::env::remove_var("OPENAI_API_KEY");
        let config = Config::new();
        assert!(matches!(
            Translator::new(&config),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_new_uses_configured_model() {
        let mut config = Config::new();
        config.openai_api_key = Some("test-key".to_string());

        let translator = Translator::new(&config).unwrap();
        assert_eq!(translator.model(), DEFAULT_MODEL);

        config.model = Some("gpt-4".to_string());
        let translator = Translator::new(&config).unwrap();
        assert_eq!(translator.model(), "gpt-4");
    }

    #[test]
    fn test_repeated_construction_is_independent() {
        let config = Config {
            model: None,
            openai_api_key: Some("test-key".to_string()),
        };
        let first = Translator::new(&config).unwrap();
        let second = Translator::new(&config).unwrap();
        assert_eq!(first.model(), second.model());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("😊✨🌮", 2), "😊✨");
        assert_eq!(truncate("short", 40), "short");
    }
}
