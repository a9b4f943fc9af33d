//! OpenAI API data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyreel_core::WordTiming;

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatMessage {
    /// Message role
    role: ChatRole,
    /// Message content
    content: String,
}

impl ChatMessage {
    /// Creates a new builder for `ChatMessage`.
    pub fn builder() -> ChatMessageBuilder {
        ChatMessageBuilder::default()
    }
}

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation
    messages: Vec<ChatMessage>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl ChatCompletionRequest {
    /// Creates a new builder for `ChatCompletionRequest`.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatChoice {
    /// Generated message
    message: ChatMessage,
}

/// Response of `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatCompletionResponse {
    /// Completion choices
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    /// Content of the first choice.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// A word with timestamps from `verbose_json` transcription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct TranscriptionWord {
    /// Transcribed word
    word: String,
    /// Start in seconds
    start: f64,
    /// End in seconds
    end: f64,
}

impl From<TranscriptionWord> for WordTiming {
    fn from(w: TranscriptionWord) -> Self {
        WordTiming::new(w.word, w.start, w.end)
    }
}

/// Response of `POST /audio/transcriptions` with word granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct TranscriptionResponse {
    /// Full transcript
    #[serde(default)]
    text: String,
    /// Audio duration in seconds
    #[serde(default)]
    duration: Option<f64>,
    /// Word timings
    #[serde(default)]
    words: Vec<TranscriptionWord>,
}

impl TranscriptionResponse {
    /// Consume the response into word timings.
    pub fn into_word_timings(self) -> Vec<WordTiming> {
        self.words.into_iter().map(WordTiming::from).collect()
    }
}
