//! OpenAI chat completions and audio transcription.

mod client;
mod dto;

pub use client::OpenAiClient;
pub use dto::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage, ChatMessageBuilder, ChatRole, TranscriptionResponse, TranscriptionWord,
};
