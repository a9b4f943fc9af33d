//! HTTP backends for storyreel.
//!
//! - [`OpenAiClient`]: chat completions for scripts, Whisper for word timings
//! - [`ElevenLabsClient`]: voice cloning and text-to-speech
//! - [`ModelsLabClient`]: two-phase text-to-image
//!
//! Each client makes exactly one HTTP attempt per call. Retry belongs to the
//! pipeline, which decides per operation how often and how long to wait.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod elevenlabs;
mod http;
mod modelslab;
mod openai;

pub use elevenlabs::{
    ElevenLabsClient, SpeechBody, SpeechBodyBuilder, VoiceAddResponse,
};
pub use modelslab::{
    FetchBody, FetchResponse, ModelsLabClient, Text2ImgBody, Text2ImgBodyBuilder,
    Text2ImgResponse,
};
pub use openai::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage, ChatMessageBuilder, ChatRole, OpenAiClient, TranscriptionResponse,
    TranscriptionWord,
};
