//! ElevenLabs voice cloning and text-to-speech.

mod client;
mod dto;

pub use client::ElevenLabsClient;
pub use dto::{SpeechBody, SpeechBodyBuilder, VoiceAddResponse};
