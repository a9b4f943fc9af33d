//! ElevenLabs API data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Body of `POST /text-to-speech/{voice_id}`.
///
/// The surrounding sentences let the backend keep prosody continuous
/// across separately synthesized segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct SpeechBody {
    /// Sentence to speak
    text: String,
    /// Synthesis model
    model_id: String,
    /// Everything spoken before this sentence
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_text: Option<String>,
    /// Everything spoken after this sentence
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    next_text: Option<String>,
}

impl SpeechBody {
    /// Creates a new builder for `SpeechBody`.
    pub fn builder() -> SpeechBodyBuilder {
        SpeechBodyBuilder::default()
    }
}

/// Response of `POST /voices/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct VoiceAddResponse {
    /// Id of the new voice
    voice_id: String,
}
