//! Requests sent to backends and specs sent to the rendering engine.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use storyreel_core::TransitionEdge;

/// Text generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct TextRequest {
    /// System message
    system_role: String,
    /// Writing instructions
    instructions: String,
    /// Sentences the caller expects back
    target_sentence_count: usize,
    /// Story topic
    topic: String,
}

impl TextRequest {
    /// Creates a new builder for `TextRequest`.
    pub fn builder() -> TextRequestBuilder {
        TextRequestBuilder::default()
    }

    /// Instructions and topic combined into one user message.
    pub fn user_message(&self) -> String {
        format!("{} Topic: '{}'.", self.instructions, self.topic)
    }
}

/// Speech synthesis request for one sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct SpeechRequest {
    /// Sentence position in the narration script
    index: usize,
    /// Sentence to speak
    text: String,
    /// Backend voice id
    voice_id: String,
    /// Sentences spoken before this one
    #[builder(default)]
    previous_text: Option<String>,
    /// Sentences spoken after this one
    #[builder(default)]
    next_text: Option<String>,
}

impl SpeechRequest {
    /// Creates a new builder for `SpeechRequest`.
    pub fn builder() -> SpeechRequestBuilder {
        SpeechRequestBuilder::default()
    }
}

/// Image generation submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Scene index
    index: usize,
    /// Positive prompt
    prompt: String,
    /// Negative prompt
    negative_prompt: String,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Backend style preset
    #[builder(default)]
    enhance_style: Option<String>,
}

impl ImageRequest {
    /// Creates a new builder for `ImageRequest`.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}

/// Corner the slow zoom drifts toward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum ZoomAnchor {
    /// Upper left
    TopLeft,
    /// Upper right
    TopRight,
    /// Lower right
    BottomRight,
    /// Frame center
    Center,
}

/// Render one still image into a motion clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ClipSpec {
    /// Source image
    image: PathBuf,
    /// Clip to write
    output: PathBuf,
    /// Clip length in seconds
    duration: f64,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Zoom anchor
    #[builder(default = "ZoomAnchor::Center")]
    anchor: ZoomAnchor,
}

impl ClipSpec {
    /// Creates a new builder for `ClipSpec`.
    pub fn builder() -> ClipSpecBuilder {
        ClipSpecBuilder::default()
    }
}

/// Concatenate clips with explicit transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct MergeSpec {
    /// Clips in order
    clips: Vec<PathBuf>,
    /// Length of each clip in seconds
    clip_duration: f64,
    /// One edge per adjacent pair
    edges: Vec<TransitionEdge>,
    /// Merged video to write
    output: PathBuf,
}

/// A timed caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEvent {
    /// Start in seconds
    pub start: f64,
    /// End in seconds
    pub end: f64,
    /// Text shown
    pub text: String,
}

/// Burn captions into a video and attach narration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct CaptionSpec {
    /// Silent merged video
    video: PathBuf,
    /// Narration track to attach
    audio: PathBuf,
    /// Caption events
    events: Vec<CaptionEvent>,
    /// Frame width, for subtitle layout
    width: u32,
    /// Frame height, for subtitle layout
    height: u32,
    /// Captioned video to write
    output: PathBuf,
}

impl CaptionSpec {
    /// Creates a new builder for `CaptionSpec`.
    pub fn builder() -> CaptionSpecBuilder {
        CaptionSpecBuilder::default()
    }
}

/// Mix a looped background track under the existing audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct MixSpec {
    /// Captioned video
    video: PathBuf,
    /// Background track
    track: PathBuf,
    /// Relative volume of the background track
    volume: f64,
    /// Mixed video to write
    output: PathBuf,
}
