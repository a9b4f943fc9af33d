//! Trait definitions for the pipeline's external collaborators.
//!
//! Every backend the orchestrator talks to sits behind one of these traits:
//! text generation, voice cloning, speech synthesis, image generation,
//! transcription and the rendering engine. Request and spec types live in
//! [`types`] so that implementations and tests share one vocabulary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
pub mod types;

pub use traits::{
    ImageGenerator, RenderEngine, SpeechSynthesizer, TextGenerator, Transcriber,
    VoiceCloneService,
};
pub use types::{
    CaptionEvent, CaptionSpec, CaptionSpecBuilder, ClipSpec, ClipSpecBuilder, ImageRequest,
    ImageRequestBuilder, MergeSpec, MixSpec, SpeechRequest, SpeechRequestBuilder, TextRequest,
    TextRequestBuilder, ZoomAnchor,
};
