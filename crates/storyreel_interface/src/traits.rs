//! Backend traits.

use crate::{CaptionSpec, ClipSpec, ImageRequest, MergeSpec, MixSpec, SpeechRequest, TextRequest};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use storyreel_core::{AudioSegment, JobStatus, WordTiming};
use storyreel_error::StoryreelResult;

/// Free-form text generation.
///
/// Implementations make a single attempt. Callers own retry and parsing.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a request.
    async fn generate(&self, req: &TextRequest) -> StoryreelResult<String>;

    /// Model identifier.
    fn model_name(&self) -> &str;
}

/// Creates and deletes cloned voices.
#[async_trait]
pub trait VoiceCloneService: Send + Sync {
    /// Clone a voice from sample files, returning its backend id.
    async fn create(&self, samples: &[PathBuf], name: &str) -> StoryreelResult<String>;

    /// Delete a previously created voice.
    async fn delete(&self, voice_id: &str) -> StoryreelResult<()>;
}

/// Text-to-speech.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize one sentence.
    ///
    /// A non-success response is a hard failure for the segment.
    async fn synthesize(&self, req: &SpeechRequest) -> StoryreelResult<AudioSegment>;

    /// Sample rate of returned segments.
    fn sample_rate(&self) -> u32;
}

/// Two-phase image generation.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Submit a job and return its id.
    async fn submit(&self, req: &ImageRequest) -> StoryreelResult<String>;

    /// Query a job once.
    async fn poll(&self, job_id: &str) -> StoryreelResult<JobStatus>;

    /// Download a finished image.
    async fn fetch(&self, url: &str) -> StoryreelResult<Vec<u8>>;
}

/// Speech-to-text with word timestamps.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an entire audio file.
    async fn transcribe(&self, audio: &Path) -> StoryreelResult<Vec<WordTiming>>;
}

/// Native media operations, driven by explicit parameters.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    /// Loop a still image into a motion clip.
    async fn render_clip(&self, spec: &ClipSpec) -> StoryreelResult<()>;

    /// Concatenate clips with transitions at explicit offsets.
    async fn merge_clips(&self, spec: &MergeSpec) -> StoryreelResult<()>;

    /// Burn caption events into a video and attach an audio track.
    async fn burn_captions(&self, spec: &CaptionSpec) -> StoryreelResult<()>;

    /// Mix a looped secondary track under the video's audio.
    async fn mix_soundtrack(&self, spec: &MixSpec) -> StoryreelResult<()>;
}
