//! Caller-supplied run parameters.

use crate::{AspectRatio, Style, VideoDuration, preset_voice};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storyreel_error::{StoryreelResult, ValidationError, ValidationErrorKind};
use tracing::{debug, instrument};

/// Identifier of an installed background track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
pub struct SoundtrackId(String);

impl SoundtrackId {
    /// Wrap a track id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Which voice to narrate with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum VoiceChoice {
    /// A catalogue voice by name
    Preset(String),
    /// Clone a voice from the given samples for this run only
    Clone {
        /// Display name for the clone
        name: String,
        /// Audio samples to clone from
        samples: Vec<PathBuf>,
    },
}

impl Default for VoiceChoice {
    fn default() -> Self {
        Self::Preset("brian".to_string())
    }
}

/// A request for one video.
///
/// # Examples
///
/// ```
/// use storyreel_core::{AspectRatio, RunRequest, Style, VideoDuration, VoiceChoice};
///
/// let request = RunRequest::builder()
///     .topic("a lighthouse keeper who befriends a whale")
///     .duration(VideoDuration::Short)
///     .aspect_ratio(AspectRatio::Portrait)
///     .style(Style::Anime)
///     .voice(VoiceChoice::Preset("aria".to_string()))
///     .build()
///     .unwrap();
/// assert!(request.validate(120).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct RunRequest {
    /// What the story is about
    topic: String,
    /// Target length
    duration: VideoDuration,
    /// Output frame shape
    aspect_ratio: AspectRatio,
    /// Illustration style
    style: Style,
    /// Narration voice
    #[builder(default)]
    voice: VoiceChoice,
    /// Optional background track
    #[builder(default)]
    soundtrack: Option<SoundtrackId>,
}

impl RunRequest {
    /// Creates a new builder for `RunRequest`.
    pub fn builder() -> RunRequestBuilder {
        RunRequestBuilder::default()
    }

    /// Reject requests the pipeline cannot serve.
    ///
    /// Duration, aspect ratio and style are already typed. This checks the
    /// topic, the voice choice and the soundtrack id. WAV samples longer than
    /// `max_sample_seconds` are rejected.
    #[instrument(skip(self), fields(topic = %self.topic))]
    pub fn validate(&self, max_sample_seconds: u32) -> StoryreelResult<()> {
        if self.topic.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyTopic).into());
        }

        match &self.voice {
            VoiceChoice::Preset(name) => {
                if preset_voice(name).is_none() {
                    return Err(ValidationError::new(ValidationErrorKind::Voice(name.clone())).into());
                }
            }
            VoiceChoice::Clone { name, samples } => {
                if name.trim().is_empty() || samples.is_empty() {
                    return Err(ValidationError::new(ValidationErrorKind::Voice(format!(
                        "clone '{}' needs a name and at least one sample",
                        name
                    )))
                    .into());
                }
                for sample in samples {
                    check_sample(sample, max_sample_seconds)?;
                }
            }
        }

        if self
            .soundtrack
            .as_ref()
            .is_some_and(|track| track.as_str().trim().is_empty())
        {
            return Err(ValidationError::new(ValidationErrorKind::Soundtrack(
                "empty soundtrack id".to_string(),
            ))
            .into());
        }

        debug!("Request validated");
        Ok(())
    }
}

fn check_sample(path: &Path, max_seconds: u32) -> StoryreelResult<()> {
    let meta = std::fs::metadata(path).map_err(|e| {
        ValidationError::new(ValidationErrorKind::SampleFile(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    if !meta.is_file() || meta.len() == 0 {
        return Err(ValidationError::new(ValidationErrorKind::SampleFile(format!(
            "{}: not a non-empty file",
            path.display()
        )))
        .into());
    }

    let is_wav = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));
    if is_wav {
        let reader = hound::WavReader::open(path).map_err(|e| {
            ValidationError::new(ValidationErrorKind::SampleFile(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        let spec = reader.spec();
        let seconds = reader.duration() as f64 / spec.sample_rate.max(1) as f64;
        if seconds > max_seconds as f64 {
            return Err(ValidationError::new(ValidationErrorKind::SampleTooLong {
                path: path.display().to_string(),
                seconds: seconds.into(),
                max_seconds,
            })
            .into());
        }
    }
    Ok(())
}
