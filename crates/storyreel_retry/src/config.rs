//! Configuration structures for the pipeline.
//!
//! This module provides TOML-based configuration. The configuration system supports:
//! - Bundled defaults (include_str! from storyreel.toml)
//! - User overrides (./storyreel.toml or ~/.config/storyreel/storyreel.toml)
//! - Environment overrides (`STORYREEL_RENDER__SEGMENT_SECONDS=8`)

use crate::RetryPolicy;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use storyreel_core::{CaptionRule, TransitionKind, TransitionPlan};
use storyreel_error::{ConfigError, StoryreelError, StoryreelResult};
use tracing::{debug, instrument};

/// Retry policies, one per flaky call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Whole-script regeneration when the sentence count is wrong
    pub script: RetryPolicy,
    /// Image job submission
    pub image_submit: RetryPolicy,
    /// Image job polling
    pub image_poll: RetryPolicy,
    /// Downloading a finished image
    pub image_fetch: RetryPolicy,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            script: RetryPolicy::immediate(5),
            image_submit: RetryPolicy::fixed(3, Duration::from_secs(1)),
            image_poll: RetryPolicy::fixed(7, Duration::from_secs(10)),
            image_fetch: RetryPolicy::fixed(3, Duration::from_secs(1)),
        }
    }
}

/// Segment rendering and assembly constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Length of each scene clip in seconds
    pub segment_seconds: f64,
    /// Length of each transition in seconds
    pub transition_seconds: f64,
    /// Frame rate of the zoom animation
    pub fps: u32,
    /// Frame rate of encoded clips
    pub output_fps: u32,
    /// Zoom increment per frame
    pub zoom_step: f64,
    /// Zoom ceiling
    pub max_zoom: f64,
    /// Relative volume of the background track
    pub soundtrack_volume: f64,
    /// Render worker count; defaults to available parallelism
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    /// ffmpeg executable
    pub ffmpeg_path: PathBuf,
    /// Transitions chosen from between clips
    pub transitions: Vec<TransitionKind>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            segment_seconds: 6.0,
            transition_seconds: 1.0,
            fps: 25,
            output_fps: 30,
            zoom_step: 0.003,
            max_zoom: 1.5,
            soundtrack_volume: 0.04,
            workers: None,
            ffmpeg_path: PathBuf::from("ffmpeg"),
            transitions: TransitionKind::DEFAULT_SET.to_vec(),
        }
    }
}

impl RenderConfig {
    /// Worker count for the render pool.
    pub fn worker_count(&self) -> usize {
        self.workers
            .filter(|n| *n > 0)
            .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
            .unwrap_or(1)
    }

    /// Timeline arithmetic for these durations.
    pub fn transition_plan(&self) -> StoryreelResult<TransitionPlan> {
        TransitionPlan::new(self.segment_seconds, self.transition_seconds)
    }
}

/// Caption grouping and styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionConfig {
    /// Maximum words per caption
    pub max_words: usize,
    /// Silence that forces a new caption
    pub max_gap_seconds: f64,
    /// Allowed transcript overrun past the narration end
    pub timing_tolerance_seconds: f64,
    /// Caption font
    pub font: String,
    /// Caption font size
    pub font_size: u32,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            max_words: 2,
            max_gap_seconds: 0.6,
            timing_tolerance_seconds: 0.25,
            font: "Arial".to_string(),
            font_size: 64,
        }
    }
}

impl CaptionConfig {
    /// Grouping rule.
    pub fn rule(&self) -> CaptionRule {
        CaptionRule {
            max_words: self.max_words,
            max_gap: self.max_gap_seconds,
        }
    }
}

/// Narration synthesis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationConfig {
    /// Sentences synthesized at once
    pub concurrency: usize,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

/// OpenAI endpoints and models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API base URL
    pub base_url: String,
    /// Chat model for scripts
    pub chat_model: String,
    /// Transcription model
    pub transcription_model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            transcription_model: "whisper-1".to_string(),
        }
    }
}

/// ElevenLabs endpoint and synthesis model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevenLabsConfig {
    /// API base URL
    pub base_url: String,
    /// Speech model
    pub model_id: String,
    /// PCM sample rate requested
    pub sample_rate: u32,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io/v1".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            sample_rate: 44_100,
        }
    }
}

/// ModelsLab endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsLabConfig {
    /// API base URL
    pub base_url: String,
}

impl Default for ModelsLabConfig {
    fn default() -> Self {
        Self {
            base_url: "https://modelslab.com/api/v6".to_string(),
        }
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root for per-run workspaces
    pub output_dir: PathBuf,
    /// Directory of installed background tracks
    pub soundtrack_dir: PathBuf,
    /// Longest accepted voice sample
    pub max_sample_seconds: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            soundtrack_dir: PathBuf::from("bg_music"),
            max_sample_seconds: 120,
        }
    }
}

/// Top-level storyreel configuration.
///
/// # Example
///
/// ```no_run
/// use storyreel_retry::StoryreelConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryreelConfig::load()?;
/// println!("poll attempts: {}", config.retry.image_poll.max_attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoryreelConfig {
    /// Retry policies
    #[serde(default)]
    pub retry: RetryConfig,
    /// Render constants
    #[serde(default)]
    pub render: RenderConfig,
    /// Caption settings
    #[serde(default)]
    pub captions: CaptionConfig,
    /// Narration settings
    #[serde(default)]
    pub narration: NarrationConfig,
    /// OpenAI settings
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// ElevenLabs settings
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,
    /// ModelsLab settings
    #[serde(default)]
    pub modelslab: ModelsLabConfig,
    /// Filesystem locations
    #[serde(default)]
    pub storage: StorageConfig,
}

impl StoryreelConfig {
    /// Load configuration from a specific file path.
    ///
    /// Values missing from the file fall back to the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StoryreelResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                StoryreelError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryreelError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled default.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> StoryreelResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyreel/storyreel.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("storyreel").required(false))
            .add_source(Environment::with_prefix("STORYREEL").separator("__"));

        let config: Self = builder
            .build()
            .map_err(|e| {
                StoryreelError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryreelError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> StoryreelResult<()> {
        for (name, policy) in [
            ("script", &self.retry.script),
            ("image_submit", &self.retry.image_submit),
            ("image_poll", &self.retry.image_poll),
            ("image_fetch", &self.retry.image_fetch),
        ] {
            if policy.max_attempts == 0 {
                return Err(ConfigError::new(format!(
                    "retry.{}.max_attempts must be at least 1",
                    name
                ))
                .into());
            }
        }
        self.render.transition_plan()?;
        if self.render.transitions.is_empty() {
            return Err(ConfigError::new("render.transitions must not be empty").into());
        }
        if self.captions.max_words == 0 {
            return Err(ConfigError::new("captions.max_words must be at least 1").into());
        }
        if self.narration.concurrency == 0 {
            return Err(ConfigError::new("narration.concurrency must be at least 1").into());
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> StoryreelResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            StoryreelError::from(ConfigError::new(format!(
                "Failed to serialize configuration: {}",
                e
            )))
        })
    }
}

// Bundled default configuration
const DEFAULT_CONFIG: &str = include_str!("../../../storyreel.toml");
