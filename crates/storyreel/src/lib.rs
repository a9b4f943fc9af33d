//! Storyreel - narrated short videos from a one-line topic.
//!
//! A run turns a topic into two scripts, narrates one with a preset or
//! cloned voice, illustrates the other scene by scene, and assembles the
//! result into a captioned video with optional background music.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use storyreel::{Orchestrator, RunRequest, StoryreelConfig, default_backends};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoryreelConfig::load()?;
//!     let orchestrator = Orchestrator::new(default_backends(&config)?, config)?;
//!
//!     let request = RunRequest::builder()
//!         .topic("a lighthouse keeper who befriends a storm")
//!         .duration(storyreel::VideoDuration::from_seconds(45)?)
//!         .aspect_ratio(storyreel::AspectRatio::Portrait)
//!         .style(storyreel::Style::Anime)
//!         .build()?;
//!
//!     let run = orchestrator.run(request).await?;
//!     println!("{}", run.final_path().display());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `storyreel_error` - Error types
//! - `storyreel_core` - Data model, validation, caption grouping
//! - `storyreel_interface` - Backend traits and request specs
//! - `storyreel_retry` - Retry policies and configuration
//! - `storyreel_storage` - Per-run workspace on disk
//! - `storyreel_models` - OpenAI, ElevenLabs and ModelsLab clients
//! - `storyreel_media` - ffmpeg render engine
//! - `storyreel_pipeline` - Phase orchestration
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod observability;

use std::sync::Arc;

pub use storyreel_core::*;
pub use storyreel_error::*;
pub use storyreel_interface::*;
pub use storyreel_media::{FfmpegEngine, FfmpegSettings};
pub use storyreel_models::{ElevenLabsClient, ModelsLabClient, OpenAiClient};
pub use storyreel_pipeline::*;
pub use storyreel_retry::*;
pub use storyreel_storage::*;

/// Production backends: OpenAI, ElevenLabs, ModelsLab and ffmpeg.
///
/// # Errors
///
/// Returns an error if any API key is missing from the environment.
pub fn default_backends(config: &StoryreelConfig) -> StoryreelResult<Backends> {
    let openai = Arc::new(OpenAiClient::new(&config.openai)?);
    let elevenlabs = Arc::new(ElevenLabsClient::new(&config.elevenlabs)?);
    let engine = FfmpegEngine::new(FfmpegSettings::from_config(
        &config.render,
        &config.captions,
    ));

    Ok(Backends {
        text: openai.clone(),
        voices: elevenlabs.clone(),
        speech: elevenlabs,
        images: Arc::new(ModelsLabClient::new(&config.modelslab)?),
        transcriber: openai,
        engine: Arc::new(engine),
    })
}
