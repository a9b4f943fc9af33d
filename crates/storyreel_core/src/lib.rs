//! Core data model for the storyreel pipeline.
//!
//! This crate holds the types every stage agrees on: request parameters and
//! their validation, the static style and voice tables, scripts, audio
//! segments, generation jobs, segments and transitions, word timings and
//! caption grouping, and the pipeline state machine.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aspect;
mod audio;
mod caption;
mod content_style;
mod duration;
mod job;
mod request;
mod script;
mod segment;
mod state;
mod style;
mod transition;
mod voice;

pub use aspect::AspectRatio;
pub use audio::{AudioSegment, NarrationTrack};
pub use caption::{CaptionGroup, CaptionRule, WordTiming, group_captions, normalize_timings};
pub use content_style::ContentStyle;
pub use duration::VideoDuration;
pub use job::{GenerationJob, JobState, JobStatus};
pub use request::{RunRequest, RunRequestBuilder, SoundtrackId, VoiceChoice};
pub use script::{Script, ScriptKind, SentenceParser};
pub use segment::{SceneImage, Segment};
pub use state::{PipelineRun, PipelineState};
pub use style::{Style, StyleProfile};
pub use transition::{TransitionEdge, TransitionKind, TransitionPlan};
pub use voice::{PresetVoice, VoiceSpec, preset_names, preset_voice};
