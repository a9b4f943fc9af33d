//! Phase orchestration for the storyreel video pipeline.
//!
//! A run moves through three phases:
//!
//! 1. **Script**: narration and scene scripts, generated concurrently.
//! 2. **Generation**: narration audio on one branch; scene images and their
//!    motion clips on the other.
//! 3. **Assembly**: merge the clips with transitions, burn captions, then
//!    mix the soundtrack.
//!
//! A cloned voice is leased from the start of generation until assembly
//! returns.
//!
//! Every stage is a small component over one or two backend traits, and the
//! [`Orchestrator`] strings them together behind a watchable
//! [`PipelineState`](storyreel_core::PipelineState).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assemble;
mod backends;
mod captions;
mod images;
mod narration;
mod orchestrator;
mod prompts;
mod render;
mod script;
mod soundtrack;
mod voice;

pub use assemble::{FixedTransition, RandomTransitions, SequenceAssembler, TransitionChooser};
pub use backends::Backends;
pub use captions::CaptionSynchronizer;
pub use images::SceneImageGenerator;
pub use narration::NarrationSynthesizer;
pub use orchestrator::Orchestrator;
pub use prompts::{NEGATIVE_PROMPT, scene_prompt};
pub use render::SegmentRenderer;
pub use script::ScriptGenerator;
pub use soundtrack::SoundtrackMixer;
pub use voice::{VoiceLease, VoiceResource};
