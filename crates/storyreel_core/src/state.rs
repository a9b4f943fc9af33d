//! Orchestrator state machine and the result of a finished run.

use crate::{
    CaptionGroup, NarrationTrack, RunRequest, SceneImage, Script, Segment, TransitionEdge,
    VoiceSpec,
};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use storyreel_error::ErrorReport;

/// Where a run currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineState {
    /// Not started
    #[default]
    Idle,
    /// Generating narration and scene scripts
    ScriptPhase,
    /// Synthesizing narration and rendering scene clips
    GenerationPhase,
    /// Merging, captioning and mixing
    AssemblyPhase,
    /// Finished successfully
    Done {
        /// Final artifact
        final_path: PathBuf,
    },
    /// Finished with an error
    Failed {
        /// What went wrong
        report: ErrorReport,
    },
}

impl PipelineState {
    /// True for `Done` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Failed { .. })
    }

    /// Short state name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ScriptPhase => "script_phase",
            Self::GenerationPhase => "generation_phase",
            Self::AssemblyPhase => "assembly_phase",
            Self::Done { .. } => "done",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Everything a successful run produced.
#[derive(Debug, Clone, Serialize, Getters, derive_new::new)]
pub struct PipelineRun {
    /// The request that was served
    request: RunRequest,
    /// Spoken script
    narration_script: Script,
    /// Visual script
    scene_script: Script,
    /// Voice used for narration
    voice: VoiceSpec,
    /// Concatenated narration
    narration: NarrationTrack,
    /// Scene images by index
    images: Vec<SceneImage>,
    /// Rendered clips by index
    segments: Vec<Segment>,
    /// Transitions between clips
    transitions: Vec<TransitionEdge>,
    /// Caption events burned into the video
    captions: Vec<CaptionGroup>,
    /// Clips merged with transitions, no audio
    merged_path: PathBuf,
    /// Merged video with captions and narration
    captioned_path: PathBuf,
    /// Deliverable: the captioned video, or the soundtrack mix when requested
    final_path: PathBuf,
    /// Wall-clock time of the run
    elapsed: Duration,
}
