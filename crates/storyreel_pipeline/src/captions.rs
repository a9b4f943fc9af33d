//! Word-level caption synchronization.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use storyreel_core::{
    AspectRatio, CaptionGroup, CaptionRule, NarrationTrack, group_captions, normalize_timings,
};
use storyreel_error::{AssemblyError, AssemblyStage, StoryreelError, StoryreelResult};
use storyreel_interface::{CaptionEvent, CaptionSpec, RenderEngine, Transcriber};
use storyreel_storage::RunWorkspace;
use tracing::{info, instrument};

/// Transcribes the narration and burns timed captions into the video.
pub struct CaptionSynchronizer {
    transcriber: Arc<dyn Transcriber>,
    engine: Arc<dyn RenderEngine>,
    rule: CaptionRule,
    tolerance: f64,
}

impl CaptionSynchronizer {
    /// Synchronizer grouping words by `rule`.
    ///
    /// `tolerance` is how far, in seconds, a transcript may overrun the
    /// narration before it is reported.
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        engine: Arc<dyn RenderEngine>,
        rule: CaptionRule,
        tolerance: f64,
    ) -> Self {
        Self {
            transcriber,
            engine,
            rule,
            tolerance,
        }
    }

    /// Caption `merged` with the words of `narration` and attach the track.
    #[instrument(skip_all, fields(narration_seconds = narration.duration()))]
    pub async fn synchronize(
        &self,
        merged: &Path,
        narration: &NarrationTrack,
        aspect_ratio: AspectRatio,
        workspace: &RunWorkspace,
    ) -> StoryreelResult<(PathBuf, Vec<CaptionGroup>)> {
        let words = self.transcriber.transcribe(narration.path()).await?;
        let words = normalize_timings(words, narration.duration(), self.tolerance);
        let groups = group_captions(&words, &self.rule);

        let events: Vec<CaptionEvent> = groups
            .iter()
            .map(|group| CaptionEvent {
                start: group.start(),
                end: group.end(),
                text: group.text(),
            })
            .collect();

        let (width, height) = aspect_ratio.dimensions();
        let output = workspace.captioned_path();
        let spec = CaptionSpec::builder()
            .video(merged.to_path_buf())
            .audio(narration.path().to_path_buf())
            .events(events)
            .width(width)
            .height(height)
            .output(output.clone())
            .build()
            .map_err(|e| {
                StoryreelError::from(AssemblyError::new(AssemblyStage::Caption, e.to_string()))
            })?;

        self.engine.burn_captions(&spec).await?;
        workspace.require(&output).await?;
        info!(words = words.len(), captions = groups.len(), "Captions burned in");
        Ok((output, groups))
    }
}
