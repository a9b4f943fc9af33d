//! [`RenderEngine`] backed by the ffmpeg command line.

use crate::args::{caption_args, clip_args, merge_args, mix_args};
use crate::process::run_ffmpeg;
use crate::{FfmpegSettings, render_ass};
use async_trait::async_trait;
use storyreel_error::{AssemblyStage, StorageError, StorageErrorKind, StoryreelResult};
use storyreel_interface::{CaptionSpec, ClipSpec, MergeSpec, MixSpec, RenderEngine};
use tracing::{info, instrument};

/// Render engine that shells out to ffmpeg.
#[derive(Debug, Clone, Default)]
pub struct FfmpegEngine {
    settings: FfmpegSettings,
}

impl FfmpegEngine {
    /// Engine with the given settings.
    pub fn new(settings: FfmpegSettings) -> Self {
        Self { settings }
    }

    /// Current settings.
    pub fn settings(&self) -> &FfmpegSettings {
        &self.settings
    }
}

#[async_trait]
impl RenderEngine for FfmpegEngine {
    #[instrument(skip(self, spec), fields(output = %spec.output().display()))]
    async fn render_clip(&self, spec: &ClipSpec) -> StoryreelResult<()> {
        let args = clip_args(spec, &self.settings);
        run_ffmpeg(self.settings.ffmpeg_path(), &args, AssemblyStage::Render, spec.output()).await?;
        info!(anchor = %spec.anchor(), "Rendered clip");
        Ok(())
    }

    #[instrument(skip(self, spec), fields(clips = spec.clips().len(), output = %spec.output().display()))]
    async fn merge_clips(&self, spec: &MergeSpec) -> StoryreelResult<()> {
        let args = merge_args(spec, &self.settings)?;
        run_ffmpeg(self.settings.ffmpeg_path(), &args, AssemblyStage::Merge, spec.output()).await?;
        info!("Merged clips");
        Ok(())
    }

    #[instrument(skip(self, spec), fields(events = spec.events().len(), output = %spec.output().display()))]
    async fn burn_captions(&self, spec: &CaptionSpec) -> StoryreelResult<()> {
        let subtitles = spec.output().with_extension("ass");
        let doc = render_ass(
            spec.events(),
            *spec.width(),
            *spec.height(),
            self.settings.font(),
            *self.settings.font_size(),
        );
        tokio::fs::write(&subtitles, doc).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                subtitles.display(),
                e
            )))
        })?;

        let args = caption_args(spec, &subtitles, &self.settings);
        run_ffmpeg(self.settings.ffmpeg_path(), &args, AssemblyStage::Caption, spec.output()).await?;
        info!(subtitles = %subtitles.display(), "Burned captions");
        Ok(())
    }

    #[instrument(skip(self, spec), fields(track = %spec.track().display()))]
    async fn mix_soundtrack(&self, spec: &MixSpec) -> StoryreelResult<()> {
        let args = mix_args(spec);
        run_ffmpeg(self.settings.ffmpeg_path(), &args, AssemblyStage::Mix, spec.output()).await?;
        info!(volume = *spec.volume(), "Mixed soundtrack");
        Ok(())
    }
}
