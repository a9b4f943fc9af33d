//! Engine settings.

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use storyreel_retry::{CaptionConfig, RenderConfig};

/// Parameters every ffmpeg invocation shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct FfmpegSettings {
    /// ffmpeg executable
    ffmpeg_path: PathBuf,
    /// Frame rate of the zoom animation
    fps: u32,
    /// Frame rate of encoded output
    output_fps: u32,
    /// Zoom added per frame
    zoom_step: f64,
    /// Zoom ceiling
    max_zoom: f64,
    /// Caption font
    font: String,
    /// Caption font size at native resolution
    font_size: u32,
}

impl FfmpegSettings {
    /// Settings from the render and caption config sections.
    pub fn from_config(render: &RenderConfig, captions: &CaptionConfig) -> Self {
        Self {
            ffmpeg_path: render.ffmpeg_path.clone(),
            fps: render.fps,
            output_fps: render.output_fps,
            zoom_step: render.zoom_step,
            max_zoom: render.max_zoom,
            font: captions.font.clone(),
            font_size: captions.font_size,
        }
    }
}

impl Default for FfmpegSettings {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default(), &CaptionConfig::default())
    }
}
