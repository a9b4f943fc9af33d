//! ffmpeg argument builders.

use crate::FfmpegSettings;
use std::path::Path;
use storyreel_core::TransitionEdge;
use storyreel_error::{AssemblyError, AssemblyStage, StoryreelResult};
use storyreel_interface::{CaptionSpec, ClipSpec, MergeSpec, MixSpec, ZoomAnchor};

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Pan expressions keeping `anchor` fixed while zooming.
pub fn anchor_expressions(anchor: ZoomAnchor) -> (&'static str, &'static str) {
    match anchor {
        ZoomAnchor::TopLeft => ("0", "0"),
        ZoomAnchor::TopRight => ("iw-(iw/zoom)", "0"),
        ZoomAnchor::BottomRight => ("iw-(iw/zoom)", "ih-(ih/zoom)"),
        ZoomAnchor::Center => ("iw/2-(iw/zoom/2)", "ih/2-(ih/zoom/2)"),
    }
}

/// Slow zoom filter for a still image.
///
/// # Examples
///
/// ```
/// use storyreel_interface::ZoomAnchor;
/// use storyreel_media::{FfmpegSettings, args::zoom_filter};
///
/// let f = zoom_filter(ZoomAnchor::TopLeft, 6.0, 576, 1024, &FfmpegSettings::default());
/// assert!(f.starts_with("zoompan=z='min(max(zoom,pzoom)+0.003,1.5)':d=150:"));
/// ```
pub fn zoom_filter(
    anchor: ZoomAnchor,
    duration: f64,
    width: u32,
    height: u32,
    settings: &FfmpegSettings,
) -> String {
    let frames = (duration * *settings.fps() as f64).round() as u64;
    let (x, y) = anchor_expressions(anchor);
    format!(
        "zoompan=z='min(max(zoom,pzoom)+{},{})':d={}:x='{}':y='{}':s={}x{}:fps={},format=yuv420p",
        settings.zoom_step(),
        settings.max_zoom(),
        frames,
        x,
        y,
        width,
        height,
        settings.fps()
    )
}

/// Arguments rendering one still into a motion clip.
pub fn clip_args(spec: &ClipSpec, settings: &FfmpegSettings) -> Vec<String> {
    let filter = zoom_filter(
        *spec.anchor(),
        *spec.duration(),
        *spec.width(),
        *spec.height(),
        settings,
    );
    vec![
        "-y".into(),
        "-loop".into(),
        "1".into(),
        "-i".into(),
        path_arg(spec.image()),
        "-vf".into(),
        filter,
        "-t".into(),
        format!("{}", spec.duration()),
        "-c:v".into(),
        "libx264".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-r".into(),
        settings.output_fps().to_string(),
        path_arg(spec.output()),
    ]
}

/// xfade chain over inputs `0..=edges.len()`.
///
/// Returns the filter graph and the label of its final output.
pub fn xfade_graph(edges: &[TransitionEdge]) -> (String, String) {
    let mut filters = Vec::with_capacity(edges.len());
    let mut previous = "[0:v]".to_string();
    for (i, edge) in edges.iter().enumerate() {
        let out = format!("[v{}]", i + 1);
        filters.push(format!(
            "{}[{}:v]xfade=transition={}:duration={:.3}:offset={:.3},format=yuv420p{}",
            previous,
            i + 1,
            edge.kind.effect_name(),
            edge.duration,
            edge.offset,
            out
        ));
        previous = out;
    }
    (filters.join(";"), previous)
}

/// Arguments concatenating clips with transitions.
///
/// A single clip is copied through unchanged.
pub fn merge_args(spec: &MergeSpec, settings: &FfmpegSettings) -> StoryreelResult<Vec<String>> {
    let clips = spec.clips();
    if clips.is_empty() {
        return Err(AssemblyError::new(AssemblyStage::Merge, "no clips to merge").into());
    }
    if spec.edges().len() != clips.len() - 1 {
        return Err(AssemblyError::new(
            AssemblyStage::Merge,
            format!(
                "{} clips need {} transitions, got {}",
                clips.len(),
                clips.len() - 1,
                spec.edges().len()
            ),
        )
        .into());
    }

    let mut args: Vec<String> = vec!["-y".into()];
    if clips.len() == 1 {
        args.extend([
            "-i".into(),
            path_arg(&clips[0]),
            "-c".into(),
            "copy".into(),
            path_arg(spec.output()),
        ]);
        return Ok(args);
    }

    for clip in clips {
        args.push("-i".into());
        args.push(path_arg(clip));
    }
    let (graph, last) = xfade_graph(spec.edges());
    args.extend([
        "-filter_complex".into(),
        graph,
        "-map".into(),
        last,
        "-c:v".into(),
        "libx264".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-r".into(),
        settings.output_fps().to_string(),
        path_arg(spec.output()),
    ]);
    Ok(args)
}

/// Escape a path for use inside a filter argument.
pub fn escape_filter_path(path: &Path) -> String {
    path_arg(path)
        .replace('\\', "/")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}

/// Arguments burning subtitles and attaching narration.
///
/// The narration is not looped and the output is not cut to the shorter
/// stream; both inputs already span the same timeline.
pub fn caption_args(spec: &CaptionSpec, subtitles: &Path, settings: &FfmpegSettings) -> Vec<String> {
    vec![
        "-y".into(),
        "-i".into(),
        path_arg(spec.video()),
        "-i".into(),
        path_arg(spec.audio()),
        "-vf".into(),
        format!("ass={}", escape_filter_path(subtitles)),
        "-c:v".into(),
        "libx264".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-r".into(),
        settings.output_fps().to_string(),
        "-c:a".into(),
        "aac".into(),
        "-b:a".into(),
        "192k".into(),
        "-map".into(),
        "0:v:0".into(),
        "-map".into(),
        "1:a:0".into(),
        path_arg(spec.output()),
    ]
}

/// Audio graph looping the track under the existing audio.
pub fn mix_graph(volume: f64) -> String {
    format!(
        "[1:a]aloop=loop=-1:size=2e+09,volume={}[a1];[0:a]volume=1.0[a0];[a0][a1]amix=inputs=2:duration=first:normalize=0[aout]",
        volume
    )
}

/// Arguments mixing a background track, copying the video stream.
pub fn mix_args(spec: &MixSpec) -> Vec<String> {
    vec![
        "-y".into(),
        "-i".into(),
        path_arg(spec.video()),
        "-i".into(),
        path_arg(spec.track()),
        "-filter_complex".into(),
        mix_graph(*spec.volume()),
        "-map".into(),
        "0:v".into(),
        "-map".into(),
        "[aout]".into(),
        "-c:v".into(),
        "copy".into(),
        "-c:a".into(),
        "aac".into(),
        "-b:a".into(),
        "192k".into(),
        path_arg(spec.output()),
    ]
}
