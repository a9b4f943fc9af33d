//! Parallel clip rendering.

use futures::{StreamExt, stream};
use rand::seq::SliceRandom;
use std::path::PathBuf;
use std::sync::Arc;
use storyreel_core::{AspectRatio, SceneImage, Segment};
use storyreel_error::{AssemblyError, AssemblyStage, StoryreelError, StoryreelResult};
use storyreel_interface::{ClipSpec, RenderEngine, ZoomAnchor};
use storyreel_storage::RunWorkspace;
use tracing::{debug, info, instrument};

// Center is never picked at random.
const ANCHORS: [ZoomAnchor; 3] = [
    ZoomAnchor::TopLeft,
    ZoomAnchor::TopRight,
    ZoomAnchor::BottomRight,
];

fn random_anchor() -> ZoomAnchor {
    ANCHORS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(ZoomAnchor::TopLeft)
}

/// Renders every scene image into a fixed-length motion clip.
pub struct SegmentRenderer {
    engine: Arc<dyn RenderEngine>,
    segment_seconds: f64,
    workers: usize,
}

impl SegmentRenderer {
    /// Renderer running at most `workers` clips at once.
    pub fn new(engine: Arc<dyn RenderEngine>, segment_seconds: f64, workers: usize) -> Self {
        Self {
            engine,
            segment_seconds,
            workers: workers.max(1),
        }
    }

    /// Render one clip per image.
    ///
    /// Clips finish in any order and land in the slot of their scene index.
    /// A failed render or an unfilled slot fails the stage.
    #[instrument(skip_all, fields(images = images.len(), workers = self.workers))]
    pub async fn render_all(
        &self,
        images: &[SceneImage],
        aspect_ratio: AspectRatio,
        workspace: &RunWorkspace,
    ) -> StoryreelResult<Vec<Segment>> {
        let (width, height) = aspect_ratio.dimensions();
        let specs = images
            .iter()
            .map(|image| {
                let output = workspace.clip_path(*image.index());
                self.clip_spec(image, output, width, height)
                    .map(|spec| (*image.index(), spec))
            })
            .collect::<StoryreelResult<Vec<_>>>()?;

        let mut slots: Vec<Option<Segment>> = vec![None; images.len()];
        let mut rendered = stream::iter(specs.into_iter().map(|(index, spec)| {
            let engine = self.engine.clone();
            async move {
                engine.render_clip(&spec).await?;
                Ok::<_, StoryreelError>(Segment::new(
                    index,
                    spec.image().clone(),
                    spec.output().clone(),
                    *spec.duration(),
                ))
            }
        }))
        .buffer_unordered(self.workers);

        while let Some(result) = rendered.next().await {
            let segment = result?;
            let index = *segment.index();
            debug!(index, "Clip rendered");
            match slots.get_mut(index) {
                Some(slot) => *slot = Some(segment),
                None => {
                    return Err(AssemblyError::new(
                        AssemblyStage::Render,
                        format!("scene index {} outside 0..{}", index, images.len()),
                    )
                    .into());
                }
            }
        }

        let segments = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| {
                    StoryreelError::from(AssemblyError::new(
                        AssemblyStage::Render,
                        format!("segment {} missing", i),
                    ))
                })
            })
            .collect::<StoryreelResult<Vec<_>>>()?;
        info!(segments = segments.len(), "Rendered all segments");
        Ok(segments)
    }

    fn clip_spec(
        &self,
        image: &SceneImage,
        output: PathBuf,
        width: u32,
        height: u32,
    ) -> StoryreelResult<ClipSpec> {
        ClipSpec::builder()
            .image(image.path().clone())
            .output(output)
            .duration(self.segment_seconds)
            .width(width)
            .height(height)
            .anchor(random_anchor())
            .build()
            .map_err(|e| StoryreelError::from(AssemblyError::new(AssemblyStage::Render, e.to_string())))
    }
}
