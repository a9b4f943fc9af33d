//! Merging rendered segments into one timeline.

use rand::seq::SliceRandom;
use std::path::PathBuf;
use std::sync::Arc;
use storyreel_core::{Segment, TransitionEdge, TransitionKind, TransitionPlan};
use storyreel_error::{AssemblyError, AssemblyStage, StoryreelResult};
use storyreel_interface::{MergeSpec, RenderEngine};
use storyreel_storage::RunWorkspace;
use tracing::{debug, info, instrument};

/// Picks the transition for each edge of the timeline.
pub trait TransitionChooser: Send + Sync {
    /// Transition between segment `edge` and `edge + 1`.
    fn choose(&self, edge: usize) -> TransitionKind;
}

/// Uniform random choice from a set of kinds.
#[derive(Debug, Clone)]
pub struct RandomTransitions {
    kinds: Vec<TransitionKind>,
}

impl RandomTransitions {
    /// Chooser over `kinds`; an empty set falls back to the defaults.
    pub fn new(kinds: Vec<TransitionKind>) -> Self {
        let kinds = if kinds.is_empty() {
            TransitionKind::DEFAULT_SET.to_vec()
        } else {
            kinds
        };
        Self { kinds }
    }
}

impl Default for RandomTransitions {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TransitionChooser for RandomTransitions {
    fn choose(&self, _edge: usize) -> TransitionKind {
        self.kinds
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(TransitionKind::Crossfade)
    }
}

/// The same transition on every edge.
#[derive(Debug, Clone, Copy)]
pub struct FixedTransition(pub TransitionKind);

impl TransitionChooser for FixedTransition {
    fn choose(&self, _edge: usize) -> TransitionKind {
        self.0
    }
}

/// Concatenates segments with overlapping transitions.
pub struct SequenceAssembler {
    engine: Arc<dyn RenderEngine>,
    plan: TransitionPlan,
    chooser: Arc<dyn TransitionChooser>,
}

impl SequenceAssembler {
    /// Assembler laying clips out with `plan`.
    pub fn new(
        engine: Arc<dyn RenderEngine>,
        plan: TransitionPlan,
        chooser: Arc<dyn TransitionChooser>,
    ) -> Self {
        Self {
            engine,
            plan,
            chooser,
        }
    }

    /// Merge `segments` into the workspace's merged video.
    ///
    /// Segments must be ordered with contiguous indices starting at zero.
    /// Returns the merged path and the edges used, one per adjacent pair.
    #[instrument(skip_all, fields(segments = segments.len()))]
    pub async fn assemble(
        &self,
        segments: &[Segment],
        workspace: &RunWorkspace,
    ) -> StoryreelResult<(PathBuf, Vec<TransitionEdge>)> {
        if segments.is_empty() {
            return Err(AssemblyError::new(AssemblyStage::Merge, "no segments to merge").into());
        }
        if let Some((position, segment)) = segments
            .iter()
            .enumerate()
            .find(|(i, segment)| segment.index() != i)
        {
            return Err(AssemblyError::new(
                AssemblyStage::Merge,
                format!(
                    "segment at position {} has index {}",
                    position,
                    segment.index()
                ),
            )
            .into());
        }

        let edges = self
            .plan
            .edges(segments.len(), |edge| self.chooser.choose(edge));
        for edge in &edges {
            debug!(from = edge.from_index, kind = %edge.kind, offset = edge.offset, "Transition");
        }

        let output = workspace.merged_path();
        let spec = MergeSpec::new(
            segments.iter().map(|s| s.clip_path().clone()).collect(),
            self.plan.segment(),
            edges.clone(),
            output.clone(),
        );
        self.engine.merge_clips(&spec).await?;
        workspace.require(&output).await?;

        info!(
            duration = self.plan.total_duration(segments.len()),
            "Merged segments"
        );
        Ok((output, edges))
    }
}
