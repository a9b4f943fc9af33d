//! Run orchestration across the three phases.

use crate::{
    Backends, CaptionSynchronizer, NarrationSynthesizer, RandomTransitions, SceneImageGenerator,
    ScriptGenerator, SegmentRenderer, SequenceAssembler, SoundtrackMixer, TransitionChooser,
    VoiceLease, VoiceResource,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use storyreel_core::{
    CaptionGroup, NarrationTrack, PipelineRun, PipelineState, RunRequest, SceneImage, Script,
    Segment, TransitionEdge, TransitionPlan,
};
use storyreel_error::{AssemblyError, AssemblyStage, ErrorReport, StoryreelError, StoryreelResult};
use storyreel_retry::StoryreelConfig;
use storyreel_storage::{RunWorkspace, SoundtrackLibrary};
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};

/// Drives one request through script, generation and assembly.
///
/// State changes are broadcast through [`subscribe`](Self::subscribe). A
/// run ends in `Done` or `Failed`; nothing is retried at this level.
///
/// # Example
///
/// ```rust,ignore
/// let orchestrator = Orchestrator::new(backends, StoryreelConfig::load()?)?;
/// let run = orchestrator.run(request).await?;
/// println!("{}", run.final_path().display());
/// ```
pub struct Orchestrator {
    config: StoryreelConfig,
    plan: TransitionPlan,
    backends: Backends,
    scripts: ScriptGenerator,
    voices: VoiceResource,
    narration: NarrationSynthesizer,
    images: SceneImageGenerator,
    renderer: SegmentRenderer,
    assembler: SequenceAssembler,
    captions: CaptionSynchronizer,
    mixer: SoundtrackMixer,
    state: watch::Sender<PipelineState>,
}

impl Orchestrator {
    /// Wire every stage to `backends` using `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is inconsistent.
    pub fn new(backends: Backends, config: StoryreelConfig) -> StoryreelResult<Self> {
        config.validate()?;
        let plan = config.render.transition_plan()?;
        let chooser: Arc<dyn TransitionChooser> =
            Arc::new(RandomTransitions::new(config.render.transitions.clone()));

        let (state, _) = watch::channel(PipelineState::Idle);
        Ok(Self {
            plan,
            scripts: ScriptGenerator::new(backends.text.clone(), config.retry.script)?,
            voices: VoiceResource::new(backends.voices.clone()),
            narration: NarrationSynthesizer::new(
                backends.speech.clone(),
                config.narration.concurrency,
            ),
            images: SceneImageGenerator::new(
                backends.images.clone(),
                config.retry.image_submit,
                config.retry.image_poll,
                config.retry.image_fetch,
            ),
            renderer: SegmentRenderer::new(
                backends.engine.clone(),
                plan.segment(),
                config.render.worker_count(),
            ),
            assembler: SequenceAssembler::new(backends.engine.clone(), plan, chooser),
            captions: CaptionSynchronizer::new(
                backends.transcriber.clone(),
                backends.engine.clone(),
                config.captions.rule(),
                config.captions.timing_tolerance_seconds,
            ),
            mixer: SoundtrackMixer::new(
                backends.engine.clone(),
                SoundtrackLibrary::new(config.storage.soundtrack_dir.clone()),
                config.render.soundtrack_volume,
            ),
            backends,
            config,
            state,
        })
    }

    /// Replace the transition chooser.
    pub fn with_transitions(mut self, chooser: Arc<dyn TransitionChooser>) -> Self {
        self.assembler = SequenceAssembler::new(self.backends.engine.clone(), self.plan, chooser);
        self
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn state(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    /// Wait for cloned-voice deletions left behind by an abandoned run.
    pub async fn settle(&self) {
        self.voices.settle().await;
    }

    /// Effective configuration.
    pub fn config(&self) -> &StoryreelConfig {
        &self.config
    }

    fn enter(&self, next: PipelineState) {
        let previous = self.state.send_replace(next.clone());
        info!(from = previous.name(), to = next.name(), "Pipeline state changed");
    }

    /// Run a request to completion.
    ///
    /// On failure the state becomes `Failed` with a report of the error, and
    /// the same error is returned. A cloned voice is released once the run
    /// leaves the generation and assembly phases, whatever the outcome.
    /// Dropping the returned future mid-run still releases it, from the
    /// lease's destructor, and moves the state to `Failed` as cancelled.
    #[instrument(skip_all, fields(topic = %request.topic(), duration = %request.duration()))]
    pub async fn run(&self, request: RunRequest) -> StoryreelResult<PipelineRun> {
        let started = Instant::now();
        let mut guard = CancelGuard {
            state: &self.state,
            armed: true,
        };
        let outcome = self.execute(request, started).await;
        guard.armed = false;
        match outcome {
            Ok(run) => {
                info!(
                    path = %run.final_path().display(),
                    elapsed_ms = run.elapsed().as_millis() as u64,
                    "Run finished"
                );
                self.enter(PipelineState::Done {
                    final_path: run.final_path().clone(),
                });
                Ok(run)
            }
            Err(e) => {
                let report = e.report();
                error!(kind = %report.kind, message = %report.message, "Run failed");
                self.enter(PipelineState::Failed { report });
                Err(e)
            }
        }
    }

    async fn execute(&self, request: RunRequest, started: Instant) -> StoryreelResult<PipelineRun> {
        request.validate(self.config.storage.max_sample_seconds)?;
        if let Some(id) = request.soundtrack() {
            self.mixer.library().resolve(id).await?;
        }
        let workspace = RunWorkspace::create(&self.config.storage.output_dir).await?;

        self.enter(PipelineState::ScriptPhase);
        let phase = Instant::now();
        let (narration_script, scene_script) = self
            .scripts
            .generate(request.topic(), *request.duration())
            .await?;
        workspace
            .write_json(&workspace.scripts_path(), &[&narration_script, &scene_script])
            .await?;
        info!(elapsed_ms = phase.elapsed().as_millis() as u64, "Script phase complete");

        self.enter(PipelineState::GenerationPhase);
        let lease = self.voices.acquire(request.voice()).await?;
        let produced = self
            .produce(&request, &narration_script, &scene_script, &lease, &workspace)
            .await;
        lease.release().await;
        let artifacts = produced?;

        Ok(PipelineRun::new(
            request,
            narration_script,
            scene_script,
            lease.spec().clone(),
            artifacts.narration,
            artifacts.images,
            artifacts.segments,
            artifacts.transitions,
            artifacts.captions,
            artifacts.merged_path,
            artifacts.captioned_path,
            artifacts.final_path,
            started.elapsed(),
        ))
    }

    /// Everything that needs the leased voice: generation, then assembly.
    async fn produce(
        &self,
        request: &RunRequest,
        narration_script: &Script,
        scene_script: &Script,
        lease: &VoiceLease,
        workspace: &RunWorkspace,
    ) -> StoryreelResult<Artifacts> {
        let phase = Instant::now();
        let aspect_ratio = *request.aspect_ratio();
        let visuals = async {
            let images = self
                .images
                .generate_all(scene_script, *request.style(), aspect_ratio, workspace)
                .await?;
            let segments = self
                .renderer
                .render_all(&images, aspect_ratio, workspace)
                .await?;
            Ok::<_, StoryreelError>((images, segments))
        };
        let (narration, (images, segments)) = tokio::try_join!(
            self.narration
                .synthesize(narration_script, lease.spec(), workspace),
            visuals,
        )?;
        if segments.len() != scene_script.len() || images.len() != scene_script.len() {
            return Err(AssemblyError::new(
                AssemblyStage::Render,
                format!(
                    "{} scenes produced {} images and {} segments",
                    scene_script.len(),
                    images.len(),
                    segments.len()
                ),
            )
            .into());
        }
        info!(
            elapsed_ms = phase.elapsed().as_millis() as u64,
            narration_seconds = narration.duration(),
            segments = segments.len(),
            "Generation phase complete"
        );

        self.enter(PipelineState::AssemblyPhase);
        let phase = Instant::now();
        let (merged_path, transitions) = self.assembler.assemble(&segments, workspace).await?;
        let (captioned_path, captions) = self
            .captions
            .synchronize(&merged_path, &narration, aspect_ratio, workspace)
            .await?;
        let final_path = self
            .mixer
            .mix(&captioned_path, request.soundtrack().as_ref(), workspace)
            .await?;
        info!(elapsed_ms = phase.elapsed().as_millis() as u64, "Assembly phase complete");

        Ok(Artifacts {
            narration,
            images,
            segments,
            transitions,
            captions,
            merged_path,
            captioned_path,
            final_path,
        })
    }
}

/// Publishes a cancelled failure if a run is dropped mid-flight.
struct CancelGuard<'a> {
    state: &'a watch::Sender<PipelineState>,
    armed: bool,
}

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let previous = self.state.send_replace(PipelineState::Failed {
            report: ErrorReport::cancelled(),
        });
        warn!(from = previous.name(), "Run cancelled");
    }
}

struct Artifacts {
    narration: NarrationTrack,
    images: Vec<SceneImage>,
    segments: Vec<Segment>,
    transitions: Vec<TransitionEdge>,
    captions: Vec<CaptionGroup>,
    merged_path: PathBuf,
    captioned_path: PathBuf,
    final_path: PathBuf,
}
