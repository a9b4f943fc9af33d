//! Test utilities for pipeline tests.
//!
//! Every backend trait has a mock here that records what it was asked to do.
//! The mock engine writes a placeholder file at each output path so workspace
//! checks pass.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storyreel_core::{AudioSegment, JobStatus, WordTiming};
use storyreel_error::{
    AssemblyError, AssemblyStage, ExternalServiceError, ExternalServiceErrorKind, StoryreelResult,
};
use storyreel_interface::{
    CaptionSpec, ClipSpec, ImageGenerator, ImageRequest, MergeSpec, MixSpec, RenderEngine,
    SpeechRequest, SpeechSynthesizer, TextGenerator, TextRequest, Transcriber, VoiceCloneService,
};
use storyreel_pipeline::Backends;
use storyreel_retry::{RetryPolicy, StoryreelConfig};

/// Sample rate of mock narration.
pub const SAMPLE_RATE: u32 = 8_000;

/// Samples per synthesized sentence.
pub const SAMPLES_PER_SENTENCE: usize = 800;

/// Text with `n` sentences, tagged so narration and scene scripts differ.
pub fn sentences(tag: &str, n: usize) -> String {
    (0..n)
        .map(|i| format!("{} sentence number {} happens here.", tag, i))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text generator returning the requested sentence count.
///
/// The first `short_calls` responses are one sentence short.
pub struct MockText {
    short_calls: usize,
    calls: AtomicUsize,
}

impl MockText {
    pub fn exact() -> Self {
        Self::short_first(0)
    }

    pub fn short_first(short_calls: usize) -> Self {
        Self {
            short_calls,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for MockText {
    async fn generate(&self, req: &TextRequest) -> StoryreelResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let mut n = *req.target_sentence_count();
        if call < self.short_calls {
            n -= 1;
        }
        let tag = if req.system_role().contains("short") {
            "Narration"
        } else {
            "Scene"
        };
        Ok(sentences(tag, n))
    }

    fn model_name(&self) -> &str {
        "mock-text"
    }
}

/// Voice service recording creations and deletions.
///
/// A deletion is recorded only once it completes.
pub struct MockVoices {
    fail_create: bool,
    delete_delay: Duration,
    pub created: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
}

impl MockVoices {
    pub fn working() -> Self {
        Self {
            fail_create: false,
            delete_delay: Duration::ZERO,
            created: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::working()
        }
    }

    pub fn slow_delete(delay: Duration) -> Self {
        Self {
            delete_delay: delay,
            ..Self::working()
        }
    }

    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted.lock().unwrap().len()
    }
}

#[async_trait]
impl VoiceCloneService for MockVoices {
    async fn create(&self, _samples: &[PathBuf], name: &str) -> StoryreelResult<String> {
        if self.fail_create {
            return Err(ExternalServiceError::new(ExternalServiceErrorKind::Status {
                service: "voices",
                status: 400,
                message: "sample rejected".to_string(),
            })
            .into());
        }
        let id = format!("clone-{}", name);
        self.created.lock().unwrap().push(id.clone());
        Ok(id)
    }

    async fn delete(&self, voice_id: &str) -> StoryreelResult<()> {
        if !self.delete_delay.is_zero() {
            tokio::time::sleep(self.delete_delay).await;
        }
        self.deleted.lock().unwrap().push(voice_id.to_string());
        Ok(())
    }
}

/// Speech synthesizer whose later sentences finish first.
///
/// Each segment is filled with its sentence index so order can be checked
/// in the written track.
pub struct MockSpeech {
    delay_per_sentence: Duration,
    pub requests: Mutex<Vec<SpeechRequest>>,
}

impl MockSpeech {
    pub fn new() -> Self {
        Self::reversed(Duration::ZERO)
    }

    pub fn reversed(delay_per_sentence: Duration) -> Self {
        Self {
            delay_per_sentence,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, req: &SpeechRequest) -> StoryreelResult<AudioSegment> {
        self.requests.lock().unwrap().push(req.clone());
        let index = *req.index();
        let delay = self.delay_per_sentence * 20u32.saturating_sub(index as u32);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(AudioSegment::new(
            index,
            vec![index as i16; SAMPLES_PER_SENTENCE],
            SAMPLE_RATE,
        ))
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }
}

/// How the mock image backend answers polls.
#[derive(Debug, Clone)]
pub enum PollBehavior {
    /// Every job is ready on the first poll
    Ready,
    /// Job for this scene never leaves pending
    StuckPending(usize),
    /// Poll for this scene never returns
    Hang(usize),
    /// Job for this scene reports a failure
    Fail(usize),
}

/// Image backend recording submissions, polls and downloads.
pub struct MockImages {
    behavior: PollBehavior,
    failing_fetches: AtomicUsize,
    pub submitted: Mutex<Vec<ImageRequest>>,
    polls: AtomicUsize,
    fetches: AtomicUsize,
}

impl MockImages {
    pub fn new(behavior: PollBehavior) -> Self {
        Self {
            behavior,
            failing_fetches: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
            polls: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Backend whose first `n` downloads drop the connection.
    pub fn flaky_fetch(n: usize) -> Self {
        let images = Self::new(PollBehavior::Ready);
        images.failing_fetches.store(n, Ordering::SeqCst);
        images
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn submitted_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

fn job_index(job_id: &str) -> usize {
    job_id
        .trim_start_matches("job-")
        .parse()
        .expect("mock job ids are job-<index>")
}

#[async_trait]
impl ImageGenerator for MockImages {
    async fn submit(&self, req: &ImageRequest) -> StoryreelResult<String> {
        self.submitted.lock().unwrap().push(req.clone());
        Ok(format!("job-{}", req.index()))
    }

    async fn poll(&self, job_id: &str) -> StoryreelResult<JobStatus> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let index = job_index(job_id);
        let ready = JobStatus::Ready {
            url: format!("https://images.test/{}.png", index),
        };
        match self.behavior {
            PollBehavior::StuckPending(stuck) if stuck == index => Ok(JobStatus::Pending),
            PollBehavior::Hang(stuck) if stuck == index => {
                std::future::pending::<()>().await;
                Ok(ready)
            }
            PollBehavior::Fail(failed) if failed == index => Ok(JobStatus::Failed {
                reason: "nsfw content".to_string(),
            }),
            _ => Ok(ready),
        }
    }

    async fn fetch(&self, url: &str) -> StoryreelResult<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failing_fetches
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if failing.is_ok() {
            return Err(ExternalServiceError::new(ExternalServiceErrorKind::Network {
                service: "images",
                message: "connection reset".to_string(),
            })
            .into());
        }
        Ok(format!("png:{}", url).into_bytes())
    }
}

/// Transcriber returning fixed words.
pub struct MockTranscriber {
    words: Vec<WordTiming>,
}

impl MockTranscriber {
    pub fn new(words: Vec<WordTiming>) -> Self {
        Self { words }
    }

    /// Four words, spaced so they form three caption groups.
    pub fn sample() -> Self {
        Self::new(vec![
            WordTiming::new("Once", 0.0, 0.2),
            WordTiming::new("upon", 0.2, 0.4),
            WordTiming::new("a", 0.4, 0.5),
            WordTiming::new("time", 1.5, 1.8),
        ])
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio: &Path) -> StoryreelResult<Vec<WordTiming>> {
        Ok(self.words.clone())
    }
}

/// Render engine that records specs and touches output files.
#[derive(Default)]
pub struct MockEngine {
    fail_merge: bool,
    pub clips: Mutex<Vec<ClipSpec>>,
    pub merges: Mutex<Vec<MergeSpec>>,
    pub captions: Mutex<Vec<CaptionSpec>>,
    pub mixes: Mutex<Vec<MixSpec>>,
}

impl MockEngine {
    pub fn failing_merge() -> Self {
        Self {
            fail_merge: true,
            ..Self::default()
        }
    }
}

async fn touch(path: &Path) -> StoryreelResult<()> {
    tokio::fs::write(path, b"video").await.expect("mock output is writable");
    Ok(())
}

#[async_trait]
impl RenderEngine for MockEngine {
    async fn render_clip(&self, spec: &ClipSpec) -> StoryreelResult<()> {
        self.clips.lock().unwrap().push(spec.clone());
        touch(spec.output()).await
    }

    async fn merge_clips(&self, spec: &MergeSpec) -> StoryreelResult<()> {
        self.merges.lock().unwrap().push(spec.clone());
        if self.fail_merge {
            return Err(
                AssemblyError::new(AssemblyStage::Merge, "ffmpeg exited with status 1").into(),
            );
        }
        touch(spec.output()).await
    }

    async fn burn_captions(&self, spec: &CaptionSpec) -> StoryreelResult<()> {
        self.captions.lock().unwrap().push(spec.clone());
        touch(spec.output()).await
    }

    async fn mix_soundtrack(&self, spec: &MixSpec) -> StoryreelResult<()> {
        self.mixes.lock().unwrap().push(spec.clone());
        touch(spec.output()).await
    }
}

/// Concrete handles to every mock, for assertions after a run.
pub struct Mocks {
    pub text: Arc<MockText>,
    pub voices: Arc<MockVoices>,
    pub speech: Arc<MockSpeech>,
    pub images: Arc<MockImages>,
    pub transcriber: Arc<MockTranscriber>,
    pub engine: Arc<MockEngine>,
}

impl Mocks {
    pub fn new() -> Self {
        Self {
            text: Arc::new(MockText::exact()),
            voices: Arc::new(MockVoices::working()),
            speech: Arc::new(MockSpeech::new()),
            images: Arc::new(MockImages::new(PollBehavior::Ready)),
            transcriber: Arc::new(MockTranscriber::sample()),
            engine: Arc::new(MockEngine::default()),
        }
    }

    pub fn backends(&self) -> Backends {
        Backends {
            text: self.text.clone(),
            voices: self.voices.clone(),
            speech: self.speech.clone(),
            images: self.images.clone(),
            transcriber: self.transcriber.clone(),
            engine: self.engine.clone(),
        }
    }
}

/// Configuration rooted in `dir` with no retry delays.
pub fn test_config(dir: &Path) -> StoryreelConfig {
    let mut config = StoryreelConfig::default();
    config.storage.output_dir = dir.join("output");
    config.storage.soundtrack_dir = dir.join("bg_music");
    config.retry.script = RetryPolicy::immediate(5);
    config.retry.image_submit = RetryPolicy::immediate(3);
    config.retry.image_poll = RetryPolicy::immediate(7);
    config.retry.image_fetch = RetryPolicy::immediate(3);
    config.render.workers = Some(2);
    config
}

/// Install an empty soundtrack named `id`.
pub fn install_soundtrack(dir: &Path, id: &str) {
    let tracks = dir.join("bg_music");
    std::fs::create_dir_all(&tracks).unwrap();
    std::fs::write(tracks.join(format!("{}.mp3", id)), b"mp3").unwrap();
}

/// A non-empty voice sample file.
pub fn voice_sample(dir: &Path) -> PathBuf {
    let path = dir.join("sample.mp3");
    std::fs::write(&path, b"not really audio").unwrap();
    path
}
