mod test_utils;

use std::sync::Arc;
use std::time::Duration;
use storyreel_core::{
    AspectRatio, PipelineState, RunRequest, SoundtrackId, Style, TransitionKind, VideoDuration,
    VoiceChoice,
};
use storyreel_error::ErrorCategory;
use storyreel_pipeline::{FixedTransition, Orchestrator};
use test_utils::{
    MockImages, MockVoices, Mocks, PollBehavior, install_soundtrack, test_config, voice_sample,
};

fn request(seconds: u32) -> storyreel_core::RunRequestBuilder {
    let mut builder = RunRequest::builder();
    builder
        .topic("a lighthouse keeper who befriends a storm")
        .duration(VideoDuration::from_seconds(seconds).unwrap())
        .aspect_ratio(AspectRatio::Portrait)
        .style(Style::Anime);
    builder
}

fn clone_voice(dir: &std::path::Path) -> VoiceChoice {
    VoiceChoice::Clone {
        name: "keeper".to_string(),
        samples: vec![voice_sample(dir)],
    }
}

#[tokio::test]
async fn test_preset_run_without_soundtrack() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = Mocks::new();
    let orchestrator = Orchestrator::new(mocks.backends(), test_config(dir.path())).unwrap();

    let run = orchestrator
        .run(request(45).voice(VoiceChoice::Preset("brian".to_string())).build().unwrap())
        .await
        .unwrap();

    assert_eq!(run.narration_script().len(), 7);
    assert_eq!(run.scene_script().len(), 7);
    assert_eq!(run.images().len(), 7);
    assert_eq!(run.segments().len(), 7);
    assert_eq!(run.transitions().len(), 6);
    assert_eq!(run.final_path(), run.captioned_path());
    assert!(run.final_path().ends_with("captioned.mp4"));
    assert!(run.final_path().exists());
    assert!(!run.voice().is_cloned());

    assert_eq!(mocks.images.submitted_count(), 7);
    assert_eq!(mocks.engine.clips.lock().unwrap().len(), 7);
    assert!(mocks.engine.mixes.lock().unwrap().is_empty());
    assert_eq!(mocks.voices.created_count(), 0);
    assert_eq!(
        orchestrator.state(),
        PipelineState::Done {
            final_path: run.final_path().clone()
        }
    );
}

#[tokio::test]
async fn test_cloned_run_with_soundtrack() {
    let dir = tempfile::tempdir().unwrap();
    install_soundtrack(dir.path(), "dark");
    let mocks = Mocks::new();
    let orchestrator = Orchestrator::new(mocks.backends(), test_config(dir.path()))
        .unwrap()
        .with_transitions(Arc::new(FixedTransition(TransitionKind::FadeToGray)));

    let run = orchestrator
        .run(
            request(60)
                .voice(clone_voice(dir.path()))
                .soundtrack(Some(SoundtrackId::new("dark")))
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(run.segments().len(), 11);
    assert_eq!(run.transitions().len(), 10);
    assert!(run.transitions().iter().all(|e| e.kind == TransitionKind::FadeToGray));
    assert!(run.final_path().ends_with("with_soundtrack.mp4"));
    assert_ne!(run.final_path(), run.captioned_path());
    assert_eq!(mocks.engine.mixes.lock().unwrap().len(), 1);

    assert!(run.voice().is_cloned());
    assert_eq!(mocks.voices.created_count(), 1);
    assert_eq!(mocks.voices.deleted_count(), 1);
    let speech = mocks.speech.requests.lock().unwrap();
    assert!(speech.iter().all(|r| r.voice_id() == "clone-keeper"));
}

#[tokio::test]
async fn test_failed_clone_submits_no_images() {
    let dir = tempfile::tempdir().unwrap();
    let mut mocks = Mocks::new();
    mocks.voices = Arc::new(MockVoices::failing());
    let orchestrator = Orchestrator::new(mocks.backends(), test_config(dir.path())).unwrap();

    let err = orchestrator
        .run(request(45).voice(clone_voice(dir.path())).build().unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::ResourceLifecycle);
    assert_eq!(mocks.images.submitted_count(), 0);
    assert!(mocks.speech.requests.lock().unwrap().is_empty());
    match orchestrator.state() {
        PipelineState::Failed { report } => {
            assert_eq!(report.kind, ErrorCategory::ResourceLifecycle);
            assert!(report.message.contains("voice clone creation failed"));
        }
        other => panic!("expected failed state, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stuck_image_exhausts_and_releases_voice() {
    let dir = tempfile::tempdir().unwrap();
    let mut mocks = Mocks::new();
    mocks.images = Arc::new(MockImages::new(PollBehavior::StuckPending(3)));
    let orchestrator = Orchestrator::new(mocks.backends(), test_config(dir.path())).unwrap();

    let err = orchestrator
        .run(request(45).voice(clone_voice(dir.path())).build().unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::ExhaustedRetry);
    assert!(err.report().message.contains("image poll 3"));
    assert_eq!(mocks.voices.deleted_count(), 1);
    assert!(mocks.engine.clips.lock().unwrap().is_empty());
    assert!(matches!(orchestrator.state(), PipelineState::Failed { .. }));
}

#[tokio::test]
async fn test_failed_image_job_is_permanent() {
    let dir = tempfile::tempdir().unwrap();
    let mut mocks = Mocks::new();
    mocks.images = Arc::new(MockImages::new(PollBehavior::Fail(0)));
    let orchestrator = Orchestrator::new(mocks.backends(), test_config(dir.path())).unwrap();

    let err = orchestrator
        .run(request(45).build().unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::PermanentExternal);
    assert!(err.report().message.contains("nsfw content"));
}

#[tokio::test]
async fn test_dropped_image_download_is_retried() {
    let dir = tempfile::tempdir().unwrap();
    let mut mocks = Mocks::new();
    mocks.images = Arc::new(MockImages::flaky_fetch(2));
    let orchestrator = Orchestrator::new(mocks.backends(), test_config(dir.path())).unwrap();

    let run = orchestrator.run(request(45).build().unwrap()).await.unwrap();

    assert_eq!(run.images().len(), 7);
    assert_eq!(mocks.images.fetch_count(), 9);
}

#[tokio::test]
async fn test_image_download_gives_up_after_policy() {
    let dir = tempfile::tempdir().unwrap();
    let mut mocks = Mocks::new();
    mocks.images = Arc::new(MockImages::flaky_fetch(usize::MAX));
    let orchestrator = Orchestrator::new(mocks.backends(), test_config(dir.path())).unwrap();

    let err = orchestrator
        .run(request(45).build().unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::ExhaustedRetry);
    assert!(err.report().message.contains("image fetch"));
    assert!(mocks.engine.clips.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_merge_failure_reports_stage() {
    let dir = tempfile::tempdir().unwrap();
    let mut mocks = Mocks::new();
    mocks.engine = Arc::new(test_utils::MockEngine::failing_merge());
    let orchestrator = Orchestrator::new(mocks.backends(), test_config(dir.path())).unwrap();

    let err = orchestrator
        .run(request(45).voice(clone_voice(dir.path())).build().unwrap())
        .await
        .unwrap_err();

    let report = err.report();
    assert_eq!(report.kind, ErrorCategory::AssemblyStage);
    assert!(report.message.starts_with("merge stage failed"));
    assert_eq!(mocks.voices.deleted_count(), 1);
}

#[tokio::test]
async fn test_cancelled_run_still_releases_voice() {
    let dir = tempfile::tempdir().unwrap();
    let mut mocks = Mocks::new();
    mocks.images = Arc::new(MockImages::new(PollBehavior::Hang(0)));
    let orchestrator = Orchestrator::new(mocks.backends(), test_config(dir.path())).unwrap();

    let outcome = tokio::time::timeout(
        Duration::from_millis(200),
        orchestrator.run(request(45).voice(clone_voice(dir.path())).build().unwrap()),
    )
    .await;
    assert!(outcome.is_err());

    orchestrator.settle().await;
    assert_eq!(mocks.voices.created_count(), 1);
    assert_eq!(mocks.voices.deleted_count(), 1);
    match orchestrator.state() {
        PipelineState::Failed { report } => assert_eq!(report.kind, ErrorCategory::Cancelled),
        other => panic!("expected cancelled state, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_request_fails_before_any_backend() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = Mocks::new();
    let orchestrator = Orchestrator::new(mocks.backends(), test_config(dir.path())).unwrap();

    let err = orchestrator
        .run(
            request(45)
                .soundtrack(Some(SoundtrackId::new("not-installed")))
                .build()
                .unwrap(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(mocks.text.call_count(), 0);
    assert!(!dir.path().join("output").exists());
}

#[tokio::test]
async fn test_state_moves_through_phases() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = Mocks::new();
    let orchestrator = Arc::new(Orchestrator::new(mocks.backends(), test_config(dir.path())).unwrap());
    let mut states = orchestrator.subscribe();
    assert_eq!(*states.borrow(), PipelineState::Idle);

    let watcher = tokio::spawn(async move {
        let mut seen = Vec::new();
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            let terminal = state.is_terminal();
            seen.push(state.name());
            if terminal {
                break;
            }
        }
        seen
    });

    let runner = orchestrator.clone();
    let run = tokio::spawn(async move { runner.run(request(45).build().unwrap()).await });
    run.await.unwrap().unwrap();

    let seen = watcher.await.unwrap();
    assert_eq!(seen.last(), Some(&"done"));
    // The channel may coalesce updates, but never reorders them.
    let order = ["script_phase", "generation_phase", "assembly_phase", "done"];
    let positions: Vec<usize> = seen
        .iter()
        .map(|name| order.iter().position(|o| o == name).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", seen);
}
