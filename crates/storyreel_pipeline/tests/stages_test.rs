mod test_utils;

use std::collections::HashSet;
use std::sync::Arc;
use storyreel_core::{
    AspectRatio, CaptionRule, NarrationTrack, SceneImage, Segment, SoundtrackId, TransitionKind,
    TransitionPlan,
};
use storyreel_error::{ErrorCategory, StoryreelErrorKind};
use storyreel_interface::ZoomAnchor;
use storyreel_pipeline::{
    CaptionSynchronizer, FixedTransition, RandomTransitions, SegmentRenderer, SequenceAssembler,
    SoundtrackMixer, TransitionChooser,
};
use storyreel_storage::{RunWorkspace, SoundtrackLibrary};
use test_utils::{MockEngine, MockTranscriber, install_soundtrack};

fn images(workspace: &RunWorkspace, n: usize) -> Vec<SceneImage> {
    (0..n)
        .map(|i| SceneImage::new(i, workspace.image_path(i)))
        .collect()
}

fn segments(workspace: &RunWorkspace, n: usize) -> Vec<Segment> {
    (0..n)
        .map(|i| Segment::new(i, workspace.image_path(i), workspace.clip_path(i), 6.0))
        .collect()
}

#[tokio::test]
async fn test_render_all_keeps_scene_order() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = RunWorkspace::with_id(dir.path(), "run").await.unwrap();
    let engine = Arc::new(MockEngine::default());
    let renderer = SegmentRenderer::new(engine.clone(), 6.0, 3);

    let rendered = renderer
        .render_all(&images(&workspace, 7), AspectRatio::Portrait, &workspace)
        .await
        .unwrap();

    assert_eq!(rendered.len(), 7);
    for (i, segment) in rendered.iter().enumerate() {
        assert_eq!(*segment.index(), i);
        assert_eq!(segment.clip_path(), &workspace.clip_path(i));
        assert_eq!(*segment.duration(), 6.0);
    }

    let clips = engine.clips.lock().unwrap();
    assert_eq!(clips.len(), 7);
    for spec in clips.iter() {
        assert_eq!((*spec.width(), *spec.height()), (576, 1024));
        assert_ne!(*spec.anchor(), ZoomAnchor::Center);
    }
}

#[tokio::test]
async fn test_render_all_runs_on_a_spawned_task() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = RunWorkspace::with_id(dir.path(), "run").await.unwrap();
    let renderer = SegmentRenderer::new(Arc::new(MockEngine::default()), 6.0, 2);
    let scenes = images(&workspace, 3);

    let task = tokio::spawn(async move {
        renderer
            .render_all(&scenes, AspectRatio::Landscape, &workspace)
            .await
    });

    let rendered = task.await.unwrap().unwrap();
    assert_eq!(rendered.len(), 3);
}

#[tokio::test]
async fn test_assemble_uses_plan_offsets() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = RunWorkspace::with_id(dir.path(), "run").await.unwrap();
    let engine = Arc::new(MockEngine::default());
    let plan = TransitionPlan::new(6.0, 1.0).unwrap();
    let assembler = SequenceAssembler::new(
        engine.clone(),
        plan,
        Arc::new(FixedTransition(TransitionKind::Pixelize)),
    );

    let (merged, edges) = assembler
        .assemble(&segments(&workspace, 7), &workspace)
        .await
        .unwrap();

    assert_eq!(merged, workspace.merged_path());
    assert_eq!(edges.len(), 6);
    let offsets: Vec<f64> = edges.iter().map(|e| e.offset).collect();
    assert_eq!(offsets, vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0]);
    assert!(edges.iter().all(|e| e.kind == TransitionKind::Pixelize));

    let merges = engine.merges.lock().unwrap();
    assert_eq!(merges.len(), 1);
    assert_eq!(merges[0].clips().len(), 7);
    assert_eq!(*merges[0].clip_duration(), 6.0);
}

#[tokio::test]
async fn test_assemble_rejects_gaps() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = RunWorkspace::with_id(dir.path(), "run").await.unwrap();
    let engine = Arc::new(MockEngine::default());
    let assembler = SequenceAssembler::new(
        engine.clone(),
        TransitionPlan::new(6.0, 1.0).unwrap(),
        Arc::new(RandomTransitions::default()),
    );
    let mut gapped = segments(&workspace, 4);
    gapped.remove(2);

    let err = assembler.assemble(&gapped, &workspace).await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::AssemblyStage);
    assert!(engine.merges.lock().unwrap().is_empty());
}

#[test]
fn test_random_transitions_stay_in_set() {
    let chooser = RandomTransitions::new(vec![TransitionKind::FadeToBlack, TransitionKind::Crossfade]);
    let seen: HashSet<TransitionKind> = (0..200).map(|i| chooser.choose(i)).collect();
    assert!(seen.iter().all(|k| matches!(k, TransitionKind::FadeToBlack | TransitionKind::Crossfade)));

    let defaults = RandomTransitions::new(Vec::new());
    assert!(TransitionKind::DEFAULT_SET.contains(&defaults.choose(0)));
}

#[tokio::test]
async fn test_captions_group_and_clamp() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = RunWorkspace::with_id(dir.path(), "run").await.unwrap();
    let engine = Arc::new(MockEngine::default());
    let transcriber = Arc::new(MockTranscriber::sample());
    let synchronizer =
        CaptionSynchronizer::new(transcriber, engine.clone(), CaptionRule::default(), 0.25);
    // Last word runs past the 1.6 second track.
    let narration = NarrationTrack::new(workspace.narration_path(), 8_000, vec![1.6], 1.6);

    let (captioned, groups) = synchronizer
        .synchronize(&workspace.merged_path(), &narration, AspectRatio::Square, &workspace)
        .await
        .unwrap();

    assert_eq!(captioned, workspace.captioned_path());
    let texts: Vec<String> = groups.iter().map(|g| g.text()).collect();
    assert_eq!(texts, vec!["Once upon", "a", "time"]);
    assert!(groups.iter().all(|g| g.end() <= 1.6));

    let specs = engine.captions.lock().unwrap();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].events().len(), 3);
    assert_eq!(specs[0].audio(), &workspace.narration_path());
    assert_eq!((*specs[0].width(), *specs[0].height()), (1024, 1024));
}

#[tokio::test]
async fn test_mixer_passes_through_without_soundtrack() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = RunWorkspace::with_id(dir.path(), "run").await.unwrap();
    let engine = Arc::new(MockEngine::default());
    let mixer = SoundtrackMixer::new(
        engine.clone(),
        SoundtrackLibrary::new(dir.path().join("bg_music")),
        0.04,
    );

    let out = mixer
        .mix(&workspace.captioned_path(), None, &workspace)
        .await
        .unwrap();

    assert_eq!(out, workspace.captioned_path());
    assert!(engine.mixes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_mixer_loops_installed_track() {
    let dir = tempfile::tempdir().unwrap();
    install_soundtrack(dir.path(), "dark");
    let workspace = RunWorkspace::with_id(dir.path(), "run").await.unwrap();
    let engine = Arc::new(MockEngine::default());
    let mixer = SoundtrackMixer::new(
        engine.clone(),
        SoundtrackLibrary::new(dir.path().join("bg_music")),
        0.04,
    );

    let out = mixer
        .mix(
            &workspace.captioned_path(),
            Some(&SoundtrackId::new("dark")),
            &workspace,
        )
        .await
        .unwrap();

    assert_eq!(out, workspace.soundtrack_path());
    let mixes = engine.mixes.lock().unwrap();
    assert_eq!(mixes.len(), 1);
    assert_eq!(mixes[0].track(), &dir.path().join("bg_music/dark.mp3"));
    assert_eq!(*mixes[0].volume(), 0.04);
}

#[tokio::test]
async fn test_mixer_rejects_unknown_track() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = RunWorkspace::with_id(dir.path(), "run").await.unwrap();
    let mixer = SoundtrackMixer::new(
        Arc::new(MockEngine::default()),
        SoundtrackLibrary::new(dir.path().join("bg_music")),
        0.04,
    );

    let err = mixer
        .mix(
            &workspace.captioned_path(),
            Some(&SoundtrackId::new("missing")),
            &workspace,
        )
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), StoryreelErrorKind::Validation(_)));
}
