//! Tests for the run workspace, soundtrack library and cleanup.

use storyreel_core::{AudioSegment, SoundtrackId};
use storyreel_error::StoryreelErrorKind;
use storyreel_storage::{RunWorkspace, SoundtrackLibrary, clean_videos};
use tempfile::TempDir;

#[tokio::test]
async fn test_layout_is_index_keyed() {
    let temp = TempDir::new().unwrap();
    let ws = RunWorkspace::with_id(temp.path(), "run1").await.unwrap();

    assert_eq!(ws.root(), temp.path().join("run1"));
    assert!(ws.root().join("images").is_dir());
    assert!(ws.root().join("clips").is_dir());
    assert!(ws.image_path(3).ends_with("images/scene_03.png"));
    assert!(ws.clip_path(12).ends_with("clips/segment_12.mp4"));
    assert_ne!(ws.clip_path(1), ws.clip_path(2));
}

#[tokio::test]
async fn test_create_assigns_distinct_run_ids() {
    let temp = TempDir::new().unwrap();
    let a = RunWorkspace::create(temp.path()).await.unwrap();
    let b = RunWorkspace::create(temp.path()).await.unwrap();
    assert_ne!(a.run_id(), b.run_id());
}

#[tokio::test]
async fn test_write_atomic_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let ws = RunWorkspace::with_id(temp.path(), "run").await.unwrap();
    let path = ws.image_path(0);

    ws.write_atomic(&path, b"png bytes").await.unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"png bytes");
    assert!(!path.with_extension("tmp").exists());
    ws.require(&path).await.unwrap();
}

#[tokio::test]
async fn test_require_missing_file() {
    let temp = TempDir::new().unwrap();
    let ws = RunWorkspace::with_id(temp.path(), "run").await.unwrap();
    let err = ws.require(&ws.merged_path()).await.unwrap_err();
    assert!(matches!(err.kind(), StoryreelErrorKind::Storage(_)));
}

#[tokio::test]
async fn test_require_empty_file() {
    let temp = TempDir::new().unwrap();
    let ws = RunWorkspace::with_id(temp.path(), "run").await.unwrap();
    std::fs::write(ws.merged_path(), b"").unwrap();

    let err = ws.require(&ws.merged_path()).await.unwrap_err();
    assert!(matches!(err.kind(), StoryreelErrorKind::Storage(_)));
    assert!(err.to_string().contains("is empty"));
}

#[tokio::test]
async fn test_write_narration_concatenates_in_order() {
    let temp = TempDir::new().unwrap();
    let ws = RunWorkspace::with_id(temp.path(), "run").await.unwrap();
    let segments = vec![
        AudioSegment::new(0, vec![1; 100], 100),
        AudioSegment::new(1, vec![2; 50], 100),
        AudioSegment::new(2, vec![3; 150], 100),
    ];

    let track = ws.write_narration(&segments, 100).await.unwrap();

    assert_eq!(track.path(), ws.narration_path());
    assert_eq!(track.segment_durations(), &[1.0, 0.5, 1.5]);
    assert!((track.duration() - 3.0).abs() < 1e-9);

    let mut reader = hound::WavReader::open(track.path()).unwrap();
    assert_eq!(reader.spec().sample_rate, 100);
    let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(samples.len(), 300);
    assert_eq!(samples[0], 1);
    assert_eq!(samples[120], 2);
    assert_eq!(samples[299], 3);
}

#[tokio::test]
async fn test_write_narration_rejects_mixed_rates() {
    let temp = TempDir::new().unwrap();
    let ws = RunWorkspace::with_id(temp.path(), "run").await.unwrap();
    let segments = vec![
        AudioSegment::new(0, vec![0; 10], 100),
        AudioSegment::new(1, vec![0; 10], 200),
    ];
    let err = ws.write_narration(&segments, 100).await.unwrap_err();
    assert!(matches!(err.kind(), StoryreelErrorKind::Storage(_)));
}

#[tokio::test]
async fn test_write_json() {
    let temp = TempDir::new().unwrap();
    let ws = RunWorkspace::with_id(temp.path(), "run").await.unwrap();
    ws.write_json(&ws.scripts_path(), &vec!["one.", "two."])
        .await
        .unwrap();
    let text = std::fs::read_to_string(ws.scripts_path()).unwrap();
    assert!(text.contains("\"one.\""));
}

#[tokio::test]
async fn test_soundtrack_resolve_and_list() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("calm.mp3"), b"").unwrap();
    std::fs::write(temp.path().join("epic.mp3"), b"").unwrap();
    std::fs::write(temp.path().join("notes.txt"), b"").unwrap();
    let library = SoundtrackLibrary::new(temp.path());

    let path = library.resolve(&SoundtrackId::new("calm")).await.unwrap();
    assert_eq!(path, temp.path().join("calm.mp3"));
    assert_eq!(library.list().await.unwrap(), vec!["calm", "epic"]);

    let err = library
        .resolve(&SoundtrackId::new("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), StoryreelErrorKind::Validation(_)));
}

#[tokio::test]
async fn test_clean_videos_removes_only_mp4() {
    let temp = TempDir::new().unwrap();
    let ws = RunWorkspace::with_id(temp.path(), "run").await.unwrap();
    std::fs::write(temp.path().join("final.mp4"), b"").unwrap();
    std::fs::write(ws.merged_path(), b"").unwrap();
    std::fs::write(ws.image_path(0), b"").unwrap();

    let removed = clean_videos(temp.path()).await.unwrap();

    assert_eq!(removed, 2);
    assert!(!ws.merged_path().exists());
    assert!(ws.image_path(0).exists());
}

#[tokio::test]
async fn test_clean_videos_missing_dir() {
    let temp = TempDir::new().unwrap();
    let removed = clean_videos(&temp.path().join("nope")).await.unwrap();
    assert_eq!(removed, 0);
}
