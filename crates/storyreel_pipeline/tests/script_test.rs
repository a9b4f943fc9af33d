mod test_utils;

use std::sync::Arc;
use storyreel_core::{ContentStyle, ScriptKind, VideoDuration};
use storyreel_error::ErrorCategory;
use storyreel_pipeline::ScriptGenerator;
use storyreel_retry::RetryPolicy;
use test_utils::MockText;

#[tokio::test]
async fn test_generate_returns_both_scripts_with_exact_count() {
    let text = Arc::new(MockText::exact());
    let generator = ScriptGenerator::new(text.clone(), RetryPolicy::immediate(5)).unwrap();

    let (narration, scene) = generator
        .generate("a lighthouse keeper", VideoDuration::from_seconds(45).unwrap())
        .await
        .unwrap();

    assert_eq!(narration.kind(), ScriptKind::Narration);
    assert_eq!(scene.kind(), ScriptKind::Scene);
    assert_eq!(narration.len(), 7);
    assert_eq!(scene.len(), 7);
    assert!(narration.sentences()[0].starts_with("Narration"));
    assert!(scene.sentences()[0].starts_with("Scene"));
    assert_eq!(text.call_count(), 2);
}

#[tokio::test]
async fn test_wrong_count_is_regenerated() {
    let text = Arc::new(MockText::short_first(1));
    let generator = ScriptGenerator::new(text.clone(), RetryPolicy::immediate(5)).unwrap();

    let (narration, scene) = generator
        .generate("a lighthouse keeper", VideoDuration::from_seconds(60).unwrap())
        .await
        .unwrap();

    assert_eq!(narration.len(), 11);
    assert_eq!(scene.len(), 11);
    assert_eq!(text.call_count(), 3);
}

#[tokio::test]
async fn test_persistent_wrong_count_exhausts() {
    let text = Arc::new(MockText::short_first(usize::MAX));
    let generator = ScriptGenerator::new(text.clone(), RetryPolicy::immediate(3)).unwrap();

    let err = generator
        .generate("a lighthouse keeper", VideoDuration::from_seconds(75).unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::ExhaustedRetry);
    assert!(err.report().message.contains("script"));
}

#[tokio::test]
async fn test_styled_script_has_duration_count() {
    let text = Arc::new(MockText::exact());
    let generator = ScriptGenerator::new(text, RetryPolicy::immediate(1)).unwrap();

    let script = generator
        .generate_styled(
            "compound interest",
            VideoDuration::from_seconds(75).unwrap(),
            ContentStyle::FunFacts,
        )
        .await
        .unwrap();

    assert_eq!(script.len(), 14);
}
