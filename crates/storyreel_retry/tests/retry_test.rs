use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use storyreel_error::{
    ExternalServiceError, ExternalServiceErrorKind, StoryreelError, StoryreelErrorKind,
    StoryreelResult,
};
use storyreel_retry::{Backoff, RetryPolicy, retry};

fn not_ready() -> StoryreelError {
    ExternalServiceError::new(ExternalServiceErrorKind::NotReady {
        service: "test",
        job_id: "job-1".to_string(),
    })
    .into()
}

fn unauthorized() -> StoryreelError {
    ExternalServiceError::new(ExternalServiceErrorKind::Status {
        service: "test",
        status: 401,
        message: "bad key".to_string(),
    })
    .into()
}

fn wrong_count() -> StoryreelError {
    ExternalServiceError::new(ExternalServiceErrorKind::SentenceCount {
        expected: 7,
        actual: 6,
    })
    .into()
}

#[tokio::test(start_paused = true)]
async fn succeeds_after_transient_failures() {
    let calls = AtomicUsize::new(0);
    let policy = RetryPolicy::fixed(5, Duration::from_secs(10));

    let value: StoryreelResult<&str> = retry(&policy, "poll", || async {
        if calls.fetch_add(1, Ordering::SeqCst) < 2 {
            Err(not_ready())
        } else {
            Ok("ready")
        }
    })
    .await;

    assert_eq!(value.unwrap(), "ready");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn permanent_error_is_not_retried() {
    let calls = AtomicUsize::new(0);
    let policy = RetryPolicy::fixed(5, Duration::from_secs(1));

    let result: StoryreelResult<()> = retry(&policy, "submit", || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(unauthorized())
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let err = result.unwrap_err();
    assert!(matches!(err.kind(), StoryreelErrorKind::ExternalService(_)));
}

#[tokio::test(start_paused = true)]
async fn exhaustion_reports_attempts_and_last_error() {
    let calls = AtomicUsize::new(0);
    let policy = RetryPolicy::fixed(7, Duration::from_secs(10));
    let started = tokio::time::Instant::now();

    let result: StoryreelResult<()> = retry(&policy, "image poll #2", || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(not_ready())
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 7);
    // Six sleeps of ten seconds between seven attempts.
    assert_eq!(started.elapsed(), Duration::from_secs(60));
    assert_eq!(started.elapsed(), policy.max_total_delay());
    match result.unwrap_err().kind() {
        StoryreelErrorKind::ExhaustedRetry(e) => {
            assert_eq!(e.attempts, 7);
            assert_eq!(e.operation, "image poll #2");
            assert!(e.last_error.contains("not ready"));
        }
        other => panic!("expected exhausted retry, got {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn immediate_policy_never_sleeps() {
    let calls = AtomicUsize::new(0);
    let policy = RetryPolicy::immediate(5);
    let started = tokio::time::Instant::now();

    let result: StoryreelResult<()> = retry(&policy, "script", || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(wrong_count())
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn single_attempt_policy_calls_once() {
    let calls = AtomicUsize::new(0);
    let policy = RetryPolicy {
        max_attempts: 1,
        delay_ms: 0,
        backoff: Backoff::Exponential,
        max_delay_ms: 10,
    };

    let result: StoryreelResult<()> = retry(&policy, "once", || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(not_ready())
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(
        result.unwrap_err().kind(),
        StoryreelErrorKind::ExhaustedRetry(_)
    ));
}
