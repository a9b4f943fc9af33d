//! Bounded-retry exhaustion and the retry classification trait.

/// A bounded retry loop ran out of attempts.
///
/// # Examples
///
/// ```
/// use storyreel_error::ExhaustedRetryError;
///
/// let err = ExhaustedRetryError::new("image poll #3", 7, "modelslab job 42 not ready");
/// assert_eq!(err.attempts, 7);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Exhausted Retry Error: {} gave up after {} attempts ({}) at line {} in {}",
    operation,
    attempts,
    last_error,
    line,
    file
)]
pub struct ExhaustedRetryError {
    /// Operation that was being retried
    pub operation: String,
    /// Number of attempts made
    pub attempts: usize,
    /// Message of the final failure
    pub last_error: String,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExhaustedRetryError {
    /// Create a new ExhaustedRetryError with automatic location tracking.
    #[track_caller]
    pub fn new(operation: impl Into<String>, attempts: usize, last_error: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            operation: operation.into(),
            attempts,
            last_error: last_error.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// Transient failures such as 503, 429, network timeouts, a job that is not
/// ready yet, or a script with the wrong sentence count return true.
/// Permanent failures such as 401 or a malformed response return false.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}
