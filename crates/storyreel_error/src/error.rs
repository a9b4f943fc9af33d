//! Top-level error wrapper types.

use crate::{
    AssemblyError, ConfigError, ExhaustedRetryError, ExternalServiceError, JsonError,
    RetryableError, StorageError, ValidationError, VoiceLifecycleError,
};

/// Every error the pipeline can produce.
///
/// # Examples
///
/// ```
/// use storyreel_error::{StoryreelError, ConfigError};
///
/// let err: StoryreelError = ConfigError::new("missing endpoint").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryreelErrorKind {
    /// Request validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// External backend error
    #[from(ExternalServiceError)]
    ExternalService(ExternalServiceError),
    /// Cloned-voice lifecycle error
    #[from(VoiceLifecycleError)]
    VoiceLifecycle(VoiceLifecycleError),
    /// Render or assembly stage error
    #[from(AssemblyError)]
    Assembly(AssemblyError),
    /// Bounded retry exhausted
    #[from(ExhaustedRetryError)]
    ExhaustedRetry(ExhaustedRetryError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Run workspace storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Storyreel error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyreel_error::{StoryreelResult, ValidationError, ValidationErrorKind};
///
/// fn might_fail() -> StoryreelResult<()> {
///     Err(ValidationError::new(ValidationErrorKind::EmptyTopic))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyreel Error: {}", _0)]
pub struct StoryreelError(Box<StoryreelErrorKind>);

impl StoryreelError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryreelErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryreelErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to StoryreelErrorKind
impl<T> From<T> for StoryreelError
where
    T: Into<StoryreelErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for StoryreelError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            StoryreelErrorKind::ExternalService(e) => e.kind.is_retryable(),
            _ => false,
        }
    }
}

/// Result type for storyreel operations.
pub type StoryreelResult<T> = std::result::Result<T, StoryreelError>;
