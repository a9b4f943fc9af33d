//! Errors from external generation, synthesis and transcription services.

/// External service failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ExternalServiceErrorKind {
    /// API key not found in environment
    #[display("{} environment variable not set", _0)]
    MissingApiKey(&'static str),
    /// Request never produced a response
    #[display("{} request failed: {}", service, message)]
    Network {
        /// Service name
        service: &'static str,
        /// Error message
        message: String,
    },
    /// HTTP error with status code and message
    #[display("{} returned HTTP {}: {}", service, status, message)]
    Status {
        /// Service name
        service: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
    /// Outgoing request could not be assembled
    #[display("{} request conversion failed: {}", service, message)]
    RequestConversion {
        /// Service name
        service: &'static str,
        /// Error message
        message: String,
    },
    /// Backend answered but reported an error in the body
    #[display("{} rejected the request: {}", service, message)]
    Rejected {
        /// Service name
        service: &'static str,
        /// Backend-reported message
        message: String,
    },
    /// Response body could not be interpreted
    #[display("{} sent an invalid response: {}", service, message)]
    InvalidResponse {
        /// Service name
        service: &'static str,
        /// Error message
        message: String,
    },
    /// Asynchronous job has not finished yet
    #[display("{} job {} not ready", service, job_id)]
    NotReady {
        /// Service name
        service: &'static str,
        /// Backend job identifier
        job_id: String,
    },
    /// Asynchronous job finished unsuccessfully
    #[display("{} job {} failed: {}", service, job_id, message)]
    JobFailed {
        /// Service name
        service: &'static str,
        /// Backend job identifier
        job_id: String,
        /// Failure reason reported by the backend
        message: String,
    },
    /// Generated text did not split into the requested number of sentences
    #[display("expected {} sentences, got {}", expected, actual)]
    SentenceCount {
        /// Requested sentence count
        expected: usize,
        /// Parsed sentence count
        actual: usize,
    },
}

impl ExternalServiceErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            ExternalServiceErrorKind::Status { status, .. } => {
                matches!(*status, 408 | 429 | 500..=599)
            }
            ExternalServiceErrorKind::Network { .. } => true,
            ExternalServiceErrorKind::Rejected { .. } => true,
            ExternalServiceErrorKind::NotReady { .. } => true,
            ExternalServiceErrorKind::SentenceCount { .. } => true,
            _ => false,
        }
    }
}

/// External service error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyreel_error::{ExternalServiceError, ExternalServiceErrorKind};
///
/// let err = ExternalServiceError::new(ExternalServiceErrorKind::Status {
///     service: "modelslab",
///     status: 503,
///     message: "busy".to_string(),
/// });
/// assert!(err.kind.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("External Service Error: {} at line {} in {}", kind, line, file)]
pub struct ExternalServiceError {
    /// The kind of error that occurred
    pub kind: ExternalServiceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExternalServiceError {
    /// Create a new ExternalServiceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExternalServiceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
