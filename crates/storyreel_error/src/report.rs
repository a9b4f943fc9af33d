//! Structured `{kind, message}` reports for failed runs.

use crate::{StoryreelError, StoryreelErrorKind, VoiceLifecycleErrorKind};
use serde::{Deserialize, Serialize};

/// Coarse error taxonomy surfaced to callers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Bad request parameter, rejected before any stage ran
    #[display("validation")]
    Validation,
    /// Retryable backend failure that escaped its retry loop
    #[display("transient_external")]
    TransientExternal,
    /// Non-retryable backend failure
    #[display("permanent_external")]
    PermanentExternal,
    /// Cloned voice could not be created or deleted
    #[display("resource_lifecycle")]
    ResourceLifecycle,
    /// Render, merge, caption or mix stage failed
    #[display("assembly_stage")]
    AssemblyStage,
    /// A bounded retry loop ran out of attempts
    #[display("exhausted_retry")]
    ExhaustedRetry,
    /// Configuration, storage or serialization failure
    #[display("internal")]
    Internal,
    /// The run was abandoned before it finished
    #[display("cancelled")]
    Cancelled,
}

/// Error surfaced when a run terminates in the failed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error category
    pub kind: ErrorCategory,
    /// Human-readable message
    pub message: String,
}

impl ErrorReport {
    /// Report for a run dropped before reaching a terminal state.
    pub fn cancelled() -> Self {
        Self {
            kind: ErrorCategory::Cancelled,
            message: "run cancelled".to_string(),
        }
    }
}

impl StoryreelError {
    /// Classify this error into the caller-facing taxonomy.
    pub fn category(&self) -> ErrorCategory {
        match self.kind() {
            StoryreelErrorKind::Validation(_) => ErrorCategory::Validation,
            StoryreelErrorKind::ExternalService(e) if e.kind.is_retryable() => {
                ErrorCategory::TransientExternal
            }
            StoryreelErrorKind::ExternalService(_) => ErrorCategory::PermanentExternal,
            StoryreelErrorKind::VoiceLifecycle(_) => ErrorCategory::ResourceLifecycle,
            StoryreelErrorKind::Assembly(_) => ErrorCategory::AssemblyStage,
            StoryreelErrorKind::ExhaustedRetry(_) => ErrorCategory::ExhaustedRetry,
            StoryreelErrorKind::Config(_)
            | StoryreelErrorKind::Storage(_)
            | StoryreelErrorKind::Json(_) => ErrorCategory::Internal,
        }
    }

    /// Flatten into a serializable report.
    ///
    /// The message omits source locations.
    pub fn report(&self) -> ErrorReport {
        let message = match self.kind() {
            StoryreelErrorKind::Validation(e) => e.kind.to_string(),
            StoryreelErrorKind::ExternalService(e) => e.kind.to_string(),
            StoryreelErrorKind::VoiceLifecycle(e) => match &e.kind {
                VoiceLifecycleErrorKind::CreateFailed(m) => {
                    format!("voice clone creation failed: {}", m)
                }
                other => other.to_string(),
            },
            StoryreelErrorKind::Assembly(e) => format!("{} stage failed: {}", e.stage, e.message),
            StoryreelErrorKind::ExhaustedRetry(e) => format!(
                "{} gave up after {} attempts: {}",
                e.operation, e.attempts, e.last_error
            ),
            StoryreelErrorKind::Config(e) => e.message.clone(),
            StoryreelErrorKind::Storage(e) => e.kind.to_string(),
            StoryreelErrorKind::Json(e) => e.message.clone(),
        };
        ErrorReport {
            kind: self.category(),
            message,
        }
    }
}
