//! Cloned-voice lifecycle errors.

/// Voice lifecycle failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum VoiceLifecycleErrorKind {
    /// The clone service rejected or failed the create call
    #[display("Failed to create cloned voice: {}", _0)]
    CreateFailed(String),
    /// The clone service failed to delete a voice
    #[display("Failed to delete cloned voice {}: {}", voice_id, message)]
    DeleteFailed {
        /// Voice that could not be deleted
        voice_id: String,
        /// Error message
        message: String,
    },
}

/// Voice lifecycle error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Voice Lifecycle Error: {} at line {} in {}", kind, line, file)]
pub struct VoiceLifecycleError {
    /// The kind of error that occurred
    pub kind: VoiceLifecycleErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl VoiceLifecycleError {
    /// Create a new VoiceLifecycleError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: VoiceLifecycleErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
