//! Rendering and assembly stage errors.

/// Stage of the render/assembly chain that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AssemblyStage {
    /// Per-scene motion clip rendering
    #[display("render")]
    Render,
    /// Clip concatenation with transitions
    #[display("merge")]
    Merge,
    /// Caption burn-in and narration attach
    #[display("caption")]
    Caption,
    /// Soundtrack mixing
    #[display("mix")]
    Mix,
}

/// Assembly error with the failing stage and location tracking.
///
/// # Examples
///
/// ```
/// use storyreel_error::{AssemblyError, AssemblyStage};
///
/// let err = AssemblyError::new(AssemblyStage::Merge, "ffmpeg exited with status 1");
/// assert!(format!("{}", err).contains("merge"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Assembly Error: {} stage failed: {} at line {} in {}", stage, message, line, file)]
pub struct AssemblyError {
    /// Stage that failed
    pub stage: AssemblyStage,
    /// Error message
    pub message: String,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AssemblyError {
    /// Create a new AssemblyError with automatic location tracking.
    #[track_caller]
    pub fn new(stage: AssemblyStage, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            stage,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
