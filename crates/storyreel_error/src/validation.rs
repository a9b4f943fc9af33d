//! Request validation errors.
//!
//! These are raised before any pipeline stage runs.

/// Kinds of request validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Unsupported video duration
    #[display("Invalid duration {}s. Allowed values are 45, 60, 75", _0)]
    Duration(u32),
    /// Unsupported aspect ratio
    #[display("Invalid aspect ratio: {}. Allowed values are 9:16, 16:9, 1:1", _0)]
    AspectRatio(String),
    /// Unknown image style
    #[display("Invalid style: {}", _0)]
    Style(String),
    /// Unknown script content style
    #[display("Invalid content style: {}", _0)]
    ContentStyle(String),
    /// Voice name not in the preset catalogue
    #[display("Invalid voice: {}", _0)]
    Voice(String),
    /// Topic is empty
    #[display("Topic must not be empty")]
    EmptyTopic,
    /// Voice sample file missing or unreadable
    #[display("Invalid voice sample file: {}", _0)]
    SampleFile(String),
    /// Voice sample longer than the allowed maximum
    #[display("Voice sample {} is {:.1}s long, maximum is {}s", path, seconds, max_seconds)]
    SampleTooLong {
        /// Sample path
        path: String,
        /// Measured length
        seconds: OrderedSeconds,
        /// Allowed maximum
        max_seconds: u32,
    },
    /// Soundtrack id empty or not installed
    #[display("Invalid soundtrack: {}", _0)]
    Soundtrack(String),
    /// Transition would not fit inside a segment
    #[display("Transition of {}s must be shorter than segment of {}s", transition, segment)]
    Transition {
        /// Segment duration
        segment: OrderedSeconds,
        /// Transition duration
        transition: OrderedSeconds,
    },
}

/// Seconds stored as milliseconds so kinds stay `Eq + Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderedSeconds(pub u64);

impl From<f64> for OrderedSeconds {
    fn from(seconds: f64) -> Self {
        Self((seconds.max(0.0) * 1000.0).round() as u64)
    }
}

impl std::fmt::Display for OrderedSeconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let seconds = self.0 as f64 / 1000.0;
        match f.precision() {
            Some(p) => write!(f, "{:.*}", p, seconds),
            None => write!(f, "{}", seconds),
        }
    }
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use storyreel_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::Style("pastel".to_string()));
/// assert!(format!("{}", err).contains("pastel"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
