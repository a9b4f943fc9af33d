//! Supported video lengths.

use serde::{Deserialize, Serialize};
use storyreel_error::{StoryreelResult, ValidationError, ValidationErrorKind};

/// Target video length.
///
/// Each length fixes how many narrative beats the scripts contain.
///
/// # Examples
///
/// ```
/// use storyreel_core::VideoDuration;
///
/// let d = VideoDuration::from_seconds(60).unwrap();
/// assert_eq!(d.sentence_count(), 11);
/// assert!(VideoDuration::from_seconds(30).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum VideoDuration {
    /// 45 seconds
    #[display("45s")]
    Short,
    /// 60 seconds
    #[display("60s")]
    Standard,
    /// 75 seconds
    #[display("75s")]
    Long,
}

impl VideoDuration {
    /// All supported durations.
    pub const ALL: [VideoDuration; 3] = [Self::Short, Self::Standard, Self::Long];

    /// Parse a length in seconds, rejecting unsupported values.
    #[track_caller]
    pub fn from_seconds(seconds: u32) -> StoryreelResult<Self> {
        match seconds {
            45 => Ok(Self::Short),
            60 => Ok(Self::Standard),
            75 => Ok(Self::Long),
            other => Err(ValidationError::new(ValidationErrorKind::Duration(other)).into()),
        }
    }

    /// Length in seconds.
    pub fn seconds(&self) -> u32 {
        match self {
            Self::Short => 45,
            Self::Standard => 60,
            Self::Long => 75,
        }
    }

    /// Number of sentences each script must contain.
    pub fn sentence_count(&self) -> usize {
        match self {
            Self::Short => 7,
            Self::Standard => 11,
            Self::Long => 14,
        }
    }
}

impl TryFrom<u32> for VideoDuration {
    type Error = String;

    fn try_from(seconds: u32) -> Result<Self, Self::Error> {
        Self::from_seconds(seconds).map_err(|e| e.to_string())
    }
}

impl From<VideoDuration> for u32 {
    fn from(duration: VideoDuration) -> Self {
        duration.seconds()
    }
}
