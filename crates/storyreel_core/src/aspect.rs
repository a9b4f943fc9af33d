//! Output frame shapes.

use serde::{Deserialize, Serialize};
use storyreel_error::{StoryreelResult, ValidationError, ValidationErrorKind};

/// Output aspect ratio.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum AspectRatio {
    /// Vertical, 576x1024
    #[strum(serialize = "9:16")]
    #[serde(rename = "9:16")]
    Portrait,
    /// Horizontal, 1024x576
    #[strum(serialize = "16:9")]
    #[serde(rename = "16:9")]
    Landscape,
    /// Square, 1024x1024
    #[strum(serialize = "1:1")]
    #[serde(rename = "1:1")]
    Square,
}

impl AspectRatio {
    /// Parse the `W:H` form used by callers.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyreel_core::AspectRatio;
    ///
    /// assert_eq!(AspectRatio::parse("9:16").unwrap(), AspectRatio::Portrait);
    /// assert!(AspectRatio::parse("4:3").is_err());
    /// ```
    #[track_caller]
    pub fn parse(value: &str) -> StoryreelResult<Self> {
        value.trim().parse().map_err(|_| {
            ValidationError::new(ValidationErrorKind::AspectRatio(value.to_string())).into()
        })
    }

    /// Frame size in pixels as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Portrait => (576, 1024),
            Self::Landscape => (1024, 576),
            Self::Square => (1024, 1024),
        }
    }
}
