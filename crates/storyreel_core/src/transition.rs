//! Transitions between consecutive segments and their timeline offsets.
//!
//! Segments are concatenated with overlapping transitions. Each transition
//! eats `transition` seconds from the boundary of its two clips, so edge `i`
//! (between segment `i` and `i + 1`) starts at
//! `(i + 1) * (segment - transition)` on the merged timeline.

use serde::{Deserialize, Serialize};
use storyreel_error::{StoryreelResult, ValidationError, ValidationErrorKind};

/// Visual transition between two clips.
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
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Fade through black
    #[strum(serialize = "fadeblack")]
    FadeToBlack,
    /// Fade through grayscale
    #[strum(serialize = "fadegrays")]
    FadeToGray,
    /// Pixelate out and in
    #[strum(serialize = "pixelize")]
    Pixelize,
    /// Straight crossfade
    #[strum(serialize = "fade")]
    Crossfade,
}

impl TransitionKind {
    /// Kinds chosen from when no preference is given.
    pub const DEFAULT_SET: [TransitionKind; 3] =
        [Self::FadeToBlack, Self::FadeToGray, Self::Crossfade];

    /// Name of the compositing effect.
    pub fn effect_name(&self) -> String {
        self.to_string()
    }
}

/// A transition between segment `from_index` and the one after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEdge {
    /// Index of the earlier segment
    pub from_index: usize,
    /// Transition effect
    pub kind: TransitionKind,
    /// Transition length in seconds
    pub duration: f64,
    /// Start of the transition on the merged timeline, in seconds
    pub offset: f64,
}

/// Timeline arithmetic for a run of equal-length segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPlan {
    segment: f64,
    transition: f64,
}

impl TransitionPlan {
    /// Build a plan, rejecting transitions that do not fit in a segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyreel_core::TransitionPlan;
    ///
    /// let plan = TransitionPlan::new(6.0, 1.0).unwrap();
    /// assert_eq!(plan.offset(0), 5.0);
    /// assert_eq!(plan.offset(2), 15.0);
    /// assert!(TransitionPlan::new(6.0, 6.0).is_err());
    /// ```
    #[track_caller]
    pub fn new(segment: f64, transition: f64) -> StoryreelResult<Self> {
        if !(segment > 0.0 && transition >= 0.0 && transition < segment) {
            return Err(ValidationError::new(ValidationErrorKind::Transition {
                segment: segment.into(),
                transition: transition.into(),
            })
            .into());
        }
        Ok(Self {
            segment,
            transition,
        })
    }

    /// Segment length in seconds.
    pub fn segment(&self) -> f64 {
        self.segment
    }

    /// Transition length in seconds.
    pub fn transition(&self) -> f64 {
        self.transition
    }

    /// Start time of edge `i`.
    pub fn offset(&self, i: usize) -> f64 {
        (i + 1) as f64 * (self.segment - self.transition)
    }

    /// Merged length of `n` segments.
    pub fn total_duration(&self, n: usize) -> f64 {
        if n == 0 {
            return 0.0;
        }
        n as f64 * self.segment - (n - 1) as f64 * self.transition
    }

    /// One edge per adjacent pair of `n` segments.
    ///
    /// `choose` picks the kind for each edge index.
    pub fn edges<F>(&self, n: usize, mut choose: F) -> Vec<TransitionEdge>
    where
        F: FnMut(usize) -> TransitionKind,
    {
        (0..n.saturating_sub(1))
            .map(|i| TransitionEdge {
                from_index: i,
                kind: choose(i),
                duration: self.transition,
                offset: self.offset(i),
            })
            .collect()
    }
}
