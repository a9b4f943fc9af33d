//! Word timings and caption grouping.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A transcribed word with its position in the narration track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_new::new)]
pub struct WordTiming {
    /// The word as transcribed
    #[new(into)]
    pub word: String,
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
}

/// Make a transcription satisfy the timing invariants.
///
/// Starts become non-decreasing, every `end >= start`, and no time exceeds
/// `track_duration`. Clamps larger than `tolerance` are logged.
pub fn normalize_timings(
    words: Vec<WordTiming>,
    track_duration: f64,
    tolerance: f64,
) -> Vec<WordTiming> {
    let mut floor = 0.0_f64;
    let mut overshoot = 0.0_f64;
    let words: Vec<WordTiming> = words
        .into_iter()
        .map(|mut w| {
            overshoot = overshoot.max(w.end - track_duration);
            w.start = w.start.max(floor).min(track_duration);
            w.end = w.end.max(w.start).min(track_duration);
            floor = w.start;
            w
        })
        .collect();
    if overshoot > tolerance {
        warn!(
            overshoot,
            track_duration, "Transcript ran past the end of the narration track"
        );
    }
    words
}

/// When to close a caption group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptionRule {
    /// Maximum words per group
    pub max_words: usize,
    /// Silence, in seconds, that forces a new group
    pub max_gap: f64,
}

impl Default for CaptionRule {
    fn default() -> Self {
        Self {
            max_words: 2,
            max_gap: 0.6,
        }
    }
}

/// A run of words shown together on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionGroup {
    words: Vec<WordTiming>,
}

impl CaptionGroup {
    /// Words in this group.
    pub fn words(&self) -> &[WordTiming] {
        &self.words
    }

    /// Start of the first word.
    pub fn start(&self) -> f64 {
        self.words.first().map(|w| w.start).unwrap_or_default()
    }

    /// End of the last word.
    pub fn end(&self) -> f64 {
        self.words.last().map(|w| w.end).unwrap_or_default()
    }

    /// Caption text.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.word.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Split words into caption groups.
///
/// A group closes when it holds `max_words` words, or when the gap between
/// its last word and the next exceeds `max_gap`. Flattening the groups gives
/// back `words` unchanged.
///
/// # Examples
///
/// ```
/// use storyreel_core::{CaptionRule, WordTiming, group_captions};
///
/// let words = vec![
///     WordTiming::new("once", 0.0, 0.3),
///     WordTiming::new("upon", 0.3, 0.6),
///     WordTiming::new("a", 0.6, 0.7),
///     WordTiming::new("time", 2.0, 2.4),
/// ];
/// let groups = group_captions(&words, &CaptionRule { max_words: 3, max_gap: 0.5 });
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].text(), "once upon a");
/// ```
pub fn group_captions(words: &[WordTiming], rule: &CaptionRule) -> Vec<CaptionGroup> {
    let max_words = rule.max_words.max(1);
    let mut groups = Vec::new();
    let mut current: Vec<WordTiming> = Vec::with_capacity(max_words);

    for word in words {
        let gap_break = current
            .last()
            .is_some_and(|last| word.start - last.end > rule.max_gap);
        if current.len() >= max_words || gap_break {
            groups.push(CaptionGroup {
                words: std::mem::take(&mut current),
            });
        }
        current.push(word.clone());
    }
    if !current.is_empty() {
        groups.push(CaptionGroup { words: current });
    }
    groups
}
