//! Synthesized narration audio.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One synthesized sentence as 16-bit mono PCM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSegment {
    index: usize,
    samples: Vec<i16>,
    sample_rate: u32,
}

impl AudioSegment {
    /// Wrap decoded samples for the sentence at `index`.
    pub fn new(index: usize, samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            index,
            samples,
            sample_rate,
        }
    }

    /// Decode little-endian 16-bit PCM bytes.
    ///
    /// A trailing odd byte is ignored.
    pub fn from_pcm_le(index: usize, bytes: &[u8], sample_rate: u32) -> Self {
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self::new(index, samples, sample_rate)
    }

    /// Sentence position in the narration script.
    pub fn index(&self) -> usize {
        self.index
    }

    /// PCM samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Samples per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// The persisted, concatenated narration for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationTrack {
    path: PathBuf,
    sample_rate: u32,
    segment_durations: Vec<f64>,
    duration: f64,
}

impl NarrationTrack {
    /// Describe a track written at `path`.
    pub fn new(path: PathBuf, sample_rate: u32, segment_durations: Vec<f64>, duration: f64) -> Self {
        Self {
            path,
            sample_rate,
            segment_durations,
            duration,
        }
    }

    /// Location of the WAV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Samples per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Per-sentence durations, in script order.
    pub fn segment_durations(&self) -> &[f64] {
        &self.segment_durations
    }

    /// Track length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}
