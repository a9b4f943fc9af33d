//! Narration voices: the preset catalogue and per-run voice specs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A stock voice from the speech backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PresetVoice {
    /// Name callers select
    pub name: &'static str,
    /// Backend voice identifier
    pub voice_id: &'static str,
}

static PRESET_VOICES: &[PresetVoice] = &[
    PresetVoice { name: "alice", voice_id: "Xb7hH8MSUJpSbSDYk0k2" },
    PresetVoice { name: "aria", voice_id: "9BWtsMINqrJLrRacOk9x" },
    PresetVoice { name: "bill", voice_id: "pqHfZKP75CvOlQylNhV4" },
    PresetVoice { name: "brian", voice_id: "nPczCjzI2devNBz1zQrb" },
    PresetVoice { name: "callum", voice_id: "N2lVS1w4EtoT3dr4eOWO" },
    PresetVoice { name: "charlie", voice_id: "IKne3meq5aSn9XLyUdCD" },
    PresetVoice { name: "charlotte", voice_id: "XB0fDUnXU5powFXDhCwa" },
    PresetVoice { name: "chris", voice_id: "iP95p4xoKVk53GoZ742B" },
    PresetVoice { name: "daniel", voice_id: "onwK4e9ZLuTAKqWW03F9" },
    PresetVoice { name: "eric", voice_id: "cjVigY5qzO86Huf0OWal" },
    PresetVoice { name: "george", voice_id: "JBFqnCBsd6RMkjVDRZzb" },
    PresetVoice { name: "jessica", voice_id: "cgSgspJ2msm6clMCkdW9" },
    PresetVoice { name: "laura", voice_id: "FGY2WhTYpPnrIDTdsKH5" },
    PresetVoice { name: "liam", voice_id: "TX3LPaxmHKxFdv7VOQHJ" },
    PresetVoice { name: "lily", voice_id: "pFZP5JQG7iQjIQuC4Bku" },
    PresetVoice { name: "matilda", voice_id: "XrExE9yKIg1WjnnlVkGX" },
    PresetVoice { name: "river", voice_id: "SAz9YHcvj6GT2YYXdXww" },
    PresetVoice { name: "roger", voice_id: "CwhRBWXzGAHq8TQ4Fs17" },
    PresetVoice { name: "sarah", voice_id: "EXAVITQu4vr4xnSDxMaL" },
    PresetVoice { name: "will", voice_id: "bIHbv24MWmeRgasZH58o" },
];

/// Look up a preset voice by name (case-insensitive).
///
/// # Examples
///
/// ```
/// use storyreel_core::preset_voice;
///
/// assert_eq!(preset_voice("Brian").unwrap().voice_id, "nPczCjzI2devNBz1zQrb");
/// assert!(preset_voice("hal").is_none());
/// ```
pub fn preset_voice(name: &str) -> Option<&'static PresetVoice> {
    let name = name.trim();
    PRESET_VOICES
        .iter()
        .find(|v| v.name.eq_ignore_ascii_case(name))
}

/// Names of every preset voice, in catalogue order.
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESET_VOICES.iter().map(|v| v.name)
}

/// The voice a run narrates with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoiceSpec {
    /// Catalogue voice, nothing to clean up
    Preset {
        /// Catalogue name
        name: String,
        /// Backend voice identifier
        catalog_id: String,
    },
    /// Voice cloned from caller samples for this run only
    Cloned {
        /// Backend voice identifier
        id: String,
        /// Samples the clone was built from
        sample_files: Vec<PathBuf>,
        /// When the clone was created
        created_at: DateTime<Utc>,
    },
}

impl VoiceSpec {
    /// Build a preset spec from a catalogue row.
    pub fn preset(voice: &PresetVoice) -> Self {
        Self::Preset {
            name: voice.name.to_string(),
            catalog_id: voice.voice_id.to_string(),
        }
    }

    /// A freshly cloned voice, stamped with the current time.
    pub fn cloned(id: impl Into<String>, sample_files: Vec<PathBuf>) -> Self {
        Self::Cloned {
            id: id.into(),
            sample_files,
            created_at: Utc::now(),
        }
    }

    /// Backend identifier to synthesize with.
    pub fn voice_id(&self) -> &str {
        match self {
            Self::Preset { catalog_id, .. } => catalog_id,
            Self::Cloned { id, .. } => id,
        }
    }

    /// Whether this voice must be deleted after the run.
    pub fn is_cloned(&self) -> bool {
        matches!(self, Self::Cloned { .. })
    }
}
