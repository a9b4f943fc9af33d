//! Run directory layout and atomic writes.

use serde::Serialize;
use std::path::{Path, PathBuf};
use storyreel_core::{AudioSegment, NarrationTrack};
use storyreel_error::{JsonError, StorageError, StorageErrorKind, StoryreelResult};
use uuid::Uuid;

/// Directory holding every artifact of one run.
#[derive(Debug, Clone)]
pub struct RunWorkspace {
    run_id: String,
    root: PathBuf,
}

impl RunWorkspace {
    /// Create a fresh workspace under `output_dir` with a random run id.
    ///
    /// # Errors
    ///
    /// Returns error if the directories cannot be created.
    pub async fn create(output_dir: impl AsRef<Path>) -> StoryreelResult<Self> {
        Self::with_id(output_dir, Uuid::new_v4().simple().to_string()).await
    }

    /// Create (or reopen) the workspace for a known run id.
    #[tracing::instrument(
        skip(output_dir, run_id),
        fields(output_dir = %output_dir.as_ref().display())
    )]
    pub async fn with_id(
        output_dir: impl AsRef<Path>,
        run_id: impl Into<String>,
    ) -> StoryreelResult<Self> {
        let run_id = run_id.into();
        let root = output_dir.as_ref().join(&run_id);

        for dir in [root.join("images"), root.join("clips"), root.join("audio")] {
            tokio::fs::create_dir_all(&dir).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            })?;
        }

        tracing::info!(run_id = %run_id, path = %root.display(), "Created run workspace");
        Ok(Self { run_id, root })
    }

    /// Run identifier.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scene image for `index`.
    pub fn image_path(&self, index: usize) -> PathBuf {
        self.root.join("images").join(format!("scene_{:02}.png", index))
    }

    /// Rendered clip for `index`.
    pub fn clip_path(&self, index: usize) -> PathBuf {
        self.root.join("clips").join(format!("segment_{:02}.mp4", index))
    }

    /// Concatenated narration.
    pub fn narration_path(&self) -> PathBuf {
        self.root.join("audio").join("narration.wav")
    }

    /// Clips merged with transitions.
    pub fn merged_path(&self) -> PathBuf {
        self.root.join("merged.mp4")
    }

    /// Merged video with captions and narration.
    pub fn captioned_path(&self) -> PathBuf {
        self.root.join("captioned.mp4")
    }

    /// Captioned video with background music.
    pub fn soundtrack_path(&self) -> PathBuf {
        self.root.join("with_soundtrack.mp4")
    }

    /// Generated scripts, for inspection.
    pub fn scripts_path(&self) -> PathBuf {
        self.root.join("scripts.json")
    }

    /// Write bytes via a temp file and rename.
    #[tracing::instrument(skip(self, data), fields(size = data.len(), path = %path.display()))]
    pub async fn write_atomic(&self, path: &Path, data: &[u8]) -> StoryreelResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::debug!("Wrote artifact");
        Ok(())
    }

    /// Serialize `value` as pretty JSON to `path`.
    pub async fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> StoryreelResult<()> {
        let json = serde_json::to_vec_pretty(value)
            .map_err(|e| JsonError::new(format!("Failed to serialize {}: {}", path.display(), e)))?;
        self.write_atomic(path, &json).await
    }

    /// Concatenate segments in the order given and persist them as one WAV.
    ///
    /// Callers pass segments already sorted by script index.
    #[tracing::instrument(skip(self, segments), fields(segments = segments.len()))]
    pub async fn write_narration(
        &self,
        segments: &[AudioSegment],
        sample_rate: u32,
    ) -> StoryreelResult<NarrationTrack> {
        if let Some(bad) = segments.iter().find(|s| s.sample_rate() != sample_rate) {
            return Err(StorageError::new(StorageErrorKind::Audio(format!(
                "segment {} has sample rate {}, expected {}",
                bad.index(),
                bad.sample_rate(),
                sample_rate
            )))
            .into());
        }

        let durations: Vec<f64> = segments.iter().map(AudioSegment::duration).collect();
        let samples: Vec<i16> = segments
            .iter()
            .flat_map(|s| s.samples().iter().copied())
            .collect();
        let total_samples = samples.len();

        let path = self.narration_path();
        let temp_path = path.with_extension("wav.tmp");
        let write_path = temp_path.clone();
        tokio::task::spawn_blocking(move || write_wav(&write_path, &samples, sample_rate))
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Audio(e.to_string())))??;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        let duration = total_samples as f64 / sample_rate.max(1) as f64;
        tracing::info!(path = %path.display(), duration, "Stored narration track");
        Ok(NarrationTrack::new(path, sample_rate, durations, duration))
    }

    /// Fail unless `path` exists and is non-empty.
    pub async fn require(&self, path: &Path) -> StoryreelResult<()> {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.len() > 0 => Ok(()),
            Ok(_) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{} is empty",
                path.display()
            )))
            .into()),
            Err(_) => {
                Err(StorageError::new(StorageErrorKind::NotFound(path.display().to_string())).into())
            }
        }
    }
}

fn write_wav(path: &Path, samples: &[i16], sample_rate: u32) -> StoryreelResult<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let audio_err = |e: hound::Error| {
        StorageError::new(StorageErrorKind::Audio(format!("{}: {}", path.display(), e)))
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(audio_err)?;
    for sample in samples {
        writer.write_sample(*sample).map_err(audio_err)?;
    }
    writer.finalize().map_err(audio_err)?;
    Ok(())
}
