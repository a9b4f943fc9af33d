//! Background music lookup.

use std::path::{Path, PathBuf};
use storyreel_core::SoundtrackId;
use storyreel_error::{StorageError, StorageErrorKind, StoryreelResult, ValidationError, ValidationErrorKind};

/// Directory of `<id>.mp3` background tracks.
#[derive(Debug, Clone)]
pub struct SoundtrackLibrary {
    dir: PathBuf,
}

impl SoundtrackLibrary {
    /// Library rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Library directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the track for `id`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no such track exists.
    pub async fn resolve(&self, id: &SoundtrackId) -> StoryreelResult<PathBuf> {
        let path = self.dir.join(format!("{}.mp3", id.as_str()));
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!(path = %path.display(), "Resolved soundtrack");
            Ok(path)
        } else {
            Err(ValidationError::new(ValidationErrorKind::Soundtrack(format!(
                "no track '{}' in {}",
                id.as_str(),
                self.dir.display()
            )))
            .into())
        }
    }

    /// Ids of every available track, sorted.
    pub async fn list(&self) -> StoryreelResult<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", self.dir.display(), e)))
        })?;

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", self.dir.display(), e)))
        })? {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "mp3") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}
