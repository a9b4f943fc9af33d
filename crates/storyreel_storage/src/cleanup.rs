//! Removal of finished videos from an output directory.

use std::path::Path;
use storyreel_error::{StorageError, StorageErrorKind, StoryreelResult};

/// Delete every `.mp4` directly inside `dir`, and inside each run
/// directory one level below it.
///
/// Returns the number of files removed. A missing directory removes
/// nothing.
#[tracing::instrument(fields(dir = %dir.display()))]
pub async fn clean_videos(dir: &Path) -> StoryreelResult<usize> {
    if !tokio::fs::try_exists(dir).await.unwrap_or(false) {
        tracing::debug!("Output directory does not exist");
        return Ok(0);
    }

    let mut removed = remove_videos_in(dir).await?;

    let mut entries = read_dir(dir).await?;
    while let Some(entry) = next_entry(&mut entries, dir).await? {
        let path = entry.path();
        if path.is_dir() {
            removed += remove_videos_in(&path).await?;
        }
    }

    tracing::info!(removed, "Cleaned output videos");
    Ok(removed)
}

async fn remove_videos_in(dir: &Path) -> StoryreelResult<usize> {
    let mut removed = 0;
    let mut entries = read_dir(dir).await?;
    while let Some(entry) = next_entry(&mut entries, dir).await? {
        let path = entry.path();
        let is_video = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"));
        if is_video && path.is_file() {
            tokio::fs::remove_file(&path).await.map_err(|e| {
                StorageError::new(StorageErrorKind::Remove(format!("{}: {}", path.display(), e)))
            })?;
            tracing::debug!(path = %path.display(), "Removed video");
            removed += 1;
        }
    }
    Ok(removed)
}

async fn read_dir(dir: &Path) -> StoryreelResult<tokio::fs::ReadDir> {
    tokio::fs::read_dir(dir).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", dir.display(), e))).into()
    })
}

async fn next_entry(
    entries: &mut tokio::fs::ReadDir,
    dir: &Path,
) -> StoryreelResult<Option<tokio::fs::DirEntry>> {
    entries.next_entry().await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", dir.display(), e))).into()
    })
}
