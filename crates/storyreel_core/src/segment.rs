//! Scene images and the motion clips rendered from them.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A generated scene image on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct SceneImage {
    /// Scene index
    index: usize,
    /// Image file
    path: PathBuf,
}

/// A fixed-duration motion clip rendered from one scene image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct Segment {
    /// Scene index
    index: usize,
    /// Image the clip was rendered from
    source_image: PathBuf,
    /// Rendered clip
    clip_path: PathBuf,
    /// Clip length in seconds
    duration: f64,
}
