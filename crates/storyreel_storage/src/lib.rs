//! Per-run workspace storage for storyreel.
//!
//! Each run owns one directory. Every concurrent task writes to its own
//! index-keyed path inside it, so branches never contend for a file.
//!
//! ```text
//! output/<run-id>/
//! ├── scripts.json
//! ├── images/scene_00.png ...
//! ├── clips/segment_00.mp4 ...
//! ├── audio/narration.wav
//! ├── merged.mp4
//! ├── captions.ass
//! ├── captioned.mp4
//! └── with_soundtrack.mp4
//! ```
//!
//! Files left behind by a failed run are kept for debugging.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cleanup;
mod soundtrack;
mod workspace;

pub use cleanup::clean_videos;
pub use soundtrack::SoundtrackLibrary;
pub use storyreel_error::{StorageError, StorageErrorKind};
pub use workspace::RunWorkspace;
