//! Error types for the storyreel pipeline.
//!
//! This crate provides the foundation error types used throughout the storyreel workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Every error can be flattened into an [`ErrorReport`], the `{kind, message}`
//! pair surfaced to callers when a run fails.
//!
//! # Examples
//!
//! ```
//! use storyreel_error::{StoryreelResult, ValidationError, ValidationErrorKind};
//!
//! fn check_duration(seconds: u32) -> StoryreelResult<u32> {
//!     if seconds != 45 {
//!         Err(ValidationError::new(ValidationErrorKind::Duration(seconds)))?
//!     }
//!     Ok(seconds)
//! }
//!
//! assert!(check_duration(30).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembly;
mod config;
mod error;
mod exhausted;
mod external;
mod json;
mod report;
mod storage;
mod validation;
mod voice;

pub use assembly::{AssemblyError, AssemblyStage};
pub use config::ConfigError;
pub use error::{StoryreelError, StoryreelErrorKind, StoryreelResult};
pub use exhausted::{ExhaustedRetryError, RetryableError};
pub use external::{ExternalServiceError, ExternalServiceErrorKind};
pub use json::JsonError;
pub use report::{ErrorCategory, ErrorReport};
pub use storage::{StorageError, StorageErrorKind};
pub use validation::{OrderedSeconds, ValidationError, ValidationErrorKind};
pub use voice::{VoiceLifecycleError, VoiceLifecycleErrorKind};
