//! ffmpeg rendering engine for storyreel.
//!
//! [`FfmpegEngine`] implements the pipeline's render engine by building
//! argument vectors and running `ffmpeg` as a child process. The argument
//! builders in [`args`] are pure so the exact command lines can be tested
//! without ffmpeg installed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod args;
mod ass;
mod engine;
mod process;
mod settings;

pub use ass::render_ass;
pub use engine::FfmpegEngine;
pub use process::stderr_tail;
pub use settings::FfmpegSettings;
