//! Bounded retry and configuration for the storyreel pipeline.
//!
//! Every flaky call site (script generation, image submission, image polling)
//! goes through the same [`retry`] combinator with its own [`RetryPolicy`].
//! The policies, render constants and backend endpoints are loaded once at
//! startup into a [`StoryreelConfig`].
//!
//! Configuration sources, later overriding earlier:
//! - Bundled defaults (include_str! from storyreel.toml)
//! - `~/.config/storyreel/storyreel.toml`
//! - `./storyreel.toml`
//! - `STORYREEL_<SECTION>__<KEY>` environment variables

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod policy;

pub use config::{
    CaptionConfig, ElevenLabsConfig, ModelsLabConfig, NarrationConfig, OpenAiConfig,
    RenderConfig, RetryConfig, StorageConfig, StoryreelConfig,
};
pub use policy::{Backoff, RetryPolicy, retry};
