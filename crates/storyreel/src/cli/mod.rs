//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyreel binary.

mod commands;
mod generate;
mod inspect;

pub use commands::{Cli, Commands, GenerateArgs};
pub use generate::{generate_video, print_script};
pub use inspect::{clean_outputs, list_soundtracks, list_voices, show_config};
