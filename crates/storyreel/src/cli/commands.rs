//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use storyreel::{AspectRatio, ContentStyle, SoundtrackId, Style, VideoDuration, VoiceChoice};

/// Storyreel - narrated short videos from a one-line topic
#[derive(Parser, Debug)]
#[command(name = "storyreel")]
#[command(about = "Narrated, captioned short videos from a one-line topic", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file, replacing the user and local config files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a video
    Generate(GenerateArgs),

    /// Print a single script in a content style
    Script {
        /// Story topic
        #[arg(long)]
        topic: String,

        /// Video length in seconds (45, 60 or 75)
        #[arg(long, default_value = "45", value_parser = parse_duration)]
        duration: VideoDuration,

        /// Content style
        #[arg(long, default_value = "custom", value_parser = parse_content_style)]
        content_style: ContentStyle,
    },

    /// List preset voices
    Voices,

    /// List installed soundtracks
    Soundtracks,

    /// Remove rendered videos from the output directory
    Clean,

    /// Print the effective configuration
    Config,
}

/// Arguments for `generate`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Story topic
    #[arg(long)]
    pub topic: String,

    /// Video length in seconds (45, 60 or 75)
    #[arg(long, default_value = "45", value_parser = parse_duration)]
    pub duration: VideoDuration,

    /// Frame shape (9:16, 16:9 or 1:1)
    #[arg(long, default_value = "9:16", value_parser = parse_aspect_ratio)]
    pub aspect_ratio: AspectRatio,

    /// Image style
    #[arg(long, default_value = "anime", value_parser = parse_style)]
    pub style: Style,

    /// Preset voice name
    #[arg(long, default_value = "brian", conflicts_with = "clone_name")]
    pub voice: String,

    /// Name for a cloned voice; requires at least one --sample
    #[arg(long, requires = "samples")]
    pub clone_name: Option<String>,

    /// Voice sample file for cloning
    #[arg(long = "sample", value_name = "FILE")]
    pub samples: Vec<PathBuf>,

    /// Background track id
    #[arg(long)]
    pub soundtrack: Option<String>,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Voice selected by the flags.
    pub fn voice_choice(&self) -> VoiceChoice {
        match &self.clone_name {
            Some(name) => VoiceChoice::Clone {
                name: name.clone(),
                samples: self.samples.clone(),
            },
            None => VoiceChoice::Preset(self.voice.clone()),
        }
    }

    /// Soundtrack selected by the flags.
    pub fn soundtrack_id(&self) -> Option<SoundtrackId> {
        self.soundtrack.as_deref().map(SoundtrackId::new)
    }
}

fn parse_duration(value: &str) -> Result<VideoDuration, String> {
    let seconds: u32 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    VideoDuration::from_seconds(seconds).map_err(|e| e.report().message)
}

fn parse_aspect_ratio(value: &str) -> Result<AspectRatio, String> {
    AspectRatio::parse(value).map_err(|e| e.report().message)
}

fn parse_style(value: &str) -> Result<Style, String> {
    Style::parse(value).map_err(|e| e.report().message)
}

fn parse_content_style(value: &str) -> Result<ContentStyle, String> {
    ContentStyle::parse(value).map_err(|e| e.report().message)
}
