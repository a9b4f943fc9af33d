//! Storyreel CLI binary.
//!
//! This binary provides command-line access to storyreel:
//! - Generate a narrated, captioned video from a topic
//! - Print a single content-style script
//! - Inspect voices, soundtracks and configuration
//! - Clean rendered videos

use clap::Parser;
use storyreel::StoryreelConfig;
use storyreel::observability::{ObservabilityConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, clean_outputs, generate_video, list_soundtracks, list_voices,
        print_script, show_config,
    };

    // API keys may live in .env
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut observability = ObservabilityConfig::default().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability(observability)?;

    let config = match &cli.config {
        Some(path) => StoryreelConfig::from_file(path)?,
        None => StoryreelConfig::load()?,
    };

    // Execute the requested command
    match cli.command {
        Commands::Generate(args) => {
            generate_video(args, config).await?;
        }

        Commands::Script {
            topic,
            duration,
            content_style,
        } => {
            print_script(&topic, duration, content_style, config).await?;
        }

        Commands::Voices => list_voices(),

        Commands::Soundtracks => {
            list_soundtracks(&config).await?;
        }

        Commands::Clean => {
            clean_outputs(&config).await?;
        }

        Commands::Config => {
            show_config(&config)?;
        }
    }

    Ok(())
}
