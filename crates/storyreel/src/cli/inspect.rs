//! Catalogue, cleanup and configuration commands.

use storyreel::{
    SoundtrackLibrary, StoryreelConfig, StoryreelResult, clean_videos, preset_names,
};

/// Print every preset voice name.
pub fn list_voices() {
    for name in preset_names() {
        println!("{}", name);
    }
}

/// Print every installed soundtrack id.
pub async fn list_soundtracks(config: &StoryreelConfig) -> StoryreelResult<()> {
    let library = SoundtrackLibrary::new(config.storage.soundtrack_dir.clone());
    for id in library.list().await? {
        println!("{}", id);
    }
    Ok(())
}

/// Remove rendered videos under the output directory.
pub async fn clean_outputs(config: &StoryreelConfig) -> StoryreelResult<()> {
    let removed = clean_videos(&config.storage.output_dir).await?;
    println!(
        "Removed {} video file(s) from {}",
        removed,
        config.storage.output_dir.display()
    );
    Ok(())
}

/// Print the effective configuration as TOML.
pub fn show_config(config: &StoryreelConfig) -> StoryreelResult<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
