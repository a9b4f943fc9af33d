//! Video and script generation handlers.

use crate::cli::GenerateArgs;
use std::sync::Arc;
use storyreel::{
    ConfigError, ContentStyle, JsonError, OpenAiClient, Orchestrator, PipelineState, RunRequest,
    ScriptGenerator, StoryreelConfig, StoryreelError, StoryreelResult, VideoDuration,
    default_backends,
};
use tracing::{info, warn};

/// Run the whole pipeline for one request.
///
/// Ctrl-C abandons the run; a cloned voice is still deleted on the way out.
pub async fn generate_video(args: GenerateArgs, config: StoryreelConfig) -> StoryreelResult<()> {
    let mut builder = RunRequest::builder();
    builder
        .topic(args.topic.clone())
        .duration(args.duration)
        .aspect_ratio(args.aspect_ratio)
        .style(args.style)
        .voice(args.voice_choice())
        .soundtrack(args.soundtrack_id());
    let request = builder
        .build()
        .map_err(|e| StoryreelError::from(ConfigError::new(format!("Incomplete request: {}", e))))?;

    let orchestrator = Orchestrator::new(default_backends(&config)?, config)?;
    let mut states = orchestrator.subscribe();
    let progress = tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            if !state.is_terminal() && state != PipelineState::Idle {
                eprintln!("... {}", state.name().replace('_', " "));
            }
        }
    });

    let outcome = tokio::select! {
        result = orchestrator.run(request) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };
    orchestrator.settle().await;
    drop(orchestrator);
    let _ = progress.await;

    match outcome {
        Some(Ok(run)) => {
            if args.json {
                let summary = serde_json::to_string_pretty(&run)
                    .map_err(|e| StoryreelError::from(JsonError::new(e.to_string())))?;
                println!("{}", summary);
            } else {
                println!("{}", run.final_path().display());
            }
            Ok(())
        }
        Some(Err(e)) => {
            if args.json {
                let report = serde_json::to_string_pretty(&e.report())
                    .map_err(|e| StoryreelError::from(JsonError::new(e.to_string())))?;
                println!("{}", report);
            }
            Err(e)
        }
        None => {
            warn!("Interrupted, run abandoned");
            Ok(())
        }
    }
}

/// Print one content-style script, a sentence per line.
pub async fn print_script(
    topic: &str,
    duration: VideoDuration,
    style: ContentStyle,
    config: StoryreelConfig,
) -> StoryreelResult<()> {
    let text = Arc::new(OpenAiClient::new(&config.openai)?);
    let generator = ScriptGenerator::new(text, config.retry.script)?;
    let script = generator.generate_styled(topic, duration, style).await?;
    info!(sentences = script.len(), content_style = %style, "Script ready");
    for sentence in script.sentences() {
        println!("{}", sentence);
    }
    Ok(())
}
