//! Child process execution.

use std::path::Path;
use std::process::Stdio;
use storyreel_error::{AssemblyError, AssemblyStage, StoryreelResult};
use tokio::process::Command;
use tracing::debug;

/// Last `lines` non-empty lines of a process's stderr.
pub fn stderr_tail(stderr: &[u8], lines: usize) -> String {
    let text = String::from_utf8_lossy(stderr);
    let kept: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    kept[kept.len().saturating_sub(lines)..].join("\n")
}

/// Run ffmpeg to completion and confirm it wrote `output`.
pub(crate) async fn run_ffmpeg(
    program: &Path,
    args: &[String],
    stage: AssemblyStage,
    output: &Path,
) -> StoryreelResult<()> {
    debug!(program = %program.display(), args = %args.join(" "), %stage, "Running ffmpeg");

    let result = Command::new(program)
        .args(["-hide_banner", "-loglevel", "error"])
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| {
            AssemblyError::new(stage, format!("failed to start {}: {}", program.display(), e))
        })?;

    if !result.status.success() {
        return Err(AssemblyError::new(
            stage,
            format!(
                "ffmpeg exited with {}: {}",
                result.status,
                stderr_tail(&result.stderr, 20)
            ),
        )
        .into());
    }

    if !tokio::fs::try_exists(output).await.unwrap_or(false) {
        return Err(AssemblyError::new(
            stage,
            format!("ffmpeg produced no output at {}", output.display()),
        )
        .into());
    }
    Ok(())
}
