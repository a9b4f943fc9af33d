//! Optional background track.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use storyreel_core::SoundtrackId;
use storyreel_error::StoryreelResult;
use storyreel_interface::{MixSpec, RenderEngine};
use storyreel_storage::{RunWorkspace, SoundtrackLibrary};
use tracing::{debug, info, instrument};

/// Loops an installed track quietly under the narration.
pub struct SoundtrackMixer {
    engine: Arc<dyn RenderEngine>,
    library: SoundtrackLibrary,
    volume: f64,
}

impl SoundtrackMixer {
    /// Mixer drawing tracks from `library` at `volume`.
    pub fn new(engine: Arc<dyn RenderEngine>, library: SoundtrackLibrary, volume: f64) -> Self {
        Self {
            engine,
            library,
            volume,
        }
    }

    /// Installed tracks.
    pub fn library(&self) -> &SoundtrackLibrary {
        &self.library
    }

    /// Mix `soundtrack` under `captioned`, or pass it through when none is chosen.
    #[instrument(skip(self, workspace), fields(video = %captioned.display()))]
    pub async fn mix(
        &self,
        captioned: &Path,
        soundtrack: Option<&SoundtrackId>,
        workspace: &RunWorkspace,
    ) -> StoryreelResult<PathBuf> {
        let Some(id) = soundtrack else {
            debug!("No soundtrack requested");
            return Ok(captioned.to_path_buf());
        };

        let track = self.library.resolve(id).await?;
        let output = workspace.soundtrack_path();
        let spec = MixSpec::new(
            captioned.to_path_buf(),
            track,
            self.volume,
            output.clone(),
        );
        self.engine.mix_soundtrack(&spec).await?;
        workspace.require(&output).await?;
        info!(soundtrack = %id, "Soundtrack mixed");
        Ok(output)
    }
}
