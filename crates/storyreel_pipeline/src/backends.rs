//! The set of backends a run talks to.

use std::sync::Arc;
use storyreel_interface::{
    ImageGenerator, RenderEngine, SpeechSynthesizer, TextGenerator, Transcriber,
    VoiceCloneService,
};

/// Shared handles to every external collaborator.
#[derive(Clone)]
pub struct Backends {
    /// Script generation
    pub text: Arc<dyn TextGenerator>,
    /// Voice cloning
    pub voices: Arc<dyn VoiceCloneService>,
    /// Narration synthesis
    pub speech: Arc<dyn SpeechSynthesizer>,
    /// Scene images
    pub images: Arc<dyn ImageGenerator>,
    /// Word timings
    pub transcriber: Arc<dyn Transcriber>,
    /// Media rendering
    pub engine: Arc<dyn RenderEngine>,
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("text", &self.text.model_name())
            .finish_non_exhaustive()
    }
}
