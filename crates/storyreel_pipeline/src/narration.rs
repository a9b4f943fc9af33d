//! Narration synthesis, one request per sentence.

use futures::{StreamExt, TryStreamExt, stream};
use std::sync::Arc;
use storyreel_core::{AudioSegment, NarrationTrack, Script, VoiceSpec};
use storyreel_error::{ExternalServiceError, ExternalServiceErrorKind, StoryreelResult};
use storyreel_interface::{SpeechRequest, SpeechSynthesizer};
use storyreel_storage::RunWorkspace;
use tracing::{info, instrument};

/// Turns a narration script into one continuous track.
pub struct NarrationSynthesizer {
    speech: Arc<dyn SpeechSynthesizer>,
    concurrency: usize,
}

impl NarrationSynthesizer {
    /// Synthesizer issuing at most `concurrency` requests at once.
    pub fn new(speech: Arc<dyn SpeechSynthesizer>, concurrency: usize) -> Self {
        Self {
            speech,
            concurrency: concurrency.max(1),
        }
    }

    fn requests(script: &Script, voice: &VoiceSpec) -> StoryreelResult<Vec<SpeechRequest>> {
        script
            .sentences()
            .iter()
            .enumerate()
            .map(|(i, sentence)| {
                SpeechRequest::builder()
                    .index(i)
                    .text(sentence.clone())
                    .voice_id(voice.voice_id())
                    .previous_text(script.preceding(i))
                    .next_text(script.following(i))
                    .build()
                    .map_err(|e| {
                        ExternalServiceError::new(ExternalServiceErrorKind::RequestConversion {
                            service: "speech",
                            message: e.to_string(),
                        })
                        .into()
                    })
            })
            .collect()
    }

    /// Synthesize every sentence and write the concatenated track.
    ///
    /// Each request carries the text before and after it so prosody carries
    /// across segment boundaries. Segments are joined in script order
    /// regardless of completion order. Any failed sentence fails the track.
    #[instrument(skip_all, fields(sentences = script.len(), voice_id = voice.voice_id()))]
    pub async fn synthesize(
        &self,
        script: &Script,
        voice: &VoiceSpec,
        workspace: &RunWorkspace,
    ) -> StoryreelResult<NarrationTrack> {
        let requests = Self::requests(script, voice)?;
        let segments: Vec<AudioSegment> = stream::iter(requests.into_iter().map(|req| {
            let speech = self.speech.clone();
            async move { speech.synthesize(&req).await }
        }))
        .buffered(self.concurrency)
        .try_collect()
        .await?;

        let track = workspace
            .write_narration(&segments, self.speech.sample_rate())
            .await?;
        info!(duration = track.duration(), "Narration complete");
        Ok(track)
    }
}
