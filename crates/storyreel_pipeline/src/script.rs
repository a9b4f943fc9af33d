//! Narration and scene script generation.

use crate::prompts::{narration_request, scene_request, styled_request};
use std::sync::Arc;
use storyreel_core::{ContentStyle, Script, ScriptKind, SentenceParser, VideoDuration};
use storyreel_error::{ExternalServiceError, ExternalServiceErrorKind, StoryreelResult};
use storyreel_interface::{TextGenerator, TextRequest};
use storyreel_retry::{RetryPolicy, retry};
use tracing::{debug, info, instrument};

/// Produces scripts with exactly the sentence count a duration demands.
pub struct ScriptGenerator {
    text: Arc<dyn TextGenerator>,
    parser: SentenceParser,
    policy: RetryPolicy,
}

impl ScriptGenerator {
    /// Generator over `text`, retrying under `policy`.
    pub fn new(text: Arc<dyn TextGenerator>, policy: RetryPolicy) -> StoryreelResult<Self> {
        Ok(Self {
            text,
            parser: SentenceParser::new()?,
            policy,
        })
    }

    /// Generate the narration and scene scripts concurrently.
    ///
    /// Both scripts have `duration.sentence_count()` sentences. A response
    /// with any other count is discarded and requested again.
    #[instrument(skip(self), fields(model = self.text.model_name()))]
    pub async fn generate(
        &self,
        topic: &str,
        duration: VideoDuration,
    ) -> StoryreelResult<(Script, Script)> {
        let sentences = duration.sentence_count();
        let narration_req = narration_request(topic, sentences)?;
        let scene_req = scene_request(topic, sentences)?;

        let (narration, scene) = tokio::try_join!(
            self.request(&narration_req, ScriptKind::Narration),
            self.request(&scene_req, ScriptKind::Scene),
        )?;
        info!(sentences, "Generated scripts");
        Ok((narration, scene))
    }

    /// Generate a single narration-register script in a content style.
    #[instrument(skip(self), fields(model = self.text.model_name()))]
    pub async fn generate_styled(
        &self,
        topic: &str,
        duration: VideoDuration,
        style: ContentStyle,
    ) -> StoryreelResult<Script> {
        let req = styled_request(topic, duration.sentence_count(), style)?;
        self.request(&req, ScriptKind::Narration).await
    }

    async fn request(&self, req: &TextRequest, kind: ScriptKind) -> StoryreelResult<Script> {
        let expected = *req.target_sentence_count();
        let operation = format!("{} script", kind);
        let text = &self.text;
        let parser = &self.parser;

        retry(&self.policy, &operation, move || async move {
            let raw = text.generate(req).await?;
            let script = parser.parse(kind, &raw);
            if script.len() != expected {
                debug!(expected, actual = script.len(), "Wrong sentence count");
                return Err(ExternalServiceError::new(ExternalServiceErrorKind::SentenceCount {
                    expected,
                    actual: script.len(),
                })
                .into());
            }
            Ok(script)
        })
        .await
    }
}
