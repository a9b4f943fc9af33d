//! ElevenLabs REST client.

use super::{SpeechBody, VoiceAddResponse};
use crate::http::{api_key, conversion, ensure_success, invalid, network};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use storyreel_core::AudioSegment;
use storyreel_error::{
    StoryreelResult, ValidationError, ValidationErrorKind, VoiceLifecycleError,
    VoiceLifecycleErrorKind,
};
use storyreel_interface::{SpeechRequest, SpeechSynthesizer, VoiceCloneService};
use storyreel_retry::ElevenLabsConfig;
use tracing::{debug, info, instrument};

const SERVICE: &str = "elevenlabs";

/// ElevenLabs client for cloning voices and synthesizing narration.
#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    client: Client,
    api_key: String,
    base_url: String,
    model_id: String,
    sample_rate: u32,
}

impl ElevenLabsClient {
    /// Creates a client with the key from `ELEVENLABS_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set.
    #[instrument(skip_all)]
    pub fn new(config: &ElevenLabsConfig) -> StoryreelResult<Self> {
        Ok(Self::with_api_key(api_key("ELEVENLABS_API_KEY")?, config))
    }

    /// Creates a client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, config: &ElevenLabsConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_id: config.model_id.clone(),
            sample_rate: config.sample_rate,
        }
    }

    /// Synthesis URL for a voice. Raw little-endian PCM keeps decoding local.
    pub fn speech_url(&self, voice_id: &str) -> String {
        format!(
            "{}/text-to-speech/{}?output_format=pcm_{}",
            self.base_url, voice_id, self.sample_rate
        )
    }

    /// Build the synthesis body for a request.
    pub fn speech_body(&self, req: &SpeechRequest) -> StoryreelResult<SpeechBody> {
        SpeechBody::builder()
            .text(req.text().clone())
            .model_id(self.model_id.clone())
            .previous_text(req.previous_text().clone())
            .next_text(req.next_text().clone())
            .build()
            .map_err(|e| conversion(SERVICE, format!("Failed to build speech body: {}", e)).into())
    }

    async fn sample_part(path: &Path) -> StoryreelResult<Part> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ValidationError::new(ValidationErrorKind::SampleFile(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("sample")
            .to_string();
        let mime = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("wav") => "audio/wav",
            _ => "audio/mpeg",
        };
        Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| conversion(SERVICE, e).into())
    }
}

#[async_trait]
impl VoiceCloneService for ElevenLabsClient {
    #[instrument(skip(self, samples), fields(samples = samples.len()))]
    async fn create(&self, samples: &[PathBuf], name: &str) -> StoryreelResult<String> {
        let mut form = Form::new()
            .text("name", name.to_string())
            .text("description", "Temporary cloned voice");
        for sample in samples {
            form = form.part("files", Self::sample_part(sample).await?);
        }

        let url = format!("{}/voices/add", self.base_url);
        debug!(url = %url, "Sending voice clone request");

        let create_failed =
            |message: String| VoiceLifecycleError::new(VoiceLifecycleErrorKind::CreateFailed(message));

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| create_failed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(create_failed(format!("HTTP {}: {}", status, body)).into());
        }

        let parsed: VoiceAddResponse = response
            .json()
            .await
            .map_err(|e| create_failed(format!("Failed to parse response: {}", e)))?;
        info!(voice_id = %parsed.voice_id(), "Created cloned voice");
        Ok(parsed.voice_id().clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, voice_id: &str) -> StoryreelResult<()> {
        let url = format!("{}/voices/{}", self.base_url, voice_id);
        let delete_failed = |message: String| {
            VoiceLifecycleError::new(VoiceLifecycleErrorKind::DeleteFailed {
                voice_id: voice_id.to_string(),
                message,
            })
        };

        let response = self
            .client
            .delete(&url)
            .header("xi-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| delete_failed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(delete_failed(format!("HTTP {}: {}", status, body)).into());
        }

        info!("Deleted cloned voice");
        Ok(())
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    #[instrument(skip(self, req), fields(index = *req.index()))]
    async fn synthesize(&self, req: &SpeechRequest) -> StoryreelResult<AudioSegment> {
        let body = self.speech_body(req)?;
        let url = self.speech_url(req.voice_id());
        debug!(url = %url, "Sending speech request");

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| network(SERVICE, e))?;
        let response = ensure_success(SERVICE, response).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| invalid(SERVICE, format!("Failed to read audio: {}", e)))?;
        if bytes.is_empty() {
            return Err(invalid(SERVICE, "empty audio body").into());
        }

        let segment = AudioSegment::from_pcm_le(*req.index(), &bytes, self.sample_rate);
        debug!(duration = segment.duration(), "Received speech segment");
        Ok(segment)
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
