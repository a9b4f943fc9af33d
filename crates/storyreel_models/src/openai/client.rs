//! OpenAI REST client.

use super::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole, TranscriptionResponse};
use crate::http::{api_key, conversion, ensure_success, invalid, network};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use storyreel_core::WordTiming;
use storyreel_error::{StorageError, StorageErrorKind, StoryreelResult};
use storyreel_interface::{TextGenerator, TextRequest, Transcriber};
use storyreel_retry::OpenAiConfig;
use tracing::{debug, instrument};

const SERVICE: &str = "openai";

/// OpenAI client for script generation and transcription.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    transcription_model: String,
}

impl OpenAiClient {
    /// Creates a client with the key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set.
    #[instrument(skip_all)]
    pub fn new(config: &OpenAiConfig) -> StoryreelResult<Self> {
        Ok(Self::with_api_key(api_key("OPENAI_API_KEY")?, config))
    }

    /// Creates a client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, config: &OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            chat_model: config.chat_model.clone(),
            transcription_model: config.transcription_model.clone(),
        }
    }

    /// Build the chat body for a text request.
    pub fn chat_request(&self, req: &TextRequest) -> StoryreelResult<ChatCompletionRequest> {
        let system = ChatMessage::builder()
            .role(ChatRole::System)
            .content(req.system_role().clone())
            .build()
            .map_err(|e| conversion(SERVICE, format!("Failed to build system message: {}", e)))?;
        let user = ChatMessage::builder()
            .role(ChatRole::User)
            .content(req.user_message())
            .build()
            .map_err(|e| conversion(SERVICE, format!("Failed to build user message: {}", e)))?;

        ChatCompletionRequest::builder()
            .model(self.chat_model.clone())
            .messages(vec![system, user])
            .build()
            .map_err(|e| conversion(SERVICE, format!("Failed to build request: {}", e)).into())
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    #[instrument(skip(self, req), fields(model = %self.chat_model, sentences = *req.target_sentence_count()))]
    async fn generate(&self, req: &TextRequest) -> StoryreelResult<String> {
        let body = self.chat_request(req)?;
        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| network(SERVICE, e))?;
        let response = ensure_success(SERVICE, response).await?;

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| invalid(SERVICE, format!("Failed to parse response: {}", e)))?;

        parsed
            .first_content()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| invalid(SERVICE, "response has no choices").into())
    }

    fn model_name(&self) -> &str {
        &self.chat_model
    }
}

#[async_trait]
impl Transcriber for OpenAiClient {
    #[instrument(skip(self), fields(model = %self.transcription_model, audio = %audio.display()))]
    async fn transcribe(&self, audio: &Path) -> StoryreelResult<Vec<WordTiming>> {
        let bytes = tokio::fs::read(audio).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", audio.display(), e)))
        })?;
        let file_name = audio
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("narration.wav")
            .to_string();

        let file = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/wav")
            .map_err(|e| conversion(SERVICE, e))?;
        let form = Form::new()
            .part("file", file)
            .text("model", self.transcription_model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word");

        let url = format!("{}/audio/transcriptions", self.base_url);
        debug!(url = %url, "Sending transcription request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| network(SERVICE, e))?;
        let response = ensure_success(SERVICE, response).await?;

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| invalid(SERVICE, format!("Failed to parse transcription: {}", e)))?;
        debug!(words = parsed.words().len(), "Received word timings");
        Ok(parsed.into_word_timings())
    }
}
