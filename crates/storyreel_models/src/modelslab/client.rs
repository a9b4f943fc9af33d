//! ModelsLab REST client.

use super::{FetchBody, FetchResponse, Text2ImgBody, Text2ImgResponse};
use crate::http::{api_key, conversion, ensure_success, invalid, network};
use async_trait::async_trait;
use reqwest::Client;
use storyreel_core::JobStatus;
use storyreel_error::{ExternalServiceError, ExternalServiceErrorKind, StoryreelResult};
use storyreel_interface::{ImageGenerator, ImageRequest};
use storyreel_retry::ModelsLabConfig;
use tracing::{debug, instrument};

const SERVICE: &str = "modelslab";

/// ModelsLab client for scene images.
#[derive(Debug, Clone)]
pub struct ModelsLabClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ModelsLabClient {
    /// Creates a client with the key from `MODELSLAB_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set.
    #[instrument(skip_all)]
    pub fn new(config: &ModelsLabConfig) -> StoryreelResult<Self> {
        Ok(Self::with_api_key(api_key("MODELSLAB_API_KEY")?, config))
    }

    /// Creates a client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, config: &ModelsLabConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the submission body for a request.
    pub fn submit_body(&self, req: &ImageRequest) -> StoryreelResult<Text2ImgBody> {
        Text2ImgBody::builder()
            .key(self.api_key.clone())
            .prompt(req.prompt().clone())
            .negative_prompt(req.negative_prompt().clone())
            .width(req.width().to_string())
            .height(req.height().to_string())
            .enhance_style(req.enhance_style().clone())
            .build()
            .map_err(|e| conversion(SERVICE, format!("Failed to build request: {}", e)).into())
    }
}

#[async_trait]
impl ImageGenerator for ModelsLabClient {
    #[instrument(skip(self, req), fields(index = *req.index()))]
    async fn submit(&self, req: &ImageRequest) -> StoryreelResult<String> {
        let body = self.submit_body(req)?;
        let url = format!("{}/realtime/text2img", self.base_url);
        debug!(url = %url, "Submitting image job");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| network(SERVICE, e))?;
        let response = ensure_success(SERVICE, response).await?;

        let parsed: Text2ImgResponse = response
            .json()
            .await
            .map_err(|e| invalid(SERVICE, format!("Failed to parse submit response: {}", e)))?;

        match parsed.job_id() {
            Some(id) => {
                debug!(job_id = %id, "Image job accepted");
                Ok(id)
            }
            None => Err(ExternalServiceError::new(ExternalServiceErrorKind::Rejected {
                service: SERVICE,
                message: parsed.error_message(),
            })
            .into()),
        }
    }

    #[instrument(skip(self))]
    async fn poll(&self, job_id: &str) -> StoryreelResult<JobStatus> {
        let url = format!("{}/realtime/fetch/{}", self.base_url, job_id);
        let body = FetchBody {
            key: self.api_key.clone(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| network(SERVICE, e))?;
        let response = ensure_success(SERVICE, response).await?;

        let parsed: FetchResponse = response
            .json()
            .await
            .map_err(|e| invalid(SERVICE, format!("Failed to parse fetch response: {}", e)))?;

        let status = parsed
            .job_status()
            .ok_or_else(|| invalid(SERVICE, "success without output URL"))?;
        debug!(status = ?status, "Polled image job");
        Ok(status)
    }

    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> StoryreelResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network(SERVICE, e))?;
        let response = ensure_success(SERVICE, response).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| network(SERVICE, e))?;
        debug!(size = bytes.len(), "Downloaded image");
        Ok(bytes.to_vec())
    }
}
