//! ModelsLab API data transfer objects.
//!
//! The realtime API reports success or failure in a `status` field of a
//! 200 response, and returns job ids as numbers or strings depending on the
//! endpoint.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storyreel_core::JobStatus;

/// Body of `POST /realtime/text2img`.
///
/// Dimensions are sent as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct Text2ImgBody {
    /// API key
    key: String,
    /// Positive prompt
    prompt: String,
    /// Negative prompt
    negative_prompt: String,
    /// Width in pixels
    width: String,
    /// Height in pixels
    height: String,
    /// Images per job
    #[builder(default = "1")]
    samples: u32,
    /// Safety filter
    #[builder(default = "false")]
    safety_checker: bool,
    /// Let the backend rewrite the prompt
    #[builder(default = "true")]
    enhance_prompt: bool,
    /// Backend style preset
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    enhance_style: Option<String>,
}

impl Text2ImgBody {
    /// Creates a new builder for `Text2ImgBody`.
    pub fn builder() -> Text2ImgBodyBuilder {
        Text2ImgBodyBuilder::default()
    }
}

/// Body of `POST /realtime/fetch/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchBody {
    /// API key
    pub key: String,
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Response of `POST /realtime/text2img`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Text2ImgResponse {
    /// `success`, `processing` or `error`
    status: String,
    /// Job id
    #[serde(default)]
    id: Option<Value>,
    /// Result URLs, when the job finished inline
    #[serde(default)]
    output: Vec<String>,
    /// Error detail
    #[serde(default)]
    message: Option<Value>,
}

impl Text2ImgResponse {
    /// Job id as text, if the submission was accepted.
    pub fn job_id(&self) -> Option<String> {
        match self.status.as_str() {
            "success" | "processing" => self.id.as_ref().map(value_text),
            _ => None,
        }
    }

    /// Backend error detail.
    pub fn error_message(&self) -> String {
        self.message
            .as_ref()
            .map(value_text)
            .unwrap_or_else(|| format!("status '{}'", self.status))
    }
}

/// Response of `POST /realtime/fetch/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct FetchResponse {
    /// `success`, `processing`, `failed` or `error`
    status: String,
    /// Result URLs
    #[serde(default)]
    output: Vec<String>,
    /// Error detail
    #[serde(default)]
    message: Option<Value>,
}

impl FetchResponse {
    /// Interpret the response as a poll result.
    ///
    /// Returns `None` when the backend claims success without a URL.
    pub fn job_status(&self) -> Option<JobStatus> {
        match self.status.as_str() {
            "success" => self
                .output
                .first()
                .map(|url| JobStatus::Ready { url: url.clone() }),
            "processing" | "queued" | "pending" => Some(JobStatus::Pending),
            _ => Some(JobStatus::Failed {
                reason: self
                    .message
                    .as_ref()
                    .map(value_text)
                    .unwrap_or_else(|| format!("status '{}'", self.status)),
            }),
        }
    }
}
