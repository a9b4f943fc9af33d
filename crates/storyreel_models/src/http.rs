//! Helpers shared by the HTTP clients.

use reqwest::Response;
use storyreel_error::{ExternalServiceError, ExternalServiceErrorKind, StoryreelResult};

/// Read a non-empty API key from the environment.
pub(crate) fn api_key(var: &'static str) -> StoryreelResult<String> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ExternalServiceError::new(ExternalServiceErrorKind::MissingApiKey(var)).into()),
    }
}

#[track_caller]
pub(crate) fn network(service: &'static str, e: reqwest::Error) -> ExternalServiceError {
    ExternalServiceError::new(ExternalServiceErrorKind::Network {
        service,
        message: e.to_string(),
    })
}

#[track_caller]
pub(crate) fn invalid(service: &'static str, message: impl std::fmt::Display) -> ExternalServiceError {
    ExternalServiceError::new(ExternalServiceErrorKind::InvalidResponse {
        service,
        message: message.to_string(),
    })
}

#[track_caller]
pub(crate) fn conversion(service: &'static str, message: impl std::fmt::Display) -> ExternalServiceError {
    ExternalServiceError::new(ExternalServiceErrorKind::RequestConversion {
        service,
        message: message.to_string(),
    })
}

/// Pass successful responses through; turn anything else into a status error
/// carrying the response body.
pub(crate) async fn ensure_success(
    service: &'static str,
    response: Response,
) -> StoryreelResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    tracing::debug!(service, status, "Backend returned an error status");
    Err(ExternalServiceError::new(ExternalServiceErrorKind::Status {
        service,
        status,
        message,
    })
    .into())
}
