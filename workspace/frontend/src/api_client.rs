pub mod plan;
pub mod record;
pub mod social;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings;

pub const JSON_CONTENT_TYPE: &str = "application/json";

fn api_url(endpoint: &str) -> String {
    settings::get_settings().api_url(endpoint)
}

/// Failure of a single API call. Calls are never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Please login first")]
    Unauthorized,

    #[error("HTTP error: {status}{}", .message.as_ref().map(|m| format!(" ({})", m)).unwrap_or_default())]
    Http { status: u16, message: Option<String> },

    #[error("Request failed: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Failed to serialize request: {0}")]
    Serialize(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Server-provided message when there is one, otherwise the display text.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message: Some(message), .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Error Response
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Maps a non-OK status (and the `error` field of its body, if any) to an [`ApiError`].
pub fn status_error(status: u16, body: Option<&str>) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized;
    }
    let message = body
        .and_then(|b| serde_json::from_str::<ErrorResponse>(b).ok())
        .map(|e| e.error);
    ApiError::Http { status, message }
}

fn with_headers(mut builder: RequestBuilder, headers: &[(&str, &str)]) -> RequestBuilder {
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    builder
}

async fn read_json<T>(method: &str, endpoint: &str, response: Response) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    if !response.ok() {
        log::warn!("{} {} - Non-OK response: {}", method, endpoint, response.status());
        let body = response.text().await.ok();
        let error = status_error(response.status(), body.as_deref());
        log::error!("{} {} - {}", method, endpoint, error);
        return Err(error);
    }

    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let data = response.json::<T>().await.map_err(|e| {
        let error = ApiError::Parse(e.to_string());
        log::error!("{} {} - {}", method, endpoint, error);
        error
    })?;

    log::info!("{} {} - Success", method, endpoint);
    Ok(data)
}

fn network_error(method: &str, endpoint: &str, e: gloo_net::Error) -> ApiError {
    let error = ApiError::Network(e.to_string());
    log::error!("{} {} - {}", method, endpoint, error);
    error
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let url = api_url(endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| network_error("GET", endpoint, e))?;

    read_json("GET", endpoint, response).await
}

/// POST with a JSON body plus any extra headers (e.g. the CSRF token)
pub async fn post<T, B>(endpoint: &str, body: &B, headers: &[(&str, &str)]) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let url = api_url(endpoint);
    log::debug!("POST request to: {}", url);

    let response = with_headers(Request::post(&url), headers)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .json(body)
        .map_err(|e| {
            let error = ApiError::Serialize(e.to_string());
            log::error!("POST {} - {}", endpoint, error);
            error
        })?
        .send()
        .await
        .map_err(|e| network_error("POST", endpoint, e))?;

    read_json("POST", endpoint, response).await
}

/// POST without a body, used by the toggle endpoints
pub async fn post_empty<T>(endpoint: &str, headers: &[(&str, &str)]) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let url = api_url(endpoint);
    log::debug!("POST (empty) request to: {}", url);

    let response = with_headers(Request::post(&url), headers)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .send()
        .await
        .map_err(|e| network_error("POST", endpoint, e))?;

    read_json("POST", endpoint, response).await
}

/// DELETE; the response body is ignored
pub async fn delete(endpoint: &str) -> Result<(), ApiError> {
    let url = api_url(endpoint);
    log::debug!("DELETE request to: {}", url);

    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| network_error("DELETE", endpoint, e))?;

    if !response.ok() {
        let body = response.text().await.ok();
        let error = status_error(response.status(), body.as_deref());
        log::error!("DELETE {} - {}", endpoint, error);
        return Err(error);
    }

    log::info!("DELETE {} - Success", endpoint);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_is_unauthorized() {
        let error = status_error(401, Some(r#"{"error":"Unauthorized"}"#));
        assert!(error.is_unauthorized());
        assert_eq!(error.to_string(), "Please login first");
    }

    #[test]
    fn test_http_error_keeps_server_message() {
        let error = status_error(400, Some(r#"{"error":"Content required"}"#));
        assert_eq!(
            error,
            ApiError::Http { status: 400, message: Some("Content required".to_string()) }
        );
        assert_eq!(error.to_string(), "HTTP error: 400 (Content required)");
        assert_eq!(error.user_message(), "Content required");
    }

    #[test]
    fn test_http_error_without_json_body() {
        let error = status_error(500, Some("<html>boom</html>"));
        assert_eq!(error, ApiError::Http { status: 500, message: None });
        assert_eq!(error.to_string(), "HTTP error: 500");
        assert_eq!(status_error(404, None).to_string(), "HTTP error: 404");
    }
}
