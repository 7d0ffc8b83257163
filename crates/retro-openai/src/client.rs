//! Async client for `POST /chat/completions`

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, info};

use crate::chat::{ChatRequest, ChatResponse};
use crate::error::OpenAiError;

/// Public OpenAI API endpoint
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Authenticated chat completion client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Create a client for the public OpenAI API
    ///
    /// # Errors
    ///
    /// Returns `OpenAiError::InvalidApiKey` if the key cannot be sent in a
    /// header, or `OpenAiError::Http` if the HTTP client cannot be built.
    pub fn new(api_key: &str) -> Result<Self, OpenAiError> {
        Self::with_base_url(api_key, DEFAULT_API_URL)
    }

    /// Create a client for a custom endpoint (proxies, tests)
    ///
    /// # Errors
    ///
    /// Same as [`OpenAiClient::new`].
    pub fn with_base_url(api_key: &str, base_url: impl Into<String>) -> Result<Self, OpenAiError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            OpenAiError::InvalidApiKey {
                reason: e.to_string(),
            }
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Send `request` and return the full response
    ///
    /// # Errors
    ///
    /// Returns `OpenAiError::Api` for non-success statuses (with the API's
    /// error message), or transport/decoding errors.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, OpenAiError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, model = %request.model, messages = request.messages.len(), "POST");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Send `request` and return the text of the first choice
    ///
    /// # Errors
    ///
    /// Returns `OpenAiError::EmptyCompletion` when the response has no
    /// choices or the first choice is blank, plus everything
    /// [`OpenAiClient::chat`] can return.
    pub async fn complete(&self, request: &ChatRequest) -> Result<String, OpenAiError> {
        let response = self.chat(request).await?;
        let content = response
            .first_content()
            .ok_or_else(|| OpenAiError::EmptyCompletion {
                reason: "response has no choices".to_string(),
            })?;

        if content.trim().is_empty() {
            return Err(OpenAiError::EmptyCompletion {
                reason: "first choice has no content".to_string(),
            });
        }

        info!(model = %response.model, chars = content.chars().count(), "Completion received");
        Ok(content.to_string())
    }
}
