//! Async client for the Notion pages endpoint

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::NotionError;
use crate::page::{CreatePageRequest, Page};

/// Public Notion API endpoint
pub const DEFAULT_API_URL: &str = "https://api.notion.com/v1";

/// API version sent with every request
pub const NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    message: String,
}

/// Authenticated Notion client
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
}

impl NotionClient {
    /// Create a client for the public Notion API
    ///
    /// # Errors
    ///
    /// Returns `NotionError::InvalidToken` if the token cannot be sent in a
    /// header, or `NotionError::Http` if the HTTP client cannot be built.
    pub fn new(token: &str) -> Result<Self, NotionError> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Create a client for a custom endpoint
    ///
    /// # Errors
    ///
    /// Same as [`NotionClient::new`].
    pub fn with_base_url(token: &str, base_url: impl Into<String>) -> Result<Self, NotionError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            NotionError::InvalidToken {
                reason: e.to_string(),
            }
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            HeaderName::from_static("notion-version"),
            HeaderValue::from_static(NOTION_VERSION),
        );

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a page and return its ID and URL
    ///
    /// # Errors
    ///
    /// Returns `NotionError::Api` with Notion's error code and message for
    /// non-success statuses, or transport/decoding errors.
    pub async fn create_page(&self, request: &CreatePageRequest) -> Result<Page, NotionError> {
        let url = format!("{}/pages", self.base_url);
        debug!(
            url = %url,
            database = %request.parent.database_id,
            blocks = request.children.len(),
            "POST"
        );

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let (code, message) = match serde_json::from_slice::<ErrorBody>(&body) {
                Ok(e) => (e.code, e.message),
                Err(_) => (String::new(), String::from_utf8_lossy(&body).into_owned()),
            };
            return Err(NotionError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let page: Page = serde_json::from_slice(&body)?;
        info!(id = %page.id, url = %page.url, "Page created");
        Ok(page)
    }
}
