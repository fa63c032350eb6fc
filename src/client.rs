//! Typed client for the sentence moderation API.
//!
//! Each call maps a sentence id to one HTTP method and one URL path
//! template and returns an outcome the caller must handle; there are no
//! fire-and-forget requests.

use reqwest::{Client, Method, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL: {0}")]
    BadBaseUrl(#[from] url::ParseError),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },
}

/// Client for restore/delete/validate calls against a sentence API.
#[derive(Clone)]
pub struct SentenceClient {
    base: String,
    http: Client,
}

impl SentenceClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        // Validate eagerly so a typo fails before the first call.
        url::Url::parse(base_url)?;
        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        })
    }

    /// Restore a soft-deleted sentence.
    pub async fn restore(&self, id: &str) -> Result<(), ClientError> {
        let (method, url) = self.restore_request(id);
        self.call(method, &url).await
    }

    /// Delete a sentence.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let (method, url) = self.delete_request(id);
        self.call(method, &url).await
    }

    /// Mark a sentence as validated.
    pub async fn validate(&self, id: &str) -> Result<(), ClientError> {
        let (method, url) = self.validate_request(id);
        self.call(method, &url).await
    }

    fn restore_request(&self, id: &str) -> (Method, String) {
        (Method::GET, self.endpoint(&format!("{id}/restore")))
    }

    fn delete_request(&self, id: &str) -> (Method, String) {
        (Method::DELETE, self.endpoint(id))
    }

    // The API routes validate as a GET, same as restore.
    fn validate_request(&self, id: &str) -> (Method, String) {
        (Method::GET, self.endpoint(&format!("{id}/validate")))
    }

    fn endpoint(&self, tail: &str) -> String {
        format!("{}/api/sentences/{}", self.base, tail)
    }

    async fn call(&self, method: Method, url: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .request(method, url)
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(())
    }
}
