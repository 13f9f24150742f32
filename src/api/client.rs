//! HTTP client for the Solaris query backend.
//!
//! The [`QueryService`] trait is the seam between the app and the network:
//! the TUI only ever holds an `Arc<dyn QueryService>`, so tests substitute
//! a stub and integration tests point [`HttpQueryService`] at a mock server.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info};

use super::types::{QueryRecord, SubmitQueryRequest, SubmitQueryResponse};

/// Errors that can occur talking to the query backend.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The server returned a non-success status.
    Api { status: u16, message: String },
    /// The response body did not match the expected schema.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The query backend's surface, as seen by the rest of the app.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Submits a new query for processing. Returns the id of the stored
    /// record, which keys the results view.
    async fn submit_query(
        &self,
        request: &SubmitQueryRequest,
    ) -> Result<SubmitQueryResponse, ApiError>;

    /// Fetches a stored query record by id.
    async fn get_query(&self, query_id: &str) -> Result<QueryRecord, ApiError>;
}

/// Production implementation backed by reqwest.
pub struct HttpQueryService {
    base_url: String,
    http: reqwest::Client,
}

impl HttpQueryService {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl QueryService for HttpQueryService {
    async fn submit_query(
        &self,
        request: &SubmitQueryRequest,
    ) -> Result<SubmitQueryResponse, ApiError> {
        let url = format!("{}/submit_query", self.base_url);
        info!("Submitting query: {}", request.query_text);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = Self::check_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("submit_query response: {}", body);

        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn get_query(&self, query_id: &str) -> Result<QueryRecord, ApiError> {
        let url = format!("{}/get_query", self.base_url);
        debug!("Fetching query {}", query_id);

        let response = self
            .http
            .get(&url)
            .query(&[("query_id", query_id)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
