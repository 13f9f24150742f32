//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{
    ApiError, QueryRecord, QueryService, SubmitQueryRequest, SubmitQueryResponse,
};

/// A stub service for tests that never touch the network.
pub struct NoopService;

#[async_trait]
impl QueryService for NoopService {
    async fn submit_query(
        &self,
        _request: &SubmitQueryRequest,
    ) -> Result<SubmitQueryResponse, ApiError> {
        Ok(SubmitQueryResponse {
            query_id: "noop".to_string(),
        })
    }

    async fn get_query(&self, query_id: &str) -> Result<QueryRecord, ApiError> {
        Ok(QueryRecord {
            query_id: query_id.to_string(),
            query_text: String::new(),
            answer_text: None,
            sources: vec![],
            is_complete: false,
        })
    }
}

/// Creates a test App with a NoopService and a fixed session id.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopService), "test-session".to_string())
}
