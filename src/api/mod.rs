//! # Solaris API
//!
//! HTTP client for the Solaris query backend. The wire types mirror the
//! server's JSON schema (snake_case field names); the client itself sits
//! behind the [`QueryService`] trait so the rest of the app never touches
//! reqwest directly.

pub mod client;
pub mod types;

pub use client::{ApiError, HttpQueryService, QueryService};
pub use types::{QueryRecord, SubmitQueryRequest, SubmitQueryResponse};
