//! Wire types for the Solaris query backend.
//!
//! Field names serialize as snake_case to match the server's JSON schema.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

/// Body of `POST /submit_query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitQueryRequest {
    /// The question to run through the RAG pipeline.
    pub query_text: String,
    /// Opaque identifier attributing the query to a user/session.
    pub user_id: String,
}

/// Response of `POST /submit_query`.
///
/// The server returns the full stored record, but only the id is needed
/// to navigate to the results view, so everything else is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitQueryResponse {
    #[serde(deserialize_with = "query_id")]
    pub query_id: String,
}

/// A stored query record as returned by `GET /get_query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    #[serde(deserialize_with = "query_id")]
    pub query_id: String,
    pub query_text: String,
    /// None until the RAG pipeline has produced an answer.
    #[serde(default)]
    pub answer_text: Option<String>,
    /// Document ids the answer was grounded on.
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub is_complete: bool,
}

/// The backend stores uuid strings, but the contract only promises an id
/// interpolable into a URL — so a numeric id is accepted and stringified.
fn query_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct QueryIdVisitor;

    impl de::Visitor<'_> for QueryIdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or integer query id")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(QueryIdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_serializes_snake_case() {
        let request = SubmitQueryRequest {
            query_text: "What is solar irradiance?".to_string(),
            user_id: "session-1".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["query_text"], "What is solar irradiance?");
        assert_eq!(json["user_id"], "session-1");
    }

    #[test]
    fn test_submit_response_ignores_extra_fields() {
        // The server echoes the whole record; only query_id matters here.
        let json = r#"{
            "query_id": "q-42",
            "query_text": "What is solar irradiance?",
            "create_time": 1724601600.0,
            "is_complete": false
        }"#;
        let response: SubmitQueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.query_id, "q-42");
    }

    #[test]
    fn test_numeric_query_id_is_stringified() {
        let response: SubmitQueryResponse =
            serde_json::from_str(r#"{"query_id": 42}"#).unwrap();
        assert_eq!(response.query_id, "42");

        let record: QueryRecord =
            serde_json::from_str(r#"{"query_id": 42, "query_text": "q"}"#).unwrap();
        assert_eq!(record.query_id, "42");
    }

    #[test]
    fn test_query_record_pending() {
        // Record fresh off submission: no answer, no sources yet.
        let json = r#"{"query_id": "q-42", "query_text": "hello"}"#;
        let record: QueryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.query_id, "q-42");
        assert!(record.answer_text.is_none());
        assert!(record.sources.is_empty());
        assert!(!record.is_complete);
    }

    #[test]
    fn test_query_record_complete() {
        let json = r#"{
            "query_id": "q-42",
            "query_text": "What time of day peaks?",
            "answer_text": "Around noon.",
            "sources": ["solar.csv:group:3", "solar.csv:group:4"],
            "is_complete": true
        }"#;
        let record: QueryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.answer_text.as_deref(), Some("Around noon."));
        assert_eq!(record.sources.len(), 2);
        assert!(record.is_complete);
    }
}
