use solaris::api::{ApiError, HttpQueryService, QueryService, SubmitQueryRequest};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn request(query_text: &str, user_id: &str) -> SubmitQueryRequest {
    SubmitQueryRequest {
        query_text: query_text.to_string(),
        user_id: user_id.to_string(),
    }
}

// ============================================================================
// submit_query
// ============================================================================

#[tokio::test]
async fn test_submit_query_sends_expected_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit_query"))
        .and(body_json(serde_json::json!({
            "query_text": "What is solar irradiance?",
            "user_id": "session-abc"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query_id": "q-42",
            "query_text": "What is solar irradiance?",
            "is_complete": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = HttpQueryService::new(mock_server.uri());
    let response = service
        .submit_query(&request("What is solar irradiance?", "session-abc"))
        .await
        .unwrap();

    assert_eq!(response.query_id, "q-42");
}

#[tokio::test]
async fn test_submit_query_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit_query"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let service = HttpQueryService::new(mock_server.uri());
    let result = service.submit_query(&request("q", "u")).await;

    match result {
        Err(ApiError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_query_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit_query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let service = HttpQueryService::new(mock_server.uri());
    let result = service.submit_query(&request("q", "u")).await;

    assert!(matches!(result, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn test_submit_query_connection_refused() {
    // Nothing is listening on this port.
    let service = HttpQueryService::new("http://127.0.0.1:1".to_string());
    let result = service.submit_query(&request("q", "u")).await;

    assert!(matches!(result, Err(ApiError::Network(_))));
}

// ============================================================================
// get_query
// ============================================================================

#[tokio::test]
async fn test_get_query_fetches_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get_query"))
        .and(query_param("query_id", "q-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query_id": "q-42",
            "query_text": "What time of day peaks?",
            "answer_text": "Around noon.",
            "sources": ["solar.csv:group:3"],
            "is_complete": true
        })))
        .mount(&mock_server)
        .await;

    let service = HttpQueryService::new(mock_server.uri());
    let record = service.get_query("q-42").await.unwrap();

    assert_eq!(record.query_id, "q-42");
    assert_eq!(record.answer_text.as_deref(), Some("Around noon."));
    assert_eq!(record.sources, vec!["solar.csv:group:3"]);
    assert!(record.is_complete);
}

#[tokio::test]
async fn test_get_query_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get_query"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let service = HttpQueryService::new(mock_server.uri());
    let result = service.get_query("missing").await;

    assert!(matches!(result, Err(ApiError::Api { status: 404, .. })));
}

// ============================================================================
// Base URL handling
// ============================================================================

#[tokio::test]
async fn test_trailing_slash_base_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit_query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "query_id": "q-1" })),
        )
        .mount(&mock_server)
        .await;

    let service = HttpQueryService::new(format!("{}/", mock_server.uri()));
    let response = service.submit_query(&request("q", "u")).await.unwrap();
    assert_eq!(response.query_id, "q-1");
}
