use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;

use paycheck_sanity::application::services::{
    AnalysisError, AnalysisRequest, AnalysisService, ReplyTextExtractor,
};
use paycheck_sanity::domain::ContentPart;
use paycheck_sanity::infrastructure::llm::{MockLlmClient, gemini_reply_shapes};

const TEST_MODEL: &str = "gemini-test";
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

fn service(client: Arc<MockLlmClient>, timeout: Duration) -> AnalysisService<MockLlmClient> {
    AnalysisService::new(
        client,
        ReplyTextExtractor::new(gemini_reply_shapes()),
        TEST_MODEL.to_string(),
        timeout,
    )
}

fn prompt_only(prompt: &str) -> AnalysisRequest {
    AnalysisRequest {
        prompt: prompt.to_string(),
        ..AnalysisRequest::default()
    }
}

#[tokio::test]
async fn given_fenced_partial_report_when_analyzing_then_missing_fields_are_defaulted() {
    let client = Arc::new(MockLlmClient::replying_text(
        "```json\n{\"status\":\"OK\"}\n```",
    ));
    let service = service(Arc::clone(&client), TEST_TIMEOUT);

    let before = Utc::now();
    let result = service.analyze(&prompt_only("audit this")).await.unwrap();
    let after = Utc::now();

    assert_eq!(result.status, "OK");
    assert_eq!(result.confidence, "Low");
    assert_eq!(result.coverage.fields_expected, 10);
    assert!(result.flags.is_empty());
    assert!(result.generated_at >= before && result.generated_at <= after);
    assert_eq!(service.model(), TEST_MODEL);
}

#[tokio::test]
async fn given_candidate_shaped_response_when_analyzing_then_text_is_found() {
    let client = Arc::new(MockLlmClient::replying(json!({
        "candidates": [{
            "content": { "parts": [{ "text": "{\"status\":" }, { "text": "\"Discrepancy\"}" }] }
        }]
    })));
    let service = service(client, TEST_TIMEOUT);

    let result = service.analyze(&prompt_only("audit this")).await.unwrap();

    assert_eq!(result.status, "Discrepancy");
}

#[tokio::test]
async fn given_image_upload_when_analyzing_then_model_receives_text_then_inline_data() {
    let client = Arc::new(MockLlmClient::replying_text("{}"));
    let service = service(Arc::clone(&client), TEST_TIMEOUT);
    let request = AnalysisRequest {
        prompt: "audit this".to_string(),
        image: Some("data:image/png;base64,JVBERi0xLjQK".to_string()),
        mime_type: Some("image/png".to_string()),
    };

    service.analyze(&request).await.unwrap();

    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0][0], ContentPart::text("audit this"));
    match &requests[0][1] {
        ContentPart::InlineData { inline_data } => {
            assert_eq!(inline_data.mime_type, "application/pdf");
            assert_eq!(inline_data.data, "JVBERi0xLjQK");
        }
        other => panic!("expected inline data, got {other:?}"),
    }
}

#[tokio::test]
async fn given_empty_image_when_analyzing_then_no_attachment_is_sent() {
    let client = Arc::new(MockLlmClient::replying_text("{}"));
    let service = service(Arc::clone(&client), TEST_TIMEOUT);
    let request = AnalysisRequest {
        prompt: "audit this".to_string(),
        image: Some(String::new()),
        mime_type: None,
    };

    service.analyze(&request).await.unwrap();

    assert_eq!(client.recorded_requests()[0].len(), 1);
}

#[tokio::test]
async fn given_failing_model_when_analyzing_then_returns_upstream_error() {
    let client = Arc::new(MockLlmClient::failing("quota exceeded"));
    let service = service(client, TEST_TIMEOUT);

    let error = service.analyze(&prompt_only("audit this")).await.unwrap_err();

    assert!(matches!(error, AnalysisError::Upstream(_)));
    assert!(error.to_string().contains("quota exceeded"));
}

#[tokio::test]
async fn given_textless_response_when_analyzing_then_returns_extraction_error() {
    let client = Arc::new(MockLlmClient::replying(json!({ "candidates": [] })));
    let service = service(client, TEST_TIMEOUT);

    let error = service.analyze(&prompt_only("audit this")).await.unwrap_err();

    assert!(matches!(error, AnalysisError::Extraction(_)));
}

#[tokio::test]
async fn given_slow_model_when_analyzing_then_returns_timeout() {
    let client = Arc::new(
        MockLlmClient::replying_text("{}").with_delay(Duration::from_millis(500)),
    );
    let service = service(client, Duration::from_millis(20));

    let error = service.analyze(&prompt_only("audit this")).await.unwrap_err();

    assert!(matches!(error, AnalysisError::Timeout(_)));
}
