use serde_json::{Value, json};

use paycheck_sanity::application::ports::{ExtractionError, ReplyShape};
use paycheck_sanity::application::services::ReplyTextExtractor;
use paycheck_sanity::infrastructure::llm::gemini_reply_shapes;

struct NamedShape(&'static str, Option<&'static str>);

impl ReplyShape for NamedShape {
    fn name(&self) -> &'static str {
        self.0
    }

    fn text(&self, _response: &Value) -> Option<String> {
        self.1.map(str::to_string)
    }
}

#[test]
fn given_several_matching_shapes_when_extracting_then_first_in_order_wins() {
    let extractor = ReplyTextExtractor::new(vec![
        Box::new(NamedShape("none", None)),
        Box::new(NamedShape("second", Some("from second"))),
        Box::new(NamedShape("third", Some("from third"))),
    ]);

    assert_eq!(extractor.extract(&json!({})).unwrap(), "from second");
}

#[test]
fn given_flattened_and_candidate_text_when_extracting_then_flattened_wins() {
    let extractor = ReplyTextExtractor::new(gemini_reply_shapes());
    let response = json!({
        "text": "flattened",
        "candidates": [{ "content": { "parts": [{ "text": "nested" }] } }]
    });

    assert_eq!(extractor.extract(&response).unwrap(), "flattened");
}

#[test]
fn given_unknown_shape_when_extracting_then_returns_extraction_error_with_keys() {
    let extractor = ReplyTextExtractor::new(gemini_reply_shapes());
    let response = json!({ "promptFeedback": { "blockReason": "SAFETY" }, "usageMetadata": {} });

    let error = extractor.extract(&response).unwrap_err();

    let ExtractionError::NoText { keys, shape } = &error;
    assert!(keys.contains("promptFeedback"));
    assert!(keys.contains("usageMetadata"));
    assert!(shape.contains("SAFETY"));
    assert!(error.to_string().contains("promptFeedback"));
}

#[test]
fn given_huge_response_when_extraction_fails_then_shape_dump_is_truncated() {
    let extractor = ReplyTextExtractor::new(gemini_reply_shapes());
    let response = json!({ "blob": "x".repeat(5_000) });

    let error = extractor.extract(&response).unwrap_err();

    assert_eq!(error.shape().chars().count(), 500);
}
