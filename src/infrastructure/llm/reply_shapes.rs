use serde_json::Value;

use crate::application::ports::ReplyShape;

/// Known `generateContent` reply layouts, highest priority first.
pub fn gemini_reply_shapes() -> Vec<Box<dyn ReplyShape>> {
    vec![
        Box::new(FlattenedText),
        Box::new(CandidateTextAccessor),
        Box::new(FirstTextFragment),
    ]
}

/// SDK-flattened responses expose the reply as a top-level `text` string.
pub struct FlattenedText;

impl ReplyShape for FlattenedText {
    fn name(&self) -> &'static str {
        "flattened_text"
    }

    fn text(&self, response: &Value) -> Option<String> {
        response.get("text")?.as_str().map(str::to_string)
    }
}

/// What the SDK `text()` accessor returns: every text part of the first
/// candidate, concatenated. Thought parts are skipped.
pub struct CandidateTextAccessor;

impl ReplyShape for CandidateTextAccessor {
    fn name(&self) -> &'static str {
        "candidate_text_accessor"
    }

    fn text(&self, response: &Value) -> Option<String> {
        let parts = response
            .get("candidates")?
            .get(0)?
            .get("content")?
            .get("parts")?
            .as_array()?;

        let texts: Vec<&str> = parts
            .iter()
            .filter(|part| part.get("thought").and_then(Value::as_bool) != Some(true))
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

/// Last resort: the first text fragment under any candidate.
pub struct FirstTextFragment;

impl ReplyShape for FirstTextFragment {
    fn name(&self) -> &'static str {
        "first_text_fragment"
    }

    fn text(&self, response: &Value) -> Option<String> {
        response
            .get("candidates")?
            .as_array()?
            .iter()
            .filter_map(|candidate| candidate.get("content")?.get("parts")?.as_array())
            .flatten()
            .find_map(|part| part.get("text").and_then(Value::as_str))
            .map(str::to_string)
    }
}
