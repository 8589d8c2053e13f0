use serde_json::Value;

use crate::application::ports::{ExtractionError, ReplyShape};

/// Tries each known response shape in priority order and returns the text
/// of the first one that matches.
pub struct ReplyTextExtractor {
    shapes: Vec<Box<dyn ReplyShape>>,
}

impl ReplyTextExtractor {
    pub fn new(shapes: Vec<Box<dyn ReplyShape>>) -> Self {
        Self { shapes }
    }

    pub fn extract(&self, response: &Value) -> Result<String, ExtractionError> {
        for shape in &self.shapes {
            if let Some(text) = shape.text(response) {
                tracing::debug!(shape = shape.name(), "Extracted reply text");
                return Ok(text);
            }
        }

        let error = ExtractionError::no_text(response);
        tracing::error!(
            error = %error,
            response_shape = %error.shape(),
            "No known reply shape matched the model response"
        );
        Err(error)
    }
}
