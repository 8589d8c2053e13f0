use serde_json::Value;

const SHAPE_DUMP_LIMIT: usize = 500;

/// One known layout of a model response that carries reply text.
pub trait ReplyShape: Send + Sync {
    fn name(&self) -> &'static str;

    fn text(&self, response: &Value) -> Option<String>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unable to extract text from model response (keys: [{keys}])")]
    NoText { keys: String, shape: String },
}

impl ExtractionError {
    /// Captures the top-level keys and a truncated dump of the response.
    pub fn no_text(response: &Value) -> Self {
        let keys = response
            .as_object()
            .map(|map| map.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        let dump = serde_json::to_string_pretty(response).unwrap_or_default();
        let shape = dump.chars().take(SHAPE_DUMP_LIMIT).collect();

        Self::NoText { keys, shape }
    }

    pub fn shape(&self) -> &str {
        match self {
            Self::NoText { shape, .. } => shape,
        }
    }
}
