use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ContentPart;

/// Outbound text-generation call. The response comes back as raw JSON
/// because its shape is owned by the provider.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        parts: &[ContentPart],
    ) -> Result<Value, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
