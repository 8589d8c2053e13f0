use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::application::ports::{ExtractionError, LlmClient, LlmClientError};
use crate::domain::{AnalysisResult, Attachment, build_content_parts};

use super::log_sanitizer::sanitize_for_log;
use super::reply_decoder::{decode_reply, strip_code_fences};
use super::reply_extractor::ReplyTextExtractor;

const REPLY_PREVIEW: usize = 200;

/// A paystub submitted for audit.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub prompt: String,
    pub image: Option<String>,
    pub mime_type: Option<String>,
}

/// Runs one audit: builds the model request, calls the model, and turns
/// whatever comes back into a complete [`AnalysisResult`].
pub struct AnalysisService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    extractor: ReplyTextExtractor,
    model: String,
    request_timeout: Duration,
}

impl<L> AnalysisService<L>
where
    L: LlmClient,
{
    pub fn new(
        llm_client: Arc<L>,
        extractor: ReplyTextExtractor,
        model: String,
        request_timeout: Duration,
    ) -> Self {
        Self {
            llm_client,
            extractor,
            model,
            request_timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    #[tracing::instrument(skip_all, fields(model = %self.model))]
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let attachment = request
            .image
            .as_deref()
            .filter(|image| !image.is_empty())
            .map(|image| Attachment::from_upload(image, request.mime_type.as_deref()));

        if let Some(attachment) = &attachment {
            tracing::info!(mime_type = %attachment.mime_type, "Using attachment MIME type");
        }

        let parts = build_content_parts(&request.prompt, attachment);

        tracing::info!(parts = parts.len(), "Calling model");
        let response = tokio::time::timeout(
            self.request_timeout,
            self.llm_client.generate_content(&self.model, &parts),
        )
        .await
        .map_err(|_| AnalysisError::Timeout(self.request_timeout))??;

        let raw_text = self.extractor.extract(&response)?;
        tracing::info!(
            reply_len = raw_text.len(),
            preview = %sanitize_for_log(&raw_text, REPLY_PREVIEW),
            "Model reply received"
        );

        let cleaned = strip_code_fences(&raw_text);
        let partial = decode_reply(&cleaned);

        Ok(AnalysisResult::normalize(partial, Utc::now()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("model call failed: {0}")]
    Upstream(#[from] LlmClientError),
    #[error("failed to extract text from model response: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("model call timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("unexpected failure: {0}")]
    Internal(String),
}
