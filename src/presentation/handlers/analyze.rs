use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use futures::FutureExt;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ErrorLogEntry, LlmClient};
use crate::application::services::{AnalysisError, AnalysisRequest, sanitize_for_log};
use crate::domain::defaults;
use crate::infrastructure::observability::RequestId;
use crate::presentation::state::AppState;

const PROMPT_PREVIEW: usize = 100;
const RESULT_PREVIEW: usize = 200;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub prompt: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl From<AnalyzeRequest> for AnalysisRequest {
    fn from(request: AnalyzeRequest) -> Self {
        Self {
            prompt: request.prompt,
            image: request.image,
            mime_type: request.mime_type,
        }
    }
}

/// Minimal body sent when no report could be produced.
#[derive(Debug, Serialize)]
pub struct DegradedResponse {
    pub status: String,
    pub summary: String,
    pub payroll_questions: Vec<String>,
    pub error: String,
}

impl DegradedResponse {
    pub fn server_error(error: impl Into<String>) -> Self {
        Self {
            status: defaults::STATUS.to_string(),
            summary: "Unable to complete analysis due to a server error.".to_string(),
            payroll_questions: vec!["Please try again later.".to_string()],
            error: error.into(),
        }
    }

    pub fn invalid_request(error: impl Into<String>) -> Self {
        Self {
            status: defaults::STATUS.to_string(),
            summary: "The analysis request could not be read.".to_string(),
            payroll_questions: vec!["Please resubmit the paystub.".to_string()],
            error: error.into(),
        }
    }
}

/// `POST /api/analyze`. Every outcome, including a panic inside the
/// pipeline, is answered with a JSON body; failures are appended to the
/// error log before responding.
#[tracing::instrument(skip_all)]
pub async fn analyze_handler<L>(
    State(state): State<AppState<L>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response
where
    L: LlmClient + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let status = rejection_status(&rejection);
            tracing::warn!(
                %status,
                error = %rejection.body_text(),
                "Rejected unreadable analysis request"
            );
            return (
                status,
                Json(DegradedResponse::invalid_request(rejection.body_text())),
            )
                .into_response();
        }
    };

    tracing::info!(
        prompt = %sanitize_for_log(&request.prompt, PROMPT_PREVIEW),
        has_attachment = request.image.as_deref().is_some_and(|i| !i.is_empty()),
        "New analysis request"
    );

    let request = AnalysisRequest::from(request);
    let outcome = AssertUnwindSafe(state.analysis_service.analyze(&request))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(AnalysisError::Internal(panic_message(panic.as_ref()))));

    match outcome {
        Ok(result) => {
            tracing::info!(
                record_id = %result.record_id,
                status = %result.status,
                preview = %serde_json::to_string(&result)
                    .map(|json| sanitize_for_log(&json, RESULT_PREVIEW))
                    .unwrap_or_default(),
                "Sending validated result"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(error) => {
            tracing::error!(error = %error, "Error analyzing paystub");

            let entry = ErrorLogEntry::from_error(&error, Some(request_id.0), Utc::now());
            if let Err(log_error) = state.error_log.append(&entry).await {
                tracing::error!(error = %log_error, "Failed to append error log entry");
            }

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DegradedResponse::server_error(error.to_string())),
            )
                .into_response()
        }
    }
}

/// Oversized bodies keep their 413; every other unreadable body is a 400.
fn rejection_status(rejection: &JsonRejection) -> StatusCode {
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "analysis task panicked".to_string()
    }
}
