use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::ContentPart;

const SCAFFOLD_REPORT: &str = r#"```json
{
  "status": "OK",
  "confidence": "Medium",
  "coverage": { "fields_found": 8, "fields_expected": 10, "checks_run": 4, "checks_possible": 5 },
  "estimated_discrepancy": { "value": 0.0, "currency": "USD", "basis": "Gross minus deductions", "note": "Within tolerance" },
  "summary": "Scaffold report: gross, withholding and net pay reconcile.",
  "extraction": { "gross_pay": 2500.0, "net_pay": 1874.32, "pay_period": "biweekly" },
  "checks_performed": [{ "name": "Gross to net", "result": "OK" }],
  "earnings_analysis": { "status": "OK", "detail": "Hours times rate matches gross." },
  "withholding_analysis": { "status": "OK", "detail": "Withholding is in the expected range." },
  "net_analysis": { "status": "OK", "detail": "Net pay equals gross minus deductions." },
  "flags": [],
  "limits": ["Scaffold data"]
}
```"#;

enum MockReply {
    Response(Value),
    Failure(String),
}

/// Scripted model client used in scaffold mode and tests. Records every
/// request it receives.
pub struct MockLlmClient {
    reply: MockReply,
    delay: Duration,
    requests: Mutex<Vec<Vec<ContentPart>>>,
}

impl MockLlmClient {
    /// Replies with a flattened `{"text": ...}` response.
    pub fn replying_text(text: impl Into<String>) -> Self {
        Self::replying(json!({ "text": text.into() }))
    }

    pub fn replying(response: Value) -> Self {
        Self {
            reply: MockReply::Response(response),
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Failure(message.into()),
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A fixed, fenced report shaped like a real reply.
    pub fn scaffold(delay: Duration) -> Self {
        Self::replying(json!({
            "candidates": [{ "content": { "parts": [{ "text": SCAFFOLD_REPORT }] } }]
        }))
        .with_delay(delay)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn recorded_requests(&self) -> Vec<Vec<ContentPart>> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate_content(
        &self,
        _model: &str,
        parts: &[ContentPart],
    ) -> Result<Value, LlmClientError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(parts.to_vec());
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.reply {
            MockReply::Response(response) => Ok(response.clone()),
            MockReply::Failure(message) => Err(LlmClientError::ApiRequestFailed(message.clone())),
        }
    }
}
