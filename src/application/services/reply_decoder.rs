use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::PartialAnalysis;

use super::log_sanitizer::sanitize_for_log;

const FAILED_TEXT_PREVIEW: usize = 500;

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)```json\s*").unwrap());
static PLAIN_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```\s*").unwrap());

/// Removes every markdown code fence marker and trims the result.
///
/// Removal repeats until nothing changes, so markers stitched together by a
/// previous removal are caught too and the function is idempotent.
pub fn strip_code_fences(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let without_json = JSON_FENCE.replace_all(&current, "");
        let stripped = PLAIN_FENCE.replace_all(&without_json, "").into_owned();
        if stripped == current {
            break;
        }
        current = stripped;
    }
    current.trim().to_string()
}

/// Decodes a cleaned model reply. Never fails: undecodable text becomes
/// the canned fallback report.
pub fn decode_reply(cleaned: &str) -> PartialAnalysis {
    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => PartialAnalysis::from_value(value),
        Err(e) => {
            tracing::error!(
                error = %e,
                text = %sanitize_for_log(cleaned, FAILED_TEXT_PREVIEW),
                "Model reply is not valid JSON, using fallback report"
            );
            PartialAnalysis::decode_fallback()
        }
    }
}
