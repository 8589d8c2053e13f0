use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::partial_analysis::PartialAnalysis;
use super::record_id::RecordId;

/// Per-field defaults applied when the model leaves a field out or sends
/// it with the wrong kind. Object-shaped fields take theirs from `Default`.
pub mod defaults {
    pub const STATUS: &str = "Unclear";
    pub const CONFIDENCE: &str = "Low";
    pub const SUMMARY: &str = "No summary provided.";
    pub const ACTION_PLAN: [&str; 3] = ["Review findings", "Check limits", "Verify data"];
    pub const PAYROLL_QUESTIONS: [&str; 3] = [
        "Is this accurate?",
        "Please explain calculations",
        "Any updates?",
    ];
    pub const WATCH_NEXT_TIME: [&str; 3] =
        ["Check next paystub", "Monitor hours", "Verify rates"];

    pub(crate) fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }
}

/// The paystub audit report returned to callers. Every field is always
/// populated; build it through [`AnalysisResult::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub record_id: RecordId,
    #[serde(with = "iso_timestamp")]
    pub generated_at: DateTime<Utc>,
    pub status: String,
    pub confidence: String,
    pub coverage: Coverage,
    pub estimated_discrepancy: EstimatedDiscrepancy,
    pub tolerance_policy: TolerancePolicy,
    pub summary: String,
    pub extraction: Map<String, Value>,
    pub checks_performed: Vec<Check>,
    pub earnings_analysis: SectionAnalysis,
    pub withholding_analysis: SectionAnalysis,
    pub net_analysis: SectionAnalysis,
    pub flags: Vec<Flag>,
    pub action_plan: Vec<String>,
    pub payroll_questions: Vec<String>,
    pub watch_next_time: Vec<String>,
    pub limits: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub fields_found: u64,
    pub fields_expected: u64,
    pub checks_run: u64,
    pub checks_possible: u64,
}

impl Default for Coverage {
    fn default() -> Self {
        Self {
            fields_found: 0,
            fields_expected: 10,
            checks_run: 0,
            checks_possible: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedDiscrepancy {
    pub value: f64,
    pub currency: String,
    pub basis: String,
    pub note: String,
}

impl Default for EstimatedDiscrepancy {
    fn default() -> Self {
        Self {
            value: 0.0,
            currency: "USD".to_string(),
            basis: "N/A".to_string(),
            note: "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TolerancePolicy {
    pub gross_tolerance_usd: f64,
    pub net_tolerance_usd: f64,
    pub note: String,
}

impl Default for TolerancePolicy {
    fn default() -> Self {
        Self {
            gross_tolerance_usd: 1.0,
            net_tolerance_usd: 1.0,
            note: "Standard rounding".to_string(),
        }
    }
}

/// Verdict for one of the earnings, withholding and net pay sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub status: String,
    pub detail: String,
}

impl Default for SectionAnalysis {
    fn default() -> Self {
        Self {
            status: defaults::STATUS.to_string(),
            detail: "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub result: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    pub title: String,
    pub severity: String,
    pub evidence: String,
    pub why_it_matters: String,
    pub what_to_ask_payroll: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    /// Completes an untrusted partial report. Cannot fail.
    ///
    /// `generated_at` is always `now`; the partial type has no slot for an
    /// upstream timestamp.
    pub fn normalize(partial: PartialAnalysis, now: DateTime<Utc>) -> Self {
        Self {
            record_id: partial
                .record_id
                .map(RecordId::from_raw)
                .unwrap_or_else(|| RecordId::generate(now)),
            generated_at: now,
            status: partial
                .status
                .unwrap_or_else(|| defaults::STATUS.to_string()),
            confidence: partial
                .confidence
                .unwrap_or_else(|| defaults::CONFIDENCE.to_string()),
            coverage: partial.coverage.unwrap_or_default(),
            estimated_discrepancy: partial.estimated_discrepancy.unwrap_or_default(),
            tolerance_policy: partial.tolerance_policy.unwrap_or_default(),
            summary: partial
                .summary
                .unwrap_or_else(|| defaults::SUMMARY.to_string()),
            extraction: partial.extraction.unwrap_or_default(),
            checks_performed: partial.checks_performed.unwrap_or_default(),
            earnings_analysis: partial.earnings_analysis.unwrap_or_default(),
            withholding_analysis: partial.withholding_analysis.unwrap_or_default(),
            net_analysis: partial.net_analysis.unwrap_or_default(),
            flags: partial.flags.unwrap_or_default(),
            action_plan: partial
                .action_plan
                .unwrap_or_else(|| defaults::strings(&defaults::ACTION_PLAN)),
            payroll_questions: partial
                .payroll_questions
                .unwrap_or_else(|| defaults::strings(&defaults::PAYROLL_QUESTIONS)),
            watch_next_time: partial
                .watch_next_time
                .unwrap_or_else(|| defaults::strings(&defaults::WATCH_NEXT_TIME)),
            limits: partial.limits.unwrap_or_default(),
        }
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
mod iso_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
