use serde_json::{Map, Value};

use super::analysis_result::{
    Check, Coverage, EstimatedDiscrepancy, Flag, SectionAnalysis, TolerancePolicy, defaults,
};

const CHECK_KEYS: [&str; 2] = ["name", "result"];
const FLAG_KEYS: [&str; 5] = [
    "title",
    "severity",
    "evidence",
    "why_it_matters",
    "what_to_ask_payroll",
];

/// A report as the model sent it: any field may be missing.
///
/// Fields hold a value only when the model supplied the right kind for
/// them (a string for scalars, an object for objects, an array for lists).
/// Nested members of an accepted object fall back to that field's default
/// member by member. There is no `generated_at` slot: the server stamps
/// that field itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialAnalysis {
    pub record_id: Option<String>,
    pub status: Option<String>,
    pub confidence: Option<String>,
    pub coverage: Option<Coverage>,
    pub estimated_discrepancy: Option<EstimatedDiscrepancy>,
    pub tolerance_policy: Option<TolerancePolicy>,
    pub summary: Option<String>,
    pub extraction: Option<Map<String, Value>>,
    pub checks_performed: Option<Vec<Check>>,
    pub earnings_analysis: Option<SectionAnalysis>,
    pub withholding_analysis: Option<SectionAnalysis>,
    pub net_analysis: Option<SectionAnalysis>,
    pub flags: Option<Vec<Flag>>,
    pub action_plan: Option<Vec<String>>,
    pub payroll_questions: Option<Vec<String>>,
    pub watch_next_time: Option<Vec<String>>,
    pub limits: Option<Vec<String>>,
}

impl PartialAnalysis {
    /// Reads whatever fits from a decoded model reply. Anything other than
    /// a JSON object yields an empty partial.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };

        Self {
            record_id: non_empty_string(&map, "record_id"),
            status: non_empty_string(&map, "status"),
            confidence: non_empty_string(&map, "confidence"),
            coverage: object(&map, "coverage").map(coverage_from),
            estimated_discrepancy: object(&map, "estimated_discrepancy")
                .map(estimated_discrepancy_from),
            tolerance_policy: object(&map, "tolerance_policy").map(tolerance_policy_from),
            summary: non_empty_string(&map, "summary"),
            extraction: object(&map, "extraction").cloned(),
            checks_performed: array(&map, "checks_performed")
                .map(|items| objects(items).map(check_from).collect()),
            earnings_analysis: object(&map, "earnings_analysis").map(section_from),
            withholding_analysis: object(&map, "withholding_analysis").map(section_from),
            net_analysis: object(&map, "net_analysis").map(section_from),
            flags: array(&map, "flags").map(|items| objects(items).map(flag_from).collect()),
            action_plan: array(&map, "action_plan").map(strings),
            payroll_questions: array(&map, "payroll_questions").map(strings),
            watch_next_time: array(&map, "watch_next_time").map(strings),
            limits: array(&map, "limits").map(strings),
        }
    }

    /// The canned report used when the model reply is not decodable JSON.
    ///
    /// Its coverage literal (`1` expected field, `1` possible check) differs
    /// from the missing-field default (`10` / `5`); both are kept as is.
    pub fn decode_fallback() -> Self {
        let unclear = |detail: &str| SectionAnalysis {
            status: defaults::STATUS.to_string(),
            detail: detail.to_string(),
        };

        Self {
            record_id: None,
            status: Some(defaults::STATUS.to_string()),
            confidence: Some(defaults::CONFIDENCE.to_string()),
            coverage: Some(Coverage {
                fields_found: 0,
                fields_expected: 1,
                checks_run: 0,
                checks_possible: 1,
            }),
            estimated_discrepancy: Some(EstimatedDiscrepancy {
                value: 0.0,
                currency: "USD".to_string(),
                basis: "Parsing failure".to_string(),
                note: "Error".to_string(),
            }),
            tolerance_policy: Some(TolerancePolicy {
                gross_tolerance_usd: 1.0,
                net_tolerance_usd: 1.0,
                note: "Fallback defaults".to_string(),
            }),
            summary: Some("AI could not parse the output. Manual review required.".to_string()),
            extraction: Some(Map::new()),
            checks_performed: Some(vec![Check {
                name: "System Error".to_string(),
                result: defaults::STATUS.to_string(),
                extra: Map::new(),
            }]),
            earnings_analysis: Some(unclear("Could not verify earnings due to parse error.")),
            withholding_analysis: Some(unclear("Could not verify taxes due to parse error.")),
            net_analysis: Some(unclear("Could not verify net pay due to parse error.")),
            flags: Some(vec![Flag {
                title: "Analysis Error".to_string(),
                severity: "High".to_string(),
                evidence: "System Error".to_string(),
                why_it_matters: "AI response was invalid or missing.".to_string(),
                what_to_ask_payroll: "N/A".to_string(),
                extra: Map::new(),
            }]),
            action_plan: Some(defaults::strings(&[
                "Retry analysis",
                "Check document quality",
                "Contact support",
            ])),
            payroll_questions: Some(defaults::strings(&[
                "Why did the audit fail?",
                "Is my paystub format standard?",
                "Can I get a cleaner copy?",
            ])),
            watch_next_time: Some(defaults::strings(&[
                "Verify document clarity",
                "Check file format",
                "Retry upload",
            ])),
            limits: Some(defaults::strings(&["AI Error"])),
        }
    }
}

fn non_empty_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn object<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

fn array<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    map.get(key).and_then(Value::as_array).map(Vec::as_slice)
}

fn objects(items: &[Value]) -> impl Iterator<Item = &Map<String, Value>> {
    items.iter().filter_map(Value::as_object)
}

fn strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn string_or(map: &Map<String, Value>, key: &str, default: String) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or(default)
}

fn number_or(map: &Map<String, Value>, key: &str, default: f64) -> f64 {
    map.get(key).and_then(Value::as_f64).unwrap_or(default)
}

/// Non-negative whole numbers, including ones written as `3.0`.
fn count_or(map: &Map<String, Value>, key: &str, default: u64) -> u64 {
    let Some(value) = map.get(key) else {
        return default;
    };
    if let Some(n) = value.as_u64() {
        return n;
    }
    match value.as_f64() {
        Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 => n as u64,
        _ => default,
    }
}

fn extra_members(map: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| !known.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn coverage_from(map: &Map<String, Value>) -> Coverage {
    let base = Coverage::default();
    Coverage {
        fields_found: count_or(map, "fields_found", base.fields_found),
        fields_expected: count_or(map, "fields_expected", base.fields_expected),
        checks_run: count_or(map, "checks_run", base.checks_run),
        checks_possible: count_or(map, "checks_possible", base.checks_possible),
    }
}

fn estimated_discrepancy_from(map: &Map<String, Value>) -> EstimatedDiscrepancy {
    let base = EstimatedDiscrepancy::default();
    EstimatedDiscrepancy {
        value: number_or(map, "value", base.value),
        currency: string_or(map, "currency", base.currency),
        basis: string_or(map, "basis", base.basis),
        note: string_or(map, "note", base.note),
    }
}

fn tolerance_policy_from(map: &Map<String, Value>) -> TolerancePolicy {
    let base = TolerancePolicy::default();
    TolerancePolicy {
        gross_tolerance_usd: number_or(map, "gross_tolerance_usd", base.gross_tolerance_usd),
        net_tolerance_usd: number_or(map, "net_tolerance_usd", base.net_tolerance_usd),
        note: string_or(map, "note", base.note),
    }
}

fn section_from(map: &Map<String, Value>) -> SectionAnalysis {
    let base = SectionAnalysis::default();
    SectionAnalysis {
        status: string_or(map, "status", base.status),
        detail: string_or(map, "detail", base.detail),
    }
}

fn check_from(map: &Map<String, Value>) -> Check {
    Check {
        name: string_or(map, "name", String::new()),
        result: string_or(map, "result", String::new()),
        extra: extra_members(map, &CHECK_KEYS),
    }
}

fn flag_from(map: &Map<String, Value>) -> Flag {
    Flag {
        title: string_or(map, "title", String::new()),
        severity: string_or(map, "severity", String::new()),
        evidence: string_or(map, "evidence", String::new()),
        why_it_matters: string_or(map, "why_it_matters", String::new()),
        what_to_ask_payroll: string_or(map, "what_to_ask_payroll", String::new()),
        extra: extra_members(map, &FLAG_KEYS),
    }
}
