use paycheck_sanity::application::services::sanitize_for_log;

#[test]
fn given_empty_text_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_for_log("", 100), "[EMPTY]");
    assert_eq!(sanitize_for_log("   ", 100), "[EMPTY]");
}

#[test]
fn given_short_text_when_sanitizing_then_returns_trimmed_text() {
    assert_eq!(sanitize_for_log("  audit this paystub  ", 100), "audit this paystub");
}

#[test]
fn given_long_text_when_sanitizing_then_truncates_with_length() {
    let text = "a".repeat(250);
    let result = sanitize_for_log(&text, 200);

    assert!(result.starts_with(&"a".repeat(200)));
    assert!(result.ends_with("... (250 chars total)"));
}

#[test]
fn given_multibyte_text_when_truncating_then_cuts_on_char_boundary() {
    let text = "é".repeat(10);
    let result = sanitize_for_log(&text, 3);

    assert_eq!(result, "ééé... (10 chars total)");
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_token() {
    let result = sanitize_for_log("Authorization: Bearer sk-abc123xyz", 100);

    assert!(result.contains("Bearer [REDACTED]"));
    assert!(!result.contains("sk-abc123xyz"));
}

#[test]
fn given_api_key_when_sanitizing_then_redacts_key() {
    let result = sanitize_for_log("GET /models?api_key=secret123&alt=json", 100);

    assert!(result.contains("api_key=[REDACTED]&alt=json"));
    assert!(!result.contains("secret123"));
}

#[test]
fn given_repeated_secrets_when_sanitizing_then_every_occurrence_is_redacted() {
    let result = sanitize_for_log(
        "retry with token=first-token then token=second-token and password=hunter2",
        200,
    );

    assert_eq!(
        result,
        "retry with token=[REDACTED] then token=[REDACTED] and password=[REDACTED]"
    );
}
