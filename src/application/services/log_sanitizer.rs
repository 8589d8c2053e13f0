use std::sync::LazyLock;

use regex::Regex;

static SECRET_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(Bearer |api_key=|password=|secret=|token=)[^\s&"']*"#).unwrap()
});

/// Prepares user or model text for a log line: trims, truncates to
/// `max_visible` characters and masks credential-looking values.
pub fn sanitize_for_log(text: &str, max_visible: usize) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > max_visible {
        let cut = trimmed
            .char_indices()
            .nth(max_visible)
            .map(|(idx, _)| idx)
            .unwrap_or(trimmed.len());
        format!("{}... ({} chars total)", &trimmed[..cut], total_chars)
    } else {
        trimmed.to_string()
    };

    redact_secrets(&visible)
}

fn redact_secrets(text: &str) -> String {
    SECRET_VALUE
        .replace_all(text, "${1}[REDACTED]")
        .into_owned()
}
