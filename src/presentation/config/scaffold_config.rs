use std::time::Duration;

const SCAFFOLD_MODE_VAR: &str = "SCAFFOLD_MODE";
const MOCK_DELAY_VAR: &str = "MOCK_RESPONSE_DELAY";

/// Scaffold mode answers every analysis with a scripted report instead of
/// calling the model. Useful for front-end work without an API key.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldConfig {
    pub enabled: bool,
    pub reply_delay: Duration,
}

impl ScaffoldConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(SCAFFOLD_MODE_VAR).ok().as_deref(),
            std::env::var(MOCK_DELAY_VAR).ok().as_deref(),
        )
    }

    /// `enabled` accepts `true`/`1` in any case; the delay is milliseconds.
    pub fn from_values(mode: Option<&str>, delay_ms: Option<&str>) -> Self {
        let enabled = mode
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);
        let reply_delay = delay_ms
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_millis)
            .unwrap_or_default();

        Self {
            enabled,
            reply_delay,
        }
    }
}
