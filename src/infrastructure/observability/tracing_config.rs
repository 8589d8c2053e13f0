const CRATE_DIRECTIVES: &str = "paycheck_sanity=debug,tower_http=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub filter: String,
}

impl TracingConfig {
    /// JSON output is on when `enable_json` is set or `LOG_FORMAT=json`.
    pub fn new(environment: impl Into<String>, level: &str, enable_json: bool) -> Self {
        Self {
            environment: environment.into(),
            json_format: enable_json,
            filter: format!("{level},{CRATE_DIRECTIVES}"),
        }
        .with_log_format(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    pub fn with_log_format(mut self, log_format: Option<&str>) -> Self {
        if log_format.is_some_and(|format| format.trim().eq_ignore_ascii_case("json")) {
            self.json_format = true;
        }
        self
    }
}
