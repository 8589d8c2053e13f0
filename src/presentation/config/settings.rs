use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::infrastructure::llm::DEFAULT_GEMINI_BASE_URL;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub logging: LoggingSettings,
    pub error_log: ErrorLogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorLogSettings {
    pub path: String,
}

impl Settings {
    /// Built-in defaults, then `appsettings.{env}.toml` if present, then
    /// `APP_`-prefixed variables (`APP_LLM__MODEL=...`). `GEMINI_API_KEY`
    /// and `SERVER_PORT` win over everything.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.static_dir", "public")?
            .set_default("llm.api_key", "")?
            .set_default("llm.base_url", DEFAULT_GEMINI_BASE_URL)?
            .set_default("llm.model", "gemini-2.0-flash")?
            .set_default("llm.request_timeout_secs", 120)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .set_default("error_log.path", "server_error.log")?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("llm.api_key", std::env::var("GEMINI_API_KEY").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .build()?
            .try_deserialize()
    }
}
