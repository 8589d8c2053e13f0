mod environment;
mod scaffold_config;
mod settings;

pub use environment::Environment;
pub use scaffold_config::ScaffoldConfig;
pub use settings::{
    ErrorLogSettings, LlmSettings, LoggingSettings, ServerSettings, Settings,
};
