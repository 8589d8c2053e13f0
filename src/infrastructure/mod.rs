pub mod error_log;
pub mod llm;
pub mod observability;
