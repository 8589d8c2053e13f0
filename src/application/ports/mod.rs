mod error_log;
mod llm_client;
mod reply_shape;

pub use error_log::{ErrorLog, ErrorLogEntry, ErrorLogError};
pub use llm_client::{LlmClient, LlmClientError};
pub use reply_shape::{ExtractionError, ReplyShape};
