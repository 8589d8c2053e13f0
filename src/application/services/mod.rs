mod analysis_service;
mod log_sanitizer;
mod reply_decoder;
mod reply_extractor;

pub use analysis_service::{AnalysisError, AnalysisRequest, AnalysisService};
pub use log_sanitizer::sanitize_for_log;
pub use reply_decoder::{decode_reply, strip_code_fences};
pub use reply_extractor::ReplyTextExtractor;
