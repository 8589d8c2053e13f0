mod analyze;
mod health;

pub use analyze::{AnalyzeRequest, DegradedResponse, analyze_handler};
pub use health::health_handler;
