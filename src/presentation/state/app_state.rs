use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{ErrorLog, LlmClient};
use crate::application::services::AnalysisService;

pub struct AppState<L>
where
    L: LlmClient,
{
    pub analysis_service: Arc<AnalysisService<L>>,
    pub error_log: Arc<dyn ErrorLog>,
    pub static_dir: Option<PathBuf>,
}

impl<L> Clone for AppState<L>
where
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            analysis_service: Arc::clone(&self.analysis_service),
            error_log: Arc::clone(&self.error_log),
            static_dir: self.static_dir.clone(),
        }
    }
}
