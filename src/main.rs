use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use paycheck_sanity::application::ports::{ErrorLog, LlmClient};
use paycheck_sanity::application::services::{AnalysisService, ReplyTextExtractor};
use paycheck_sanity::infrastructure::error_log::FileErrorLog;
use paycheck_sanity::infrastructure::llm::{GeminiClient, MockLlmClient, gemini_reply_shapes};
use paycheck_sanity::infrastructure::observability::{TracingConfig, init_tracing};
use paycheck_sanity::presentation::{
    AppState, Environment, ScaffoldConfig, Settings, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(
        TracingConfig::new(
            environment.as_str(),
            &settings.logging.level,
            settings.logging.enable_json,
        ),
        settings.server.port,
    );

    tracing::info!(
        api_key = if settings.llm.api_key.is_empty() { "MISSING" } else { "Found" },
        "Loading API key"
    );

    let error_log: Arc<dyn ErrorLog> = Arc::new(FileErrorLog::new(&settings.error_log.path));
    let scaffold_config = ScaffoldConfig::from_env();

    if scaffold_config.enabled {
        tracing::warn!("Scaffold mode enabled, analyses are answered by a scripted model");
        let llm_client = Arc::new(MockLlmClient::scaffold(scaffold_config.reply_delay));
        serve(settings, llm_client, error_log).await
    } else {
        let llm_client = Arc::new(GeminiClient::new(
            &settings.llm.base_url,
            settings.llm.api_key.clone(),
        ));
        serve(settings, llm_client, error_log).await
    }
}

async fn serve<L>(
    settings: Settings,
    llm_client: Arc<L>,
    error_log: Arc<dyn ErrorLog>,
) -> anyhow::Result<()>
where
    L: LlmClient + 'static,
{
    let analysis_service = Arc::new(AnalysisService::new(
        llm_client,
        ReplyTextExtractor::new(gemini_reply_shapes()),
        settings.llm.model.clone(),
        Duration::from_secs(settings.llm.request_timeout_secs),
    ));

    let state = AppState {
        analysis_service,
        error_log,
        static_dir: Some(PathBuf::from(&settings.server.static_dir)),
    };

    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(
        model = %settings.llm.model,
        error_log = %settings.error_log.path,
        "Paycheck sanity checker listening on http://{}",
        addr
    );

    axum::serve(listener, router).await?;

    Ok(())
}
