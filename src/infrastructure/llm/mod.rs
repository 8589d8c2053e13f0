mod gemini_client;
mod mock_llm_client;
mod reply_shapes;

pub use gemini_client::{DEFAULT_GEMINI_BASE_URL, GeminiClient};
pub use mock_llm_client::MockLlmClient;
pub use reply_shapes::{
    CandidateTextAccessor, FirstTextFragment, FlattenedText, gemini_reply_shapes,
};
