//! Agent System
//!
//! The two model-backed steps of a document analysis:
//!
//! - **Trend Agent**: reads the combined documents and extracts financial trends
//! - **Report Agent**: turns the trend list into a weekly executive report
//!
//! ## Pipeline Overview
//!
//! ```text
//! Combined documents
//!      │
//!      ▼
//! ┌─────────────┐
//! │   Trend     │  → {"trends": [...]}
//! │   Agent     │
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │   Report    │  → {"executive_summary", "key_trends", "recommendations"}
//! │   Agent     │
//! └─────────────┘
//! ```
//!
//! The report call depends on the parsed output of the trend call, so the two
//! always run one after the other.

pub mod report;
pub mod trends;

pub use report::ReportAgent;
pub use trends::TrendAgent;

use crate::config::LLMConfig;
use crate::llm::LLMAdapter;
use crate::types::{AppResult, LLMMessage, LLMRequest};
use tracing::info;

/// Sampling parameters shared by both completion calls
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl From<&LLMConfig> for CompletionSettings {
    fn from(config: &LLMConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// Send a system + user prompt pair and return the raw completion text.
pub(crate) async fn complete(
    llm: &dyn LLMAdapter,
    settings: &CompletionSettings,
    system: &str,
    prompt: String,
) -> AppResult<String> {
    let request = LLMRequest {
        model: settings.model.clone(),
        messages: vec![LLMMessage::system(system), LLMMessage::user(prompt)],
        max_tokens: Some(settings.max_tokens),
        temperature: Some(settings.temperature),
    };

    let response = llm.create_chat_completion(&request).await?;

    info!(
        model = %settings.model,
        finish_reason = %response.finish_reason,
        total_tokens = response.usage.total_tokens,
        "Completion received"
    );

    Ok(response.content)
}
