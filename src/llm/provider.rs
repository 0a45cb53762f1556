use async_trait::async_trait;
use tracing::info;

use crate::config::LLMConfig;
use crate::types::{AppResult, LLMRequest, LLMResponse};

/// A chat-completion backend.
///
/// The analyzer only sees this trait, so tests substitute a stub.
#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Configuration for LLM provider (renamed to avoid conflict with the config section)
pub struct LLMProviderConfig {
    pub name: String,
    pub api_key: Option<String>,
    pub api_base: Option<String>,
}

impl From<&LLMConfig> for LLMProviderConfig {
    fn from(config: &LLMConfig) -> Self {
        Self {
            name: config.provider.clone(),
            api_key: config.api_key.clone(),
            api_base: config.api_base.clone(),
        }
    }
}

pub struct LLM {
    adapter: Box<dyn LLMAdapter>,
    provider_name: String,
}

impl LLM {
    pub fn new(provider: LLMProviderConfig) -> anyhow::Result<Self> {
        let adapter: Box<dyn LLMAdapter> = match (provider.name.as_str(), provider.api_base) {
            ("groq", None) => Box::new(crate::llm::groq::GroqAdapter::new(provider.api_key)),
            ("openai", None) => Box::new(crate::llm::openai::OpenAIAdapter::new(provider.api_key)),
            // Any OpenAI-compatible endpoint (proxies, self-hosted gateways)
            ("groq" | "openai", Some(api_base)) => Box::new(
                crate::llm::openai::OpenAIAdapter::new_with_api_base(provider.api_key, &api_base),
            ),
            (other, _) => anyhow::bail!("Unsupported provider: {}", other),
        };

        info!(provider = %provider.name, "LLM client ready");

        Ok(Self {
            adapter,
            provider_name: provider.name,
        })
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }
}

#[async_trait]
impl LLMAdapter for LLM {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(name: &str, api_base: Option<&str>) -> LLMProviderConfig {
        LLMProviderConfig {
            name: name.to_string(),
            api_key: Some("test-key".to_string()),
            api_base: api_base.map(str::to_string),
        }
    }

    #[test]
    fn test_known_providers() {
        assert_eq!(LLM::new(provider("groq", None)).unwrap().provider_name(), "groq");
        assert_eq!(LLM::new(provider("openai", None)).unwrap().provider_name(), "openai");
        assert!(LLM::new(provider("groq", Some("http://localhost:8080/v1"))).is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        assert!(LLM::new(provider("anthropic", None)).is_err());
    }
}
