use anyhow::{bail, Result};
use std::env;

use crate::documents::ExtractionFailurePolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

#[derive(Clone)]
pub struct LLMConfig {
    pub provider: String,
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

// Keeps the API key out of startup logs
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub failure_policy: ExtractionFailurePolicy,
}

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Environment variable holding the API key for a provider.
pub fn api_key_var(provider: &str) -> &'static str {
    match provider {
        "openai" => "OPENAI_API_KEY",
        _ => "GROQ_API_KEY",
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let provider = var("LLM_PROVIDER", "groq").to_lowercase();
        if !matches!(provider.as_str(), "groq" | "openai") {
            bail!("Unsupported LLM provider: {}", provider);
        }

        let temperature: f32 = var("LLM_TEMPERATURE", "0.7").parse()?;
        if !(0.0..=2.0).contains(&temperature) {
            bail!("LLM_TEMPERATURE must be between 0 and 2, got {}", temperature);
        }

        Ok(Self {
            server: ServerConfig {
                port: var("PORT", "5000").parse()?,
                host: var("HOST", "0.0.0.0"),
                cors_allowed_origins: var("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                max_upload_bytes: var("MAX_UPLOAD_BYTES", "26214400").parse()?,
            },
            llm: LLMConfig {
                api_key: lookup(api_key_var(&provider)).filter(|k| !k.trim().is_empty()),
                api_base: lookup("LLM_API_BASE").filter(|b| !b.trim().is_empty()),
                model: var("LLM_MODEL", DEFAULT_MODEL),
                temperature,
                max_tokens: var("LLM_MAX_TOKENS", "1000").parse()?,
                provider,
            },
            extraction: ExtractionConfig {
                failure_policy: var("EXTRACTION_FAILURE_POLICY", "contain").parse()?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.cors_allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.llm.provider, "groq");
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.llm.max_tokens, 1000);
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.extraction.failure_policy, ExtractionFailurePolicy::Contain);
    }

    #[test]
    fn test_api_key_follows_provider() {
        let config = config_from(&[
            ("LLM_PROVIDER", "OpenAI"),
            ("OPENAI_API_KEY", "sk-test"),
            ("GROQ_API_KEY", "gsk-test"),
        ])
        .unwrap();

        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = config_from(&[("GROQ_API_KEY", "  ")]).unwrap();
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_allowed_origins_list() {
        let config = config_from(&[(
            "ALLOWED_ORIGINS",
            "http://localhost:5173, http://localhost:3000,",
        )])
        .unwrap();

        assert_eq!(
            config.server.cors_allowed_origins,
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(config_from(&[("LLM_PROVIDER", "mystery")]).is_err());
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("LLM_TEMPERATURE", "3.5")]).is_err());
        assert!(config_from(&[("EXTRACTION_FAILURE_POLICY", "ignore")]).is_err());
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = config_from(&[("GROQ_API_KEY", "gsk-secret")]).unwrap();
        let rendered = format!("{:?}", config.llm);

        assert!(!rendered.contains("gsk-secret"));
        assert!(rendered.contains("***"));
    }
}
