//! Trend Agent
//!
//! First step of the pipeline: asks the model for the principal financial
//! trends in the uploaded documents and validates the JSON it returns.

use super::{complete, CompletionSettings};
use crate::llm::LLMAdapter;
use crate::models::Trend;
use crate::types::{AppError, AppResult};
use crate::utils::strip_code_fences;
use tracing::info;

const SYSTEM_PROMPT: &str = "You are an expert financial analyst. Analyze the documents and extract the principal financial trends.";

pub struct TrendAgent;

impl TrendAgent {
    /// Extract trends from the combined document content
    pub async fn extract_trends(
        llm: &dyn LLMAdapter,
        settings: &CompletionSettings,
        documents: &str,
    ) -> AppResult<Vec<Trend>> {
        info!(content_len = documents.len(), "Extracting trends");

        let prompt = Self::create_prompt(documents);
        let response = complete(llm, settings, SYSTEM_PROMPT, prompt).await?;
        let trends = Self::parse_trends_response(&response)?;

        info!(trend_count = trends.len(), "Trends extracted");
        Ok(trends)
    }

    fn create_prompt(documents: &str) -> String {
        // When the documents carry too little signal the model fills in from
        // recent news; the service never checks the content itself.
        format!(
            r#"Analyze these documents and extract the financial trends.

Documents:
{documents}

Respond ONLY with JSON (no backticks, no text before or after) in exactly this format:
{{
  "trends": [
    {{
      "category": "Category name",
      "sentiment": 75,
      "mentions": 45,
      "change": "+12%",
      "description": "Short description"
    }}
  ]
}}

If the documents do not contain enough information, create 4 trends based on recent financial news (crypto, AI, interest rates, emerging markets)."#,
            documents = documents
        )
    }

    /// Parse the model output into trends
    pub fn parse_trends_response(response: &str) -> AppResult<Vec<Trend>> {
        let json_str = strip_code_fences(response);

        let mut value: serde_json::Value = serde_json::from_str(json_str)
            .map_err(|e| AppError::Format(format!("Trends response is not valid JSON: {}", e)))?;

        let trends = value
            .get_mut("trends")
            .map(serde_json::Value::take)
            .ok_or_else(|| AppError::Format("Trends response is missing key `trends`".to_string()))?;

        let trends: Vec<Trend> = serde_json::from_value(trends)
            .map_err(|e| AppError::Format(format!("Invalid trend entry: {}", e)))?;

        if let Some(trend) = trends.iter().find(|t| t.sentiment > 100) {
            return Err(AppError::Format(format!(
                "Trend `{}` has sentiment {} outside 0-100",
                trend.category, trend.sentiment
            )));
        }

        Ok(trends)
    }
}
