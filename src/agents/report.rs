//! Report Agent
//!
//! Second step of the pipeline: writes the weekly executive report from the
//! trends the Trend Agent produced.

use super::{complete, CompletionSettings};
use crate::llm::LLMAdapter;
use crate::models::{Report, Trend};
use crate::types::{AppError, AppResult};
use crate::utils::strip_code_fences;
use tracing::info;

const SYSTEM_PROMPT: &str =
    "You are an expert financial analyst. Generate a professional weekly report.";

pub struct ReportAgent;

impl ReportAgent {
    pub async fn generate_report(
        llm: &dyn LLMAdapter,
        settings: &CompletionSettings,
        trends: &[Trend],
    ) -> AppResult<Report> {
        info!(trend_count = trends.len(), "Generating weekly report");

        let prompt = Self::create_prompt(trends)?;
        let response = complete(llm, settings, SYSTEM_PROMPT, prompt).await?;
        let report = Self::parse_report_response(&response)?;

        info!(key_trends = report.key_trends.len(), "Report generated");
        Ok(report)
    }

    fn create_prompt(trends: &[Trend]) -> AppResult<String> {
        // serde_json keeps non-ASCII characters as-is
        let trends_json = serde_json::to_string_pretty(trends)
            .map_err(|e| AppError::Internal(format!("Failed to serialize trends: {}", e)))?;

        Ok(format!(
            r#"Generate a weekly report based on these trends:

{trends_json}

Respond ONLY with JSON (no backticks, no text before or after) in exactly this format:
{{
  "executive_summary": "Summary in 2-3 sentences",
  "key_trends": [
    "Trend 1 with details",
    "Trend 2 with details",
    "Trend 3 with details"
  ],
  "recommendations": "Concrete recommendations"
}}"#,
            trends_json = trends_json
        ))
    }

    /// Parse the model output into a report
    pub fn parse_report_response(response: &str) -> AppResult<Report> {
        let json_str = strip_code_fences(response);

        let value: serde_json::Value = serde_json::from_str(json_str)
            .map_err(|e| AppError::Format(format!("Report response is not valid JSON: {}", e)))?;

        serde_json::from_value(value)
            .map_err(|e| AppError::Format(format!("Invalid report: {}", e)))
    }
}
