//! Document analysis
//!
//! Runs the whole analyze flow for one request: extract every upload, combine
//! the texts, ask the Trend Agent for trends, then the Report Agent for the
//! weekly report. Nothing here is shared between requests apart from the
//! stateless LLM client.

use std::sync::Arc;

use tracing::info;

use crate::agents::{CompletionSettings, ReportAgent, TrendAgent};
use crate::config::Config;
use crate::documents::{combine_documents, DocumentProcessor, ExtractionFailurePolicy};
use crate::llm::LLMAdapter;
use crate::models::{ExtractedDocument, Report, Trend, UploadedFile};
use crate::types::{AppError, AppResult};

pub struct TrendAnalyzer {
    llm: Arc<dyn LLMAdapter>,
    settings: CompletionSettings,
    failure_policy: ExtractionFailurePolicy,
}

impl TrendAnalyzer {
    pub fn new(
        llm: Arc<dyn LLMAdapter>,
        settings: CompletionSettings,
        failure_policy: ExtractionFailurePolicy,
    ) -> Self {
        Self {
            llm,
            settings,
            failure_policy,
        }
    }

    pub fn from_config(llm: Arc<dyn LLMAdapter>, config: &Config) -> Self {
        Self::new(
            llm,
            CompletionSettings::from(&config.llm),
            config.extraction.failure_policy,
        )
    }

    /// Extract text from every upload, in upload order.
    pub async fn extract_documents(
        &self,
        files: Vec<UploadedFile>,
    ) -> AppResult<Vec<ExtractedDocument>> {
        let mut documents = Vec::with_capacity(files.len());

        for file in files {
            let policy = self.failure_policy;
            // PDF parsing is CPU-bound
            let document = tokio::task::spawn_blocking(move || DocumentProcessor::process(&file, policy))
                .await
                .map_err(|e| AppError::Internal(format!("Extraction task failed: {}", e)))??;
            documents.push(document);
        }

        Ok(documents)
    }

    /// Full pipeline: uploads in, trends and report out. All-or-nothing.
    pub async fn analyze(&self, files: Vec<UploadedFile>) -> AppResult<(Vec<Trend>, Report)> {
        info!(file_count = files.len(), "Starting document analysis");

        let documents = self.extract_documents(files).await?;
        let combined = combine_documents(&documents);

        let trends = TrendAgent::extract_trends(self.llm.as_ref(), &self.settings, &combined).await?;
        let report = ReportAgent::generate_report(self.llm.as_ref(), &self.settings, &trends).await?;

        info!(trend_count = trends.len(), "Document analysis complete");
        Ok((trends, report))
    }
}
