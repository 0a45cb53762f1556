use std::sync::Arc;

use bytes::Bytes;

use crate::analysis::TrendAnalyzer;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub analyzer: Arc<TrendAnalyzer>,
}

// Request-scoped values: nothing below outlives a single analyze call

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub filename: String,
    pub text: String,
}

/// One financial theme extracted (or inferred) from the uploaded documents
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trend {
    pub category: String,
    /// 0-100
    pub sentiment: u8,
    pub mentions: u64,
    /// Signed percentage, e.g. "+12%"
    pub change: String,
    pub description: String,
    /// Any additional keys the model emitted, returned untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Weekly narrative built from the trend list
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Report {
    pub executive_summary: String,
    pub key_trends: Vec<String>,
    pub recommendations: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// API Request/Response types

/// Wire response of `/api/analyze`
#[derive(Debug, serde::Serialize)]
pub struct AnalysisResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<Vec<Trend>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    pub fn success(trends: Vec<Trend>, report: Report) -> Self {
        Self {
            success: true,
            trends: Some(trends),
            report: Some(report),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            trends: None,
            report: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
}
