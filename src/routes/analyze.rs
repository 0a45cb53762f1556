use axum::{
    Router,
    routing::post,
    Json,
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Response},
};
use crate::models::{AnalysisResult, AppState, UploadedFile};
use crate::types::{AppError, AppResult};
use tracing::{info, error};

/// Multipart field carrying the uploaded documents
pub const FILES_FIELD: &str = "files";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze_documents))
        .with_state(state)
}

/// POST /api/analyze - Extract trends and a weekly report from uploaded documents
async fn analyze_documents(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let result = match multipart {
        Ok(multipart) => run_analysis(&state, multipart).await,
        Err(rejection) => Err(AppError::InvalidRequest(rejection.body_text())),
    };

    // Single catch point for every failure in the request
    match result {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            error!(error = %e, "Document analysis failed");
            e.into_response()
        }
    }
}

async fn run_analysis(state: &AppState, multipart: Multipart) -> AppResult<AnalysisResult> {
    let files = read_uploads(multipart).await?;
    info!(file_count = files.len(), "Analyze request received");

    let (trends, report) = state.analyzer.analyze(files).await?;

    Ok(AnalysisResult::success(trends, report))
}

/// Collect every `files` part in upload order. Other fields are ignored.
async fn read_uploads(mut multipart: Multipart) -> AppResult<Vec<UploadedFile>> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Failed to read multipart body: {}", e)))?
    {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("Failed to read {}: {}", filename, e)))?;

        files.push(UploadedFile { filename, content });
    }

    Ok(files)
}
