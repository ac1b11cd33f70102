//! Web front end: an upload form, an HTML result page, and a JSON API over the
//! same pipeline.

use crate::error::{Result, StatementInsightsError};
use crate::insights::InsightsReport;
use crate::pipeline::{Outcome, PresentationState, StatementAnalyzer};
use crate::render::{render_error, render_page};
use crate::upload::Upload;
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

/// Multipart field carrying the statement.
pub const UPLOAD_FIELD: &str = "statement";

#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<StatementAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: StatementAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub state: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<InsightsReport>,
}

impl From<Outcome> for AnalysisResponse {
    fn from(outcome: Outcome) -> Self {
        let message = outcome.message().to_string();
        match outcome {
            Outcome::ExtractionFailed => Self {
                state: "extraction_failed".to_string(),
                message,
                report: None,
            },
            Outcome::ValidationFailed { .. } => Self {
                state: "validation_failed".to_string(),
                message,
                report: None,
            },
            Outcome::Success { report } => Self {
                state: "success".to_string(),
                message,
                report: Some(report),
            },
        }
    }
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let api = Router::new()
        .route("/health", get(health_check))
        .route("/analyze", post(analyze_json))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze_page))
        .nest("/api", api)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .with_state(state)
}

pub async fn serve(state: AppState, addr: &str, max_upload_bytes: usize) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Statement analyzer listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state, max_upload_bytes)).await?;
    Ok(())
}

pub fn status_for(err: &StatementInsightsError) -> StatusCode {
    match err {
        StatementInsightsError::UploadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        StatementInsightsError::ModelTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        StatementInsightsError::ModelRequest(_) | StatementInsightsError::ModelApi { .. } => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn index() -> Html<String> {
    Html(render_page(&PresentationState::UploadPending))
}

/// GET /api/health
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /analyze - HTML result page
async fn analyze_page(State(state): State<AppState>, multipart: Multipart) -> Response {
    match run_analysis(&state, multipart).await {
        Ok(outcome) => Html(render_page(&PresentationState::from(outcome))).into_response(),
        Err(e) => (status_for(&e), Html(render_error(&e.to_string()))).into_response(),
    }
}

/// POST /api/analyze - JSON result
async fn analyze_json(State(state): State<AppState>, multipart: Multipart) -> Response {
    match run_analysis(&state, multipart).await {
        Ok(outcome) => {
            (StatusCode::OK, Json(ApiResponse::ok(AnalysisResponse::from(outcome)))).into_response()
        }
        Err(e) => {
            let body = ApiResponse::<Option<AnalysisResponse>> {
                success: false,
                data: None,
                error: Some(e.to_string()),
            };
            (status_for(&e), Json(body)).into_response()
        }
    }
}

async fn run_analysis(state: &AppState, multipart: Multipart) -> Result<Outcome> {
    let upload = read_upload(multipart).await?;
    let filename = upload.filename.clone();

    state.analyzer.analyze(upload).await.map_err(|e| {
        if e.is_client_error() {
            warn!("Rejected '{}': {}", filename, e);
        } else {
            error!("Analysis of '{}' failed: {}", filename, e);
        }
        e
    })
}

/// Pulls exactly one file out of the form.
async fn read_upload(mut multipart: Multipart) -> Result<Upload> {
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(StatementInsightsError::InvalidUpload(
                "only one statement can be analyzed per request".to_string(),
            ));
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| StatementInsightsError::InvalidUpload("missing file name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(multipart_error)?;

        upload = Some(Upload::new(filename, bytes.to_vec()));
    }

    upload.ok_or(StatementInsightsError::EmptyUpload)
}

fn multipart_error(err: MultipartError) -> StatementInsightsError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        StatementInsightsError::UploadTooLarge
    } else {
        StatementInsightsError::InvalidUpload(err.body_text())
    }
}
