//! HTTP surface: upload, analyze, result retrieval, and the upload page

use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use docrisk_core::{
    AnalysisResult, AnalysisStore, DocRiskError, DocumentStore, MemoryStore, RiskAnalyzer,
    TextExtractor, MAX_FILE_SIZE,
};

/// Shared state behind every handler
#[derive(Clone)]
pub struct AppState {
    store: Arc<MemoryStore>,
    extractor: Arc<TextExtractor>,
    analyzer: Arc<RiskAnalyzer>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            store: Arc::new(MemoryStore::new()),
            extractor: Arc::new(TextExtractor::new()),
            analyzer: Arc::new(RiskAnalyzer::new()),
        }
    }
}

pub async fn start_server(host: String, port: u16) -> Result<()> {
    info!("Starting web server on {}:{}", host, port);

    let app = router(AppState::new());

    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Web server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(upload_page))
        .route("/upload", post(upload))
        .route("/analyze", post(analyze))
        .route("/analysis/{file_id}", get(get_analysis))
        // Allow headroom over the file cap for multipart framing
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE as usize + 64 * 1024))
        .with_state(state)
}

#[derive(Serialize)]
struct UploadResponse {
    file_id: String,
    filename: String,
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    file_id: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Wrapper mapping core errors onto HTTP responses
struct ApiError(DocRiskError);

impl From<DocRiskError> for ApiError {
    fn from(err: DocRiskError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DocRiskError::DocumentNotFound(_) | DocRiskError::AnalysisNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            DocRiskError::EmptyFile
            | DocRiskError::FileTooLarge { .. }
            | DocRiskError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Request rejected: {}", self.0);
        }

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// `POST /upload` — multipart form field `file`
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        DocRiskError::InvalidInput(format!("malformed multipart body: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.bin").to_string();
        let data = field.bytes().await.map_err(|e| {
            DocRiskError::InvalidInput(format!("failed to read upload: {}", e))
        })?;

        let document = state.store.store_document(&data, &filename).await?;
        return Ok(Json(UploadResponse {
            file_id: document.id.to_string(),
            filename: document.original_name,
        }));
    }

    Err(DocRiskError::InvalidInput("missing file field".to_string()).into())
}

/// `POST /analyze` — run the risk scan for a previously uploaded document
async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    // An identifier that does not parse is simply one we never issued
    let id = Uuid::parse_str(&req.file_id)
        .map_err(|_| DocRiskError::DocumentNotFound(req.file_id.clone()))?;

    let document = state
        .store
        .get_document(id)
        .await?
        .ok_or_else(|| DocRiskError::DocumentNotFound(req.file_id.clone()))?;
    let content = state
        .store
        .get_content(id)
        .await?
        .ok_or_else(|| DocRiskError::DocumentNotFound(req.file_id.clone()))?;

    let text = state.extractor.extract(&content, &document.file_type);
    let result = state.analyzer.analyze(id, &text)?;
    state.store.store_analysis(&result).await?;

    info!(
        "Analyzed document {} ({} flagged terms, score {:.2})",
        id,
        result.details.flagged_terms.len(),
        result.risk_score
    );
    Ok(Json(result))
}

/// `GET /analysis/{file_id}` — fetch a previously computed result
async fn get_analysis(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let id = Uuid::parse_str(&file_id)
        .map_err(|_| DocRiskError::AnalysisNotFound(file_id.clone()))?;

    let result = state
        .store
        .get_analysis(id)
        .await?
        .ok_or(DocRiskError::AnalysisNotFound(file_id))?;

    Ok(Json(result))
}

/// `GET /` — single-page upload form driving the API
async fn upload_page() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>DocRisk</title>
    <style>
        body { font-family: sans-serif; max-width: 40rem; margin: 3rem auto; }
        #result { margin-top: 1.5rem; white-space: pre-wrap; }
        .error { color: #b00020; }
    </style>
</head>
<body>
    <h1>DocRisk</h1>
    <p>Upload a document to scan it for compliance risk terms.</p>
    <form id="upload-form">
        <input type="file" id="file" accept=".pdf,.txt,.md,.html,.csv" required>
        <button type="submit">Analyze</button>
    </form>
    <div id="result"></div>
    <script>
        const form = document.getElementById('upload-form');
        const result = document.getElementById('result');

        form.addEventListener('submit', async (event) => {
            event.preventDefault();
            result.textContent = 'Uploading...';
            result.className = '';
            try {
                const data = new FormData();
                data.append('file', document.getElementById('file').files[0]);

                const uploadResp = await fetch('/upload', { method: 'POST', body: data });
                if (!uploadResp.ok) throw new Error('upload failed');
                const { file_id } = await uploadResp.json();

                result.textContent = 'Analyzing...';
                const analyzeResp = await fetch('/analyze', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ file_id }),
                });
                if (!analyzeResp.ok) throw new Error('analysis failed');
                const report = await analyzeResp.json();

                result.textContent =
                    'Risk score: ' + report.risk_score.toFixed(2) + '\n' +
                    'Flagged terms: ' + (report.details.flagged_terms.join(', ') || 'none') + '\n' +
                    'Summary: ' + report.summary + '\n' +
                    'Recommendations: ' + report.details.recommendations;
            } catch (err) {
                result.textContent = 'Request failed: ' + err.message;
                result.className = 'error';
            }
        });
    </script>
</body>
</html>
"#,
    )
}
