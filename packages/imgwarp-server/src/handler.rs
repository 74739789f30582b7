use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};

use crate::AppState;
use crate::form::UploadForm;
use crate::render::{INDEX_PAGE, ProcessedResult, ResultManifest, render_results_page};
use crate::transform::{output_file_name, render_transform};
use imgwarp_core::{
    OutputFormat, StorageError, TransformError, TransformRequest, decode_image,
    sanitize_upload_key, validate_file_name,
};

const NO_FILE_UPLOADED: &str = "No file uploaded.";
const NO_SELECTED_FILE: &str = "No selected file.";
const IMAGE_LOAD_FAILED: &str = "Error loading the image. Ensure it is a valid image file.";
const NO_TRANSFORMATIONS: &str = "No transformations selected.";

// 同名ファイルは後続のリクエストで上書きされる
const CACHE_CONTROL_NO_CACHE: &str = "no-cache";

pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// アップロード画像に選択された変換を評価順に適用し、結果を返す
///
/// 各変換は「パラメータ検証 → 適用 → 保存」を順に行う。途中の変換で
/// パラメータ不正が見つかった場合は 400 を返すが、それ以前に保存した
/// 出力はそのまま残る。
pub async fn process(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = UploadForm::from_multipart(multipart).await?;

    let upload = form
        .image
        .ok_or_else(|| AppError::BadRequest(NO_FILE_UPLOADED.to_string()))?;
    if upload.file_name.is_empty() {
        return Err(AppError::BadRequest(NO_SELECTED_FILE.to_string()));
    }

    let key = sanitize_upload_key(&upload.file_name);
    tracing::info!(key = %key, size = upload.data.len(), "saving upload");
    state.storage.save_upload(&key, &upload.data).await?;

    let stored = state.storage.read_upload(&key).await?;
    let image = tokio::task::spawn_blocking(move || decode_image(&stored))
        .await
        .map_err(|e| AppError::Internal(format!("decode task failed: {e}")))?
        .map_err(|e| match e {
            TransformError::Decode(msg) => {
                tracing::warn!(key = %key, error = %msg, "failed to decode upload");
                AppError::BadRequest(IMAGE_LOAD_FAILED.to_string())
            }
            other => other.into(),
        })?;
    let image = Arc::new(image);

    let request = TransformRequest::new(form.transformations, form.fields);
    if request.is_empty() {
        return Err(AppError::BadRequest(NO_TRANSFORMATIONS.to_string()));
    }

    let mut results = Vec::new();
    for kind in request.selected() {
        let params = request.params(kind)?;

        tracing::info!(key = %key, kind = kind.name(), params = ?params, "transforming image");

        let source = Arc::clone(&image);
        let (format, quality) = (state.output_format, state.quality);
        let encoded =
            tokio::task::spawn_blocking(move || render_transform(&source, &params, format, quality))
                .await
                .map_err(|e| AppError::Internal(format!("transform task failed: {e}")))??;

        let file_name = output_file_name(kind, format);
        state.storage.write_processed(&file_name, &encoded).await?;

        results.push(ProcessedResult {
            name: kind.display_name().to_string(),
            url: format!("/processed/{file_name}"),
        });
    }

    tracing::info!(key = %key, count = results.len(), "transformations complete");

    if wants_json(&headers) {
        return Ok(Json(ResultManifest { results: &results }).into_response());
    }
    Ok(Html(render_results_page(&results)).into_response())
}

/// 保存済みの変換結果を返す
pub async fn serve_processed(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, AppError> {
    if let Err(e) = validate_file_name(&file_name) {
        tracing::warn!(file_name = %file_name, error = %e, "rejected file name");
        return Err(AppError::NotFound("not found".to_string()));
    }

    let data = state.storage.read_processed(&file_name).await?;
    let content_type = OutputFormat::from_file_name(&file_name)
        .map(|f| f.content_type())
        .unwrap_or("application/octet-stream");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL_NO_CACHE),
        ],
        data,
    )
        .into_response())
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    /// multipart の読み込み失敗。ステータスは axum の判定に従う（上限超過なら 413）
    Multipart(StatusCode, String),
    Internal(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { key } => {
                tracing::debug!(key = %key, "object not found");
                AppError::NotFound("not found".to_string())
            }
            StorageError::Io(e) => AppError::Internal(format!("storage io error: {e}")),
        }
    }
}

impl From<TransformError> for AppError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::InvalidParams(kind) => {
                tracing::warn!(kind = kind.name(), "invalid transform parameters");
                AppError::BadRequest(kind.invalid_params_message().to_string())
            }
            TransformError::Decode(_) => AppError::BadRequest(IMAGE_LOAD_FAILED.to_string()),
            TransformError::ResolutionTooLarge { width, height } => {
                tracing::warn!(width = %width, height = %height, "image resolution too large");
                AppError::BadRequest(format!(
                    "image resolution {width}x{height} exceeds maximum"
                ))
            }
            TransformError::ProcessingFailed(msg) => {
                AppError::Internal(format!("image processing failed: {msg}"))
            }
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        tracing::warn!(error = %err, status = %err.status(), "failed to read multipart body");
        AppError::Multipart(err.status(), err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::Multipart(status, msg) => (status, msg).into_response(),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}
