//! 图片处理器

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use tracing::warn;

use crate::app::AppState;
use crate::core::error::CoreError;

/// 上传表单中的文件字段名
pub const UPLOAD_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub path: String,
}

/// 上传图片：`multipart/form-data`，字段名 `image`
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, CoreError> {
    let mut multipart = multipart.map_err(|e| CoreError::bad_request(e.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(|s| s.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(multipart_error)?;

        let path = state
            .images
            .save(&original_name, content_type.as_deref(), &bytes)?;
        return Ok(Json(UploadResponse { path }));
    }

    Err(CoreError::bad_request("No file uploaded"))
}

/// 超出请求体上限时流会被截断，统一报告为文件过大
fn multipart_error(e: MultipartError) -> CoreError {
    warn!("解析上传表单失败: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        CoreError::bad_request("File too large")
    } else {
        CoreError::bad_request(e.body_text())
    }
}

pub async fn delete_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<StatusCode, CoreError> {
    state.images.delete(&filename)?;
    Ok(StatusCode::NO_CONTENT)
}
