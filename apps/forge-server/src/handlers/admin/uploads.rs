//! File uploads from the dashboard.

use actix_web::{HttpRequest, HttpResponse, http::header, web};

use forge_core::ports::{MediaFolder, UploadedFile};
use forge_shared::ApiResponse;
use forge_shared::dto::{UploadQuery, UploadResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/admin/uploads/{folder}?filename=<name>
///
/// The request body is the raw file; its `Content-Type` decides the stored extension.
pub async fn upload(
    identity: Identity,
    state: web::Data<AppState>,
    req: HttpRequest,
    folder: web::Path<String>,
    query: web::Query<UploadQuery>,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let folder: MediaFolder = folder.into_inner().parse()?;

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let max = state.max_upload_bytes;
    let bytes = match payload.to_bytes_limited(max).await {
        Ok(body) => body.map_err(|e| AppError::BadRequest(e.to_string()))?,
        Err(_) => {
            return Err(AppError::PayloadTooLarge(format!(
                "Uploads are limited to {max} bytes"
            )));
        }
    };

    let file = UploadedFile {
        folder,
        original_name: query.into_inner().filename.unwrap_or_default(),
        content_type,
        bytes: bytes.to_vec(),
    };
    file.validate(max)?;

    let stored = state.media.store(file).await?;
    tracing::info!(
        admin_id = %identity.admin_id,
        %folder,
        url = %stored.url,
        size = stored.size,
        "File uploaded"
    );

    Ok(HttpResponse::Created().json(ApiResponse::ok(UploadResponse {
        url: stored.url,
        content_type: stored.content_type,
        size: stored.size,
    })))
}
