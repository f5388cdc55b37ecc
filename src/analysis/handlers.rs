use anyhow::anyhow;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument};

use super::dto::ModelReply;
use super::services::analyze_plate;
use crate::{
    error::AppError,
    state::AppState,
    status::{online, StatusResponse},
    upload::read_file_field,
};

pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/analyze-image", post(analyze_image))
        .route("/analyze-image/", post(analyze_image))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

pub async fn root() -> Json<StatusResponse> {
    Json(online("Backend Python rodando!"))
}

/// POST /analyze-image (multipart, field `file`)
#[instrument(skip(state, mp))]
pub async fn analyze_image(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Json<ModelReply>, AppError> {
    let upload = read_file_field(&mut mp)
        .await?
        .ok_or_else(|| anyhow!("multipart field 'file' is required"))?;
    info!(
        bytes = upload.body.len(),
        file_name = ?upload.file_name,
        content_type = ?upload.content_type,
        "image received"
    );

    match analyze_plate(state.analyzer.as_ref(), &upload.body).await {
        Ok(reply) => Ok(Json(reply)),
        Err(e) => {
            error!(error = %format!("{:#}", e), "analyze_image failed");
            Err(e.into())
        }
    }
}
