use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{MealAnalysis, NOT_AN_IMAGE};
use super::services::generate_meal_analysis;
use crate::{
    error::AppError,
    state::MockState,
    status::{online, StatusResponse},
    upload::read_file_field,
};

pub fn mock_routes() -> Router<MockState> {
    Router::new()
        .route("/", get(root))
        .route("/analisar-imagem/", post(analisar_imagem))
        .route("/analisar-imagem", post(analisar_imagem))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

pub async fn root() -> Json<StatusResponse> {
    Json(online("Aury Food Analysis API"))
}

/// POST /analisar-imagem/ (multipart, field `file`); answers with fabricated detections.
#[instrument(skip(state, mp))]
pub async fn analisar_imagem(
    State(state): State<MockState>,
    mut mp: Multipart,
) -> Result<Json<MealAnalysis>, AppError> {
    let upload = read_file_field(&mut mp)
        .await
        .map_err(|e| AppError::InvalidUpload(format!("{:#}", e)))?
        .ok_or_else(|| AppError::InvalidUpload("multipart field 'file' is required".into()))?;

    if !upload.is_image() {
        warn!(content_type = ?upload.content_type, file_name = ?upload.file_name, "rejected non-image upload");
        return Err(AppError::InvalidUpload(NOT_AN_IMAGE.into()));
    }

    let analysis = {
        let mut rng = state.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        generate_meal_analysis(&mut *rng)
    };
    info!(
        bytes = upload.body.len(),
        foods = analysis.detected_foods.len(),
        meal = %analysis.meal_name,
        "mock analysis generated"
    );
    Ok(Json(analysis))
}
