use axum::{routing::post, Json, Router};
use tracing::info;

use super::AppState;
use crate::{
    scoring::{RecommendRequest, Recommendation},
    AppError,
};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/recommend_crop", post(handler))
}

async fn handler(Json(body): Json<RecommendRequest>) -> Result<Json<Recommendation>, AppError> {
    // ---
    info!("POST /api/recommend_crop soil_type={:?}", body.soil_type);

    let recommendation = body.score()?;
    info!(
        "Recommended {:?} for {} with confidence {}",
        recommendation.recommended_crops, recommendation.soil_type, recommendation.confidence_score
    );

    Ok(Json(recommendation))
}
