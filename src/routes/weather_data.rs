use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{debug, info};

use super::{AppState, DEFAULT_LIMIT};
use crate::{store, AppError, WeatherObservation};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/weather_data", get(handler))
}

/// Query parameters for `GET /api/weather_data`.
#[derive(Debug, Deserialize)]
pub struct WeatherDataQuery {
    limit: Option<i64>,
}

async fn handler(
    Query(params): Query<WeatherDataQuery>,
    State((pool, config)): State<AppState>,
) -> Result<Json<Vec<WeatherObservation>>, AppError> {
    // ---
    info!("GET /api/weather_data {:?}", params);

    let limit = config.clamp_limit(params.limit.unwrap_or(DEFAULT_LIMIT));
    let observations = store::recent_weather(&pool, limit).await?;
    debug!("Returning {} weather observations", observations.len());

    Ok(Json(observations))
}
