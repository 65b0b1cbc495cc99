use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{debug, info};

use super::{AppState, DEFAULT_LIMIT};
use crate::{store, AppError, ReadingPoint, SensorType};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/sensor_data", get(handler))
}

/// Query parameters for `GET /api/sensor_data`.
#[derive(Debug, Deserialize)]
pub struct SensorDataQuery {
    #[serde(rename = "type")]
    sensor_type: Option<String>,
    limit: Option<i64>,
}

async fn handler(
    Query(params): Query<SensorDataQuery>,
    State((pool, config)): State<AppState>,
) -> Result<Json<Vec<ReadingPoint>>, AppError> {
    // ---
    info!("GET /api/sensor_data {:?}", params);

    // No stored row can carry a type outside the closed set.
    let sensor_type = match params.sensor_type.as_deref() {
        None => SensorType::SoilMoisture,
        Some(s) => match s.parse::<SensorType>() {
            Ok(t) => t,
            Err(e) => {
                debug!("{}, returning no readings", e);
                return Ok(Json(Vec::new()));
            }
        },
    };
    let limit = config.clamp_limit(params.limit.unwrap_or(DEFAULT_LIMIT));

    let readings = store::recent_sensor_readings(&pool, sensor_type, limit).await?;
    debug!("Returning {} {} readings", readings.len(), sensor_type);

    Ok(Json(readings))
}
