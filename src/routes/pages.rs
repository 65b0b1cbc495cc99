//! HTML page routes: index, dashboard, sensor table, predictions, analytics.
use axum::{extract::State, response::Html, routing::get, Router};
use tracing::{debug, info};

use super::AppState;
use crate::{
    pages::{AnalyticsPage, DashboardPage, IndexPage, PredictionsPage, SensorsPage},
    store, AppError,
};

/// Rows shown on the `/sensors` page.
const SENSOR_TABLE_ROWS: i64 = 20;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/", get(index))
        .route("/dashboard", get(dashboard))
        .route("/sensors", get(sensors))
        .route("/predictions", get(predictions))
        .route("/analytics", get(analytics))
}

async fn index() -> Html<String> {
    Html(IndexPage {}.to_string())
}

async fn dashboard(State((pool, _)): State<AppState>) -> Result<Html<String>, AppError> {
    // ---
    info!("GET /dashboard");

    let latest = store::latest_per_sensor_type(&pool).await?;
    let weather = store::latest_weather(&pool).await?;
    let averages = store::average_by_sensor_type(&pool).await?;
    debug!(
        "Dashboard: {} sensor types, weather present: {}",
        latest.len(),
        weather.is_some()
    );

    Ok(Html(
        DashboardPage::new(&latest, weather.as_ref(), &averages).to_string(),
    ))
}

async fn sensors(State((pool, _)): State<AppState>) -> Result<Html<String>, AppError> {
    // ---
    info!("GET /sensors");
    let readings = store::recent_sensor_table(&pool, SENSOR_TABLE_ROWS).await?;
    Ok(Html(SensorsPage::new(&readings).to_string()))
}

async fn predictions(State((pool, _)): State<AppState>) -> Result<Html<String>, AppError> {
    // ---
    info!("GET /predictions");
    let recommendations = store::all_recommendations(&pool).await?;
    Ok(Html(PredictionsPage::new(&recommendations).to_string()))
}

async fn analytics() -> Html<String> {
    Html(AnalyticsPage {}.to_string())
}
