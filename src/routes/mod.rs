//! Route gateway: merges every subrouter and attaches shared state.
use axum::Router;
use sqlx::SqlitePool;

use crate::Config;

mod health;
mod pages;
mod recommend_crop;
mod sensor_data;
mod weather_data;

/// Shared state handed to every handler.
pub type AppState = (SqlitePool, Config);

/// Default row count for the JSON list endpoints.
pub const DEFAULT_LIMIT: i64 = 10;

// ---

pub fn router(pool: SqlitePool, config: Config) -> Router {
    // ---
    Router::new()
        .merge(pages::router())
        .merge(sensor_data::router())
        .merge(weather_data::router())
        .merge(recommend_crop::router())
        .merge(health::router())
        .with_state((pool, config))
}
